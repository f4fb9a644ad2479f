//! Staking and Reward Routing
//!
//! Stake sits in router custody under the router identity; reward assets
//! sit under each ledger's own address until claimed. Ledger balances are
//! the only record of who owns what.
//!
//! Reward injection never aborts on a pool that cannot take rewards: it
//! records a `RewardsSkipped` event and returns `false`, so one bad pool
//! cannot block a batch.

use stakeroute_common::{
    access_control::Capability,
    assets::AssetBank,
    check,
    constants::limits::MAX_REWARD_BATCH,
    errors::{StakeRouteError, StakeRouteResult},
    events::{RouterEvent, SkipReason},
    ledger::Ledger,
    types::{Address, Generation, PoolId, PoolIdentity},
    validation::require_positive,
    Vec,
};

use crate::{ExitReceipt, RouterContext};

impl<'a, L: Ledger, B: AssetBank> RouterContext<'a, L, B> {
    /// Stake `amount` of the pool's stake asset
    pub fn deposit(&mut self, pool_id: &PoolId, amount: u64) -> StakeRouteResult<()> {
        if self.state.config.deposits_paused {
            check!(
                self.authorities().holds(&self.caller, Capability::Owner),
                StakeRouteError::DepositsPaused
            );
        }
        require_positive(amount)?;

        self.refresh_pool(pool_id)?;
        let entry = self.entry(pool_id)?;
        let ledger = self.ledger_address(&entry.identity, Generation::CURRENT);

        let router_id = self.router_id();
        let account = self.caller;
        self.state
            .bank
            .transfer(&entry.identity.stake_asset, &account, &router_id, amount)?;
        self.ledger_mut(&ledger, Generation::CURRENT)?
            .mint(&router_id, &account, amount)?;

        let block_height = self.block_height;
        self.emit(RouterEvent::Deposited {
            pool_id: *pool_id,
            account,
            amount,
            block_height,
        });
        Ok(())
    }

    /// Unstake `amount` from the pool's current ledger
    pub fn withdraw(&mut self, pool_id: &PoolId, amount: u64) -> StakeRouteResult<()> {
        require_positive(amount)?;
        let entry = self.entry(pool_id)?;
        let ledger = self.ledger_address(&entry.identity, Generation::CURRENT);
        self.withdraw_from(&ledger, Generation::CURRENT, &entry.identity, amount)
    }

    /// Pay out the caller's reward from the pool's current ledger
    pub fn claim_rewards(&mut self, pool_id: &PoolId) -> StakeRouteResult<u64> {
        let entry = self.entry(pool_id)?;
        let ledger = self.ledger_address(&entry.identity, Generation::CURRENT);
        self.claim_from(&ledger, Generation::CURRENT, &entry.identity)
    }

    /// Claim, then withdraw the caller's full current balance
    pub fn exit(&mut self, pool_id: &PoolId) -> StakeRouteResult<ExitReceipt> {
        let entry = self.entry(pool_id)?;
        self.exit_ledger(&entry.identity, true)
    }

    /// Inject `amount` of reward into a pool; `false` if it was skipped
    pub fn receive_rewards(&mut self, pool_id: &PoolId, amount: u64) -> StakeRouteResult<bool> {
        self.authorize(Capability::FeeDistribution)?;
        self.inject_rewards(pool_id, amount)
    }

    /// `receive_rewards` over several pools in one call
    pub fn receive_rewards_batch(&mut self, entries: &[(PoolId, u64)]) -> StakeRouteResult<Vec<bool>> {
        self.authorize(Capability::FeeDistribution)?;
        check!(
            entries.len() <= MAX_REWARD_BATCH,
            StakeRouteError::BatchTooLarge {
                size: entries.len(),
                maximum: MAX_REWARD_BATCH,
            }
        );

        entries
            .iter()
            .map(|(pool_id, amount)| self.inject_rewards(pool_id, *amount))
            .collect()
    }

    fn inject_rewards(&mut self, pool_id: &PoolId, amount: u64) -> StakeRouteResult<bool> {
        let Some(entry) = self.state.pools.get(pool_id).cloned() else {
            return Ok(self.skip_rewards(pool_id, amount, SkipReason::UnknownPool));
        };

        let ledger = self.ledger_address(&entry.identity, Generation::CURRENT);
        let total_stake = match self.state.host.instance(&ledger) {
            Some(instance) => instance.total_supply(),
            None => return Ok(self.skip_rewards(pool_id, amount, SkipReason::LedgerNotDeployed)),
        };
        if total_stake == 0 {
            return Ok(self.skip_rewards(pool_id, amount, SkipReason::NoStake));
        }

        let router_id = self.router_id();
        let payer = self.caller;
        self.state
            .bank
            .transfer(&entry.identity.reward_asset, &payer, &ledger, amount)?;
        self.ledger_mut(&ledger, Generation::CURRENT)?
            .distribute_rewards(&router_id, amount)?;

        let block_height = self.block_height;
        self.emit(RouterEvent::FeesReceived {
            pool_id: *pool_id,
            amount,
            block_height,
        });
        Ok(true)
    }

    fn skip_rewards(&mut self, pool_id: &PoolId, amount: u64, reason: SkipReason) -> bool {
        let block_height = self.block_height;
        self.emit(RouterEvent::RewardsSkipped {
            pool_id: *pool_id,
            amount,
            reason,
            block_height,
        });
        false
    }

    /// Optionally claim, then withdraw the caller's full balance on the
    /// current ledger of `identity`. The ledger must exist.
    pub(crate) fn exit_ledger(&mut self, identity: &PoolIdentity, claim: bool) -> StakeRouteResult<ExitReceipt> {
        let ledger = self.ledger_address(identity, Generation::CURRENT);
        let balance = self.ledger(&ledger, Generation::CURRENT)?.balance_of(&self.caller);

        let claimed = if claim {
            self.claim_from(&ledger, Generation::CURRENT, identity)?
        } else {
            0
        };
        if balance > 0 {
            self.withdraw_from(&ledger, Generation::CURRENT, identity, balance)?;
        }

        Ok(ExitReceipt {
            claimed,
            withdrawn: balance,
        })
    }

    /// Burn the caller's credit on `ledger` and return stake from custody
    pub(crate) fn withdraw_from(
        &mut self,
        ledger: &Address,
        generation: Generation,
        identity: &PoolIdentity,
        amount: u64,
    ) -> StakeRouteResult<()> {
        let router_id = self.router_id();
        let account = self.caller;
        self.ledger_mut(ledger, generation)?
            .burn_from(&router_id, &account, amount)?;
        self.state
            .bank
            .transfer(&identity.stake_asset, &router_id, &account, amount)?;

        let block_height = self.block_height;
        self.emit(RouterEvent::Withdrawn {
            ledger: *ledger,
            account,
            amount,
            block_height,
        });
        Ok(())
    }

    /// Pay the caller's withdrawable reward on `ledger` out of the ledger's custody
    pub(crate) fn claim_from(
        &mut self,
        ledger: &Address,
        generation: Generation,
        identity: &PoolIdentity,
    ) -> StakeRouteResult<u64> {
        let router_id = self.router_id();
        let account = self.caller;
        let payout = self
            .ledger_mut(ledger, generation)?
            .withdraw_reward(&router_id, &account)?;

        if payout > 0 {
            self.state
                .bank
                .transfer(&identity.reward_asset, ledger, &account, payout)?;

            let block_height = self.block_height;
            self.emit(RouterEvent::RewardsClaimed {
                ledger: *ledger,
                account,
                amount: payout,
                block_height,
            });
        }
        Ok(payout)
    }
}
