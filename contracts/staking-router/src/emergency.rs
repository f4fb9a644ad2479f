//! Emergency and Migration Paths
//!
//! Exits here take an explicit asset pair instead of a pool id, so a
//! stale or corrupted registry entry can never lock stake in a ledger.
//!
//! Migration is the only path that moves balance between generations. It
//! burns the caller's whole legacy balance and mints the same amount on
//! the current ledger; stake custody does not move because both ledgers
//! account for the same stake asset held by the router.

use stakeroute_common::{
    assets::AssetBank,
    check,
    errors::{StakeRouteError, StakeRouteResult},
    events::RouterEvent,
    ledger::Ledger,
    types::{Generation, PoolId, PoolIdentity},
};

use crate::{ExitReceipt, MigrationReceipt, RouterContext};

impl<'a, L: Ledger, B: AssetBank> RouterContext<'a, L, B> {
    /// Withdraw the caller's full current balance for an explicit pair,
    /// claiming first when `claim` is set
    pub fn emergency_exit(&mut self, identity: &PoolIdentity, claim: bool) -> StakeRouteResult<ExitReceipt> {
        self.exit_ledger(identity, claim)
    }

    /// Move the caller's legacy balance for `pool_id` onto the current ledger
    pub fn emergency_migrate(&mut self, pool_id: &PoolId, claim: bool) -> StakeRouteResult<MigrationReceipt> {
        let entry = self.entry(pool_id)?;
        let identity = entry.identity;

        let legacy = self.ledger_address(&identity, Generation::LEGACY);
        self.ledger(&legacy, Generation::LEGACY)?;

        let current = self.ledger_address(&identity, Generation::CURRENT);
        if !self.state.host.has_code(&current) {
            let deployed = self.deploy_ledger(&identity, Generation::CURRENT)?;
            check!(
                deployed == current,
                StakeRouteError::DeployedAddressMismatch {
                    expected: current,
                    actual: deployed,
                }
            );
        }

        let account = self.caller;
        let amount = self.ledger(&legacy, Generation::LEGACY)?.balance_of(&account);
        check!(amount > 0, StakeRouteError::NothingToMigrate);

        let claimed = if claim {
            self.claim_from(&legacy, Generation::LEGACY, &identity)?
        } else {
            0
        };

        let router_id = self.router_id();
        self.ledger_mut(&legacy, Generation::LEGACY)?
            .burn_from(&router_id, &account, amount)?;
        self.ledger_mut(&current, Generation::CURRENT)?
            .mint(&router_id, &account, amount)?;

        let block_height = self.block_height;
        self.emit(RouterEvent::Migrated {
            pool_id: *pool_id,
            account,
            amount,
            from_ledger: legacy,
            to_ledger: current,
            block_height,
        });

        Ok(MigrationReceipt {
            from_ledger: legacy,
            to_ledger: current,
            amount,
            claimed,
        })
    }
}
