//! StakeRoute Reward Ledger
//!
//! Reference ledger instance: tracks staked balances for one pool
//! generation and spreads injected rewards pro rata over them.
//!
//! ## Accounting
//!
//! Rewards accrue through a magnified reward-per-share counter. Each
//! account carries a signed correction so that minting or burning never
//! changes rewards that were already earned:
//!
//! ```text
//! accumulated(a) = (reward_per_share * balance(a) + correction(a)) / MAGNITUDE
//! withdrawable(a) = accumulated(a) - withdrawn(a)
//! ```
//!
//! Only the initializing operator (the router that deployed the clone)
//! may mutate the ledger.

use std::collections::BTreeMap;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use stakeroute_common::{
    check,
    constants::{rewards::MAGNITUDE, ZERO_ADDRESS},
    errors::{StakeRouteError, StakeRouteResult},
    ledger::Ledger,
    types::{Address, AssetId},
    validation::{require_nonzero_address, require_positive, require_sufficient},
};

// ============ Ledger State ============

/// Pro-rata reward ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct RewardLedger {
    /// Operator allowed to mutate (set on initialize)
    pub owner: Address,
    /// Asset paid out as rewards
    pub reward_asset: AssetId,
    /// Display name
    pub name: String,
    /// Display symbol
    pub symbol: String,
    /// Whether initialize has run
    pub initialized: bool,
    /// Sum of all balances
    pub total_supply: u64,
    /// Cumulative rewards distributed
    pub total_distributed: u64,
    /// Rewards per unit of balance, scaled by MAGNITUDE
    pub magnified_reward_per_share: u128,
    balances: BTreeMap<Address, u64>,
    corrections: BTreeMap<Address, i128>,
    withdrawn: BTreeMap<Address, u64>,
}

impl Default for RewardLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl RewardLedger {
    /// Uninitialized ledger, as installed for a template
    pub fn new() -> Self {
        Self {
            owner: ZERO_ADDRESS,
            reward_asset: ZERO_ADDRESS,
            name: String::new(),
            symbol: String::new(),
            initialized: false,
            total_supply: 0,
            total_distributed: 0,
            magnified_reward_per_share: 0,
            balances: BTreeMap::new(),
            corrections: BTreeMap::new(),
            withdrawn: BTreeMap::new(),
        }
    }

    /// Rewards ever earned by `account`, withdrawn or not
    pub fn accumulated_reward_of(&self, account: &Address) -> StakeRouteResult<u64> {
        let balance = self.balance_of(account) as u128;
        let magnified = self
            .magnified_reward_per_share
            .checked_mul(balance)
            .ok_or(StakeRouteError::Overflow)?;
        let magnified = i128::try_from(magnified).map_err(|_| StakeRouteError::Overflow)?;
        let corrected = magnified
            .checked_add(self.correction_of(account))
            .ok_or(StakeRouteError::Overflow)?;

        // Negative only through rounding on burn; nothing accrued.
        if corrected <= 0 {
            return Ok(0);
        }
        let accumulated = (corrected as u128) / MAGNITUDE;
        u64::try_from(accumulated).map_err(|_| StakeRouteError::Overflow)
    }

    /// Rewards already paid to `account`
    pub fn withdrawn_reward_of(&self, account: &Address) -> u64 {
        self.withdrawn.get(account).copied().unwrap_or(0)
    }

    /// Number of accounts with a non-zero balance
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|b| **b > 0).count()
    }

    fn correction_of(&self, account: &Address) -> i128 {
        self.corrections.get(account).copied().unwrap_or(0)
    }

    fn require_owner(&self, operator: &Address) -> StakeRouteResult<()> {
        check!(self.initialized, StakeRouteError::LedgerNotInitialized);
        check!(
            *operator == self.owner,
            StakeRouteError::Unauthorized {
                expected: self.owner,
                actual: *operator,
            }
        );
        Ok(())
    }

    /// reward_per_share * amount, as a signed correction delta
    fn correction_delta(&self, amount: u64) -> StakeRouteResult<i128> {
        let delta = self
            .magnified_reward_per_share
            .checked_mul(amount as u128)
            .ok_or(StakeRouteError::Overflow)?;
        i128::try_from(delta).map_err(|_| StakeRouteError::Overflow)
    }
}

// ============ Ledger Contract ============

impl Ledger for RewardLedger {
    fn initialize(
        &mut self,
        operator: &Address,
        reward_asset: &AssetId,
        name: &str,
        symbol: &str,
    ) -> StakeRouteResult<()> {
        check!(!self.initialized, StakeRouteError::LedgerAlreadyInitialized);
        require_nonzero_address(operator, "ledger owner cannot be zero address")?;
        require_nonzero_address(reward_asset, "reward asset cannot be zero address")?;

        self.owner = *operator;
        self.reward_asset = *reward_asset;
        self.name = name.to_string();
        self.symbol = symbol.to_string();
        self.initialized = true;
        Ok(())
    }

    fn mint(&mut self, operator: &Address, beneficiary: &Address, amount: u64) -> StakeRouteResult<()> {
        self.require_owner(operator)?;
        require_positive(amount)?;

        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(StakeRouteError::Overflow)?;
        let new_balance = self
            .balance_of(beneficiary)
            .checked_add(amount)
            .ok_or(StakeRouteError::Overflow)?;
        let new_correction = self
            .correction_of(beneficiary)
            .checked_sub(self.correction_delta(amount)?)
            .ok_or(StakeRouteError::Underflow)?;

        self.total_supply = new_supply;
        self.balances.insert(*beneficiary, new_balance);
        self.corrections.insert(*beneficiary, new_correction);
        Ok(())
    }

    fn burn_from(&mut self, operator: &Address, account: &Address, amount: u64) -> StakeRouteResult<()> {
        self.require_owner(operator)?;
        require_positive(amount)?;

        let balance = self.balance_of(account);
        require_sufficient(balance, amount)?;
        let new_correction = self
            .correction_of(account)
            .checked_add(self.correction_delta(amount)?)
            .ok_or(StakeRouteError::Overflow)?;

        self.total_supply -= amount;
        self.balances.insert(*account, balance - amount);
        self.corrections.insert(*account, new_correction);
        Ok(())
    }

    fn distribute_rewards(&mut self, operator: &Address, amount: u64) -> StakeRouteResult<()> {
        self.require_owner(operator)?;
        check!(self.total_supply > 0, StakeRouteError::NoStakeToReward);
        if amount == 0 {
            return Ok(());
        }

        let increase = (amount as u128)
            .checked_mul(MAGNITUDE)
            .ok_or(StakeRouteError::Overflow)?
            / self.total_supply as u128;

        self.magnified_reward_per_share = self
            .magnified_reward_per_share
            .checked_add(increase)
            .ok_or(StakeRouteError::Overflow)?;
        self.total_distributed = self
            .total_distributed
            .checked_add(amount)
            .ok_or(StakeRouteError::Overflow)?;
        Ok(())
    }

    fn withdraw_reward(&mut self, operator: &Address, account: &Address) -> StakeRouteResult<u64> {
        self.require_owner(operator)?;

        let payout = self
            .accumulated_reward_of(account)?
            .saturating_sub(self.withdrawn_reward_of(account));
        if payout > 0 {
            let withdrawn = self
                .withdrawn_reward_of(account)
                .checked_add(payout)
                .ok_or(StakeRouteError::Overflow)?;
            self.withdrawn.insert(*account, withdrawn);
        }
        Ok(payout)
    }

    fn balance_of(&self, account: &Address) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn total_supply(&self) -> u64 {
        self.total_supply
    }

    fn withdrawable_reward_of(&self, account: &Address) -> u64 {
        self.accumulated_reward_of(account)
            .unwrap_or(0)
            .saturating_sub(self.withdrawn_reward_of(account))
    }

    fn reward_asset(&self) -> AssetId {
        self.reward_asset
    }
}

// ============ Tests ============
