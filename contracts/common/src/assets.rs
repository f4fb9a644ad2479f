//! Asset Transfer Primitive
//!
//! The router moves stake and reward assets through an `AssetBank`. A
//! transfer either moves the full amount or fails without touching any
//! balance.
//!
//! `AssetBook` is the in-memory bank: balances keyed by (asset, holder),
//! plus a faucet `mint` for seeding accounts.

use crate::{check, BTreeMap, StakeRouteError, StakeRouteResult};
use crate::types::{Address, AssetId};

/// All-or-nothing asset movements between holders
pub trait AssetBank: Clone {
    /// Move `amount` of `asset` from `from` to `to`
    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &Address,
        to: &Address,
        amount: u64,
    ) -> StakeRouteResult<()>;

    /// Balance of `holder` in `asset`
    fn balance_of(&self, asset: &AssetId, holder: &Address) -> u64;
}

/// In-memory asset balances
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetBook {
    balances: BTreeMap<(AssetId, Address), u64>,
    supplies: BTreeMap<AssetId, u64>,
}

impl AssetBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `amount` of `asset` out of thin air for `to`
    pub fn mint(&mut self, asset: &AssetId, to: &Address, amount: u64) -> StakeRouteResult<()> {
        let supply = self.supplies.get(asset).copied().unwrap_or(0);
        let new_supply = supply.checked_add(amount).ok_or(StakeRouteError::Overflow)?;
        let balance = self.balance_of(asset, to);
        let new_balance = balance.checked_add(amount).ok_or(StakeRouteError::Overflow)?;

        self.supplies.insert(*asset, new_supply);
        self.balances.insert((*asset, *to), new_balance);
        Ok(())
    }

    /// Total amount of `asset` in existence
    pub fn total_supply(&self, asset: &AssetId) -> u64 {
        self.supplies.get(asset).copied().unwrap_or(0)
    }
}

impl AssetBank for AssetBook {
    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &Address,
        to: &Address,
        amount: u64,
    ) -> StakeRouteResult<()> {
        let available = self.balance_of(asset, from);
        check!(
            available >= amount,
            StakeRouteError::InsufficientBalance { available, requested: amount }
        );
        if amount == 0 || from == to {
            return Ok(());
        }

        let received = self
            .balance_of(asset, to)
            .checked_add(amount)
            .ok_or(StakeRouteError::Overflow)?;

        self.balances.insert((*asset, *from), available - amount);
        self.balances.insert((*asset, *to), received);
        Ok(())
    }

    fn balance_of(&self, asset: &AssetId, holder: &Address) -> u64 {
        self.balances.get(&(*asset, *holder)).copied().unwrap_or(0)
    }
}
