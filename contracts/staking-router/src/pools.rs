//! Pool Registry
//!
//! Maps external pool ids to their current asset pair. Entries are only
//! created through the admin-gated create paths; `refresh_pool` may
//! re-point an existing entry's stake asset but never creates one.

use stakeroute_common::{
    access_control::Capability,
    assets::AssetBank,
    check,
    errors::{StakeRouteError, StakeRouteResult},
    events::RouterEvent,
    ledger::Ledger,
    types::{Address, AssetId, Generation, PoolId, PoolIdentity, PoolRegistryEntry},
    validation::require_nonzero_address,
};

use crate::RouterContext;

impl<'a, L: Ledger, B: AssetBank> RouterContext<'a, L, B> {
    /// Register `pool_id` for `reward_asset` and ensure its current ledger
    pub fn create_pool(&mut self, pool_id: &PoolId, reward_asset: &AssetId) -> StakeRouteResult<Address> {
        self.authorize(Capability::FeeDistribution)?;
        check!(
            !self.state.pools.contains_key(pool_id),
            StakeRouteError::PoolAlreadyExists { pool_id: *pool_id }
        );

        let identity = self.resolve_identity(reward_asset)?;
        let ledger = self.ensure_ledger(&identity)?;

        self.state
            .pools
            .insert(*pool_id, PoolRegistryEntry::new(*pool_id, identity, self.block_height));

        let block_height = self.block_height;
        self.emit(RouterEvent::PoolCreated {
            pool_id: *pool_id,
            ledger,
            stake_asset: identity.stake_asset,
            reward_asset: identity.reward_asset,
            block_height,
        });

        Ok(ledger)
    }

    /// `create_pool` with the reward asset taken from the pool asset registry
    pub fn create_registered_pool(&mut self, pool_id: &PoolId) -> StakeRouteResult<Address> {
        let reward_asset = self
            .registry
            .asset_for_pool(pool_id)
            .ok_or(StakeRouteError::UnknownPool { pool_id: *pool_id })?;
        self.create_pool(pool_id, &reward_asset)
    }

    /// Re-resolve the stake asset of an existing pool.
    ///
    /// Returns `false` without touching anything when the current ledger
    /// of the newly resolved identity is already deployed. Open to any
    /// caller; the provider is the authority on pairings.
    pub fn refresh_pool(&mut self, pool_id: &PoolId) -> StakeRouteResult<bool> {
        let entry = self.entry(pool_id)?;
        let identity = self.resolve_identity(&entry.identity.reward_asset)?;

        let current = self.ledger_address(&identity, Generation::CURRENT);
        if self.state.host.has_code(&current) {
            return Ok(false);
        }

        let ledger = self.ensure_ledger(&identity)?;

        let block_height = self.block_height;
        let updated = PoolRegistryEntry {
            identity,
            updated_at: block_height,
            ..entry
        };
        self.state.pools.insert(*pool_id, updated);

        self.emit(RouterEvent::PoolUpdated {
            pool_id: *pool_id,
            ledger,
            stake_asset: identity.stake_asset,
            block_height,
        });

        Ok(true)
    }

    /// Pair `reward_asset` with the provider's stake asset
    fn resolve_identity(&self, reward_asset: &AssetId) -> StakeRouteResult<PoolIdentity> {
        require_nonzero_address(reward_asset, "reward asset cannot be zero")?;
        let stake_asset = self.provider.stake_asset_for(reward_asset)?;
        let identity = PoolIdentity::new(stake_asset, *reward_asset);
        check!(
            identity.is_complete(),
            StakeRouteError::InvalidAddress { reason: "provider returned zero stake asset" }
        );
        Ok(identity)
    }
}
