//! External Collaborators
//!
//! Seams for the two directories the router consults but does not own:
//!
//! - `AssetPairProvider`: reward asset → paired stake asset and display name
//! - `PoolAssetRegistry`: pool id → reward asset, plus the fee authority
//!
//! The static implementations are plain lookup tables, suitable for tests
//! and for hosts that configure pairs up front.

use crate::{BTreeMap, String, StakeRouteError, StakeRouteResult};
use crate::constants::ZERO_ADDRESS;
use crate::types::{Address, AssetId, PoolId};

/// Maps a reward asset to its staking pair
pub trait AssetPairProvider {
    /// Stake asset paired with `reward_asset`
    fn stake_asset_for(&self, reward_asset: &AssetId) -> StakeRouteResult<AssetId>;

    /// Human-readable name for the ledger of `reward_asset`
    fn display_name_for(&self, reward_asset: &AssetId) -> StakeRouteResult<String>;
}

/// Maps pool ids to reward assets
pub trait PoolAssetRegistry {
    /// Reward asset for `pool_id`, if the registry knows it
    fn asset_for_pool(&self, pool_id: &PoolId) -> Option<AssetId>;

    /// Principal allowed to inject rewards
    fn fee_authority(&self) -> Address;
}

/// A listed staking pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairListing {
    pub stake_asset: AssetId,
    pub display_name: String,
}

/// Table-backed asset-pair provider
#[derive(Debug, Clone, Default)]
pub struct StaticPairProvider {
    listings: BTreeMap<AssetId, PairListing>,
}

impl StaticPairProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// List (or re-list) the stake asset paired with `reward_asset`
    pub fn list(&mut self, reward_asset: AssetId, stake_asset: AssetId, display_name: &str) {
        self.listings.insert(
            reward_asset,
            PairListing {
                stake_asset,
                display_name: String::from(display_name),
            },
        );
    }

    /// Builder form of `list`
    pub fn with_pair(mut self, reward_asset: AssetId, stake_asset: AssetId, display_name: &str) -> Self {
        self.list(reward_asset, stake_asset, display_name);
        self
    }
}

impl AssetPairProvider for StaticPairProvider {
    fn stake_asset_for(&self, reward_asset: &AssetId) -> StakeRouteResult<AssetId> {
        self.listings
            .get(reward_asset)
            .map(|listing| listing.stake_asset)
            .ok_or(StakeRouteError::UnknownRewardAsset { reward_asset: *reward_asset })
    }

    fn display_name_for(&self, reward_asset: &AssetId) -> StakeRouteResult<String> {
        self.listings
            .get(reward_asset)
            .map(|listing| listing.display_name.clone())
            .ok_or(StakeRouteError::UnknownRewardAsset { reward_asset: *reward_asset })
    }
}

/// Table-backed pool asset registry
#[derive(Debug, Clone)]
pub struct StaticPoolRegistry {
    assets: BTreeMap<PoolId, AssetId>,
    fee_authority: Address,
}

impl Default for StaticPoolRegistry {
    fn default() -> Self {
        Self {
            assets: BTreeMap::new(),
            fee_authority: ZERO_ADDRESS,
        }
    }
}

impl StaticPoolRegistry {
    pub fn new(fee_authority: Address) -> Self {
        Self {
            assets: BTreeMap::new(),
            fee_authority,
        }
    }

    pub fn register(&mut self, pool_id: PoolId, reward_asset: AssetId) {
        self.assets.insert(pool_id, reward_asset);
    }

    /// Builder form of `register`
    pub fn with_pool(mut self, pool_id: PoolId, reward_asset: AssetId) -> Self {
        self.register(pool_id, reward_asset);
        self
    }

    pub fn set_fee_authority(&mut self, fee_authority: Address) {
        self.fee_authority = fee_authority;
    }
}

impl PoolAssetRegistry for StaticPoolRegistry {
    fn asset_for_pool(&self, pool_id: &PoolId) -> Option<AssetId> {
        self.assets.get(pool_id).copied()
    }

    fn fee_authority(&self) -> Address {
        self.fee_authority
    }
}
