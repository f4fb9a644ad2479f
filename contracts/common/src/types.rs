//! Core Types for the StakeRoute Protocol
//!
//! Identities, pool records and router actions shared by every crate in
//! the workspace.

use crate::Vec;
use crate::constants::{generation, ZERO_ADDRESS};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Type alias for addresses (32-byte identity)
pub type Address = [u8; 32];

/// Type alias for asset identities
pub type AssetId = [u8; 32];

/// Type alias for external pool identifiers (e.g. a vault id)
pub type PoolId = [u8; 32];

// ============ Generation ============

/// Ordinal version tag appended to the ledger derivation input.
///
/// Generation is never stored per balance; it only selects which derived
/// address a pool's balances live at.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct Generation(pub u32);

impl Generation {
    /// Superseded ledger generation
    pub const LEGACY: Self = Self(generation::LEGACY);
    /// Live ledger generation
    pub const CURRENT: Self = Self(generation::CURRENT);

    pub fn value(&self) -> u32 {
        self.0
    }
}

// ============ Pool Types ============

/// The (stake asset, reward asset) pair a ledger accounts for
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct PoolIdentity {
    /// Asset deposited by stakers and held in router custody
    pub stake_asset: AssetId,
    /// Asset paid out as rewards
    pub reward_asset: AssetId,
}

impl PoolIdentity {
    pub fn new(stake_asset: AssetId, reward_asset: AssetId) -> Self {
        Self { stake_asset, reward_asset }
    }

    /// True when neither side is the null identity
    pub fn is_complete(&self) -> bool {
        self.stake_asset != ZERO_ADDRESS && self.reward_asset != ZERO_ADDRESS
    }
}

/// Registry entry for an external pool identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PoolRegistryEntry {
    /// External pool identifier
    pub pool_id: PoolId,
    /// Current asset pair
    pub identity: PoolIdentity,
    /// Block height when the entry was created
    pub created_at: u64,
    /// Block height of the last stake-asset update
    pub updated_at: u64,
}

impl PoolRegistryEntry {
    pub fn new(pool_id: PoolId, identity: PoolIdentity, block_height: u64) -> Self {
        Self {
            pool_id,
            identity,
            created_at: block_height,
            updated_at: block_height,
        }
    }
}

// ============ Call Context ============

/// Who is calling, and when
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct CallContext {
    /// Caller identity
    pub caller: Address,
    /// Current block height
    pub block_height: u64,
}

impl CallContext {
    pub fn new(caller: Address, block_height: u64) -> Self {
        Self { caller, block_height }
    }
}

// ============ Action Types ============

/// Actions for the Staking Router
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum RouterAction {
    /// Create a pool for an explicit reward asset (admin only)
    CreatePool { pool_id: PoolId, reward_asset: AssetId },
    /// Create a pool, resolving its reward asset from the pool asset registry (admin only)
    CreateRegisteredPool { pool_id: PoolId },
    /// Re-resolve a pool's stake asset (any caller)
    RefreshPool { pool_id: PoolId },
    /// Stake into the current ledger
    Deposit { pool_id: PoolId, amount: u64 },
    /// Unstake from the current ledger
    Withdraw { pool_id: PoolId, amount: u64 },
    /// Claim rewards from the current ledger
    ClaimRewards { pool_id: PoolId },
    /// Claim, then withdraw the full balance
    Exit { pool_id: PoolId },
    /// Inject rewards into a pool (admin only, soft failure)
    ReceiveRewards { pool_id: PoolId, amount: u64 },
    /// Inject rewards into several pools in one call (admin only)
    ReceiveRewardsBatch { entries: Vec<(PoolId, u64)> },
    /// Withdraw full balance from an explicit pair, bypassing the registry
    EmergencyExit { stake_asset: AssetId, reward_asset: AssetId },
    /// Claim, then withdraw full balance from an explicit pair
    EmergencyExitAndClaim { stake_asset: AssetId, reward_asset: AssetId },
    /// Move the full legacy balance to the current ledger
    EmergencyMigrate { pool_id: PoolId },
    /// Claim legacy rewards, then migrate
    EmergencyClaimAndMigrate { pool_id: PoolId },
    /// Pause or unpause deposits (owner only)
    SetDepositsPaused { paused: bool },
    /// Point at a new ledger template (owner only)
    SetLedgerTemplate { template: Address },
    /// Hand ownership to a new address (owner only)
    TransferOwnership { new_owner: Address },
}
