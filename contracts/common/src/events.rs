//! Router Events
//!
//! Events are emitted during router execution and can be indexed
//! off-chain to reconstruct pool history and reward flows. Events
//! from a call that fails are discarded together with its state.

use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use crate::types::{Address, AssetId, PoolId};

/// Event types for indexing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum EventType {
    // Pool Registry Events (0x01 - 0x1F)
    PoolCreated = 0x01,
    PoolUpdated = 0x02,
    LedgerDeployed = 0x03,

    // Staking Events (0x20 - 0x3F)
    Deposited = 0x20,
    Withdrawn = 0x21,
    RewardsClaimed = 0x22,
    Migrated = 0x23,

    // Reward Events (0x40 - 0x5F)
    FeesReceived = 0x40,
    RewardsSkipped = 0x41,

    // Admin Events (0x80 - 0x9F)
    DepositsPauseChanged = 0x80,
    LedgerTemplateChanged = 0x81,
    OwnershipTransferred = 0x82,
    PairProviderChanged = 0x83,
    PoolRegistryChanged = 0x84,
}

/// Why a reward injection was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum SkipReason {
    /// Pool id has no registry entry
    UnknownPool,
    /// Current ledger has not been deployed
    LedgerNotDeployed,
    /// Current ledger has zero total stake
    NoStake,
}

/// Main event enum containing all router events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum RouterEvent {
    // ============ Pool Registry Events ============

    /// Emitted when a pool entry is created
    PoolCreated {
        pool_id: PoolId,
        ledger: Address,
        stake_asset: AssetId,
        reward_asset: AssetId,
        block_height: u64,
    },

    /// Emitted when a pool's stake asset is re-pointed
    PoolUpdated {
        pool_id: PoolId,
        ledger: Address,
        stake_asset: AssetId,
        block_height: u64,
    },

    /// Emitted when a ledger instance is deployed and initialized
    LedgerDeployed {
        ledger: Address,
        stake_asset: AssetId,
        reward_asset: AssetId,
        generation: u32,
        block_height: u64,
    },

    // ============ Staking Events ============

    /// Emitted when stake is deposited
    Deposited {
        pool_id: PoolId,
        account: Address,
        amount: u64,
        block_height: u64,
    },

    /// Emitted when stake is withdrawn
    Withdrawn {
        ledger: Address,
        account: Address,
        amount: u64,
        block_height: u64,
    },

    /// Emitted when rewards are paid out
    RewardsClaimed {
        ledger: Address,
        account: Address,
        amount: u64,
        block_height: u64,
    },

    /// Emitted when a balance moves from the legacy to the current ledger
    Migrated {
        pool_id: PoolId,
        account: Address,
        amount: u64,
        from_ledger: Address,
        to_ledger: Address,
        block_height: u64,
    },

    // ============ Reward Events ============

    /// Emitted when rewards are injected into a pool
    FeesReceived {
        pool_id: PoolId,
        amount: u64,
        block_height: u64,
    },

    /// Emitted when a reward injection is skipped
    RewardsSkipped {
        pool_id: PoolId,
        amount: u64,
        reason: SkipReason,
        block_height: u64,
    },

    // ============ Admin Events ============

    /// Emitted when the deposit pause flag changes
    DepositsPauseChanged {
        paused: bool,
        by: Address,
        block_height: u64,
    },

    /// Emitted when the ledger template changes
    LedgerTemplateChanged {
        old_template: Address,
        new_template: Address,
        block_height: u64,
    },

    /// Emitted when ownership changes
    OwnershipTransferred {
        old_owner: Address,
        new_owner: Address,
        block_height: u64,
    },

    /// Emitted when the asset pair provider is replaced
    PairProviderChanged {
        by: Address,
        block_height: u64,
    },

    /// Emitted when the pool asset registry is replaced
    PoolRegistryChanged {
        fee_authority: Address,
        by: Address,
        block_height: u64,
    },
}

impl RouterEvent {
    /// Get the event type for filtering
    pub fn event_type(&self) -> EventType {
        match self {
            Self::PoolCreated { .. } => EventType::PoolCreated,
            Self::PoolUpdated { .. } => EventType::PoolUpdated,
            Self::LedgerDeployed { .. } => EventType::LedgerDeployed,
            Self::Deposited { .. } => EventType::Deposited,
            Self::Withdrawn { .. } => EventType::Withdrawn,
            Self::RewardsClaimed { .. } => EventType::RewardsClaimed,
            Self::Migrated { .. } => EventType::Migrated,
            Self::FeesReceived { .. } => EventType::FeesReceived,
            Self::RewardsSkipped { .. } => EventType::RewardsSkipped,
            Self::DepositsPauseChanged { .. } => EventType::DepositsPauseChanged,
            Self::LedgerTemplateChanged { .. } => EventType::LedgerTemplateChanged,
            Self::OwnershipTransferred { .. } => EventType::OwnershipTransferred,
            Self::PairProviderChanged { .. } => EventType::PairProviderChanged,
            Self::PoolRegistryChanged { .. } => EventType::PoolRegistryChanged,
        }
    }

    /// Get the block height when event occurred
    pub fn block_height(&self) -> u64 {
        match self {
            Self::PoolCreated { block_height, .. } => *block_height,
            Self::PoolUpdated { block_height, .. } => *block_height,
            Self::LedgerDeployed { block_height, .. } => *block_height,
            Self::Deposited { block_height, .. } => *block_height,
            Self::Withdrawn { block_height, .. } => *block_height,
            Self::RewardsClaimed { block_height, .. } => *block_height,
            Self::Migrated { block_height, .. } => *block_height,
            Self::FeesReceived { block_height, .. } => *block_height,
            Self::RewardsSkipped { block_height, .. } => *block_height,
            Self::DepositsPauseChanged { block_height, .. } => *block_height,
            Self::LedgerTemplateChanged { block_height, .. } => *block_height,
            Self::OwnershipTransferred { block_height, .. } => *block_height,
            Self::PairProviderChanged { block_height, .. } => *block_height,
            Self::PoolRegistryChanged { block_height, .. } => *block_height,
        }
    }

    /// Pool id the event refers to, if any
    pub fn pool_id(&self) -> Option<PoolId> {
        match self {
            Self::PoolCreated { pool_id, .. }
            | Self::PoolUpdated { pool_id, .. }
            | Self::Deposited { pool_id, .. }
            | Self::Migrated { pool_id, .. }
            | Self::FeesReceived { pool_id, .. }
            | Self::RewardsSkipped { pool_id, .. } => Some(*pool_id),
            _ => None,
        }
    }

    /// Serialize event to bytes for storage/transmission
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    /// Deserialize event from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        borsh::from_slice(bytes).ok()
    }
}

/// Event log for collecting events during execution
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<RouterEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Emit an event (add to log)
    pub fn emit(&mut self, event: RouterEvent) {
        self.events.push(event);
    }

    /// Append every event of another log
    pub fn extend(&mut self, other: EventLog) {
        self.events.extend(other.events);
    }

    /// Get all events
    pub fn events(&self) -> &[RouterEvent] {
        &self.events
    }

    /// Take ownership of all events
    pub fn into_events(self) -> Vec<RouterEvent> {
        self.events
    }

    /// Remove and return all events, leaving the log empty
    pub fn drain(&mut self) -> Vec<RouterEvent> {
        core::mem::take(&mut self.events)
    }

    /// Filter events by type
    pub fn filter_by_type(&self, event_type: EventType) -> Vec<&RouterEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Filter events by pool id
    pub fn for_pool(&self, pool_id: &PoolId) -> Vec<&RouterEvent> {
        self.events
            .iter()
            .filter(|e| e.pool_id().as_ref() == Some(pool_id))
            .collect()
    }

    /// Check if any events were emitted
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Get number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when no events were emitted
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
