//! Protocol Constants
//!
//! Derivation domains, generation numbers, precision and limits for the
//! StakeRoute router. Changing any derivation constant moves every ledger
//! address, so these are effectively part of the wire format.

/// The null identity. Never a valid asset, owner, template or router.
pub const ZERO_ADDRESS: [u8; 32] = [0u8; 32];

/// Ledger generations
pub mod generation {
    /// Legacy ledger generation (migration source)
    pub const LEGACY: u32 = 0;

    /// Current ledger generation (deposits, rewards, migration target)
    pub const CURRENT: u32 = 1;
}

/// Address derivation
pub mod derivation {
    /// Domain tag hashed in front of the borsh-encoded ledger seed
    pub const LEDGER_SALT_DOMAIN: &[u8] = b"stakeroute/ledger-salt/v1";

    /// Domain tag hashed in front of a template identity to form its code hash
    pub const TEMPLATE_CODE_DOMAIN: &[u8] = b"stakeroute/template-code/v1";

    /// Leading byte of a deterministic clone address preimage
    pub const CLONE_PREFIX: u8 = 0xff;
}

/// Reward accounting
pub mod rewards {
    /// Magnitude for reward-per-share precision (1e18)
    pub const MAGNITUDE: u128 = 1_000_000_000_000_000_000;
}

/// Operation limits
pub mod limits {
    /// Maximum pools per batched reward injection
    pub const MAX_REWARD_BATCH: usize = 64;
}
