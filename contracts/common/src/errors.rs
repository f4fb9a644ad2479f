//! Error Types for the StakeRoute Protocol
//!
//! Every fatal failure aborts the whole call and rolls back its state.
//! Soft failures (reward injection into a pool that cannot take it) are
//! not errors at all; they are signaled through `Ok(false)`.

/// Result type alias for StakeRoute operations
pub type StakeRouteResult<T> = Result<T, StakeRouteError>;

/// Main error enum for all StakeRoute protocol errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakeRouteError {
    // ============ Configuration Errors ============
    /// Invalid address (e.g., zero address)
    InvalidAddress {
        /// Description of why the address is invalid
        reason: &'static str,
    },

    /// Ledger template identity has not been configured
    TemplateNotConfigured,

    /// No template is installed at the configured identity
    TemplateNotFound { template: [u8; 32] },

    /// Ledger template is already set and cannot be replaced
    TemplateAlreadyConfigured { template: [u8; 32] },

    // ============ Authorization Errors ============
    /// Caller is not the expected principal
    Unauthorized { expected: [u8; 32], actual: [u8; 32] },

    /// Only the owner or the fee authority can perform this action
    AdminOnly { caller: [u8; 32] },

    /// Deposits are paused and caller is not the owner
    DepositsPaused,

    // ============ Pool Registry Errors ============
    /// Pool already has a registry entry
    PoolAlreadyExists { pool_id: [u8; 32] },

    /// Pool has no registry entry
    PoolNotFound { pool_id: [u8; 32] },

    /// Pool asset registry has no asset for this pool id
    UnknownPool { pool_id: [u8; 32] },

    /// Asset-pair provider cannot resolve this reward asset
    UnknownRewardAsset { reward_asset: [u8; 32] },

    // ============ Ledger Lifecycle Errors ============
    /// No ledger instance is deployed at the derived address
    LedgerNotDeployed { ledger: [u8; 32], generation: u32 },

    /// Deployment target already holds code
    DeploymentCollision { address: [u8; 32] },

    /// Freshly deployed ledger is not at the derived address
    DeployedAddressMismatch { expected: [u8; 32], actual: [u8; 32] },

    /// Ledger was initialized twice
    LedgerAlreadyInitialized,

    /// Ledger was used before initialization
    LedgerNotInitialized,

    /// Rewards cannot be distributed over an empty ledger
    NoStakeToReward,

    // ============ Amount Errors ============
    /// Zero amount not allowed
    ZeroAmount,

    /// Insufficient balance for operation
    InsufficientBalance { available: u64, requested: u64 },

    /// Nothing to migrate from the legacy ledger
    NothingToMigrate,

    // ============ Math Errors ============
    /// Arithmetic overflow occurred
    Overflow,

    /// Arithmetic underflow occurred
    Underflow,

    // ============ Input Errors ============
    /// Action payload could not be decoded
    InvalidActionEncoding,

    /// Batch exceeds the allowed size
    BatchTooLarge { size: usize, maximum: usize },
}

/// Error classes, for callers deciding whether to retry or fix inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or null collaborator identity; caller must fix configuration
    Configuration,
    /// Privileged operation invoked by a non-privileged caller
    Authorization,
    /// Registry or ledger state does not allow the operation
    StatePrecondition,
    /// Amount or balance problem
    Amount,
    /// Checked arithmetic failed
    Arithmetic,
    /// Malformed input
    Input,
}

impl StakeRouteError {
    /// Returns a human-readable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAddress { .. } => "E001_INVALID_ADDRESS",
            Self::TemplateNotConfigured => "E002_TEMPLATE_NOT_CONFIGURED",
            Self::TemplateNotFound { .. } => "E003_TEMPLATE_NOT_FOUND",
            Self::TemplateAlreadyConfigured { .. } => "E004_TEMPLATE_CONFIGURED",
            Self::Unauthorized { .. } => "E010_UNAUTHORIZED",
            Self::AdminOnly { .. } => "E011_ADMIN_ONLY",
            Self::DepositsPaused => "E012_DEPOSITS_PAUSED",
            Self::PoolAlreadyExists { .. } => "E020_POOL_EXISTS",
            Self::PoolNotFound { .. } => "E021_POOL_NOT_FOUND",
            Self::UnknownPool { .. } => "E022_UNKNOWN_POOL",
            Self::UnknownRewardAsset { .. } => "E023_UNKNOWN_REWARD_ASSET",
            Self::LedgerNotDeployed { .. } => "E030_LEDGER_NOT_DEPLOYED",
            Self::DeploymentCollision { .. } => "E031_DEPLOY_COLLISION",
            Self::DeployedAddressMismatch { .. } => "E032_DEPLOY_MISMATCH",
            Self::LedgerAlreadyInitialized => "E033_LEDGER_INITIALIZED",
            Self::LedgerNotInitialized => "E034_LEDGER_NOT_INIT",
            Self::NoStakeToReward => "E035_NO_STAKE",
            Self::ZeroAmount => "E040_ZERO_AMOUNT",
            Self::InsufficientBalance { .. } => "E041_INSUFFICIENT_BALANCE",
            Self::NothingToMigrate => "E042_NOTHING_TO_MIGRATE",
            Self::Overflow => "E050_OVERFLOW",
            Self::Underflow => "E051_UNDERFLOW",
            Self::InvalidActionEncoding => "E060_INVALID_ACTION",
            Self::BatchTooLarge { .. } => "E061_BATCH_TOO_LARGE",
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAddress { .. }
            | Self::TemplateNotConfigured
            | Self::TemplateNotFound { .. }
            | Self::TemplateAlreadyConfigured { .. } => ErrorKind::Configuration,
            Self::Unauthorized { .. } | Self::AdminOnly { .. } | Self::DepositsPaused => {
                ErrorKind::Authorization
            }
            Self::PoolAlreadyExists { .. }
            | Self::PoolNotFound { .. }
            | Self::UnknownPool { .. }
            | Self::UnknownRewardAsset { .. }
            | Self::LedgerNotDeployed { .. }
            | Self::DeploymentCollision { .. }
            | Self::DeployedAddressMismatch { .. }
            | Self::LedgerAlreadyInitialized
            | Self::LedgerNotInitialized
            | Self::NoStakeToReward
            | Self::NothingToMigrate => ErrorKind::StatePrecondition,
            Self::ZeroAmount | Self::InsufficientBalance { .. } => ErrorKind::Amount,
            Self::Overflow | Self::Underflow => ErrorKind::Arithmetic,
            Self::InvalidActionEncoding | Self::BatchTooLarge { .. } => ErrorKind::Input,
        }
    }

    /// Returns true if this error is recoverable (user can fix it)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InsufficientBalance { .. } => true, // Get more funds
            Self::LedgerNotDeployed { .. } => true,   // Retry after the pool is created
            Self::DepositsPaused => true,             // Wait for unpause
            _ => false,
        }
    }
}
