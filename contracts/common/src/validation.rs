//! Validation Helpers
//!
//! Shared precondition checks. The `check!` macro keeps guard clauses to
//! one line each.
//!
//! ```rust,ignore
//! use stakeroute_common::check;
//!
//! check!(amount > 0, StakeRouteError::ZeroAmount);
//! ```

use crate::{
    constants::ZERO_ADDRESS,
    errors::{StakeRouteError, StakeRouteResult},
    types::Address,
};

// ============ Validation Macro ============

/// Check a condition and return an error if it fails.
#[macro_export]
macro_rules! check {
    ($condition:expr, $error:expr) => {
        if !($condition) {
            return Err($error);
        }
    };
}

pub use check;

// ============ Common Checks ============

/// Rejects the null identity.
pub fn require_nonzero_address(address: &Address, reason: &'static str) -> StakeRouteResult<()> {
    check!(*address != ZERO_ADDRESS, StakeRouteError::InvalidAddress { reason });
    Ok(())
}

/// Rejects zero amounts.
pub fn require_positive(amount: u64) -> StakeRouteResult<()> {
    check!(amount > 0, StakeRouteError::ZeroAmount);
    Ok(())
}

/// Checks that `available` covers `requested`.
pub fn require_sufficient(available: u64, requested: u64) -> StakeRouteResult<()> {
    check!(
        available >= requested,
        StakeRouteError::InsufficientBalance { available, requested }
    );
    Ok(())
}
