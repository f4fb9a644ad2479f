//! Access Control Module
//!
//! Capability checks for privileged router operations. Authorization is
//! an explicit function of the caller and the current authorities, not
//! inherited state.
//!
//! ## Capabilities
//!
//! - **Owner**: configuration setters, pausing, deposits while paused
//! - **FeeDistribution**: pool creation and reward injection; granted to
//!   the owner and to the fee authority reported by the pool registry

use crate::{check, StakeRouteError, StakeRouteResult};
use crate::constants::ZERO_ADDRESS;
use crate::types::Address;

/// Privileged capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Only the router owner
    Owner,
    /// The router owner or the fee authority
    FeeDistribution,
}

/// Principals holding capabilities at the time of a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authorities {
    /// Router owner
    pub owner: Address,
    /// Fee-distribution authority (from the pool registry)
    pub fee_authority: Address,
}

impl Authorities {
    pub fn new(owner: Address, fee_authority: Address) -> Self {
        Self { owner, fee_authority }
    }

    /// Check if caller holds a capability
    pub fn holds(&self, caller: &Address, capability: Capability) -> bool {
        if *caller == ZERO_ADDRESS {
            return false;
        }
        match capability {
            Capability::Owner => *caller == self.owner,
            Capability::FeeDistribution => {
                *caller == self.owner || *caller == self.fee_authority
            }
        }
    }
}

/// Require that `caller` holds `capability`.
pub fn authorize(
    caller: &Address,
    capability: Capability,
    authorities: &Authorities,
) -> StakeRouteResult<()> {
    match capability {
        Capability::Owner => check!(
            authorities.holds(caller, capability),
            StakeRouteError::Unauthorized {
                expected: authorities.owner,
                actual: *caller,
            }
        ),
        Capability::FeeDistribution => check!(
            authorities.holds(caller, capability),
            StakeRouteError::AdminOnly { caller: *caller }
        ),
    }
    Ok(())
}
