//! StakeRoute Common Library
//!
//! Shared types, constants, and collaborator seams for the StakeRoute
//! staking and reward router.
//!
//! ## Model
//!
//! Staked collateral and reward payments are routed through per-pool
//! ledgers, one ledger per (stake asset, reward asset) pair and generation.
//! A ledger is never looked up in a stored table: its address is derived
//! from its inputs, so anyone can locate it before it is deployed.
//!
//! - **Locator**: pure derivation of a ledger address from the pair and generation
//! - **Ledger Host**: deterministic clone deployment plus a code-existence probe
//! - **Asset Book**: all-or-nothing asset transfers between holders
//! - **Collaborators**: asset-pair provider and pool asset registry seams
//! - **Events**: structured notifications for indexers and dashboards
//! - **Access Control**: owner and fee-distribution capabilities
//!
//! This crate is `no_std` compatible (with `alloc`) when built without
//! the default `std` feature.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Re-export collections for submodules based on feature
#[cfg(not(feature = "std"))]
pub use alloc::{collections::BTreeMap, string::String, vec::Vec};
#[cfg(feature = "std")]
pub use std::{collections::BTreeMap, string::String, vec::Vec};

pub mod constants;
pub mod errors;
pub mod types;
pub mod events;
pub mod validation;
pub mod access_control;
pub mod locator;
pub mod assets;
pub mod ledger;
pub mod collaborators;

// Re-exports for convenience
pub use errors::*;
pub use types::*;
pub use events::*;
pub use access_control::*;
pub use locator::*;
pub use assets::*;
pub use ledger::*;
pub use collaborators::*;
