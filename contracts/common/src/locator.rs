//! Deterministic Ledger Locator
//!
//! Maps (stake asset, reward asset, generation) to a ledger address
//! without consulting any storage:
//!
//! ```text
//! seed      = borsh(stake_asset, reward_asset, generation)
//! salt      = SHA256(LEDGER_SALT_DOMAIN || seed)
//! code_hash = SHA256(TEMPLATE_CODE_DOMAIN || template)
//! address   = SHA256(0xff || deployer || salt || code_hash)
//! ```
//!
//! The deployer is the router identity and the template is the ledger
//! implementation being cloned, so the same pair resolves to different
//! ledgers under different routers or templates.

use borsh::BorshSerialize;
use sha2::{Digest, Sha256};

use crate::constants::derivation::{CLONE_PREFIX, LEDGER_SALT_DOMAIN, TEMPLATE_CODE_DOMAIN};
use crate::types::{Address, Generation, PoolIdentity};

/// Length of the canonical seed encoding
pub const LEDGER_SEED_LEN: usize = 32 + 32 + 4;

/// Derivation input for a ledger salt
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize)]
pub struct LedgerSeed {
    pub stake_asset: [u8; 32],
    pub reward_asset: [u8; 32],
    pub generation: u32,
}

impl LedgerSeed {
    pub fn new(identity: &PoolIdentity, generation: Generation) -> Self {
        Self {
            stake_asset: identity.stake_asset,
            reward_asset: identity.reward_asset,
            generation: generation.value(),
        }
    }

    /// Canonical bytes; identical to the borsh encoding of the seed.
    pub fn canonical_bytes(&self) -> [u8; LEDGER_SEED_LEN] {
        let mut out = [0u8; LEDGER_SEED_LEN];
        out[0..32].copy_from_slice(&self.stake_asset);
        out[32..64].copy_from_slice(&self.reward_asset);
        out[64..68].copy_from_slice(&self.generation.to_le_bytes());
        out
    }
}

/// Salt for a pool identity at a generation
pub fn ledger_salt(identity: &PoolIdentity, generation: Generation) -> [u8; 32] {
    let seed = LedgerSeed::new(identity, generation);
    let mut hasher = Sha256::new();
    hasher.update(LEDGER_SALT_DOMAIN);
    hasher.update(seed.canonical_bytes());
    hasher.finalize().into()
}

/// Code hash standing in for a template's deployed bytecode
pub fn template_code_hash(template: &Address) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(TEMPLATE_CODE_DOMAIN);
    hasher.update(template);
    hasher.finalize().into()
}

/// Address a deterministic clone of `template` lands at when deployed by `deployer` with `salt`
pub fn predict_clone_address(deployer: &Address, template: &Address, salt: &[u8; 32]) -> Address {
    let mut hasher = Sha256::new();
    hasher.update([CLONE_PREFIX]);
    hasher.update(deployer);
    hasher.update(salt);
    hasher.update(template_code_hash(template));
    hasher.finalize().into()
}

/// Ledger address for a pool identity at a generation
pub fn derive_ledger_address(
    deployer: &Address,
    template: &Address,
    identity: &PoolIdentity,
    generation: Generation,
) -> Address {
    predict_clone_address(deployer, template, &ledger_salt(identity, generation))
}

/// Locator bound to one deployer and template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerLocator {
    pub deployer: Address,
    pub template: Address,
}

impl LedgerLocator {
    pub fn new(deployer: Address, template: Address) -> Self {
        Self { deployer, template }
    }

    pub fn locate(&self, identity: &PoolIdentity, generation: Generation) -> Address {
        derive_ledger_address(&self.deployer, &self.template, identity, generation)
    }

    pub fn current(&self, identity: &PoolIdentity) -> Address {
        self.locate(identity, Generation::CURRENT)
    }

    pub fn legacy(&self, identity: &PoolIdentity) -> Address {
        self.locate(identity, Generation::LEGACY)
    }
}
