//! Ledger Instances and Their Host
//!
//! A ledger instance tracks staker balances and reward accounting for one
//! pool identity at one generation. The router only talks to it through
//! the `Ledger` trait; every mutating call names the operator making it so
//! the instance can restrict mutation to its owner.
//!
//! `LedgerHost` is the deployment primitive: templates are installed once,
//! instances are deterministic clones of a template, and `has_code` is the
//! existence probe. Instances are never tracked anywhere else.

use crate::{check, BTreeMap, StakeRouteError, StakeRouteResult};
use crate::locator::predict_clone_address;
use crate::types::{Address, AssetId};
use crate::validation::require_nonzero_address;

/// Contract a ledger instance satisfies
pub trait Ledger: Clone {
    /// One-time setup; the operator becomes the instance owner
    fn initialize(
        &mut self,
        operator: &Address,
        reward_asset: &AssetId,
        name: &str,
        symbol: &str,
    ) -> StakeRouteResult<()>;

    /// Credit `amount` of balance to `beneficiary`
    fn mint(&mut self, operator: &Address, beneficiary: &Address, amount: u64) -> StakeRouteResult<()>;

    /// Debit `amount` of balance from `account`
    fn burn_from(&mut self, operator: &Address, account: &Address, amount: u64) -> StakeRouteResult<()>;

    /// Spread `amount` of reward pro rata over current balances
    fn distribute_rewards(&mut self, operator: &Address, amount: u64) -> StakeRouteResult<()>;

    /// Mark `account`'s withdrawable reward as paid and return it
    fn withdraw_reward(&mut self, operator: &Address, account: &Address) -> StakeRouteResult<u64>;

    fn balance_of(&self, account: &Address) -> u64;

    fn total_supply(&self) -> u64;

    /// Reward `account` could withdraw right now
    fn withdrawable_reward_of(&self, account: &Address) -> u64;

    fn reward_asset(&self) -> AssetId;
}

/// Deployment host for ledger templates and their clones
#[derive(Debug, Clone)]
pub struct LedgerHost<L> {
    templates: BTreeMap<Address, L>,
    instances: BTreeMap<Address, L>,
}

impl<L> Default for LedgerHost<L> {
    fn default() -> Self {
        Self {
            templates: BTreeMap::new(),
            instances: BTreeMap::new(),
        }
    }
}

impl<L: Ledger> LedgerHost<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a template implementation at `template`
    pub fn install_template(&mut self, template: Address, prototype: L) -> StakeRouteResult<()> {
        require_nonzero_address(&template, "template cannot be zero address")?;
        check!(
            !self.has_code(&template),
            StakeRouteError::DeploymentCollision { address: template }
        );
        self.templates.insert(template, prototype);
        Ok(())
    }

    /// Existence probe: does anything live at `address`?
    pub fn has_code(&self, address: &Address) -> bool {
        self.instances.contains_key(address) || self.templates.contains_key(address)
    }

    /// Deploy a clone of `template` at the address determined by `deployer` and `salt`
    pub fn clone_deterministic(
        &mut self,
        deployer: &Address,
        template: &Address,
        salt: &[u8; 32],
    ) -> StakeRouteResult<Address> {
        let prototype = self
            .templates
            .get(template)
            .cloned()
            .ok_or(StakeRouteError::TemplateNotFound { template: *template })?;

        let address = predict_clone_address(deployer, template, salt);
        check!(
            !self.has_code(&address),
            StakeRouteError::DeploymentCollision { address }
        );

        self.instances.insert(address, prototype);
        Ok(address)
    }

    pub fn instance(&self, address: &Address) -> Option<&L> {
        self.instances.get(address)
    }

    pub fn instance_mut(&mut self, address: &Address) -> Option<&mut L> {
        self.instances.get_mut(address)
    }

    /// Number of deployed clones
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}
