//! Ledger Lifecycle
//!
//! Deploys current-generation ledgers at their derived addresses. The
//! existence probe runs immediately before every deployment, so a second
//! `ensure_ledger` for the same identity within one call sequence finds
//! the first one's instance and deploys nothing.

use stakeroute_common::{
    assets::AssetBank,
    check,
    errors::{StakeRouteError, StakeRouteResult},
    events::RouterEvent,
    ledger::Ledger,
    locator::ledger_salt,
    types::{Address, Generation, PoolIdentity},
};

use crate::{is_zero, RouterContext};

impl<'a, L: Ledger, B: AssetBank> RouterContext<'a, L, B> {
    /// Derived address of the ledger for `identity` at `generation`
    pub fn ledger_address(&self, identity: &PoolIdentity, generation: Generation) -> Address {
        self.locator().locate(identity, generation)
    }

    /// Current-generation ledger for `identity`, deploying it if absent
    pub fn ensure_ledger(&mut self, identity: &PoolIdentity) -> StakeRouteResult<Address> {
        let expected = self.ledger_address(identity, Generation::CURRENT);
        if self.state.host.has_code(&expected) {
            return Ok(expected);
        }
        self.deploy_ledger(identity, Generation::CURRENT)
    }

    /// Clone the template at the derived address and initialize it.
    ///
    /// The new ledger is owned by the router identity and named after the
    /// reward asset's display name.
    pub fn deploy_ledger(&mut self, identity: &PoolIdentity, generation: Generation) -> StakeRouteResult<Address> {
        let template = self.state.config.ledger_template;
        check!(!is_zero(&template), StakeRouteError::TemplateNotConfigured);

        let name = self.provider.display_name_for(&identity.reward_asset)?;
        let router_id = self.router_id();
        let salt = ledger_salt(identity, generation);

        let ledger = self.state.host.clone_deterministic(&router_id, &template, &salt)?;
        self.ledger_mut(&ledger, generation)?
            .initialize(&router_id, &identity.reward_asset, &name, &name)?;

        let block_height = self.block_height;
        self.emit(RouterEvent::LedgerDeployed {
            ledger,
            stake_asset: identity.stake_asset,
            reward_asset: identity.reward_asset,
            generation: generation.value(),
            block_height,
        });

        Ok(ledger)
    }
}
