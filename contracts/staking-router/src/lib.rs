//! Staking Router Contract
//!
//! Routes staked collateral and reward payments into per-pool ledgers.
//! Every ledger lives at an address derived from its (stake asset,
//! reward asset, generation) triple, so the router never stores where a
//! ledger is; it recomputes the address and probes for code there.
//!
//! ## Execution Model
//!
//! Each call runs against a staged copy of the router state inside a
//! [`RouterContext`]. The staged state and the events it produced replace
//! the live ones only when the call returns `Ok`; a failed call leaves the
//! registry, the ledger host and the asset book exactly as they were.
//!
//! ## Operations
//!
//! - [`pools`]: create and refresh registry entries
//! - [`staking`]: deposit, withdraw, claim, exit, reward injection
//! - [`emergency`]: registry-free exits and generation migration
//! - [`lifecycle`]: idempotent ledger deployment

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use stakeroute_common::{
    access_control::{authorize, Authorities, Capability},
    assets::AssetBank,
    check,
    collaborators::{AssetPairProvider, PoolAssetRegistry},
    constants::ZERO_ADDRESS,
    errors::{StakeRouteError, StakeRouteResult},
    events::{EventLog, RouterEvent},
    ledger::{Ledger, LedgerHost},
    locator::LedgerLocator,
    types::{Address, AssetId, CallContext, Generation, PoolId, PoolIdentity, PoolRegistryEntry, RouterAction},
    validation::require_nonzero_address,
    BTreeMap, Vec,
};

pub mod emergency;
pub mod lifecycle;
pub mod pools;
pub mod staking;

mod integration_tests;

// ============ Router Config ============

/// Configuration for the Staking Router
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct RouterConfig {
    /// Privileged operator
    pub owner: Address,
    /// Router identity: ledger deployer, ledger owner and custody account
    pub router_id: Address,
    /// Ledger template cloned for new ledgers (zero until configured)
    pub ledger_template: Address,
    /// When set, only the owner may deposit
    pub deposits_paused: bool,
}

impl RouterConfig {
    pub fn new(owner: Address, router_id: Address, ledger_template: Address) -> StakeRouteResult<Self> {
        require_nonzero_address(&owner, "owner cannot be zero address")?;
        require_nonzero_address(&router_id, "router id cannot be zero address")?;

        Ok(Self {
            owner,
            router_id,
            ledger_template,
            deposits_paused: false,
        })
    }

    /// Locator bound to this router and its template
    pub fn locator(&self) -> LedgerLocator {
        LedgerLocator::new(self.router_id, self.ledger_template)
    }
}

// ============ Router State ============

/// Everything a call may mutate
#[derive(Debug, Clone)]
pub struct RouterState<L, B> {
    pub config: RouterConfig,
    /// Pool id → current registry entry
    pub pools: BTreeMap<PoolId, PoolRegistryEntry>,
    /// Deployed ledger templates and instances
    pub host: LedgerHost<L>,
    /// Stake and reward asset balances
    pub bank: B,
}

// ============ Receipts ============

/// Amounts moved by an exit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct ExitReceipt {
    /// Reward paid out before withdrawing
    pub claimed: u64,
    /// Stake returned from custody
    pub withdrawn: u64,
}

/// Outcome of a generation migration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct MigrationReceipt {
    pub from_ledger: Address,
    pub to_ledger: Address,
    /// Balance burned on the legacy ledger and minted on the current one
    pub amount: u64,
    /// Legacy reward paid out before migrating
    pub claimed: u64,
}

/// Result of dispatching a [`RouterAction`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum ActionOutcome {
    /// State-changing call with nothing to report
    Completed,
    /// Current ledger of a created pool
    Ledger(Address),
    /// Whether a refresh or reward injection took effect
    Applied(bool),
    /// Reward paid out
    Claimed(u64),
    Exited(ExitReceipt),
    Migrated(MigrationReceipt),
    /// Per-entry result of a reward batch
    Batch(Vec<bool>),
}

// ============ Execution Context ============

/// Staged execution of a single router call
pub struct RouterContext<'a, L, B> {
    /// Staged state, committed only if the call succeeds
    pub state: RouterState<L, B>,
    pub provider: &'a dyn AssetPairProvider,
    pub registry: &'a dyn PoolAssetRegistry,
    pub caller: Address,
    pub block_height: u64,
    /// Events raised by this call
    pub events: EventLog,
}

impl<'a, L: Ledger, B: AssetBank> RouterContext<'a, L, B> {
    pub fn router_id(&self) -> Address {
        self.state.config.router_id
    }

    pub fn locator(&self) -> LedgerLocator {
        self.state.config.locator()
    }

    /// Owner plus the registry's current fee authority
    pub fn authorities(&self) -> Authorities {
        Authorities::new(self.state.config.owner, self.registry.fee_authority())
    }

    /// Fail unless the caller holds `capability`
    pub fn authorize(&self, capability: Capability) -> StakeRouteResult<()> {
        authorize(&self.caller, capability, &self.authorities())
    }

    /// Registry entry for `pool_id`
    pub fn entry(&self, pool_id: &PoolId) -> StakeRouteResult<PoolRegistryEntry> {
        self.state
            .pools
            .get(pool_id)
            .cloned()
            .ok_or(StakeRouteError::PoolNotFound { pool_id: *pool_id })
    }

    /// Deployed ledger at `address`
    pub fn ledger(&self, address: &Address, generation: Generation) -> StakeRouteResult<&L> {
        self.state.host.instance(address).ok_or(StakeRouteError::LedgerNotDeployed {
            ledger: *address,
            generation: generation.value(),
        })
    }

    pub fn ledger_mut(&mut self, address: &Address, generation: Generation) -> StakeRouteResult<&mut L> {
        self.state.host.instance_mut(address).ok_or(StakeRouteError::LedgerNotDeployed {
            ledger: *address,
            generation: generation.value(),
        })
    }

    pub fn emit(&mut self, event: RouterEvent) {
        self.events.emit(event);
    }
}

// ============ Staking Router ============

/// The router: live state, collaborators and the committed event log
pub struct StakingRouter<L, B> {
    state: RouterState<L, B>,
    provider: Box<dyn AssetPairProvider>,
    registry: Box<dyn PoolAssetRegistry>,
    events: EventLog,
}

impl<L: Ledger, B: AssetBank> StakingRouter<L, B> {
    /// Router over an existing ledger host and asset book.
    ///
    /// The host may already carry ledgers deployed under this router
    /// identity, including legacy-generation ones awaiting migration.
    pub fn new(
        config: RouterConfig,
        host: LedgerHost<L>,
        bank: B,
        provider: Box<dyn AssetPairProvider>,
        registry: Box<dyn PoolAssetRegistry>,
    ) -> Self {
        Self {
            state: RouterState {
                config,
                pools: BTreeMap::new(),
                host,
                bank,
            },
            provider,
            registry,
            events: EventLog::new(),
        }
    }

    /// Run `op` on a staged copy of the state; commit state and events only on success.
    ///
    /// Staging clones the whole state, so a call costs time linear in the
    /// number of ledgers and balances held by the in-memory host and book.
    fn transact<T>(
        &mut self,
        call: &CallContext,
        op: impl FnOnce(&mut RouterContext<'_, L, B>) -> StakeRouteResult<T>,
    ) -> StakeRouteResult<T> {
        let mut ctx = RouterContext {
            state: self.state.clone(),
            provider: self.provider.as_ref(),
            registry: self.registry.as_ref(),
            caller: call.caller,
            block_height: call.block_height,
            events: EventLog::new(),
        };

        let output = op(&mut ctx)?;

        let RouterContext { state, events, .. } = ctx;
        self.state = state;
        self.events.extend(events);
        Ok(output)
    }

    fn require_owner(&self, caller: &Address) -> StakeRouteResult<()> {
        let authorities = Authorities::new(self.state.config.owner, self.registry.fee_authority());
        authorize(caller, Capability::Owner, &authorities)
    }

    // ============ Pool Registry ============

    pub fn create_pool(&mut self, call: &CallContext, pool_id: PoolId, reward_asset: AssetId) -> StakeRouteResult<Address> {
        self.transact(call, |ctx| ctx.create_pool(&pool_id, &reward_asset))
    }

    pub fn create_registered_pool(&mut self, call: &CallContext, pool_id: PoolId) -> StakeRouteResult<Address> {
        self.transact(call, |ctx| ctx.create_registered_pool(&pool_id))
    }

    pub fn refresh_pool(&mut self, call: &CallContext, pool_id: PoolId) -> StakeRouteResult<bool> {
        self.transact(call, |ctx| ctx.refresh_pool(&pool_id))
    }

    // ============ Staking ============

    pub fn deposit(&mut self, call: &CallContext, pool_id: PoolId, amount: u64) -> StakeRouteResult<()> {
        self.transact(call, |ctx| ctx.deposit(&pool_id, amount))
    }

    pub fn withdraw(&mut self, call: &CallContext, pool_id: PoolId, amount: u64) -> StakeRouteResult<()> {
        self.transact(call, |ctx| ctx.withdraw(&pool_id, amount))
    }

    pub fn claim_rewards(&mut self, call: &CallContext, pool_id: PoolId) -> StakeRouteResult<u64> {
        self.transact(call, |ctx| ctx.claim_rewards(&pool_id))
    }

    pub fn exit(&mut self, call: &CallContext, pool_id: PoolId) -> StakeRouteResult<ExitReceipt> {
        self.transact(call, |ctx| ctx.exit(&pool_id))
    }

    /// Privileged reward injection; `Ok(false)` when the reward was skipped
    pub fn receive_rewards(&mut self, call: &CallContext, pool_id: PoolId, amount: u64) -> StakeRouteResult<bool> {
        self.transact(call, |ctx| ctx.receive_rewards(&pool_id, amount))
    }

    pub fn receive_rewards_batch(
        &mut self,
        call: &CallContext,
        entries: &[(PoolId, u64)],
    ) -> StakeRouteResult<Vec<bool>> {
        self.transact(call, |ctx| ctx.receive_rewards_batch(entries))
    }

    // ============ Emergency ============

    pub fn emergency_exit(
        &mut self,
        call: &CallContext,
        stake_asset: AssetId,
        reward_asset: AssetId,
    ) -> StakeRouteResult<ExitReceipt> {
        let identity = PoolIdentity::new(stake_asset, reward_asset);
        self.transact(call, |ctx| ctx.emergency_exit(&identity, false))
    }

    pub fn emergency_exit_and_claim(
        &mut self,
        call: &CallContext,
        stake_asset: AssetId,
        reward_asset: AssetId,
    ) -> StakeRouteResult<ExitReceipt> {
        let identity = PoolIdentity::new(stake_asset, reward_asset);
        self.transact(call, |ctx| ctx.emergency_exit(&identity, true))
    }

    pub fn emergency_migrate(&mut self, call: &CallContext, pool_id: PoolId) -> StakeRouteResult<MigrationReceipt> {
        self.transact(call, |ctx| ctx.emergency_migrate(&pool_id, false))
    }

    pub fn emergency_claim_and_migrate(
        &mut self,
        call: &CallContext,
        pool_id: PoolId,
    ) -> StakeRouteResult<MigrationReceipt> {
        self.transact(call, |ctx| ctx.emergency_migrate(&pool_id, true))
    }

    // ============ Admin ============

    pub fn set_deposits_paused(&mut self, call: &CallContext, paused: bool) -> StakeRouteResult<()> {
        self.transact(call, |ctx| {
            ctx.authorize(Capability::Owner)?;
            ctx.state.config.deposits_paused = paused;
            let by = ctx.caller;
            let block_height = ctx.block_height;
            ctx.emit(RouterEvent::DepositsPauseChanged { paused, by, block_height });
            Ok(())
        })
    }

    /// Configure the ledger template of a router created without one.
    ///
    /// The template feeds every derived ledger address, so once set it is
    /// fixed; replacing it would strand every funded ledger.
    pub fn set_ledger_template(&mut self, call: &CallContext, template: Address) -> StakeRouteResult<()> {
        self.transact(call, |ctx| {
            ctx.authorize(Capability::Owner)?;
            require_nonzero_address(&template, "ledger template cannot be zero address")?;
            let old_template = ctx.state.config.ledger_template;
            check!(
                is_zero(&old_template),
                StakeRouteError::TemplateAlreadyConfigured { template: old_template }
            );
            ctx.state.config.ledger_template = template;
            let block_height = ctx.block_height;
            ctx.emit(RouterEvent::LedgerTemplateChanged {
                old_template,
                new_template: template,
                block_height,
            });
            Ok(())
        })
    }

    pub fn transfer_ownership(&mut self, call: &CallContext, new_owner: Address) -> StakeRouteResult<()> {
        self.transact(call, |ctx| {
            ctx.authorize(Capability::Owner)?;
            require_nonzero_address(&new_owner, "owner cannot be zero address")?;
            let old_owner = ctx.state.config.owner;
            ctx.state.config.owner = new_owner;
            let block_height = ctx.block_height;
            ctx.emit(RouterEvent::OwnershipTransferred { old_owner, new_owner, block_height });
            Ok(())
        })
    }

    // Collaborators are borrowed by the staged context, so these two swap
    // outside `transact`. Every check runs before the single assignment.

    pub fn set_pair_provider(
        &mut self,
        call: &CallContext,
        provider: Box<dyn AssetPairProvider>,
    ) -> StakeRouteResult<()> {
        self.require_owner(&call.caller)?;
        self.provider = provider;
        self.events.emit(RouterEvent::PairProviderChanged {
            by: call.caller,
            block_height: call.block_height,
        });
        Ok(())
    }

    /// Replace the pool asset registry; its fee authority must be nonzero
    pub fn set_pool_registry(
        &mut self,
        call: &CallContext,
        registry: Box<dyn PoolAssetRegistry>,
    ) -> StakeRouteResult<()> {
        self.require_owner(&call.caller)?;
        let fee_authority = registry.fee_authority();
        require_nonzero_address(&fee_authority, "fee authority cannot be zero address")?;
        self.registry = registry;
        self.events.emit(RouterEvent::PoolRegistryChanged {
            fee_authority,
            by: call.caller,
            block_height: call.block_height,
        });
        Ok(())
    }

    // ============ Dispatch ============

    /// Apply one action on behalf of `call.caller`
    pub fn execute(&mut self, call: &CallContext, action: &RouterAction) -> StakeRouteResult<ActionOutcome> {
        match action {
            RouterAction::CreatePool { pool_id, reward_asset } => {
                self.create_pool(call, *pool_id, *reward_asset).map(ActionOutcome::Ledger)
            }
            RouterAction::CreateRegisteredPool { pool_id } => {
                self.create_registered_pool(call, *pool_id).map(ActionOutcome::Ledger)
            }
            RouterAction::RefreshPool { pool_id } => {
                self.refresh_pool(call, *pool_id).map(ActionOutcome::Applied)
            }
            RouterAction::Deposit { pool_id, amount } => {
                self.deposit(call, *pool_id, *amount).map(|_| ActionOutcome::Completed)
            }
            RouterAction::Withdraw { pool_id, amount } => {
                self.withdraw(call, *pool_id, *amount).map(|_| ActionOutcome::Completed)
            }
            RouterAction::ClaimRewards { pool_id } => {
                self.claim_rewards(call, *pool_id).map(ActionOutcome::Claimed)
            }
            RouterAction::Exit { pool_id } => self.exit(call, *pool_id).map(ActionOutcome::Exited),
            RouterAction::ReceiveRewards { pool_id, amount } => {
                self.receive_rewards(call, *pool_id, *amount).map(ActionOutcome::Applied)
            }
            RouterAction::ReceiveRewardsBatch { entries } => {
                self.receive_rewards_batch(call, entries).map(ActionOutcome::Batch)
            }
            RouterAction::EmergencyExit { stake_asset, reward_asset } => self
                .emergency_exit(call, *stake_asset, *reward_asset)
                .map(ActionOutcome::Exited),
            RouterAction::EmergencyExitAndClaim { stake_asset, reward_asset } => self
                .emergency_exit_and_claim(call, *stake_asset, *reward_asset)
                .map(ActionOutcome::Exited),
            RouterAction::EmergencyMigrate { pool_id } => {
                self.emergency_migrate(call, *pool_id).map(ActionOutcome::Migrated)
            }
            RouterAction::EmergencyClaimAndMigrate { pool_id } => self
                .emergency_claim_and_migrate(call, *pool_id)
                .map(ActionOutcome::Migrated),
            RouterAction::SetDepositsPaused { paused } => {
                self.set_deposits_paused(call, *paused).map(|_| ActionOutcome::Completed)
            }
            RouterAction::SetLedgerTemplate { template } => {
                self.set_ledger_template(call, *template).map(|_| ActionOutcome::Completed)
            }
            RouterAction::TransferOwnership { new_owner } => {
                self.transfer_ownership(call, *new_owner).map(|_| ActionOutcome::Completed)
            }
        }
    }

    /// Decode a CBOR action payload and apply it
    pub fn execute_encoded(&mut self, call: &CallContext, payload: &[u8]) -> StakeRouteResult<ActionOutcome> {
        let action = decode_action(payload)?;
        self.execute(call, &action)
    }

    // ============ Views ============

    pub fn config(&self) -> &RouterConfig {
        &self.state.config
    }

    pub fn pool_entry(&self, pool_id: &PoolId) -> Option<&PoolRegistryEntry> {
        self.state.pools.get(pool_id)
    }

    pub fn pool_identity(&self, pool_id: &PoolId) -> Option<PoolIdentity> {
        self.pool_entry(pool_id).map(|entry| entry.identity)
    }

    pub fn pool_count(&self) -> usize {
        self.state.pools.len()
    }

    /// Current-generation ledger address for a registered pool
    pub fn current_ledger_for(&self, pool_id: &PoolId) -> StakeRouteResult<Address> {
        let identity = self.registered_identity(pool_id)?;
        Ok(self.state.config.locator().current(&identity))
    }

    /// Legacy-generation ledger address for a registered pool
    pub fn legacy_ledger_for(&self, pool_id: &PoolId) -> StakeRouteResult<Address> {
        let identity = self.registered_identity(pool_id)?;
        Ok(self.state.config.locator().legacy(&identity))
    }

    /// Current-generation ledger address for an explicit pair, registered or not
    pub fn ledger_address_for_pair(&self, stake_asset: &AssetId, reward_asset: &AssetId) -> Address {
        self.state.config.locator().current(&PoolIdentity::new(*stake_asset, *reward_asset))
    }

    pub fn legacy_ledger_address_for_pair(&self, stake_asset: &AssetId, reward_asset: &AssetId) -> Address {
        self.state.config.locator().legacy(&PoolIdentity::new(*stake_asset, *reward_asset))
    }

    /// Current-generation balance; zero while the ledger is undeployed
    pub fn balance_of(&self, pool_id: &PoolId, account: &Address) -> StakeRouteResult<u64> {
        let ledger = self.current_ledger_for(pool_id)?;
        Ok(self.ledger(&ledger).map(|l| l.balance_of(account)).unwrap_or(0))
    }

    /// Legacy-generation balance; zero while the ledger is undeployed
    pub fn legacy_balance_of(&self, pool_id: &PoolId, account: &Address) -> StakeRouteResult<u64> {
        let ledger = self.legacy_ledger_for(pool_id)?;
        Ok(self.ledger(&ledger).map(|l| l.balance_of(account)).unwrap_or(0))
    }

    /// Reward `account` could claim from the pool's current ledger
    pub fn claimable_rewards(&self, pool_id: &PoolId, account: &Address) -> StakeRouteResult<u64> {
        let ledger = self.current_ledger_for(pool_id)?;
        Ok(self.ledger(&ledger).map(|l| l.withdrawable_reward_of(account)).unwrap_or(0))
    }

    /// Existence probe at `address`
    pub fn ledger_exists(&self, address: &Address) -> bool {
        self.state.host.has_code(address)
    }

    pub fn ledger(&self, address: &Address) -> Option<&L> {
        self.state.host.instance(address)
    }

    pub fn asset_balance(&self, asset: &AssetId, holder: &Address) -> u64 {
        self.state.bank.balance_of(asset, holder)
    }

    pub fn host(&self) -> &LedgerHost<L> {
        &self.state.host
    }

    pub fn bank(&self) -> &B {
        &self.state.bank
    }

    /// Events of every committed call, oldest first
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Hand the committed events to an indexer and start a fresh log
    pub fn take_events(&mut self) -> Vec<RouterEvent> {
        self.events.drain()
    }

    fn registered_identity(&self, pool_id: &PoolId) -> StakeRouteResult<PoolIdentity> {
        self.pool_identity(pool_id)
            .ok_or(StakeRouteError::PoolNotFound { pool_id: *pool_id })
    }
}

// ============ Action Encoding ============

/// CBOR-encode an action for `execute_encoded`
pub fn encode_action(action: &RouterAction) -> StakeRouteResult<Vec<u8>> {
    let mut payload = Vec::new();
    ciborium::into_writer(action, &mut payload).map_err(|_| StakeRouteError::InvalidActionEncoding)?;
    Ok(payload)
}

/// Decode a CBOR action payload
pub fn decode_action(payload: &[u8]) -> StakeRouteResult<RouterAction> {
    check!(!payload.is_empty(), StakeRouteError::InvalidActionEncoding);
    ciborium::from_reader(payload).map_err(|_| StakeRouteError::InvalidActionEncoding)
}

/// True when `address` is the null identity
pub(crate) fn is_zero(address: &Address) -> bool {
    *address == ZERO_ADDRESS
}

// ============ Test Fixtures ============

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use stakeroute_common::{
        assets::AssetBook,
        collaborators::{StaticPairProvider, StaticPoolRegistry},
        locator::ledger_salt,
    };
    use stakeroute_reward_ledger::RewardLedger;

    pub const OWNER: Address = [0x01; 32];
    pub const ROUTER_ID: Address = [0x02; 32];
    pub const TEMPLATE: Address = [0x03; 32];
    pub const SECOND_TEMPLATE: Address = [0x33; 32];
    pub const FEE_AUTHORITY: Address = [0x04; 32];
    pub const ALICE: Address = [0x0A; 32];
    pub const BOB: Address = [0x0B; 32];
    pub const MALLORY: Address = [0x0C; 32];

    pub const POOL: PoolId = [0x50; 32];
    pub const OTHER_POOL: PoolId = [0x51; 32];
    pub const STAKE_A: AssetId = [0x5A; 32];
    pub const STAKE_B: AssetId = [0x5B; 32];
    pub const REWARD: AssetId = [0x7E; 32];
    pub const OTHER_REWARD: AssetId = [0x7F; 32];

    pub const STARTING_BALANCE: u64 = 1_000;

    pub type TestRouter = StakingRouter<RewardLedger, AssetBook>;

    pub fn call(caller: Address) -> CallContext {
        CallContext::new(caller, 100)
    }

    pub fn test_config() -> RouterConfig {
        RouterConfig::new(OWNER, ROUTER_ID, TEMPLATE).unwrap()
    }

    pub fn test_provider() -> StaticPairProvider {
        StaticPairProvider::new()
            .with_pair(REWARD, STAKE_A, "xREWARD")
            .with_pair(OTHER_REWARD, STAKE_B, "xOTHER")
    }

    pub fn test_registry() -> StaticPoolRegistry {
        StaticPoolRegistry::new(FEE_AUTHORITY)
            .with_pool(POOL, REWARD)
            .with_pool(OTHER_POOL, OTHER_REWARD)
    }

    pub fn test_host() -> LedgerHost<RewardLedger> {
        let mut host = LedgerHost::new();
        host.install_template(TEMPLATE, RewardLedger::new()).unwrap();
        host
    }

    /// Stakers and the owner hold both stake assets; fee payers hold both reward assets
    pub fn funded_bank() -> AssetBook {
        let mut bank = AssetBook::new();
        for account in [ALICE, BOB, MALLORY, OWNER] {
            bank.mint(&STAKE_A, &account, STARTING_BALANCE).unwrap();
            bank.mint(&STAKE_B, &account, STARTING_BALANCE).unwrap();
        }
        for payer in [OWNER, FEE_AUTHORITY] {
            bank.mint(&REWARD, &payer, STARTING_BALANCE).unwrap();
            bank.mint(&OTHER_REWARD, &payer, STARTING_BALANCE).unwrap();
        }
        bank
    }

    pub fn create_router_with(host: LedgerHost<RewardLedger>, bank: AssetBook) -> TestRouter {
        StakingRouter::new(
            test_config(),
            host,
            bank,
            Box::new(test_provider()),
            Box::new(test_registry()),
        )
    }

    pub fn create_test_router() -> TestRouter {
        create_router_with(test_host(), funded_bank())
    }

    /// Router whose ledger template has not been configured yet
    pub fn create_unconfigured_router_with(host: LedgerHost<RewardLedger>, bank: AssetBook) -> TestRouter {
        StakingRouter::new(
            RouterConfig::new(OWNER, ROUTER_ID, ZERO_ADDRESS).unwrap(),
            host,
            bank,
            Box::new(test_provider()),
            Box::new(test_registry()),
        )
    }

    /// Record `pool_id` for `identity` without deploying its current ledger,
    /// the state a router inherits from one that predates that generation
    pub fn register_without_ledger(router: &mut TestRouter, pool_id: PoolId, identity: PoolIdentity) {
        router
            .state
            .pools
            .insert(pool_id, PoolRegistryEntry::new(pool_id, identity, 1));
    }

    /// Router with `POOL` created for `REWARD` (stake asset `STAKE_A`)
    pub fn create_router_with_pool() -> TestRouter {
        let mut router = create_test_router();
        router.create_pool(&call(OWNER), POOL, REWARD).unwrap();
        router
    }

    /// Deploy a legacy-generation ledger as an earlier router would have,
    /// crediting `holders` and moving their stake into router custody.
    pub fn seed_legacy_ledger(
        host: &mut LedgerHost<RewardLedger>,
        bank: &mut AssetBook,
        identity: &PoolIdentity,
        holders: &[(Address, u64)],
    ) -> Address {
        let salt = ledger_salt(identity, Generation::LEGACY);
        let ledger = host.clone_deterministic(&ROUTER_ID, &TEMPLATE, &salt).unwrap();
        let instance = host.instance_mut(&ledger).unwrap();
        instance.initialize(&ROUTER_ID, &identity.reward_asset, "legacy", "legacy").unwrap();
        for (holder, amount) in holders {
            instance.mint(&ROUTER_ID, holder, *amount).unwrap();
            bank.mint(&identity.stake_asset, &ROUTER_ID, *amount).unwrap();
        }
        ledger
    }
}
