//! Integration Tests
//!
//! End-to-end scenarios across the registry, the ledgers and the asset
//! book, driven through the router's public surface.

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use crate::*;
    use stakeroute_common::{
        collaborators::StaticPairProvider,
        events::EventType,
    };

    /// Sum of `account`'s balances on both generations of `POOL`
    fn total_credit(router: &TestRouter, account: &Address) -> u64 {
        router.balance_of(&POOL, account).unwrap() + router.legacy_balance_of(&POOL, account).unwrap()
    }

    fn supply_of(router: &TestRouter, ledger: &Address) -> u64 {
        router.ledger(ledger).map(|l| l.total_supply()).unwrap_or(0)
    }

    // ============================================================================
    // Staking Lifecycle
    // ============================================================================

    #[test]
    fn test_full_staking_lifecycle() {
        // 1. Create pool for the reward asset
        let mut router = create_test_router();
        let ledger = router.create_pool(&call(OWNER), POOL, REWARD).unwrap();
        assert_eq!(router.pool_identity(&POOL), Some(PoolIdentity::new(STAKE_A, REWARD)));

        // 2. Alice stakes 100
        router.deposit(&call(ALICE), POOL, 100).unwrap();
        assert_eq!(router.balance_of(&POOL, &ALICE), Ok(100));

        // 3. Fee authority injects 50
        assert_eq!(router.receive_rewards(&call(FEE_AUTHORITY), POOL, 50), Ok(true));
        assert_eq!(router.claimable_rewards(&POOL, &ALICE), Ok(50));

        // 4. Alice exits
        let receipt = router.exit(&call(ALICE), POOL).unwrap();
        assert_eq!(receipt, ExitReceipt { claimed: 50, withdrawn: 100 });

        assert_eq!(router.asset_balance(&STAKE_A, &ALICE), STARTING_BALANCE);
        assert_eq!(router.asset_balance(&REWARD, &ALICE), 50);
        assert_eq!(router.balance_of(&POOL, &ALICE), Ok(0));
        assert_eq!(router.asset_balance(&STAKE_A, &ROUTER_ID), 0);
        assert_eq!(router.asset_balance(&REWARD, &ledger), 0);
    }

    #[test]
    fn test_rewards_follow_stake_share() {
        let mut router = create_router_with_pool();
        router.deposit(&call(ALICE), POOL, 100).unwrap();
        router.deposit(&call(BOB), POOL, 300).unwrap();

        router.receive_rewards(&call(FEE_AUTHORITY), POOL, 50).unwrap();

        // 50 * 100 / 400 = 12.5, rounded down
        assert_eq!(router.claimable_rewards(&POOL, &ALICE), Ok(12));
        assert_eq!(router.claimable_rewards(&POOL, &BOB), Ok(37));

        let alice = router.exit(&call(ALICE), POOL).unwrap();
        let bob = router.exit(&call(BOB), POOL).unwrap();

        let ledger = router.current_ledger_for(&POOL).unwrap();
        assert_eq!(alice.claimed + bob.claimed, 49);
        // the rounding dust stays with the ledger
        assert_eq!(router.asset_balance(&REWARD, &ledger), 1);
    }

    #[test]
    fn test_deposit_withdraw_round_trip() {
        for amount in [1, 37, 500, STARTING_BALANCE] {
            let mut router = create_router_with_pool();
            let bank_before = router.bank().clone();

            router.deposit(&call(ALICE), POOL, amount).unwrap();
            router.withdraw(&call(ALICE), POOL, amount).unwrap();

            assert_eq!(router.asset_balance(&STAKE_A, &ALICE), STARTING_BALANCE);
            assert_eq!(router.balance_of(&POOL, &ALICE), Ok(0));
            assert_eq!(router.bank(), &bank_before);
        }
    }

    #[test]
    fn test_duplicate_pool_creation() {
        let mut router = create_test_router();
        router.create_registered_pool(&call(OWNER), POOL).unwrap();
        let instances = router.host().instance_count();

        let result = router.create_registered_pool(&call(FEE_AUTHORITY), POOL);

        assert_eq!(result, Err(StakeRouteError::PoolAlreadyExists { pool_id: POOL }));
        assert_eq!(router.pool_count(), 1);
        assert_eq!(router.host().instance_count(), instances);
    }

    #[test]
    fn test_ledger_deployed_once_across_operations() {
        let mut router = create_router_with_pool();

        for _ in 0..3 {
            router.deposit(&call(ALICE), POOL, 10).unwrap();
            router.deposit(&call(BOB), POOL, 10).unwrap();
            assert_eq!(router.refresh_pool(&call(MALLORY), POOL), Ok(false));
        }

        assert_eq!(router.host().instance_count(), 1);
        assert_eq!(router.events().filter_by_type(EventType::LedgerDeployed).len(), 1);
        assert!(router.events().filter_by_type(EventType::PoolUpdated).is_empty());
    }

    // ============================================================================
    // Soft Failures and Rollback
    // ============================================================================

    #[test]
    fn test_skipped_rewards_leave_balances_unchanged() {
        let mut router = create_router_with_pool();
        router.create_registered_pool(&call(OWNER), OTHER_POOL).unwrap();
        let bank_before = router.bank().clone();

        // unknown pool, then a pool with no stake
        assert_eq!(router.receive_rewards(&call(FEE_AUTHORITY), [0x99; 32], 50), Ok(false));
        assert_eq!(router.receive_rewards(&call(FEE_AUTHORITY), OTHER_POOL, 50), Ok(false));

        assert_eq!(router.bank(), &bank_before);
        assert_eq!(router.events().filter_by_type(EventType::RewardsSkipped).len(), 2);
        assert!(router.events().filter_by_type(EventType::FeesReceived).is_empty());
    }

    #[test]
    fn test_failed_call_rolls_back_everything() {
        // legacy credit whose stake never reached router custody
        let mut host = test_host();
        let mut seeded_bank = funded_bank();
        let identity = PoolIdentity::new(STAKE_A, REWARD);
        seed_legacy_ledger(&mut host, &mut seeded_bank, &identity, &[(ALICE, 100)]);
        let mut router = create_router_with(host, funded_bank());
        router.create_pool(&call(OWNER), POOL, REWARD).unwrap();
        router.emergency_migrate(&call(ALICE), POOL).unwrap();
        router.receive_rewards(&call(FEE_AUTHORITY), POOL, 20).unwrap();
        let bank_before = router.bank().clone();
        let events_before = router.events().len();

        // the claim leg succeeds, then the stake transfer fails
        let result = router.exit(&call(ALICE), POOL);

        assert_eq!(
            result,
            Err(StakeRouteError::InsufficientBalance { available: 0, requested: 100 })
        );
        assert_eq!(router.bank(), &bank_before);
        assert_eq!(router.balance_of(&POOL, &ALICE), Ok(100));
        assert_eq!(router.claimable_rewards(&POOL, &ALICE), Ok(20));
        assert_eq!(router.events().len(), events_before);
    }

    #[test]
    fn test_pause_blocks_only_deposits() {
        let mut router = create_router_with_pool();
        router.deposit(&call(ALICE), POOL, 100).unwrap();
        router.set_deposits_paused(&call(OWNER), true).unwrap();

        assert_eq!(router.deposit(&call(BOB), POOL, 10), Err(StakeRouteError::DepositsPaused));
        assert_eq!(router.receive_rewards(&call(FEE_AUTHORITY), POOL, 10), Ok(true));
        assert!(router.withdraw(&call(ALICE), POOL, 40).is_ok());
        assert!(router.exit(&call(ALICE), POOL).is_ok());

        router.set_deposits_paused(&call(OWNER), false).unwrap();
        assert!(router.deposit(&call(BOB), POOL, 10).is_ok());
    }

    // ============================================================================
    // Migration
    // ============================================================================

    #[test]
    fn test_migration_conserves_balances() {
        let mut host = test_host();
        let mut bank = funded_bank();
        let identity = PoolIdentity::new(STAKE_A, REWARD);
        let legacy = seed_legacy_ledger(&mut host, &mut bank, &identity, &[(ALICE, 120), (BOB, 80)]);
        let mut router = create_router_with(host, bank);
        let current = router.create_pool(&call(OWNER), POOL, REWARD).unwrap();
        router.deposit(&call(BOB), POOL, 5).unwrap();

        let alice_before = total_credit(&router, &ALICE);
        let bob_before = total_credit(&router, &BOB);
        let supply_before = supply_of(&router, &legacy) + supply_of(&router, &current);
        let custody_before = router.asset_balance(&STAKE_A, &ROUTER_ID);

        router.emergency_migrate(&call(ALICE), POOL).unwrap();
        router.emergency_claim_and_migrate(&call(BOB), POOL).unwrap();

        assert_eq!(router.legacy_balance_of(&POOL, &ALICE), Ok(0));
        assert_eq!(router.legacy_balance_of(&POOL, &BOB), Ok(0));
        assert_eq!(router.balance_of(&POOL, &ALICE), Ok(120));
        assert_eq!(router.balance_of(&POOL, &BOB), Ok(85));
        assert_eq!(total_credit(&router, &ALICE), alice_before);
        assert_eq!(total_credit(&router, &BOB), bob_before);
        assert_eq!(supply_of(&router, &legacy) + supply_of(&router, &current), supply_before);
        assert_eq!(router.asset_balance(&STAKE_A, &ROUTER_ID), custody_before);

        // migrated stake withdraws like any other
        let receipt = router.exit(&call(ALICE), POOL).unwrap();
        assert_eq!(receipt.withdrawn, 120);
        assert_eq!(router.asset_balance(&STAKE_A, &ALICE), STARTING_BALANCE + 120);
    }

    #[test]
    fn test_deposit_follows_relisted_stake_asset() {
        let mut router = create_router_with_pool();
        router.deposit(&call(ALICE), POOL, 100).unwrap();
        let old_ledger = router.current_ledger_for(&POOL).unwrap();

        // provider now pairs the reward with STAKE_B, which has no ledger yet
        let relisted = StaticPairProvider::new().with_pair(REWARD, STAKE_B, "xREWARD");
        router.set_pair_provider(&call(OWNER), Box::new(relisted)).unwrap();
        assert!(!router.ledger_exists(&router.ledger_address_for_pair(&STAKE_B, &REWARD)));

        // the deposit refreshes the entry before pulling stake
        router.deposit(&call(BOB), POOL, 10).unwrap();

        assert_eq!(router.pool_identity(&POOL), Some(PoolIdentity::new(STAKE_B, REWARD)));
        assert_eq!(router.asset_balance(&STAKE_B, &BOB), STARTING_BALANCE - 10);
        assert_eq!(router.asset_balance(&STAKE_A, &BOB), STARTING_BALANCE);
        assert_eq!(router.balance_of(&POOL, &BOB), Ok(10));
        assert_eq!(router.events().filter_by_type(EventType::PoolUpdated).len(), 1);

        // the earlier stake stays on the old pair's ledger
        assert_eq!(router.ledger(&old_ledger).map(|l| l.balance_of(&ALICE)), Some(100));
    }

    #[test]
    fn test_stale_registry_does_not_lock_stake() {
        let mut router = create_router_with_pool();
        router.deposit(&call(ALICE), POOL, 100).unwrap();
        router.receive_rewards(&call(FEE_AUTHORITY), POOL, 30).unwrap();

        // 1. The provider re-pairs the reward and anyone re-points the pool
        let relisted = StaticPairProvider::new().with_pair(REWARD, STAKE_B, "xREWARD");
        router.set_pair_provider(&call(OWNER), Box::new(relisted)).unwrap();
        assert_eq!(router.refresh_pool(&call(MALLORY), POOL), Ok(true));
        assert_eq!(router.balance_of(&POOL, &ALICE), Ok(0));

        // 2. An attempt to move ledger derivation is refused
        assert_eq!(
            router.set_ledger_template(&call(OWNER), SECOND_TEMPLATE),
            Err(StakeRouteError::TemplateAlreadyConfigured { template: TEMPLATE })
        );

        // 3. The old pair is still exitable directly, rewards included
        let receipt = router.emergency_exit_and_claim(&call(ALICE), STAKE_A, REWARD).unwrap();

        assert_eq!(receipt, ExitReceipt { claimed: 30, withdrawn: 100 });
        assert_eq!(router.asset_balance(&STAKE_A, &ALICE), STARTING_BALANCE);
        assert_eq!(router.asset_balance(&REWARD, &ALICE), 30);
        assert_eq!(router.asset_balance(&STAKE_A, &ROUTER_ID), 0);
    }

    // ============================================================================
    // Encoded Dispatch
    // ============================================================================

    #[test]
    fn test_encoded_actions_drive_full_flow() {
        let mut router = create_test_router();

        let run = |router: &mut TestRouter, caller: Address, action: RouterAction| {
            let payload = encode_action(&action).unwrap();
            router.execute_encoded(&call(caller), &payload)
        };

        let created = run(&mut router, OWNER, RouterAction::CreateRegisteredPool { pool_id: POOL }).unwrap();
        assert_eq!(created, ActionOutcome::Ledger(router.current_ledger_for(&POOL).unwrap()));

        assert_eq!(
            run(&mut router, ALICE, RouterAction::Deposit { pool_id: POOL, amount: 100 }),
            Ok(ActionOutcome::Completed)
        );
        assert_eq!(
            run(&mut router, FEE_AUTHORITY, RouterAction::ReceiveRewardsBatch { entries: vec![(POOL, 30), (OTHER_POOL, 30)] }),
            Ok(ActionOutcome::Batch(vec![true, false]))
        );
        assert_eq!(
            run(&mut router, ALICE, RouterAction::ClaimRewards { pool_id: POOL }),
            Ok(ActionOutcome::Claimed(30))
        );
        assert_eq!(
            run(&mut router, ALICE, RouterAction::Exit { pool_id: POOL }),
            Ok(ActionOutcome::Exited(ExitReceipt { claimed: 0, withdrawn: 100 }))
        );
        assert_eq!(
            run(&mut router, MALLORY, RouterAction::SetDepositsPaused { paused: true }),
            Err(StakeRouteError::Unauthorized { expected: OWNER, actual: MALLORY })
        );
    }

    #[test]
    fn test_execute_rejects_bad_payload() {
        let mut router = create_router_with_pool();
        let events_before = router.events().len();

        assert_eq!(
            router.execute_encoded(&call(ALICE), b"not an action"),
            Err(StakeRouteError::InvalidActionEncoding)
        );
        assert_eq!(router.events().len(), events_before);
    }

    #[test]
    fn test_take_events_hands_off_history() {
        let mut router = create_router_with_pool();
        router.deposit(&call(ALICE), POOL, 10).unwrap();

        let events = router.take_events();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].event_type(), EventType::LedgerDeployed);
        assert_eq!(events[1].event_type(), EventType::PoolCreated);
        assert_eq!(events[2].event_type(), EventType::Deposited);
        assert!(events.iter().all(|e| e.block_height() == 100));
        assert!(router.events().is_empty());
    }
}
