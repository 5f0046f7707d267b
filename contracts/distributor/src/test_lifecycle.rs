extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::Client as TokenClient,
    Address,
};

use crate::test::{fund_campaign, make_token, mint, setup, PERIOD};

// Block-by-block accrual scenarios. The expected values below are exact:
// every division in the engine floors, so e.g. a 30-unit stake earning one
// 100-reward block reads back 99, not 100.

#[test]
fn test_single_pool_accrues_per_block_rate() {
    let (env, client, admin, reward_token) = setup();

    let stake_token = make_token(&env);
    client.register_pool(&admin, &stake_token, &100);
    fund_campaign(&env, &client, &admin, &reward_token, 2_000, 100, 101);

    let alice = Address::generate(&env);
    mint(&env, &stake_token, &alice, 100);

    env.ledger().set_sequence_number(101);
    client.deposit(&alice, &stake_token, &10);
    assert_eq!(client.pending_reward(&stake_token, &alice), 0);

    // Sole full-weight pool: one block mints the whole per-block rate.
    env.ledger().set_sequence_number(102);
    assert_eq!(client.pending_reward(&stake_token, &alice), 100);

    env.ledger().set_sequence_number(103);
    assert_eq!(client.pending_reward(&stake_token, &alice), 200);

    // An equal-weight second pool halves the growth rate from here on.
    let other = make_token(&env);
    client.register_pool(&admin, &other, &100);
    assert_eq!(client.get_campaign().remaining, 1_800);

    env.ledger().set_sequence_number(104);
    assert_eq!(client.pending_reward(&stake_token, &alice), 250);

    env.ledger().set_sequence_number(105);
    assert_eq!(client.pending_reward(&stake_token, &alice), 300);
}

#[test]
fn test_two_pool_accrual_walkthrough() {
    let (env, client, admin, reward_token) = setup();

    // The reward token doubles as pool 0's stake token, so reward custody
    // and pool stake share one balance; the engine's own supply tracking
    // must keep them apart.
    client.register_pool(&admin, &reward_token, &200);

    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    mint(&env, &reward_token, &alice, 1_000);

    env.ledger().set_sequence_number(101);
    fund_campaign(&env, &client, &admin, &reward_token, 2_000, 100, 102);

    env.ledger().set_sequence_number(102);
    client.deposit(&alice, &reward_token, &10);
    assert_eq!(TokenClient::new(&env, &reward_token).balance(&alice), 990);
    assert_eq!(
        TokenClient::new(&env, &reward_token).balance(&client.address),
        2_010
    );

    env.ledger().set_sequence_number(103);
    let lp_token = make_token(&env);
    client.register_pool(&admin, &lp_token, &100);
    mint(&env, &lp_token, &bob, 1_000);
    assert_eq!(client.get_campaign().remaining, 1_900);

    // One block at 200/300 weight: 66 on top of the committed 100.
    env.ledger().set_sequence_number(104);
    assert_eq!(client.pending_reward(&reward_token, &alice), 166);
    assert_eq!(client.remaining_amount(), 1_834);

    env.ledger().set_sequence_number(105);
    client.deposit(&bob, &lp_token, &10);
    assert_eq!(client.pending_reward(&reward_token, &alice), 233);
    assert_eq!(client.pending_reward(&lp_token, &bob), 0);
    assert_eq!(client.remaining_amount(), 1_767);

    env.ledger().set_sequence_number(106);
    assert_eq!(client.pending_reward(&reward_token, &alice), 300);
    assert_eq!(client.pending_reward(&lp_token, &bob), 33);
    assert_eq!(client.remaining_amount(), 1_667);

    env.ledger().set_sequence_number(107);
    client.withdraw_all(&alice, &reward_token);
    // 990 + 10 stake back + 366 harvested.
    assert_eq!(TokenClient::new(&env, &reward_token).balance(&alice), 1_366);
    assert_eq!(client.pending_reward(&reward_token, &alice), 0);
    assert_eq!(client.pending_reward(&lp_token, &bob), 66);
    assert_eq!(client.get_campaign().remaining, 1_634);
    assert_eq!(client.remaining_amount(), 1_568);
}

#[test]
fn test_truncation_favors_the_remainder() {
    let (env, client, admin, reward_token) = setup();

    let stake_token = make_token(&env);
    client.register_pool(&admin, &stake_token, &100);
    fund_campaign(&env, &client, &admin, &reward_token, 2_000, 100, 101);

    let bob = Address::generate(&env);
    mint(&env, &stake_token, &bob, 30);

    env.ledger().set_sequence_number(103);
    client.deposit(&bob, &stake_token, &30);

    // One block of 100 spread over 30 units floors twice: 99 claimable,
    // while the lazy remainder view books the full pool-level 100.
    env.ledger().set_sequence_number(104);
    assert_eq!(client.pending_reward(&stake_token, &bob), 99);
    assert_eq!(client.remaining_amount(), 1_900);

    env.ledger().set_sequence_number(105);
    client.withdraw(&bob, &stake_token, &30);
    assert_eq!(TokenClient::new(&env, &reward_token).balance(&bob), 199);
    assert_eq!(
        TokenClient::new(&env, &reward_token).balance(&client.address),
        1_801
    );
    assert_eq!(client.get_campaign().remaining, 1_800);
}

#[test]
fn test_accrual_stops_at_campaign_end() {
    let (env, client, admin, reward_token) = setup();

    let stake_token = make_token(&env);
    client.register_pool(&admin, &stake_token, &100);
    fund_campaign(&env, &client, &admin, &reward_token, 2_000, 100, 102);
    let end_block = 102 + PERIOD;

    let bob = Address::generate(&env);
    mint(&env, &stake_token, &bob, 30);

    env.ledger().set_sequence_number(118);
    client.deposit(&bob, &stake_token, &30);

    env.ledger().set_sequence_number(121);
    assert_eq!(client.pending_reward(&stake_token, &bob), 300);

    env.ledger().set_sequence_number(end_block);
    assert_eq!(client.pending_reward(&stake_token, &bob), 399);

    // Past the end the pending is frozen.
    env.ledger().set_sequence_number(130);
    assert_eq!(client.pending_reward(&stake_token, &bob), 399);
    assert_eq!(client.remaining_amount(), 1_600);

    env.ledger().set_sequence_number(131);
    client.withdraw_all(&bob, &stake_token);
    assert_eq!(TokenClient::new(&env, &reward_token).balance(&bob), 399);
    assert_eq!(
        TokenClient::new(&env, &reward_token).balance(&client.address),
        1_601
    );

    // The sweep returns the unminted 1600; the single truncated unit
    // stays behind as custody dust.
    assert_eq!(client.reclaim_remainder(&admin), 1_600);
    assert_eq!(TokenClient::new(&env, &reward_token).balance(&admin), 1_600);
    assert_eq!(
        TokenClient::new(&env, &reward_token).balance(&client.address),
        1
    );
    assert_eq!(client.get_campaign().remaining, 0);
}

#[test]
fn test_zero_stake_interval_is_skipped() {
    let (env, client, admin, reward_token) = setup();

    let stake_token = make_token(&env);
    client.register_pool(&admin, &stake_token, &100);
    fund_campaign(&env, &client, &admin, &reward_token, 2_000, 100, 102);

    let bob = Address::generate(&env);
    mint(&env, &stake_token, &bob, 100);

    // Eight in-campaign blocks pass with nobody staked.
    env.ledger().set_sequence_number(110);
    assert_eq!(client.pending_reward(&stake_token, &bob), 0);
    assert_eq!(client.remaining_amount(), 2_000);

    client.deposit(&bob, &stake_token, &10);

    // The clock advanced but nothing was minted for the empty interval.
    let pool = client.get_pool(&stake_token);
    assert_eq!(pool.last_accrual_block, 110);
    assert_eq!(pool.acc_reward_per_share, 0);
    assert_eq!(client.get_campaign().remaining, 2_000);

    // Accrual picks up from the deposit block only.
    env.ledger().set_sequence_number(111);
    assert_eq!(client.pending_reward(&stake_token, &bob), 100);
}

#[test]
fn test_remainders_are_additive_across_campaigns() {
    let (env, client, admin, reward_token) = setup();

    let stake_token = make_token(&env);
    client.register_pool(&admin, &stake_token, &100);
    fund_campaign(&env, &client, &admin, &reward_token, 2_000, 100, 102);

    let alice = Address::generate(&env);
    mint(&env, &stake_token, &alice, 100);

    env.ledger().set_sequence_number(118);
    client.deposit(&alice, &stake_token, &10);

    env.ledger().set_sequence_number(122);
    assert_eq!(client.pending_reward(&stake_token, &alice), 400);

    // Campaign one left 1600 unminted; the new funding stacks on top and
    // the accrued 400 survives the changeover.
    env.ledger().set_sequence_number(124);
    fund_campaign(&env, &client, &admin, &reward_token, 2_000, 100, 126);
    assert_eq!(client.get_campaign().remaining, 3_600);
    assert_eq!(client.pending_reward(&stake_token, &alice), 400);
    assert_eq!(client.remaining_amount(), 3_600);

    env.ledger().set_sequence_number(128);
    assert_eq!(client.pending_reward(&stake_token, &alice), 600);
    assert_eq!(client.remaining_amount(), 3_400);
}

#[test]
fn test_emergency_withdraw_forfeits_pending() {
    let (env, client, admin, reward_token) = setup();

    let stake_token = make_token(&env);
    client.register_pool(&admin, &stake_token, &100);
    fund_campaign(&env, &client, &admin, &reward_token, 2_000, 100, 102);

    let alice = Address::generate(&env);
    mint(&env, &stake_token, &alice, 100);

    env.ledger().set_sequence_number(102);
    client.deposit(&alice, &stake_token, &10);

    env.ledger().set_sequence_number(105);
    assert_eq!(client.pending_reward(&stake_token, &alice), 300);

    assert_eq!(client.emergency_withdraw(&alice, &stake_token), 10);
    assert_eq!(TokenClient::new(&env, &stake_token).balance(&alice), 100);
    assert_eq!(client.staked_balance(&stake_token, &alice), 0);

    // The accrued 300 is gone: not claimable, and not handed back to the
    // campaign remainder either.
    assert_eq!(client.pending_reward(&stake_token, &alice), 0);
    assert_eq!(client.get_campaign().remaining, 2_000);
    assert_eq!(client.remaining_amount(), 2_000);
    assert_eq!(TokenClient::new(&env, &reward_token).balance(&alice), 0);

    // No accumulator advance happened on the way out.
    assert_eq!(client.get_pool(&stake_token).last_accrual_block, 102);
}

#[test]
fn test_claim_and_claim_all() {
    let (env, client, admin, reward_token) = setup();

    let first = make_token(&env);
    let second = make_token(&env);
    client.register_pool(&admin, &first, &100);
    client.register_pool(&admin, &second, &100);
    fund_campaign(&env, &client, &admin, &reward_token, 2_000, 100, 102);

    let alice = Address::generate(&env);
    mint(&env, &first, &alice, 10);
    mint(&env, &second, &alice, 10);

    env.ledger().set_sequence_number(102);
    client.deposit(&alice, &first, &10);
    client.deposit(&alice, &second, &10);

    // Four blocks at 50/block per pool.
    env.ledger().set_sequence_number(106);
    assert_eq!(client.pending_reward(&first, &alice), 200);
    assert_eq!(client.pending_reward(&second, &alice), 200);

    assert_eq!(client.claim(&alice, &first), 200);
    assert_eq!(TokenClient::new(&env, &reward_token).balance(&alice), 200);
    assert_eq!(client.pending_reward(&first, &alice), 0);
    assert_eq!(client.pending_reward(&second, &alice), 200);

    env.ledger().set_sequence_number(108);
    assert_eq!(client.claim_all(&alice), 100 + 300);
    assert_eq!(TokenClient::new(&env, &reward_token).balance(&alice), 600);
    assert_eq!(client.pending_reward(&first, &alice), 0);
    assert_eq!(client.pending_reward(&second, &alice), 0);

    // Nothing new in the same block.
    assert_eq!(client.claim_all(&alice), 0);
}

#[test]
fn test_deposit_preserves_pending() {
    let (env, client, admin, reward_token) = setup();

    let stake_token = make_token(&env);
    client.register_pool(&admin, &stake_token, &100);
    fund_campaign(&env, &client, &admin, &reward_token, 2_000, 100, 102);

    let alice = Address::generate(&env);
    mint(&env, &stake_token, &alice, 100);

    env.ledger().set_sequence_number(102);
    client.deposit(&alice, &stake_token, &10);

    env.ledger().set_sequence_number(105);
    assert_eq!(client.pending_reward(&stake_token, &alice), 300);

    // Topping up neither harvests nor erases what is already owed.
    client.deposit(&alice, &stake_token, &10);
    assert_eq!(client.pending_reward(&stake_token, &alice), 300);
    assert_eq!(TokenClient::new(&env, &reward_token).balance(&alice), 0);

    env.ledger().set_sequence_number(106);
    assert_eq!(client.pending_reward(&stake_token, &alice), 400);

    env.ledger().set_sequence_number(107);
    client.withdraw_all(&alice, &stake_token);
    assert_eq!(TokenClient::new(&env, &reward_token).balance(&alice), 500);
    assert_eq!(TokenClient::new(&env, &stake_token).balance(&alice), 100);
}

#[test]
fn test_reclaim_commits_tail_accrual_first() {
    let (env, client, admin, reward_token) = setup();

    let stake_token = make_token(&env);
    client.register_pool(&admin, &stake_token, &100);
    fund_campaign(&env, &client, &admin, &reward_token, 2_000, 100, 102);

    let alice = Address::generate(&env);
    mint(&env, &stake_token, &alice, 100);

    // Alice stakes for the second half of the window only.
    env.ledger().set_sequence_number(112);
    client.deposit(&alice, &stake_token, &10);

    // The sweep must not take the 1000 still owed for blocks 112..122.
    env.ledger().set_sequence_number(130);
    assert_eq!(client.reclaim_remainder(&admin), 1_000);
    assert_eq!(client.pending_reward(&stake_token, &alice), 1_000);

    assert_eq!(client.claim(&alice, &stake_token), 1_000);
    assert_eq!(TokenClient::new(&env, &reward_token).balance(&alice), 1_000);
    assert_eq!(TokenClient::new(&env, &reward_token).balance(&admin), 1_000);
    assert_eq!(
        TokenClient::new(&env, &reward_token).balance(&client.address),
        0
    );
}

#[test]
fn test_reweight_takes_effect_from_the_reweight_block() {
    let (env, client, admin, reward_token) = setup();

    let first = make_token(&env);
    let second = make_token(&env);
    client.register_pool(&admin, &first, &100);
    client.register_pool(&admin, &second, &100);
    fund_campaign(&env, &client, &admin, &reward_token, 2_000, 100, 102);

    let alice = Address::generate(&env);
    mint(&env, &first, &alice, 10);

    env.ledger().set_sequence_number(102);
    client.deposit(&alice, &first, &10);

    // Two blocks at 100/200 weight.
    env.ledger().set_sequence_number(104);
    assert_eq!(client.pending_reward(&first, &alice), 100);

    // The reweight advances the pool first, committing the elapsed blocks
    // at the old weight.
    client.reweight_pool(&admin, &first, &300);
    assert_eq!(client.get_campaign().remaining, 1_900);
    assert_eq!(client.total_alloc_point(), 400);

    // From here: 300/400 weight, 75 per block.
    env.ledger().set_sequence_number(106);
    assert_eq!(client.pending_reward(&first, &alice), 250);
}
