#![allow(deprecated)] // events().publish migration to #[contractevent] pending

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub reward_token: Address,
    pub period: u32,
    pub block: u32,
}

/// Fired when the admin registers a new stake-token pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolRegisteredEvent {
    pub stake_token: Address,
    pub pool_index: u32,
    pub alloc_point: u32,
    pub total_alloc_point: u64,
    pub block: u32,
}

/// Fired when the admin changes a pool's weight.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolReweightedEvent {
    pub stake_token: Address,
    pub pool_index: u32,
    pub alloc_point: u32,
    pub total_alloc_point: u64,
    pub block: u32,
}

/// Fired when a funded campaign starts.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignStartedEvent {
    pub amount: i128,
    pub per_block_rate: i128,
    pub start_block: u32,
    pub end_block: u32,
    pub remaining: i128,
    pub block: u32,
}

/// Fired when the admin sweeps undistributed campaign funds.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemainderReclaimedEvent {
    pub admin: Address,
    pub amount: i128,
    pub block: u32,
}

/// Fired when a depositor stakes into a pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub depositor: Address,
    pub stake_token: Address,
    pub amount: i128,
    pub staked: i128,
    pub block: u32,
}

/// Fired when a depositor withdraws stake (and harvests).
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub depositor: Address,
    pub stake_token: Address,
    pub amount: i128,
    pub reward_paid: i128,
    pub block: u32,
}

/// Fired when a depositor harvests without touching stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub depositor: Address,
    pub stake_token: Address,
    pub amount: i128,
    pub block: u32,
}

/// Fired when a depositor exits a pool forfeiting pending reward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawEvent {
    pub depositor: Address,
    pub stake_token: Address,
    pub amount: i128,
    pub block: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, reward_token: Address, period: u32) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            reward_token,
            period,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_registered(
    env: &Env,
    stake_token: Address,
    pool_index: u32,
    alloc_point: u32,
    total_alloc_point: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), stake_token.clone()),
        PoolRegisteredEvent {
            stake_token,
            pool_index,
            alloc_point,
            total_alloc_point,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_reweighted(
    env: &Env,
    stake_token: Address,
    pool_index: u32,
    alloc_point: u32,
    total_alloc_point: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_SET"), stake_token.clone()),
        PoolReweightedEvent {
            stake_token,
            pool_index,
            alloc_point,
            total_alloc_point,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_campaign_started(
    env: &Env,
    amount: i128,
    per_block_rate: i128,
    start_block: u32,
    end_block: u32,
    remaining: i128,
) {
    env.events().publish(
        (symbol_short!("CAMPAIGN"),),
        CampaignStartedEvent {
            amount,
            per_block_rate,
            start_block,
            end_block,
            remaining,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_remainder_reclaimed(env: &Env, admin: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RECLAIM"),),
        RemainderReclaimedEvent {
            admin,
            amount,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_deposit(
    env: &Env,
    depositor: Address,
    stake_token: Address,
    amount: i128,
    staked: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), depositor.clone()),
        DepositEvent {
            depositor,
            stake_token,
            amount,
            staked,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_withdraw(
    env: &Env,
    depositor: Address,
    stake_token: Address,
    amount: i128,
    reward_paid: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), depositor.clone()),
        WithdrawEvent {
            depositor,
            stake_token,
            amount,
            reward_paid,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, depositor: Address, stake_token: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLAIM"), depositor.clone()),
        RewardClaimedEvent {
            depositor,
            stake_token,
            amount,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_emergency_withdraw(
    env: &Env,
    depositor: Address,
    stake_token: Address,
    amount: i128,
) {
    env.events().publish(
        (symbol_short!("EMERG_WD"), depositor.clone()),
        EmergencyWithdrawEvent {
            depositor,
            stake_token,
            amount,
            block: env.ledger().sequence(),
        },
    );
}
