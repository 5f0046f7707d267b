//! Pool registry: the ordered table of stake-asset pools.
//!
//! Pools are keyed by their stake-token address and indexed in
//! registration order; a pool is created at most once per token and is
//! never removed.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

const POOL: Symbol = symbol_short!("POOL");
const PID: Symbol = symbol_short!("PID");
const N_POOLS: Symbol = symbol_short!("N_POOLS");
const TOT_ALLOC: Symbol = symbol_short!("TOT_ALLOC");

/// A registered stake-asset bucket with a reward weight.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    /// Token depositors stake into this pool.
    pub stake_token: Address,
    /// Relative weight in per-block reward emission.
    pub alloc_point: u32,
    /// Block height the accumulator was last advanced to.
    pub last_accrual_block: u32,
    /// Cumulative reward per staked unit, scaled by `math::SCALE`.
    pub acc_reward_per_share: i128,
    /// Total stake held for this pool, tracked by the engine itself.
    /// Several pools may share one token with the reward custody, so the
    /// contract's token balance is never used as the supply.
    pub staked_supply: i128,
}

pub fn pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&N_POOLS).unwrap_or(0)
}

pub fn total_alloc_point(env: &Env) -> u64 {
    env.storage().instance().get(&TOT_ALLOC).unwrap_or(0)
}

pub fn set_total_alloc_point(env: &Env, total: u64) {
    env.storage().instance().set(&TOT_ALLOC, &total);
}

pub fn pool_index(env: &Env, stake_token: &Address) -> Option<u32> {
    env.storage().persistent().get(&(PID, stake_token.clone()))
}

pub fn get_pool(env: &Env, index: u32) -> Option<Pool> {
    env.storage().persistent().get(&(POOL, index))
}

pub fn store_pool(env: &Env, index: u32, pool: &Pool) {
    env.storage().persistent().set(&(POOL, index), pool);
}

/// Append a new pool and index it by stake token. The caller has already
/// rejected duplicates and advanced the existing pools.
pub fn insert_pool(env: &Env, pool: &Pool) -> u32 {
    let index = pool_count(env);
    env.storage().persistent().set(&(POOL, index), pool);
    env.storage()
        .persistent()
        .set(&(PID, pool.stake_token.clone()), &index);
    env.storage().instance().set(&N_POOLS, &(index + 1));
    set_total_alloc_point(env, total_alloc_point(env) + u64::from(pool.alloc_point));
    index
}
