//! Per-(pool, depositor) stake and reward-debt records.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

const POS: Symbol = symbol_short!("POS");

/// A depositor's stake in one pool.
///
/// `reward_debt` is the accumulator baseline at the last synchronization;
/// pending reward is always `staked * acc / SCALE - reward_debt`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub staked: i128,
    pub reward_debt: i128,
}

/// Positions are created implicitly on first deposit and persist (with
/// possibly zero stake) afterwards; absent records read as empty.
pub fn load(env: &Env, pool_index: u32, depositor: &Address) -> Position {
    env.storage()
        .persistent()
        .get(&(POS, pool_index, depositor.clone()))
        .unwrap_or(Position {
            staked: 0,
            reward_debt: 0,
        })
}

pub fn store(env: &Env, pool_index: u32, depositor: &Address, position: &Position) {
    env.storage()
        .persistent()
        .set(&(POS, pool_index, depositor.clone()), position);
}
