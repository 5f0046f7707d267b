//! Campaign lifecycle: a funded, time-boxed reward-emission window.

use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

const CAMPAIGN: Symbol = symbol_short!("CAMPAIGN");

/// The single active (or most recent) campaign record.
///
/// `remaining` carries over: a new campaign's funding is added on top of
/// whatever the previous one left undistributed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    /// Reward units emitted per block across all pools.
    pub per_block_rate: i128,
    pub start_block: u32,
    pub end_block: u32,
    /// Funds not yet minted into any pool's accumulator.
    pub remaining: i128,
}

pub fn load(env: &Env) -> Campaign {
    env.storage().instance().get(&CAMPAIGN).unwrap_or(Campaign {
        per_block_rate: 0,
        start_block: 0,
        end_block: 0,
        remaining: 0,
    })
}

pub fn store(env: &Env, campaign: &Campaign) {
    env.storage().instance().set(&CAMPAIGN, campaign);
}

/// Block span over which a pool accrues when advanced to `current_block`,
/// clamped to the campaign window. `to <= from` means nothing accrues;
/// that also covers "no campaign yet", since an empty record has
/// `start_block == end_block == 0`.
pub fn accrual_window(campaign: &Campaign, last_accrual_block: u32, current_block: u32) -> (u32, u32) {
    let from = last_accrual_block.max(campaign.start_block);
    let to = current_block.min(campaign.end_block);
    (from, to)
}
