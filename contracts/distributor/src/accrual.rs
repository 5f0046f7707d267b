//! The accrual engine: brings a pool's accumulator up to a block height.
//!
//! `advance` is a pure state transition shared by every path that needs
//! the accumulator current. Mutating entry points persist its output and
//! draw the minted amount down from the campaign remainder; read-only
//! queries call the same function and drop the result. Calling it twice
//! at the same height is a no-op the second time.

use crate::campaign::{self, Campaign};
use crate::math;
use crate::pools::Pool;

/// Advance `pool` to `current_block` under `campaign`, returning the
/// updated pool and the reward minted into its accumulator.
///
/// Reward for an interval in which the pool had zero stake is permanently
/// skipped: the clock still advances but nothing is minted and the
/// remainder is untouched.
pub fn advance(
    pool: &Pool,
    campaign: &Campaign,
    total_alloc_point: u64,
    current_block: u32,
) -> (Pool, i128) {
    let mut updated = pool.clone();
    updated.last_accrual_block = current_block;

    let (from, to) = campaign::accrual_window(campaign, pool.last_accrual_block, current_block);
    if to <= from || total_alloc_point == 0 || pool.staked_supply == 0 {
        return (updated, 0);
    }

    let reward = math::pool_reward(
        to - from,
        campaign.per_block_rate,
        pool.alloc_point,
        total_alloc_point,
    );
    updated.acc_reward_per_share =
        pool.acc_reward_per_share + math::per_share_delta(reward, pool.staked_supply);
    (updated, reward)
}
