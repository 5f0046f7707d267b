//! Fixed-point helpers for the per-share reward accumulator.
//!
//! Amounts are token `i128` values; the accumulator is scaled by `SCALE`
//! (10^12) so per-share values survive integer division. Every division
//! floors, which keeps truncation dust with the undistributed remainder
//! instead of over-paying a claimant.

/// Fixed-point scale for `acc_reward_per_share`.
pub const SCALE: i128 = 1_000_000_000_000;

/// Reward minted to one pool over `blocks` blocks at `per_block_rate`,
/// weighted by `alloc_point / total_alloc_point`.
pub fn pool_reward(
    blocks: u32,
    per_block_rate: i128,
    alloc_point: u32,
    total_alloc_point: u64,
) -> i128 {
    if total_alloc_point == 0 {
        return 0;
    }
    i128::from(blocks) * per_block_rate * i128::from(alloc_point) / i128::from(total_alloc_point)
}

/// Accumulator increment for `reward` spread over `staked_supply` units.
pub fn per_share_delta(reward: i128, staked_supply: i128) -> i128 {
    if staked_supply == 0 {
        return 0;
    }
    reward * SCALE / staked_supply
}

/// Reward owed to a position against the current accumulator.
pub fn pending(staked: i128, acc_reward_per_share: i128, reward_debt: i128) -> i128 {
    (staked * acc_reward_per_share / SCALE - reward_debt).max(0)
}

/// Debt baseline for `staked` units at the current accumulator.
pub fn debt_for(staked: i128, acc_reward_per_share: i128) -> i128 {
    staked * acc_reward_per_share / SCALE
}
