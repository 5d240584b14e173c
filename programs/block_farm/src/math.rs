//! Checked fixed-point helpers shared by the farm and vault accumulators.
//!
//! Every accumulator is scaled by [`PRECISION`]. Divisions truncate; the
//! residue is the known, unclaimable dust.

use anchor_lang::prelude::*;

use crate::constants::PRECISION;
use crate::error::FarmError;

/// `a * b / c` over u128 with overflow reported as [`FarmError::MathOverflow`].
pub fn mul_div(a: u128, b: u128, c: u128) -> Result<u128> {
    a.checked_mul(b)
        .ok_or(FarmError::MathOverflow)?
        .checked_div(c)
        .ok_or_else(|| error!(FarmError::MathOverflow))
}

/// Increase of the per-share accumulator when `reward` is spread over `total_staked`.
pub fn reward_per_share(reward: u128, total_staked: u64) -> Result<u128> {
    if total_staked == 0 {
        return Ok(0);
    }
    mul_div(reward, PRECISION, total_staked as u128)
}

/// `amount * acc / PRECISION`, the reward a stake of `amount` has earned since
/// the accumulator was zero.
pub fn accrued(amount: u64, acc_reward_per_share: u128) -> Result<u128> {
    mul_div(amount as u128, acc_reward_per_share, PRECISION)
}

/// Narrow a u128 token quantity back to u64.
pub fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(FarmError::MathOverflow))
}
