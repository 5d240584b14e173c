//! Farm-level transitions: pool registry, funding window, stake settlement.
//!
//! Every function here is a pure state transition over the account structs.
//! The current block is always an argument; token movements are returned as
//! data for the caller to execute.

use anchor_lang::prelude::*;

use crate::error::FarmError;
use crate::state::{Farm, FarmPool, UserStake};

/// Token movements owed to the staker after a stake or withdraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settlement {
    /// Reward to pay out of the farm's reward vault.
    pub reward: u64,
    /// Stake-mint principal to move into or out of the pool vault.
    pub principal: u64,
}

/// Outcome of an emergency exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmergencyExit {
    /// Principal returned to the staker.
    pub principal: u64,
    /// Accrued reward written off.
    pub forfeited: u64,
}

/// Set the emission rate and an empty window opening at `start_block`.
///
/// `start_block` must lie strictly after `current_block`: an empty window
/// that has already opened is closed and can never be funded.
pub fn open_window(
    farm: &mut Farm,
    reward_per_block: u64,
    start_block: u64,
    current_block: u64,
) -> Result<()> {
    require!(reward_per_block > 0, FarmError::InvalidRewardRate);
    require!(start_block > current_block, FarmError::InvalidStartBlock);

    farm.reward_per_block = reward_per_block;
    farm.start_block = start_block;
    farm.end_block = start_block;
    Ok(())
}

/// Register `pool` as the next pool of `farm`. Returns the new pool's index.
///
/// Callers that need existing pools settled under the old weighting must run
/// [`mass_update`] first.
pub fn add_pool(
    farm: &mut Farm,
    pool: &mut FarmPool,
    alloc_point: u64,
    current_block: u64,
) -> Result<u64> {
    let index = farm.pool_count;

    pool.index = index;
    pool.alloc_point = alloc_point;
    pool.last_reward_block = farm.pool_start_block(current_block);
    pool.acc_reward_per_share = 0;
    pool.total_staked = 0;

    farm.total_alloc_point = farm
        .total_alloc_point
        .checked_add(alloc_point)
        .ok_or(FarmError::MathOverflow)?;
    farm.pool_count = index.checked_add(1).ok_or(FarmError::MathOverflow)?;

    Ok(index)
}

/// Change a pool's weight, keeping `total_alloc_point` equal to the sum of
/// weights. Returns the previous weight.
pub fn set_pool_weight(farm: &mut Farm, pool: &mut FarmPool, alloc_point: u64) -> Result<u64> {
    let previous = pool.alloc_point;
    farm.total_alloc_point = farm
        .total_alloc_point
        .checked_sub(previous)
        .and_then(|total| total.checked_add(alloc_point))
        .ok_or(FarmError::MathOverflow)?;
    pool.alloc_point = alloc_point;
    Ok(previous)
}

/// Bring every pool current under the farm's present weighting.
pub fn mass_update(farm: &Farm, pools: &mut [FarmPool], current_block: u64) -> Result<()> {
    for pool in pools.iter_mut() {
        pool.update(farm, current_block)?;
    }
    Ok(())
}

/// Extend the reward window by the whole blocks `amount` pays for.
/// Returns the number of blocks added.
pub fn fund(farm: &mut Farm, amount: u64, current_block: u64) -> Result<u64> {
    require!(amount > 0, FarmError::InvalidAmount);
    require!(!farm.is_closed(current_block), FarmError::FarmClosed);

    let blocks = farm.blocks_funded_by(amount)?;
    farm.end_block = farm
        .end_block
        .checked_add(blocks)
        .ok_or(FarmError::MathOverflow)?;
    farm.total_funded = farm
        .total_funded
        .checked_add(amount)
        .ok_or(FarmError::MathOverflow)?;

    Ok(blocks)
}

/// Update the pool and settle whatever the stake has earned so far.
///
/// The stake's reward debt is left for the caller to re-price once the
/// principal change is applied.
pub fn settle(
    farm: &mut Farm,
    pool: &mut FarmPool,
    stake: &mut UserStake,
    current_block: u64,
) -> Result<u64> {
    pool.update(farm, current_block)?;

    let reward = stake.pending(pool.acc_reward_per_share)?;
    if reward > 0 {
        farm.record_payout(reward)?;
        stake.record_claim(reward)?;
    }
    Ok(reward)
}

pub fn stake(
    farm: &mut Farm,
    pool: &mut FarmPool,
    stake: &mut UserStake,
    amount: u64,
    current_block: u64,
) -> Result<Settlement> {
    require!(amount > 0, FarmError::InvalidAmount);

    let reward = settle(farm, pool, stake, current_block)?;

    stake.amount = stake
        .amount
        .checked_add(amount)
        .ok_or(FarmError::MathOverflow)?;
    pool.add_stake(amount)?;
    stake.checkpoint(pool.acc_reward_per_share)?;

    Ok(Settlement {
        reward,
        principal: amount,
    })
}

/// Withdraw `amount` of principal. Zero is a harvest-only call.
pub fn withdraw(
    farm: &mut Farm,
    pool: &mut FarmPool,
    stake: &mut UserStake,
    amount: u64,
    current_block: u64,
) -> Result<Settlement> {
    require!(amount <= stake.amount, FarmError::InsufficientStake);

    let reward = settle(farm, pool, stake, current_block)?;

    stake.amount -= amount;
    pool.remove_stake(amount)?;
    stake.checkpoint(pool.acc_reward_per_share)?;

    Ok(Settlement {
        reward,
        principal: amount,
    })
}

/// Return the whole stake and write off its unclaimed reward.
///
/// The pool accumulator is checkpointed first so the exiting stake's share of
/// the elapsed blocks is not spread over the remaining stakers. If that
/// checkpoint cannot be computed the exit still goes through.
pub fn emergency_withdraw(
    farm: &mut Farm,
    pool: &mut FarmPool,
    stake: &mut UserStake,
    current_block: u64,
) -> EmergencyExit {
    if let Ok((acc, last_reward_block)) = pool.projected(farm, current_block) {
        pool.acc_reward_per_share = acc;
        pool.last_reward_block = last_reward_block;
    }

    let forfeited = stake.pending(pool.acc_reward_per_share).unwrap_or(0);
    let principal = stake.amount;

    pool.total_staked = pool.total_staked.saturating_sub(principal);
    stake.amount = 0;
    stake.reward_debt = 0;
    farm.total_forfeited = farm.total_forfeited.saturating_add(forfeited);

    EmergencyExit {
        principal,
        forfeited,
    }
}

/// Reward `stake` could claim at `current_block`.
pub fn pending(farm: &Farm, pool: &FarmPool, stake: &UserStake, current_block: u64) -> Result<u64> {
    let (acc, _) = pool.projected(farm, current_block)?;
    stake.pending(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn farm() -> Farm {
        Farm {
            reward_per_block: 100,
            start_block: 100,
            end_block: 100,
            ..Default::default()
        }
    }

    #[test]
    fn open_window_requires_a_future_start_block() {
        let mut farm = Farm::default();
        assert_eq!(
            open_window(&mut farm, 0, 100, 50).unwrap_err(),
            FarmError::InvalidRewardRate.into()
        );
        assert_eq!(
            open_window(&mut farm, 100, 50, 50).unwrap_err(),
            FarmError::InvalidStartBlock.into()
        );
        assert_eq!(
            open_window(&mut farm, 100, 49, 50).unwrap_err(),
            FarmError::InvalidStartBlock.into()
        );

        open_window(&mut farm, 100, 51, 50).unwrap();
        assert_eq!(farm.start_block, 51);
        assert_eq!(farm.end_block, 51);

        // Still fundable in the block before the window opens.
        assert_eq!(fund(&mut farm, 1_000, 50).unwrap(), 10);
        assert_eq!(farm.end_block, 61);
    }

    #[test]
    fn add_pool_starts_no_earlier_than_start_block() {
        let mut farm = farm();
        let mut early = FarmPool::default();
        let mut late = FarmPool::default();

        assert_eq!(add_pool(&mut farm, &mut early, 15, 40).unwrap(), 0);
        assert_eq!(add_pool(&mut farm, &mut late, 5, 130).unwrap(), 1);

        assert_eq!(early.last_reward_block, 100);
        assert_eq!(late.last_reward_block, 130);
        assert_eq!(farm.total_alloc_point, 20);
        assert_eq!(farm.pool_count, 2);
    }

    #[test]
    fn set_pool_weight_keeps_the_sum() {
        let mut farm = farm();
        let mut a = FarmPool::default();
        let mut b = FarmPool::default();
        add_pool(&mut farm, &mut a, 15, 0).unwrap();
        add_pool(&mut farm, &mut b, 5, 0).unwrap();

        assert_eq!(set_pool_weight(&mut farm, &mut b, 0).unwrap(), 5);
        assert_eq!(farm.total_alloc_point, 15);
        set_pool_weight(&mut farm, &mut a, 30).unwrap();
        assert_eq!(farm.total_alloc_point, a.alloc_point + b.alloc_point);
    }

    #[test]
    fn fund_extends_by_whole_blocks() {
        let mut farm = farm();
        assert_eq!(fund(&mut farm, 10_000, 0).unwrap(), 100);
        assert_eq!(fund(&mut farm, 8_050, 150).unwrap(), 80);
        assert_eq!(farm.end_block, 280);
        assert_eq!(farm.total_funded, 18_050);
    }

    #[test]
    fn fund_rejects_zero_and_closed_window() {
        let mut farm = farm();
        assert_eq!(
            fund(&mut farm, 0, 0).unwrap_err(),
            FarmError::InvalidAmount.into()
        );
        fund(&mut farm, 1_000, 0).unwrap();
        assert_eq!(
            fund(&mut farm, 1_000, 110).unwrap_err(),
            FarmError::FarmClosed.into()
        );
    }

    #[test]
    fn stake_rejects_zero() {
        let mut farm = farm();
        let mut pool = FarmPool::default();
        let mut user = UserStake::default();
        add_pool(&mut farm, &mut pool, 1, 0).unwrap();
        assert_eq!(
            stake(&mut farm, &mut pool, &mut user, 0, 0).unwrap_err(),
            FarmError::InvalidAmount.into()
        );
    }

    #[test]
    fn withdraw_more_than_staked_fails_without_side_effects() {
        let mut farm = farm();
        let mut pool = FarmPool::default();
        let mut user = UserStake::default();
        add_pool(&mut farm, &mut pool, 1, 0).unwrap();
        fund(&mut farm, 10_000, 0).unwrap();
        stake(&mut farm, &mut pool, &mut user, 50, 0).unwrap();

        let before_acc = pool.acc_reward_per_share;
        let err = withdraw(&mut farm, &mut pool, &mut user, 51, 150).unwrap_err();
        assert_eq!(err, FarmError::InsufficientStake.into());
        assert_eq!(pool.acc_reward_per_share, before_acc);
        assert_eq!(user.amount, 50);
        assert_eq!(farm.total_paid_out, 0);
    }

    #[test]
    fn withdraw_zero_harvests_only() {
        let mut farm = farm();
        let mut pool = FarmPool::default();
        let mut user = UserStake::default();
        add_pool(&mut farm, &mut pool, 1, 0).unwrap();
        fund(&mut farm, 10_000, 0).unwrap();
        stake(&mut farm, &mut pool, &mut user, 50, 0).unwrap();

        let settlement = withdraw(&mut farm, &mut pool, &mut user, 0, 110).unwrap();
        assert_eq!(settlement, Settlement { reward: 1_000, principal: 0 });
        assert_eq!(user.amount, 50);
        assert_eq!(pending(&farm, &pool, &user, 110).unwrap(), 0);
    }

    #[test]
    fn emergency_withdraw_writes_off_pending() {
        let mut farm = farm();
        let mut pool = FarmPool::default();
        let mut user = UserStake::default();
        add_pool(&mut farm, &mut pool, 1, 0).unwrap();
        fund(&mut farm, 10_000, 0).unwrap();
        stake(&mut farm, &mut pool, &mut user, 50, 0).unwrap();

        let exit = emergency_withdraw(&mut farm, &mut pool, &mut user, 120);
        assert_eq!(exit, EmergencyExit { principal: 50, forfeited: 2_000 });
        assert_eq!(user.amount, 0);
        assert_eq!(user.reward_debt, 0);
        assert_eq!(pool.total_staked, 0);
        assert_eq!(farm.total_forfeited, 2_000);
        assert_eq!(farm.total_pending(120).unwrap(), 0);
    }
}
