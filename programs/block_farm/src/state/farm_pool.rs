use anchor_lang::prelude::*;

use crate::error::FarmError;
use crate::math;
use crate::state::Farm;

/// A weighted pool accepting one stake mint. The index is the durable identifier.
#[account]
#[derive(Default, Debug)]
pub struct FarmPool {
    pub farm: Pubkey,
    pub stake_mint: Pubkey,
    pub stake_vault: Pubkey,

    pub index: u64,
    pub alloc_point: u64,
    pub last_reward_block: u64,
    pub acc_reward_per_share: u128,
    pub total_staked: u64,

    pub vault_bump: u8,
    pub bump: u8,
}

impl FarmPool {
    pub const LEN: usize = 8 + (32 * 3) + (8 * 3) + 16 + 8 + 2;

    /// Accumulator value as of `current_block`, without touching state.
    ///
    /// Returns the projected `(acc_reward_per_share, last_reward_block)`.
    pub fn projected(&self, farm: &Farm, current_block: u64) -> Result<(u128, u64)> {
        let to = farm.last_reward_block(current_block);
        if to <= self.last_reward_block {
            return Ok((self.acc_reward_per_share, self.last_reward_block));
        }
        if self.total_staked == 0 || farm.total_alloc_point == 0 {
            return Ok((self.acc_reward_per_share, to));
        }

        let elapsed = (to - self.last_reward_block) as u128;
        let pool_reward = math::mul_div(
            elapsed
                .checked_mul(farm.reward_per_block as u128)
                .ok_or(FarmError::MathOverflow)?,
            self.alloc_point as u128,
            farm.total_alloc_point as u128,
        )?;
        let acc = self
            .acc_reward_per_share
            .checked_add(math::reward_per_share(pool_reward, self.total_staked)?)
            .ok_or(FarmError::MathOverflow)?;

        Ok((acc, to))
    }

    /// Bring the accumulator current. Blocks with nothing staked are skipped
    /// and their reward is not banked.
    pub fn update(&mut self, farm: &Farm, current_block: u64) -> Result<()> {
        let (acc, last_reward_block) = self.projected(farm, current_block)?;
        self.acc_reward_per_share = acc;
        self.last_reward_block = last_reward_block;
        Ok(())
    }

    pub fn add_stake(&mut self, amount: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(FarmError::MathOverflow)?;
        Ok(())
    }

    pub fn remove_stake(&mut self, amount: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(FarmError::InsufficientStake)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PRECISION;

    fn farm(total_alloc_point: u64) -> Farm {
        Farm {
            reward_per_block: 100,
            start_block: 100,
            end_block: 200,
            total_alloc_point,
            ..Default::default()
        }
    }

    fn pool(alloc_point: u64, total_staked: u64) -> FarmPool {
        FarmPool {
            alloc_point,
            last_reward_block: 100,
            total_staked,
            ..Default::default()
        }
    }

    #[test]
    fn update_spreads_weighted_reward_over_stake() {
        let farm = farm(20);
        let mut pool = pool(15, 2_000);
        pool.update(&farm, 110).unwrap();
        // 10 blocks * 100 * 15/20 = 750 over 2000 staked
        assert_eq!(pool.acc_reward_per_share, 750 * PRECISION / 2_000);
        assert_eq!(pool.last_reward_block, 110);
    }

    #[test]
    fn unstaked_blocks_are_skipped_not_banked() {
        let farm = farm(15);
        let mut pool = pool(15, 0);
        pool.update(&farm, 150).unwrap();
        assert_eq!(pool.acc_reward_per_share, 0);
        assert_eq!(pool.last_reward_block, 150);

        pool.add_stake(1_000).unwrap();
        pool.update(&farm, 160).unwrap();
        assert_eq!(pool.acc_reward_per_share, PRECISION);
    }

    #[test]
    fn accrual_is_clamped_to_end_block() {
        let farm = farm(15);
        let mut pool = pool(15, 1_000);
        pool.update(&farm, 500).unwrap();
        assert_eq!(pool.last_reward_block, 200);
        let acc = pool.acc_reward_per_share;

        pool.update(&farm, 800).unwrap();
        assert_eq!(pool.acc_reward_per_share, acc);
        assert_eq!(pool.last_reward_block, 200);
    }

    #[test]
    fn projection_does_not_mutate() {
        let farm = farm(15);
        let pool = pool(15, 1_000);
        let (acc, last) = pool.projected(&farm, 120).unwrap();
        assert_eq!(acc, 2 * PRECISION);
        assert_eq!(last, 120);
        assert_eq!(pool.acc_reward_per_share, 0);
        assert_eq!(pool.last_reward_block, 100);
    }

    #[test]
    fn removing_more_than_staked_fails() {
        let mut pool = pool(15, 10);
        assert_eq!(
            pool.remove_stake(11).unwrap_err(),
            FarmError::InsufficientStake.into()
        );
    }
}
