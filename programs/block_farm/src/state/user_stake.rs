use anchor_lang::prelude::*;

use crate::error::FarmError;
use crate::math;

#[account]
#[derive(Default, Debug)]
pub struct UserStake {
    pub owner: Pubkey,
    pub farm_pool: Pubkey,

    pub amount: u64,
    pub reward_debt: u128,
    pub total_rewards_claimed: u64,

    pub bump: u8,
}

impl UserStake {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 16 + 8 + 1;

    /// Reward earned against `acc_reward_per_share` and not yet settled.
    pub fn pending(&self, acc_reward_per_share: u128) -> Result<u64> {
        let accrued = math::accrued(self.amount, acc_reward_per_share)?;
        math::to_u64(accrued.saturating_sub(self.reward_debt))
    }

    /// Price the current amount in at `acc_reward_per_share`, leaving nothing pending.
    pub fn checkpoint(&mut self, acc_reward_per_share: u128) -> Result<()> {
        self.reward_debt = math::accrued(self.amount, acc_reward_per_share)?;
        Ok(())
    }

    pub fn record_claim(&mut self, reward: u64) -> Result<()> {
        self.total_rewards_claimed = self
            .total_rewards_claimed
            .checked_add(reward)
            .ok_or(FarmError::MathOverflow)?;
        Ok(())
    }
}
