use anchor_lang::prelude::*;

use crate::error::FarmError;
use crate::math;

#[account]
#[derive(Default, Debug)]
pub struct LockedPosition {
    pub owner: Pubkey,
    pub vault: Pubkey,

    pub principal: u64,
    pub reward_debt: u128,
    pub claimed: u64,

    pub lock_start: i64,
    pub lock_end: i64,

    pub bump: u8,
}

impl LockedPosition {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 16 + 8 + 8 + 8 + 1;

    pub fn has_principal(&self) -> bool {
        self.principal > 0
    }

    pub fn is_lock_live(&self, now: i64) -> bool {
        self.has_principal() && now < self.lock_end
    }

    pub fn lock_duration(&self) -> i64 {
        self.lock_end.saturating_sub(self.lock_start)
    }

    pub fn pending(&self, acc_reward_per_share: u128) -> Result<u64> {
        let accrued = math::accrued(self.principal, acc_reward_per_share)?;
        math::to_u64(accrued.saturating_sub(self.reward_debt))
    }

    pub fn checkpoint(&mut self, acc_reward_per_share: u128) -> Result<()> {
        self.reward_debt = math::accrued(self.principal, acc_reward_per_share)?;
        Ok(())
    }

    pub fn record_claim(&mut self, reward: u64) -> Result<()> {
        self.claimed = self
            .claimed
            .checked_add(reward)
            .ok_or(FarmError::MathOverflow)?;
        Ok(())
    }
}
