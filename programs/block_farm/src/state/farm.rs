use anchor_lang::prelude::*;

use crate::constants::FARM_SEED;
use crate::error::FarmError;

/// Singleton farm configuration and the funded reward window.
#[account]
#[derive(Default, Debug)]
pub struct Farm {
    pub authority: Pubkey,
    pub reward_mint: Pubkey,
    pub reward_vault: Pubkey,

    pub reward_per_block: u64,
    pub start_block: u64,
    pub end_block: u64,

    pub total_alloc_point: u64,
    pub pool_count: u64,

    pub total_funded: u64,
    pub total_paid_out: u64,
    pub total_forfeited: u64,

    pub created_at: i64,
    pub last_updated: i64,

    pub reward_vault_bump: u8,
    pub bump: u8,
}

impl Farm {
    pub const LEN: usize = 8 + (32 * 3) + (8 * 8) + (8 * 2) + 2;

    /// PDA signer seeds; the farm is the authority of every custody account.
    pub fn signer_seeds(&self) -> [&[u8]; 3] {
        [
            FARM_SEED,
            self.reward_mint.as_ref(),
            std::slice::from_ref(&self.bump),
        ]
    }

    /// Last block that can carry reward as of `current_block`.
    pub fn last_reward_block(&self, current_block: u64) -> u64 {
        current_block.min(self.end_block)
    }

    /// The block a newly inserted pool starts accruing from.
    pub fn pool_start_block(&self, current_block: u64) -> u64 {
        current_block.max(self.start_block)
    }

    pub fn is_closed(&self, current_block: u64) -> bool {
        current_block >= self.end_block
    }

    /// Reward released by the whole farm between `start_block` and `current_block`,
    /// clamped to the funded window.
    pub fn released_rewards(&self, current_block: u64) -> Result<u64> {
        let last = self.last_reward_block(current_block);
        if last <= self.start_block {
            return Ok(0);
        }
        (last - self.start_block)
            .checked_mul(self.reward_per_block)
            .ok_or_else(|| error!(FarmError::MathOverflow))
    }

    /// Released reward not yet paid out or written off.
    pub fn total_pending(&self, current_block: u64) -> Result<u64> {
        let settled = self
            .total_paid_out
            .checked_add(self.total_forfeited)
            .ok_or(FarmError::MathOverflow)?;
        Ok(self.released_rewards(current_block)?.saturating_sub(settled))
    }

    /// Number of whole blocks `amount` pays for; the remainder is dropped.
    pub fn blocks_funded_by(&self, amount: u64) -> Result<u64> {
        amount
            .checked_div(self.reward_per_block)
            .ok_or_else(|| error!(FarmError::InvalidRewardRate))
    }

    pub fn record_payout(&mut self, reward: u64) -> Result<()> {
        self.total_paid_out = self
            .total_paid_out
            .checked_add(reward)
            .ok_or(FarmError::MathOverflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn farm() -> Farm {
        Farm {
            reward_per_block: 100,
            start_block: 200,
            end_block: 300,
            ..Default::default()
        }
    }

    #[test]
    fn nothing_is_released_before_start() {
        let farm = farm();
        assert_eq!(farm.released_rewards(150).unwrap(), 0);
        assert_eq!(farm.released_rewards(200).unwrap(), 0);
        assert_eq!(farm.total_pending(199).unwrap(), 0);
    }

    #[test]
    fn release_stops_at_end_block() {
        let farm = farm();
        assert_eq!(farm.released_rewards(210).unwrap(), 1_000);
        assert_eq!(farm.released_rewards(300).unwrap(), 10_000);
        assert_eq!(farm.released_rewards(900).unwrap(), 10_000);
    }

    #[test]
    fn pending_nets_out_payouts_and_forfeits() {
        let mut farm = farm();
        farm.record_payout(3_750).unwrap();
        farm.total_forfeited = 50;
        assert_eq!(farm.total_pending(270).unwrap(), 3_200);
    }

    #[test]
    fn funding_drops_partial_blocks() {
        let farm = farm();
        assert_eq!(farm.blocks_funded_by(8_000).unwrap(), 80);
        assert_eq!(farm.blocks_funded_by(8_099).unwrap(), 80);
        assert_eq!(farm.blocks_funded_by(99).unwrap(), 0);
    }
}
