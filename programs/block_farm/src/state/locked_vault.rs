use anchor_lang::prelude::*;

use crate::constants::LOCKED_VAULT_SEED;
use crate::error::FarmError;
use crate::math;

/// Aggregating depositor into a single farm pool.
///
/// The vault owns one [`UserStake`](crate::state::UserStake) in `farm_pool` and
/// spreads what that stake harvests over its positions with its own
/// per-share accumulator.
#[account]
#[derive(Default, Debug)]
pub struct LockedVault {
    pub admin: Pubkey,
    pub treasury: Pubkey,
    pub operator: Pubkey,

    pub farm: Pubkey,
    pub farm_pool: Pubkey,
    pub stake_mint: Pubkey,
    pub reward_account: Pubkey,

    pub total_principal: u64,
    pub acc_reward_per_share: u128,
    pub total_harvested: u64,
    pub position_count: u64,

    pub paused: bool,

    pub reward_account_bump: u8,
    pub bump: u8,
}

impl LockedVault {
    pub const LEN: usize = 8 + (32 * 7) + 8 + 16 + 8 + 8 + 1 + 2;

    pub fn signer_seeds(&self) -> [&[u8]; 3] {
        [
            LOCKED_VAULT_SEED,
            self.farm_pool.as_ref(),
            std::slice::from_ref(&self.bump),
        ]
    }

    /// Spread reward harvested from the farm over all vault principal.
    pub fn distribute(&mut self, reward: u64) -> Result<()> {
        if reward == 0 || self.total_principal == 0 {
            return Ok(());
        }
        self.acc_reward_per_share = self
            .acc_reward_per_share
            .checked_add(math::reward_per_share(reward as u128, self.total_principal)?)
            .ok_or(FarmError::MathOverflow)?;
        self.total_harvested = self
            .total_harvested
            .checked_add(reward)
            .ok_or(FarmError::MathOverflow)?;
        Ok(())
    }

    pub fn is_operator_or_admin(&self, key: &Pubkey) -> bool {
        *key == self.admin || *key == self.operator
    }
}
