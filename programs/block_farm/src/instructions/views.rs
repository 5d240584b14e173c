//! Read-only instructions. Each returns its value through Anchor return data
//! and also logs it.

use anchor_lang::prelude::*;

use crate::accounting;
use crate::constants::*;
use crate::error::FarmError;
use crate::state::{Farm, FarmPool, LockedPosition, LockedVault, UserStake};

#[derive(Accounts)]
pub struct FarmView<'info> {
    #[account(
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,
}

/// Accounts for per-stake reads. `user_stake` may be omitted when the owner
/// has never staked in the pool.
#[derive(Accounts)]
pub struct StakeView<'info> {
    #[account(
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,

    #[account(
        seeds = [FARM_POOL_SEED, farm.key().as_ref(), &farm_pool.index.to_le_bytes()],
        bump = farm_pool.bump,
        constraint = farm_pool.farm == farm.key() @ FarmError::PoolMismatch
    )]
    pub farm_pool: Account<'info, FarmPool>,

    pub user_stake: Option<Account<'info, UserStake>>,
}

impl<'info> StakeView<'info> {
    fn stake_of(&self, owner: Pubkey) -> Result<Option<&UserStake>> {
        match &self.user_stake {
            Some(stake) => {
                require_keys_eq!(stake.owner, owner, FarmError::Unauthorized);
                require_keys_eq!(stake.farm_pool, self.farm_pool.key(), FarmError::PoolMismatch);
                Ok(Some(&**stake))
            }
            None => Ok(None),
        }
    }
}

#[derive(Accounts)]
pub struct VaultView<'info> {
    #[account(
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,

    #[account(
        seeds = [FARM_POOL_SEED, farm.key().as_ref(), &farm_pool.index.to_le_bytes()],
        bump = farm_pool.bump,
        constraint = farm_pool.farm == farm.key() @ FarmError::PoolMismatch
    )]
    pub farm_pool: Account<'info, FarmPool>,

    #[account(
        seeds = [LOCKED_VAULT_SEED, farm_pool.key().as_ref()],
        bump = locked_vault.bump,
        has_one = farm_pool @ FarmError::PoolMismatch
    )]
    pub locked_vault: Account<'info, LockedVault>,

    #[account(
        seeds = [USER_STAKE_SEED, farm_pool.key().as_ref(), locked_vault.key().as_ref()],
        bump = vault_stake.bump
    )]
    pub vault_stake: Account<'info, UserStake>,

    pub position: Option<Account<'info, LockedPosition>>,
}

pub fn pool_length_handler(ctx: Context<FarmView>) -> Result<u64> {
    let pool_count = ctx.accounts.farm.pool_count;
    msg!("Pool length: {}", pool_count);
    Ok(pool_count)
}

pub fn total_pending_handler(ctx: Context<FarmView>) -> Result<u64> {
    let clock = Clock::get()?;
    let total = ctx.accounts.farm.total_pending(clock.slot)?;
    msg!("Total pending at block {}: {}", clock.slot, total);
    Ok(total)
}

pub fn pending_handler(ctx: Context<StakeView>, owner: Pubkey) -> Result<u64> {
    let clock = Clock::get()?;
    let accounts = &ctx.accounts;

    let pending = match accounts.stake_of(owner)? {
        Some(stake) => {
            accounting::farm::pending(&accounts.farm, &accounts.farm_pool, stake, clock.slot)?
        }
        None => 0,
    };

    msg!("Pending for {} in pool {}: {}", owner, accounts.farm_pool.index, pending);
    Ok(pending)
}

pub fn staked_lp_handler(ctx: Context<StakeView>, owner: Pubkey) -> Result<u64> {
    let accounts = &ctx.accounts;
    let staked = accounts.stake_of(owner)?.map_or(0, |stake| stake.amount);
    msg!("Staked by {} in pool {}: {}", owner, accounts.farm_pool.index, staked);
    Ok(staked)
}

/// Reward a vault position could harvest now.
pub fn vault_pending_handler(ctx: Context<VaultView>, owner: Pubkey) -> Result<u64> {
    let clock = Clock::get()?;
    let accounts = &ctx.accounts;

    let pending = match &accounts.position {
        Some(position) => {
            require_keys_eq!(position.owner, owner, FarmError::Unauthorized);
            require_keys_eq!(position.vault, accounts.locked_vault.key(), FarmError::PoolMismatch);
            accounting::vault::pending(
                &accounts.farm,
                &accounts.farm_pool,
                &accounts.vault_stake,
                &accounts.locked_vault,
                position,
                clock.slot,
            )?
        }
        None => 0,
    };

    msg!("Vault pending for {}: {}", owner, pending);
    Ok(pending)
}
