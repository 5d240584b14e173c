//! Withdraw instruction handler.
//!
//! Handles withdrawing staked tokens from a farm pool. A zero amount only
//! harvests.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::accounting;
use crate::constants::*;
use crate::error::FarmError;
use crate::events::Withdrawn;
use crate::state::{Farm, FarmPool, UserStake};
use crate::utils::transfer_tokens_signed;

/// Accounts required for withdrawing.
#[derive(Accounts)]
pub struct WithdrawLp<'info> {
    /// The user withdrawing tokens.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The farm.
    #[account(
        mut,
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump,
        has_one = reward_vault @ FarmError::RewardVaultMismatch
    )]
    pub farm: Account<'info, Farm>,

    /// The pool being withdrawn from.
    #[account(
        mut,
        seeds = [FARM_POOL_SEED, farm.key().as_ref(), &farm_pool.index.to_le_bytes()],
        bump = farm_pool.bump,
        has_one = stake_vault @ FarmError::StakeVaultMismatch,
        constraint = farm_pool.farm == farm.key() @ FarmError::PoolMismatch
    )]
    pub farm_pool: Account<'info, FarmPool>,

    /// User's stake record.
    #[account(
        mut,
        seeds = [USER_STAKE_SEED, farm_pool.key().as_ref(), user.key().as_ref()],
        bump = user_stake.bump,
        constraint = user_stake.owner == user.key() @ FarmError::Unauthorized,
        constraint = user_stake.farm_pool == farm_pool.key() @ FarmError::PoolMismatch
    )]
    pub user_stake: Account<'info, UserStake>,

    /// User's token account receiving the stake mint.
    #[account(
        mut,
        constraint = user_token_account.mint == farm_pool.stake_mint @ FarmError::MintMismatch,
        constraint = user_token_account.owner == user.key()
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// User's token account receiving harvested reward.
    #[account(
        mut,
        constraint = user_reward_account.mint == farm.reward_mint @ FarmError::MintMismatch,
        constraint = user_reward_account.owner == user.key()
    )]
    pub user_reward_account: Account<'info, TokenAccount>,

    /// Pool's stake custody account.
    #[account(mut)]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Farm's reward vault.
    #[account(mut)]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Withdraw `amount` from the pool and harvest pending reward.
///
/// # Errors
/// Returns `InsufficientStake` if `amount` exceeds the staked balance.
pub fn handler(ctx: Context<WithdrawLp>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut *ctx.accounts;

    let settlement = accounting::farm::withdraw(
        &mut accounts.farm,
        &mut accounts.farm_pool,
        &mut accounts.user_stake,
        amount,
        clock.slot,
    )?;

    let farm = &ctx.accounts.farm;
    let seeds = farm.signer_seeds();
    let signer_seeds = &[&seeds[..]];

    transfer_tokens_signed(
        &ctx.accounts.token_program,
        &ctx.accounts.reward_vault,
        &ctx.accounts.user_reward_account,
        farm.to_account_info(),
        signer_seeds,
        settlement.reward,
    )?;

    transfer_tokens_signed(
        &ctx.accounts.token_program,
        &ctx.accounts.stake_vault,
        &ctx.accounts.user_token_account,
        farm.to_account_info(),
        signer_seeds,
        settlement.principal,
    )?;

    let farm_pool = &ctx.accounts.farm_pool;
    msg!("Withdrew {} tokens from pool {}", amount, farm_pool.index);
    msg!("Harvested {} reward tokens", settlement.reward);
    msg!("Remaining staked: {}", ctx.accounts.user_stake.amount);

    emit!(Withdrawn {
        owner: ctx.accounts.user.key(),
        index: farm_pool.index,
        amount,
        reward: settlement.reward,
    });

    Ok(())
}
