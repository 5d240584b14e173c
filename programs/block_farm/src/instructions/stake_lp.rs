//! Stake instruction handler.
//!
//! Handles staking pool tokens into a farm pool, harvesting any pending
//! reward first.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::accounting;
use crate::constants::*;
use crate::error::FarmError;
use crate::events::Staked;
use crate::state::{Farm, FarmPool, UserStake};
use crate::utils::{transfer_tokens, transfer_tokens_signed};

/// Accounts required for staking.
#[derive(Accounts)]
pub struct StakeLp<'info> {
    /// The user staking tokens.
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

    /// The pool being staked into.
    #[account(
        mut,
        seeds = [FARM_POOL_SEED, farm.key().as_ref(), &farm_pool.index.to_le_bytes()],
        bump = farm_pool.bump,
        has_one = stake_vault @ FarmError::StakeVaultMismatch,
        constraint = farm_pool.farm == farm.key() @ FarmError::PoolMismatch
    )]
    pub farm_pool: Account<'info, FarmPool>,

    /// User's stake record (created on first stake).
    #[account(
        init_if_needed,
        payer = user,
        space = UserStake::LEN,
        seeds = [USER_STAKE_SEED, farm_pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_stake: Account<'info, UserStake>,

    /// User's token account for the pool's stake mint.
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

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

/// Stake `amount` into the pool.
///
/// # Errors
/// Returns `InvalidAmount` if the amount is zero or exceeds the user's balance.
pub fn handler(ctx: Context<StakeLp>, amount: u64) -> Result<()> {
    require!(
        ctx.accounts.user_token_account.amount >= amount,
        FarmError::InvalidAmount
    );

    let clock = Clock::get()?;
    let accounts = &mut *ctx.accounts;

    // First stake: bind the record to its owner and pool
    if accounts.user_stake.owner == Pubkey::default() {
        accounts.user_stake.owner = accounts.user.key();
        accounts.user_stake.farm_pool = accounts.farm_pool.key();
        accounts.user_stake.bump = ctx.bumps.user_stake;
    }

    let settlement = accounting::farm::stake(
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

    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.user_token_account,
        &ctx.accounts.stake_vault,
        ctx.accounts.user.to_account_info(),
        settlement.principal,
    )?;

    let farm_pool = &ctx.accounts.farm_pool;
    msg!("Staked {} tokens in pool {}", amount, farm_pool.index);
    msg!("Harvested {} reward tokens", settlement.reward);
    msg!("Total staked by user: {}", ctx.accounts.user_stake.amount);

    emit!(Staked {
        owner: ctx.accounts.user.key(),
        index: farm_pool.index,
        amount,
        reward: settlement.reward,
    });

    Ok(())
}
