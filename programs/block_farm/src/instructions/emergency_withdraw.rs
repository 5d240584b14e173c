//! Emergency withdraw instruction handler.
//!
//! Returns the whole stake immediately. Unclaimed reward is written off and
//! recorded on the farm as forfeited.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::accounting;
use crate::constants::*;
use crate::error::FarmError;
use crate::events::EmergencyWithdrawn;
use crate::state::{Farm, FarmPool, UserStake};
use crate::utils::transfer_tokens_signed;

/// Accounts required for an emergency exit.
#[derive(Accounts)]
pub struct EmergencyWithdraw<'info> {
    /// The staker leaving the pool.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The farm recording the forfeited reward.
    #[account(
        mut,
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,

    /// The pool being exited.
    /// SECURITY: Must be this farm's pool and own the stake vault.
    #[account(
        mut,
        seeds = [FARM_POOL_SEED, farm.key().as_ref(), &farm_pool.index.to_le_bytes()],
        bump = farm_pool.bump,
        has_one = stake_vault @ FarmError::StakeVaultMismatch,
        constraint = farm_pool.farm == farm.key() @ FarmError::PoolMismatch
    )]
    pub farm_pool: Account<'info, FarmPool>,

    /// The staker's position, zeroed by the exit.
    /// SECURITY: PDA per pool and owner.
    #[account(
        mut,
        seeds = [USER_STAKE_SEED, farm_pool.key().as_ref(), user.key().as_ref()],
        bump = user_stake.bump,
        constraint = user_stake.owner == user.key() @ FarmError::Unauthorized,
        constraint = user_stake.farm_pool == farm_pool.key() @ FarmError::PoolMismatch
    )]
    pub user_stake: Account<'info, UserStake>,

    /// The staker's account receiving the principal.
    #[account(
        mut,
        constraint = user_token_account.mint == farm_pool.stake_mint @ FarmError::MintMismatch,
        constraint = user_token_account.owner == user.key()
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// The pool's custody account.
    #[account(mut)]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Token program for the transfer.
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<EmergencyWithdraw>) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut *ctx.accounts;

    let exit = accounting::farm::emergency_withdraw(
        &mut accounts.farm,
        &mut accounts.farm_pool,
        &mut accounts.user_stake,
        clock.slot,
    );

    let farm = &ctx.accounts.farm;
    let seeds = farm.signer_seeds();
    let signer_seeds = &[&seeds[..]];

    transfer_tokens_signed(
        &ctx.accounts.token_program,
        &ctx.accounts.stake_vault,
        &ctx.accounts.user_token_account,
        farm.to_account_info(),
        signer_seeds,
        exit.principal,
    )?;

    let index = ctx.accounts.farm_pool.index;
    msg!("Emergency withdrew {} tokens from pool {}", exit.principal, index);
    msg!("Forfeited {} reward tokens", exit.forfeited);

    emit!(EmergencyWithdrawn {
        owner: ctx.accounts.user.key(),
        index,
        amount: exit.principal,
        forfeited: exit.forfeited,
    });

    Ok(())
}
