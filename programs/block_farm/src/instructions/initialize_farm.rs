/// Initialize farm instruction handler.
///
/// Creates the farm singleton for a reward mint together with its reward
/// custody account.
///
/// ## Security Guarantees
/// - Reward vault is a PDA owned by the farm
/// - Reward mint is locked to farm state permanently
/// - The initializer becomes the admin

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::accounting;
use crate::constants::*;
use crate::events::FarmInitialized;
use crate::state::Farm;

/// Accounts required for farm initialization.
#[derive(Accounts)]
pub struct InitializeFarm<'info> {
    /// The admin authority that will control the farm.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The farm account to be created.
    /// SECURITY: PDA derived from FARM_SEED + reward mint ensures one farm per reward token.
    #[account(
        init,
        payer = authority,
        space = Farm::LEN,
        seeds = [FARM_SEED, reward_mint.key().as_ref()],
        bump
    )]
    pub farm: Account<'info, Farm>,

    /// The mint of the reward token.
    pub reward_mint: Account<'info, Mint>,

    /// The vault that will hold funded rewards.
    /// SECURITY: PDA with the farm as token authority.
    #[account(
        init,
        payer = authority,
        seeds = [REWARD_VAULT_SEED, farm.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = farm
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,

    /// Token program for token account operations.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar for rent-exempt calculations.
    pub rent: Sysvar<'info, Rent>,
}

/// Initialize a new farm.
///
/// The window starts empty (`end_block == start_block`) until the first
/// `fund_farm`.
///
/// # Arguments
/// * `ctx` - InitializeFarm accounts context
/// * `reward_per_block` - Reward released per block across all pools
/// * `start_block` - First block eligible for accrual, strictly after the current slot
pub fn handler(ctx: Context<InitializeFarm>, reward_per_block: u64, start_block: u64) -> Result<()> {
    let clock = Clock::get()?;

    let farm = &mut ctx.accounts.farm;
    accounting::farm::open_window(farm, reward_per_block, start_block, clock.slot)?;
    farm.authority = ctx.accounts.authority.key();
    farm.reward_mint = ctx.accounts.reward_mint.key();
    farm.reward_vault = ctx.accounts.reward_vault.key();
    farm.total_alloc_point = 0;
    farm.pool_count = 0;
    farm.total_funded = 0;
    farm.total_paid_out = 0;
    farm.total_forfeited = 0;
    farm.created_at = clock.unix_timestamp;
    farm.last_updated = clock.unix_timestamp;
    farm.bump = ctx.bumps.farm;
    farm.reward_vault_bump = ctx.bumps.reward_vault;

    msg!("Farm initialized");
    msg!("Admin: {}", farm.authority);
    msg!("Reward mint: {}", farm.reward_mint);
    msg!("Reward per block: {}, start block: {}", reward_per_block, start_block);

    emit!(FarmInitialized {
        farm: farm.key(),
        authority: farm.authority,
        reward_mint: farm.reward_mint,
        reward_per_block,
        start_block,
    });

    Ok(())
}
