/// Add farm instruction handler.
///
/// Registers a new weighted pool for a stake mint.
///
/// ## Security Guarantees
/// - Admin only (signer must match farm.authority)
/// - Pool PDA is derived from the next free index, so indices never collide
/// - Stake vault is a PDA owned by the farm

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::accounting;
use crate::constants::*;
use crate::error::FarmError;
use crate::events::FarmAdded;
use crate::state::{Farm, FarmPool};
use crate::utils::mass_update_pools;

/// Accounts required for adding a pool.
///
/// When `with_update` is set, every existing pool must be passed as a
/// writable remaining account, in index order.
#[derive(Accounts)]
pub struct AddFarm<'info> {
    /// The admin authority.
    #[account(
        mut,
        constraint = authority.key() == farm.authority @ FarmError::Unauthorized
    )]
    pub authority: Signer<'info>,

    /// The farm.
    #[account(
        mut,
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump,
        has_one = authority @ FarmError::Unauthorized
    )]
    pub farm: Account<'info, Farm>,

    /// The pool account to be created at index `farm.pool_count`.
    #[account(
        init,
        payer = authority,
        space = FarmPool::LEN,
        seeds = [FARM_POOL_SEED, farm.key().as_ref(), &farm.pool_count.to_le_bytes()],
        bump
    )]
    pub farm_pool: Account<'info, FarmPool>,

    /// The mint users will stake into this pool.
    pub stake_mint: Account<'info, Mint>,

    /// Custody account for staked tokens.
    #[account(
        init,
        payer = authority,
        seeds = [POOL_VAULT_SEED, farm_pool.key().as_ref()],
        bump,
        token::mint = stake_mint,
        token::authority = farm
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

/// Append a pool with weight `alloc_point`.
///
/// # Arguments
/// * `ctx` - AddFarm accounts context
/// * `alloc_point` - Pool weight relative to the farm's total
/// * `with_update` - Settle existing pools under the old weighting first
pub fn handler(ctx: Context<AddFarm>, alloc_point: u64, with_update: bool) -> Result<()> {
    let clock = Clock::get()?;

    if with_update {
        mass_update_pools(&ctx.accounts.farm, ctx.remaining_accounts, clock.slot)?;
    }

    let farm = &mut ctx.accounts.farm;
    let farm_pool = &mut ctx.accounts.farm_pool;

    farm_pool.farm = farm.key();
    farm_pool.stake_mint = ctx.accounts.stake_mint.key();
    farm_pool.stake_vault = ctx.accounts.stake_vault.key();
    farm_pool.bump = ctx.bumps.farm_pool;
    farm_pool.vault_bump = ctx.bumps.stake_vault;

    let index = accounting::farm::add_pool(farm, farm_pool, alloc_point, clock.slot)?;
    farm.last_updated = clock.unix_timestamp;

    msg!("Added pool {} with alloc point {}", index, alloc_point);
    msg!("Stake mint: {}", farm_pool.stake_mint);
    msg!("Total alloc point: {}", farm.total_alloc_point);

    emit!(FarmAdded {
        farm: farm.key(),
        pool: farm_pool.key(),
        index,
        stake_mint: farm_pool.stake_mint,
        alloc_point,
        total_alloc_point: farm.total_alloc_point,
    });

    Ok(())
}
