//! Set farm weight instruction handler.
//!
//! Re-weights one pool of the farm.
//!
//! ## Security Guarantees
//! - Admin only
//! - The pool PDA is bound to this farm
//! - With `with_update`, every pool must be passed in index order, so no
//!   pool settles under the new weighting for blocks it accrued under the old

use anchor_lang::prelude::*;

use crate::accounting;
use crate::constants::*;
use crate::error::FarmError;
use crate::events::FarmWeightSet;
use crate::state::{Farm, FarmPool};
use crate::utils::mass_update_pools;

/// Accounts required for re-weighting a pool.
///
/// With `with_update`, all pools follow as writable remaining accounts.
#[derive(Accounts)]
pub struct SetFarmWeight<'info> {
    /// The farm admin.
    #[account(
        constraint = authority.key() == farm.authority @ FarmError::Unauthorized
    )]
    pub authority: Signer<'info>,

    /// The farm whose total weight changes.
    #[account(
        mut,
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump,
        has_one = authority @ FarmError::Unauthorized
    )]
    pub farm: Account<'info, Farm>,

    /// The pool being re-weighted.
    /// SECURITY: PDA under this farm at its own index.
    #[account(
        mut,
        seeds = [FARM_POOL_SEED, farm.key().as_ref(), &farm_pool.index.to_le_bytes()],
        bump = farm_pool.bump,
        constraint = farm_pool.farm == farm.key() @ FarmError::PoolMismatch
    )]
    pub farm_pool: Account<'info, FarmPool>,
}

/// Change a pool's weight. The slot itself is never removed; a weight of
/// zero simply stops the pool's future accrual.
pub fn handler(ctx: Context<SetFarmWeight>, alloc_point: u64, with_update: bool) -> Result<()> {
    let clock = Clock::get()?;

    if with_update {
        mass_update_pools(&ctx.accounts.farm, ctx.remaining_accounts, clock.slot)?;
        // The target pool was rewritten through its remaining-account alias.
        ctx.accounts.farm_pool.reload()?;
    }

    let farm = &mut ctx.accounts.farm;
    let farm_pool = &mut ctx.accounts.farm_pool;

    let previous = accounting::farm::set_pool_weight(farm, farm_pool, alloc_point)?;
    farm.last_updated = clock.unix_timestamp;

    msg!(
        "Pool {} weight: {} -> {} (total {})",
        farm_pool.index,
        previous,
        alloc_point,
        farm.total_alloc_point
    );

    emit!(FarmWeightSet {
        pool: farm_pool.key(),
        index: farm_pool.index,
        previous_alloc_point: previous,
        alloc_point,
        total_alloc_point: farm.total_alloc_point,
    });

    Ok(())
}
