/// Fund farm instruction handler.
///
/// Deposits reward tokens and extends the reward window.
///
/// ## Security Guarantees
/// - Admin only
/// - Reward vault validation ensures the farm's own PDA
/// - Mint validation prevents wrong token deposits
/// - A closed window is never reopened

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::accounting;
use crate::constants::*;
use crate::error::FarmError;
use crate::events::FarmFunded;
use crate::state::Farm;
use crate::utils::{mass_update_pools, transfer_tokens};

/// Accounts required for funding the farm.
///
/// Once accrual has started, every pool must be passed as a writable
/// remaining account, in index order.
#[derive(Accounts)]
pub struct FundFarm<'info> {
    /// The admin funding the farm.
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
        has_one = authority @ FarmError::Unauthorized,
        has_one = reward_vault @ FarmError::RewardVaultMismatch
    )]
    pub farm: Account<'info, Farm>,

    /// Funder's reward token account.
    #[account(
        mut,
        constraint = funder_token_account.mint == farm.reward_mint @ FarmError::MintMismatch,
        constraint = funder_token_account.owner == authority.key() @ FarmError::Unauthorized
    )]
    pub funder_token_account: Account<'info, TokenAccount>,

    /// Farm's reward vault.
    #[account(
        mut,
        constraint = reward_vault.owner == farm.key() @ FarmError::RewardVaultMismatch
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Fund the farm with `amount` reward tokens.
///
/// The window grows by `amount / reward_per_block` whole blocks; the
/// remainder stays in the vault unallocated.
pub fn handler(ctx: Context<FundFarm>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;

    require!(
        ctx.accounts.funder_token_account.amount >= amount,
        FarmError::InvalidAmount
    );

    let farm = &ctx.accounts.farm;
    if farm.pool_count > 0 && clock.slot > farm.start_block {
        mass_update_pools(farm, ctx.remaining_accounts, clock.slot)?;
    }

    let farm = &mut ctx.accounts.farm;
    let blocks_added = accounting::farm::fund(farm, amount, clock.slot)?;
    farm.last_updated = clock.unix_timestamp;

    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.funder_token_account,
        &ctx.accounts.reward_vault,
        ctx.accounts.authority.to_account_info(),
        amount,
    )?;

    let farm = &ctx.accounts.farm;
    msg!("Farm funded with {} tokens (+{} blocks)", amount, blocks_added);
    msg!("Reward window: {} -> {}", farm.start_block, farm.end_block);
    msg!("Total funded: {}", farm.total_funded);

    emit!(FarmFunded {
        farm: farm.key(),
        amount,
        blocks_added,
        end_block: farm.end_block,
    });

    Ok(())
}
