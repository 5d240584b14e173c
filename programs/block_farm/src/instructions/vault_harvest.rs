//! Vault harvest instruction handler.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::accounting::vault::{self, VaultAccounts};
use crate::constants::*;
use crate::error::FarmError;
use crate::events::VaultHarvested;
use crate::state::{Farm, FarmPool, LockedPosition, LockedVault, UserStake};
use crate::utils::pay_vault_rewards;

#[derive(Accounts)]
pub struct VaultHarvest<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump,
        has_one = reward_vault @ FarmError::RewardVaultMismatch
    )]
    pub farm: Account<'info, Farm>,

    #[account(
        mut,
        seeds = [FARM_POOL_SEED, farm.key().as_ref(), &farm_pool.index.to_le_bytes()],
        bump = farm_pool.bump,
        constraint = farm_pool.farm == farm.key() @ FarmError::PoolMismatch
    )]
    pub farm_pool: Account<'info, FarmPool>,

    #[account(
        mut,
        seeds = [LOCKED_VAULT_SEED, farm_pool.key().as_ref()],
        bump = locked_vault.bump,
        has_one = farm_pool @ FarmError::PoolMismatch,
        has_one = reward_account @ FarmError::RewardVaultMismatch
    )]
    pub locked_vault: Account<'info, LockedVault>,

    #[account(
        mut,
        seeds = [USER_STAKE_SEED, farm_pool.key().as_ref(), locked_vault.key().as_ref()],
        bump = vault_stake.bump
    )]
    pub vault_stake: Account<'info, UserStake>,

    /// Created on demand so a caller without principal can harvest zero.
    #[account(
        init_if_needed,
        payer = user,
        space = LockedPosition::LEN,
        seeds = [LOCKED_POSITION_SEED, locked_vault.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub position: Account<'info, LockedPosition>,

    #[account(
        mut,
        constraint = user_reward_account.mint == farm.reward_mint @ FarmError::MintMismatch,
        constraint = user_reward_account.owner == user.key()
    )]
    pub user_reward_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub reward_account: Box<Account<'info, TokenAccount>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

impl<'info> VaultHarvest<'info> {
    fn accounting_view(&mut self) -> VaultAccounts<'_> {
        VaultAccounts {
            farm: &mut self.farm,
            pool: &mut self.farm_pool,
            vault_stake: &mut self.vault_stake,
            vault: &mut self.locked_vault,
            position: &mut self.position,
        }
    }
}

/// Claim the caller's share of the vault's farm reward.
pub fn handler(ctx: Context<VaultHarvest>) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut *ctx.accounts;

    if accounts.position.owner == Pubkey::default() {
        accounts.position.owner = accounts.user.key();
        accounts.position.vault = accounts.locked_vault.key();
        accounts.position.bump = ctx.bumps.position;
    }

    let settlement = vault::harvest(&mut accounts.accounting_view(), clock.slot)?;

    pay_vault_rewards(
        &ctx.accounts.token_program,
        &ctx.accounts.farm,
        &ctx.accounts.reward_vault,
        &ctx.accounts.locked_vault,
        &ctx.accounts.reward_account,
        &ctx.accounts.user_reward_account,
        &settlement,
    )?;

    let position = &ctx.accounts.position;
    msg!("Vault harvest: {} reward tokens", settlement.user_reward);
    msg!("Total claimed by position: {}", position.claimed);

    emit!(VaultHarvested {
        owner: ctx.accounts.user.key(),
        reward: settlement.user_reward,
        claimed: position.claimed,
    });

    Ok(())
}
