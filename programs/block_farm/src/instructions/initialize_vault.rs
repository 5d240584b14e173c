/// Initialize vault instruction handler.
///
/// Creates a locked staking vault bound to one farm pool.
///
/// ## Security Guarantees
/// - Farm admin only
/// - The vault's farm stake is a regular user stake whose owner is the vault PDA,
///   so nobody but the vault can move it
/// - Vault reward account is a PDA owned by the vault

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::FarmError;
use crate::events::VaultInitialized;
use crate::state::{Farm, FarmPool, LockedVault, UserStake};

#[derive(Accounts)]
pub struct InitializeVault<'info> {
    /// The farm admin, who also becomes the vault admin.
    #[account(
        mut,
        constraint = authority.key() == farm.authority @ FarmError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump,
        has_one = authority @ FarmError::Unauthorized,
        has_one = reward_mint @ FarmError::MintMismatch
    )]
    pub farm: Account<'info, Farm>,

    /// The pool the vault deposits into.
    #[account(
        seeds = [FARM_POOL_SEED, farm.key().as_ref(), &farm_pool.index.to_le_bytes()],
        bump = farm_pool.bump,
        constraint = farm_pool.farm == farm.key() @ FarmError::PoolMismatch
    )]
    pub farm_pool: Account<'info, FarmPool>,

    #[account(
        init,
        payer = authority,
        space = LockedVault::LEN,
        seeds = [LOCKED_VAULT_SEED, farm_pool.key().as_ref()],
        bump
    )]
    pub locked_vault: Account<'info, LockedVault>,

    /// The vault's own stake record in the farm pool.
    #[account(
        init,
        payer = authority,
        space = UserStake::LEN,
        seeds = [USER_STAKE_SEED, farm_pool.key().as_ref(), locked_vault.key().as_ref()],
        bump
    )]
    pub vault_stake: Account<'info, UserStake>,

    pub reward_mint: Account<'info, Mint>,

    /// Holds reward harvested from the farm until positions claim it.
    #[account(
        init,
        payer = authority,
        seeds = [VAULT_REWARD_SEED, locked_vault.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = locked_vault
    )]
    pub reward_account: Box<Account<'info, TokenAccount>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

/// Create the vault.
///
/// # Arguments
/// * `treasury` - Receives any withdrawal penalty
/// * `operator` - May pause and unpause deposits alongside the admin
pub fn handler(ctx: Context<InitializeVault>, treasury: Pubkey, operator: Pubkey) -> Result<()> {
    let vault_key = ctx.accounts.locked_vault.key();
    let farm_pool_key = ctx.accounts.farm_pool.key();

    let vault_stake = &mut ctx.accounts.vault_stake;
    vault_stake.owner = vault_key;
    vault_stake.farm_pool = farm_pool_key;
    vault_stake.bump = ctx.bumps.vault_stake;

    let vault = &mut ctx.accounts.locked_vault;
    vault.admin = ctx.accounts.authority.key();
    vault.treasury = treasury;
    vault.operator = operator;
    vault.farm = ctx.accounts.farm.key();
    vault.farm_pool = farm_pool_key;
    vault.stake_mint = ctx.accounts.farm_pool.stake_mint;
    vault.reward_account = ctx.accounts.reward_account.key();
    vault.total_principal = 0;
    vault.acc_reward_per_share = 0;
    vault.total_harvested = 0;
    vault.position_count = 0;
    vault.paused = false;
    vault.bump = ctx.bumps.locked_vault;
    vault.reward_account_bump = ctx.bumps.reward_account;

    msg!("Locked vault initialized for pool {}", ctx.accounts.farm_pool.index);
    msg!("Admin: {}, treasury: {}, operator: {}", vault.admin, treasury, operator);

    emit!(VaultInitialized {
        vault: vault_key,
        farm_pool: farm_pool_key,
        admin: vault.admin,
        treasury,
        operator,
    });

    Ok(())
}
