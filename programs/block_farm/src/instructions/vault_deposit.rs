//! Vault deposit instruction handler.
//!
//! Locks principal in the vault, which forwards it into its farm pool.
//! A zero amount against an existing position only harvests.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::accounting::vault::{self, VaultAccounts};
use crate::constants::*;
use crate::error::FarmError;
use crate::events::VaultDeposited;
use crate::state::{Farm, FarmPool, LockedPosition, LockedVault, UserStake};
use crate::utils::{pay_vault_rewards, transfer_tokens};

#[derive(Accounts)]
pub struct VaultDeposit<'info> {
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
        has_one = stake_vault @ FarmError::StakeVaultMismatch,
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
        constraint = user_token_account.mint == farm_pool.stake_mint @ FarmError::MintMismatch,
        constraint = user_token_account.owner == user.key()
    )]
    pub user_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = user_reward_account.mint == farm.reward_mint @ FarmError::MintMismatch,
        constraint = user_reward_account.owner == user.key()
    )]
    pub user_reward_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub stake_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    /// Vault's reward custody account.
    #[account(mut)]
    pub reward_account: Box<Account<'info, TokenAccount>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

impl<'info> VaultDeposit<'info> {
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

/// Deposit `amount` with a lock of `lock_duration` seconds.
///
/// # Errors
/// - `NothingToDeposit` for a zero amount without principal
/// - `BelowMinimumDeposit` below `MIN_DEPOSIT_AMOUNT`
/// - `LockTooShort` / `LockTooLong` outside the lock bounds
/// - `VaultPaused` while deposits are paused
pub fn handler(ctx: Context<VaultDeposit>, amount: u64, lock_duration: i64) -> Result<()> {
    require!(
        ctx.accounts.user_token_account.amount >= amount,
        FarmError::InvalidAmount
    );

    let clock = Clock::get()?;
    let accounts = &mut *ctx.accounts;

    if accounts.position.owner == Pubkey::default() {
        accounts.position.owner = accounts.user.key();
        accounts.position.vault = accounts.locked_vault.key();
        accounts.position.bump = ctx.bumps.position;
    }

    let settlement = vault::deposit(
        &mut accounts.accounting_view(),
        amount,
        lock_duration,
        clock.slot,
        clock.unix_timestamp,
    )?;

    pay_vault_rewards(
        &ctx.accounts.token_program,
        &ctx.accounts.farm,
        &ctx.accounts.reward_vault,
        &ctx.accounts.locked_vault,
        &ctx.accounts.reward_account,
        &ctx.accounts.user_reward_account,
        &settlement,
    )?;

    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.user_token_account,
        &ctx.accounts.stake_vault,
        ctx.accounts.user.to_account_info(),
        amount,
    )?;

    let position = &ctx.accounts.position;
    msg!("Vault deposit of {} locked until {}", amount, position.lock_end);
    msg!("Harvested {} reward tokens", settlement.user_reward);
    msg!("Position principal: {}", position.principal);

    emit!(VaultDeposited {
        owner: ctx.accounts.user.key(),
        amount,
        lock_end: position.lock_end,
        reward: settlement.user_reward,
    });

    Ok(())
}
