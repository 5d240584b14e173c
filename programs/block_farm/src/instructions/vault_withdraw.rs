//! Vault withdraw instruction handler.
//!
//! Releases a whole position once the withdrawal policy allows it.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::accounting::vault::{self, VaultAccounts};
use crate::accounting::LockExpiryPolicy;
use crate::constants::*;
use crate::error::FarmError;
use crate::events::VaultWithdrawn;
use crate::state::{Farm, FarmPool, LockedPosition, LockedVault, UserStake};
use crate::utils::{pay_vault_rewards, transfer_tokens_signed};

#[derive(Accounts)]
pub struct VaultWithdraw<'info> {
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
        mut,
        seeds = [LOCKED_POSITION_SEED, locked_vault.key().as_ref(), user.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == user.key() @ FarmError::Unauthorized
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

    /// Receives any penalty the withdrawal policy charges.
    #[account(
        mut,
        constraint = treasury_token_account.mint == farm_pool.stake_mint @ FarmError::MintMismatch,
        constraint = treasury_token_account.owner == locked_vault.treasury @ FarmError::Unauthorized
    )]
    pub treasury_token_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub stake_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub reward_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> VaultWithdraw<'info> {
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

/// Withdraw the caller's whole position and its pending reward.
///
/// # Errors
/// - `NoActivePosition` if the position holds no principal
/// - `LockNotExpired` before the lock ends
pub fn handler(ctx: Context<VaultWithdraw>) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut *ctx.accounts;

    let withdrawal = vault::withdraw(
        &mut accounts.accounting_view(),
        &LockExpiryPolicy,
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
        &withdrawal.settlement,
    )?;

    let farm = &ctx.accounts.farm;
    let seeds = farm.signer_seeds();
    let signer_seeds = &[&seeds[..]];

    transfer_tokens_signed(
        &ctx.accounts.token_program,
        &ctx.accounts.stake_vault,
        &ctx.accounts.user_token_account,
        farm.to_account_info(),
        signer_seeds,
        withdrawal.quote.payout,
    )?;

    transfer_tokens_signed(
        &ctx.accounts.token_program,
        &ctx.accounts.stake_vault,
        &ctx.accounts.treasury_token_account,
        farm.to_account_info(),
        signer_seeds,
        withdrawal.quote.penalty,
    )?;

    msg!(
        "Vault withdrawal: payout {}, penalty {}",
        withdrawal.quote.payout,
        withdrawal.quote.penalty
    );
    msg!("Harvested {} reward tokens", withdrawal.settlement.user_reward);

    emit!(VaultWithdrawn {
        owner: ctx.accounts.user.key(),
        payout: withdrawal.quote.payout,
        penalty: withdrawal.quote.penalty,
        reward: withdrawal.settlement.user_reward,
    });

    Ok(())
}
