//! Locked vault transitions.
//!
//! The vault is a single staker in its farm pool. Each transition first
//! harvests the vault's farm stake, spreads that reward over all positions,
//! then settles the caller's position before touching principal.

use anchor_lang::prelude::*;

use crate::accounting::farm;
use crate::accounting::withdrawal::{WithdrawalPolicy, WithdrawalQuote};
use crate::constants::*;
use crate::error::FarmError;
use crate::state::{Farm, FarmPool, LockedPosition, LockedVault, UserStake};

/// Mutable view over every account a vault transition touches.
pub struct VaultAccounts<'a> {
    pub farm: &'a mut Farm,
    pub pool: &'a mut FarmPool,
    pub vault_stake: &'a mut UserStake,
    pub vault: &'a mut LockedVault,
    pub position: &'a mut LockedPosition,
}

/// Reward movements produced by a vault settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VaultSettlement {
    /// Reward moving from the farm's reward vault to the vault's reward account.
    pub farm_reward: u64,
    /// Reward moving from the vault's reward account to the position owner.
    pub user_reward: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VaultWithdrawal {
    pub settlement: VaultSettlement,
    pub quote: WithdrawalQuote,
}

/// Check a deposit request against the size and lock bounds.
pub fn validate_deposit(
    position: &LockedPosition,
    amount: u64,
    lock_duration: i64,
    now: i64,
) -> Result<()> {
    require!(
        amount > 0 || position.has_principal(),
        FarmError::NothingToDeposit
    );
    require!(
        amount == 0 || amount >= MIN_DEPOSIT_AMOUNT,
        FarmError::BelowMinimumDeposit
    );

    // Any nonzero duration is a new lock or an extension; negatives never pass.
    let live = position.is_lock_live(now);
    if lock_duration != 0 || (amount > 0 && !live) {
        require!(lock_duration >= MIN_LOCK_DURATION, FarmError::LockTooShort);

        let total = if live {
            position
                .lock_duration()
                .checked_add(lock_duration)
                .ok_or(FarmError::MathOverflow)?
        } else {
            lock_duration
        };
        require!(total <= MAX_LOCK_DURATION, FarmError::LockTooLong);
    }
    Ok(())
}

/// Extend a live lock, or start a fresh one at `now`.
fn apply_lock(position: &mut LockedPosition, lock_duration: i64, now: i64) -> Result<()> {
    if lock_duration == 0 {
        return Ok(());
    }
    if position.is_lock_live(now) {
        position.lock_end = position
            .lock_end
            .checked_add(lock_duration)
            .ok_or(FarmError::MathOverflow)?;
    } else {
        position.lock_start = now;
        position.lock_end = now
            .checked_add(lock_duration)
            .ok_or(FarmError::MathOverflow)?;
    }
    Ok(())
}

/// Harvest the vault's farm stake and settle the caller's share.
fn settle(accounts: &mut VaultAccounts, current_block: u64) -> Result<VaultSettlement> {
    let farm_reward = farm::settle(
        accounts.farm,
        accounts.pool,
        accounts.vault_stake,
        current_block,
    )?;
    accounts.vault.distribute(farm_reward)?;

    let user_reward = accounts
        .position
        .pending(accounts.vault.acc_reward_per_share)?;
    if user_reward > 0 {
        accounts.position.record_claim(user_reward)?;
    }

    Ok(VaultSettlement {
        farm_reward,
        user_reward,
    })
}

/// Re-price both the vault's farm stake and the caller's position.
fn checkpoint(accounts: &mut VaultAccounts) -> Result<()> {
    accounts
        .vault_stake
        .checkpoint(accounts.pool.acc_reward_per_share)?;
    accounts
        .position
        .checkpoint(accounts.vault.acc_reward_per_share)
}

pub fn deposit(
    accounts: &mut VaultAccounts,
    amount: u64,
    lock_duration: i64,
    current_block: u64,
    now: i64,
) -> Result<VaultSettlement> {
    require!(!accounts.vault.paused, FarmError::VaultPaused);
    validate_deposit(accounts.position, amount, lock_duration, now)?;

    let settlement = settle(accounts, current_block)?;
    apply_lock(accounts.position, lock_duration, now)?;

    if amount > 0 {
        if !accounts.position.has_principal() {
            accounts.vault.position_count = accounts
                .vault
                .position_count
                .checked_add(1)
                .ok_or(FarmError::MathOverflow)?;
        }
        accounts.position.principal = accounts
            .position
            .principal
            .checked_add(amount)
            .ok_or(FarmError::MathOverflow)?;
        accounts.vault.total_principal = accounts
            .vault
            .total_principal
            .checked_add(amount)
            .ok_or(FarmError::MathOverflow)?;
        accounts.vault_stake.amount = accounts
            .vault_stake
            .amount
            .checked_add(amount)
            .ok_or(FarmError::MathOverflow)?;
        accounts.pool.add_stake(amount)?;
    }

    checkpoint(accounts)?;
    Ok(settlement)
}

/// Claim the caller's share. Succeeds with zero when nothing is owed.
pub fn harvest(accounts: &mut VaultAccounts, current_block: u64) -> Result<VaultSettlement> {
    let settlement = settle(accounts, current_block)?;
    checkpoint(accounts)?;
    Ok(settlement)
}

/// Withdraw the whole position through `policy`.
pub fn withdraw<P: WithdrawalPolicy>(
    accounts: &mut VaultAccounts,
    policy: &P,
    current_block: u64,
    now: i64,
) -> Result<VaultWithdrawal> {
    let quote = policy.compute_withdrawal(accounts.position, now)?;
    let principal = accounts.position.principal;
    require!(
        quote.payout.checked_add(quote.penalty) == Some(principal),
        FarmError::MathOverflow
    );

    let settlement = settle(accounts, current_block)?;

    accounts.position.principal = 0;
    accounts.vault.total_principal = accounts
        .vault
        .total_principal
        .checked_sub(principal)
        .ok_or(FarmError::MathOverflow)?;
    accounts.vault.position_count = accounts.vault.position_count.saturating_sub(1);
    accounts.vault_stake.amount = accounts
        .vault_stake
        .amount
        .checked_sub(principal)
        .ok_or(FarmError::InsufficientStake)?;
    accounts.pool.remove_stake(principal)?;

    checkpoint(accounts)?;
    Ok(VaultWithdrawal { settlement, quote })
}

/// Reward the position could claim at `current_block`.
pub fn pending(
    farm: &Farm,
    pool: &FarmPool,
    vault_stake: &UserStake,
    vault: &LockedVault,
    position: &LockedPosition,
    current_block: u64,
) -> Result<u64> {
    let farm_reward = farm::pending(farm, pool, vault_stake, current_block)?;

    let mut acc = vault.acc_reward_per_share;
    if vault.total_principal > 0 {
        acc = acc
            .checked_add(crate::math::reward_per_share(
                farm_reward as u128,
                vault.total_principal,
            )?)
            .ok_or(FarmError::MathOverflow)?;
    }
    position.pending(acc)
}
