//! Error types for the Block Farm program.
//!
//! This module defines all custom error codes that can be returned by the program.
//! Each error has a unique code and descriptive message.
//!
//! ## Error Code Groups
//! - 6000-6006: Input validation errors
//! - 6007-6012: State/balance errors
//! - 6013: Math/overflow errors
//! - 6014-6015: Authorization errors
//! - 6016-6019: Account validation errors

use anchor_lang::prelude::*;

/// Custom error codes for the Block Farm program.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum FarmError {
    // ========== Input Validation Errors (6000-6006) ==========

    /// [6000] Zero amount, or an amount the token account cannot cover.
    #[msg("Invalid amount: zero or not covered by the source token account")]
    InvalidAmount,

    /// [6001] Vault deposit of zero with no principal to harvest against.
    #[msg("Nothing to deposit")]
    NothingToDeposit,

    /// [6002] Vault deposit below the minimum size.
    #[msg("Deposit is below the minimum deposit amount")]
    BelowMinimumDeposit,

    /// [6003] Requested lock is shorter than one week.
    #[msg("Lock duration is shorter than the minimum (7 days)")]
    LockTooShort,

    /// [6004] Resulting lock is longer than one year.
    #[msg("Lock duration is longer than the maximum (365 days)")]
    LockTooLong,

    /// [6005] Reward per block must be greater than zero.
    #[msg("Reward per block must be greater than zero")]
    InvalidRewardRate,

    /// [6006] Start block is already in the past.
    #[msg("Start block must not be earlier than the current block")]
    InvalidStartBlock,

    // ========== State/Balance Errors (6007-6012) ==========

    /// [6007] Withdrawal exceeds the staked amount.
    #[msg("Withdraw amount exceeds staked balance")]
    InsufficientStake,

    /// [6008] The reward window has ended and can no longer be extended.
    #[msg("Farm is closed: the funded window has already ended")]
    FarmClosed,

    /// [6009] Vault deposits are paused.
    #[msg("Vault is paused")]
    VaultPaused,

    /// [6010] Lock has not yet expired.
    #[msg("Lock period has not ended")]
    LockNotExpired,

    /// [6011] No principal in the vault position.
    #[msg("No active locked position")]
    NoActivePosition,

    /// [6012] Remaining accounts do not list every pool of the farm in order.
    #[msg("Remaining accounts must list every farm pool in index order")]
    PoolListMismatch,

    // ========== Math/Overflow Errors (6013) ==========

    /// [6013] Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    // ========== Authorization Errors (6014-6015) ==========

    /// [6014] Unauthorized - caller is not the admin.
    #[msg("Unauthorized: caller is not the admin")]
    Unauthorized,

    /// [6015] New authority is the default key.
    #[msg("Invalid authority: the default key cannot be an admin")]
    InvalidAuthority,

    // ========== Account Validation Errors (6016-6019) ==========

    /// [6016] Token account mint does not match the expected mint.
    #[msg("Token mint mismatch")]
    MintMismatch,

    /// [6017] The provided reward vault is not the farm's reward vault.
    #[msg("Reward vault address mismatch")]
    RewardVaultMismatch,

    /// [6018] The provided stake vault is not the pool's stake vault.
    #[msg("Stake vault address mismatch")]
    StakeVaultMismatch,

    /// [6019] Pool does not belong to this farm, or stake does not belong to this pool.
    #[msg("Pool address mismatch")]
    PoolMismatch,
}
