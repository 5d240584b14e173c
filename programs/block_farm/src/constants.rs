//! Program constants for the Block Farm program.
//!
//! This module defines the PDA seeds, the fixed-point precision used by the
//! reward accumulators, and the deposit/lock bounds enforced by the vault.

/// Seed for deriving the farm PDA (one per reward mint)
pub const FARM_SEED: &[u8] = b"farm";

/// Seed for deriving the farm's reward custody account
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";

/// Seed for deriving farm pool PDAs (farm + little-endian pool index)
pub const FARM_POOL_SEED: &[u8] = b"farm_pool";

/// Seed for deriving a pool's stake custody account
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";

/// Seed for deriving user stake account PDAs
pub const USER_STAKE_SEED: &[u8] = b"user_stake";

/// Seed for deriving the locked vault PDA (one per farm pool)
pub const LOCKED_VAULT_SEED: &[u8] = b"locked_vault";

/// Seed for deriving the locked vault's reward custody account
pub const VAULT_REWARD_SEED: &[u8] = b"vault_reward";

/// Seed for deriving locked position PDAs
pub const LOCKED_POSITION_SEED: &[u8] = b"locked_position";

/// Number of seconds in a day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Shortest lock a vault deposit may request (7 days)
pub const MIN_LOCK_DURATION: i64 = 7 * SECONDS_PER_DAY;

/// Longest total lock a vault position may carry (365 days)
pub const MAX_LOCK_DURATION: i64 = 365 * SECONDS_PER_DAY;

/// Smallest non-zero vault deposit, in base units of the staked mint
pub const MIN_DEPOSIT_AMOUNT: u64 = 10_000;

/// Fixed-point scale of every reward-per-share accumulator
pub const PRECISION: u128 = 1_000_000_000_000; // 10^12
