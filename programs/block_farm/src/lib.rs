//! # Block Farm Program
//!
//! A block-driven reward farm distributing one reward token across any
//! number of weighted LP pools, plus a time-locked staking vault that stakes
//! into one of those pools on behalf of its depositors.
//!
//! - **Farm**: a fixed reward per slot, split between pools by allocation
//!   point and within a pool by stake size. Funding extends the reward window
//!   by `amount / reward_per_block` slots.
//! - **Locked vault**: deposits of at least `MIN_DEPOSIT_AMOUNT`, locked for
//!   one week up to one year. Withdrawal goes through a pluggable policy.
//!
//! ## Features
//! - Lazy per-pool accumulators brought current on every interaction
//! - Emergency exit that always returns principal and writes off reward
//! - Read instructions returning values through Anchor return data
//! - Every state change logged and emitted as an event

use anchor_lang::prelude::*;

declare_id!("B1kFarm3sZb7UeR6WmQm9h3XvJtq2pLTe8sYo4dRk5Wg");

pub mod accounting;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;
pub mod utils;

use instructions::*;

#[program]
pub mod block_farm {
    use super::*;

    /// Creates the farm and its reward vault.
    ///
    /// # Arguments
    /// * `reward_per_block` - Reward released per slot across all pools
    /// * `start_block` - First slot eligible for accrual
    ///
    /// # Errors
    /// Returns an error if the rate is zero or the start slot is in the past.
    pub fn initialize_farm(
        ctx: Context<InitializeFarm>,
        reward_per_block: u64,
        start_block: u64,
    ) -> Result<()> {
        instructions::initialize_farm::handler(ctx, reward_per_block, start_block)
    }

    /// Registers a new pool for a stake mint.
    ///
    /// When `with_update` is set, every existing pool must be passed in
    /// `remaining_accounts`, in index order.
    pub fn add_farm(ctx: Context<AddFarm>, alloc_point: u64, with_update: bool) -> Result<()> {
        instructions::add_farm::handler(ctx, alloc_point, with_update)
    }

    /// Changes a pool's allocation point.
    pub fn set_farm_weight(
        ctx: Context<SetFarmWeight>,
        alloc_point: u64,
        with_update: bool,
    ) -> Result<()> {
        instructions::set_farm_weight::handler(ctx, alloc_point, with_update)
    }

    /// Deposits reward tokens and extends the reward window.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the admin
    /// - Amount is zero
    /// - The farm has already closed
    pub fn fund_farm(ctx: Context<FundFarm>, amount: u64) -> Result<()> {
        instructions::fund_farm::handler(ctx, amount)
    }

    /// Stakes LP tokens, paying out any pending reward first.
    pub fn stake_lp(ctx: Context<StakeLp>, amount: u64) -> Result<()> {
        instructions::stake_lp::handler(ctx, amount)
    }

    /// Withdraws LP tokens and pending reward. A zero amount only harvests.
    ///
    /// # Errors
    /// Returns an error if `amount` exceeds the caller's stake.
    pub fn withdraw_lp(ctx: Context<WithdrawLp>, amount: u64) -> Result<()> {
        instructions::withdraw_lp::handler(ctx, amount)
    }

    /// Returns the caller's whole stake and forfeits its pending reward.
    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>) -> Result<()> {
        instructions::emergency_withdraw::handler(ctx)
    }

    /// Number of registered pools.
    pub fn pool_length(ctx: Context<FarmView>) -> Result<u64> {
        instructions::views::pool_length_handler(ctx)
    }

    /// Reward released so far and not yet paid out or forfeited.
    pub fn total_pending(ctx: Context<FarmView>) -> Result<u64> {
        instructions::views::total_pending_handler(ctx)
    }

    /// Reward `owner` could claim from the pool at the current slot.
    pub fn pending(ctx: Context<StakeView>, owner: Pubkey) -> Result<u64> {
        instructions::views::pending_handler(ctx, owner)
    }

    /// LP tokens staked by `owner` in the pool.
    pub fn staked_lp(ctx: Context<StakeView>, owner: Pubkey) -> Result<u64> {
        instructions::views::staked_lp_handler(ctx, owner)
    }

    /// Admin function to transfer authority to a new address.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the current admin
    /// - New authority is zero address
    pub fn transfer_authority(ctx: Context<AdminControl>, new_authority: Pubkey) -> Result<()> {
        instructions::admin::transfer_authority_handler(ctx, new_authority)
    }

    /// Creates a locked vault staking into one pool.
    ///
    /// # Arguments
    /// * `treasury` - Receives withdrawal penalties
    /// * `operator` - May pause deposits
    pub fn initialize_vault(
        ctx: Context<InitializeVault>,
        treasury: Pubkey,
        operator: Pubkey,
    ) -> Result<()> {
        instructions::initialize_vault::handler(ctx, treasury, operator)
    }

    /// Locks `amount` in the vault for `lock_duration` seconds.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Deposits are paused
    /// - Amount is zero and the caller has no position
    /// - Amount is below the minimum deposit
    /// - The lock is shorter than a week or longer than a year
    pub fn vault_deposit(ctx: Context<VaultDeposit>, amount: u64, lock_duration: i64) -> Result<()> {
        instructions::vault_deposit::handler(ctx, amount, lock_duration)
    }

    /// Claims the caller's vault reward. Succeeds with zero when nothing is owed.
    pub fn vault_harvest(ctx: Context<VaultHarvest>) -> Result<()> {
        instructions::vault_harvest::handler(ctx)
    }

    /// Withdraws the caller's whole vault position after its lock ends.
    pub fn vault_withdraw(ctx: Context<VaultWithdraw>) -> Result<()> {
        instructions::vault_withdraw::handler(ctx)
    }

    /// Reward a vault position could harvest at the current slot.
    pub fn vault_pending(ctx: Context<VaultView>, owner: Pubkey) -> Result<u64> {
        instructions::views::vault_pending_handler(ctx, owner)
    }

    /// Pause or resume vault deposits. Admin or operator.
    pub fn set_vault_paused(ctx: Context<VaultAdmin>, paused: bool) -> Result<()> {
        instructions::vault_admin::set_paused_handler(ctx, paused)
    }

    /// Replace the vault treasury and operator. Admin only.
    pub fn set_vault_roles(
        ctx: Context<VaultAdmin>,
        treasury: Pubkey,
        operator: Pubkey,
    ) -> Result<()> {
        instructions::vault_admin::set_roles_handler(ctx, treasury, operator)
    }
}
