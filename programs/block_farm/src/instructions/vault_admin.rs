//! Vault admin instruction handlers.
//!
//! ## Security Guarantees
//! - Pausing is open to the vault admin and operator
//! - Role changes are admin only
//! - Withdrawals and harvests stay available while paused

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::FarmError;
use crate::events::{VaultPauseSet, VaultRolesSet};
use crate::state::LockedVault;

#[derive(Accounts)]
pub struct VaultAdmin<'info> {
    /// Vault admin, or operator for pausing.
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [LOCKED_VAULT_SEED, locked_vault.farm_pool.as_ref()],
        bump = locked_vault.bump
    )]
    pub locked_vault: Account<'info, LockedVault>,
}

/// Pause or resume vault deposits.
pub fn set_paused_handler(ctx: Context<VaultAdmin>, paused: bool) -> Result<()> {
    let vault = &mut ctx.accounts.locked_vault;
    require!(
        vault.is_operator_or_admin(&ctx.accounts.signer.key()),
        FarmError::Unauthorized
    );

    let previous_state = vault.paused;
    vault.paused = paused;

    msg!(
        "Vault deposits {} (was {})",
        if paused { "PAUSED" } else { "RESUMED" },
        if previous_state { "paused" } else { "active" }
    );

    emit!(VaultPauseSet {
        vault: vault.key(),
        paused,
    });

    Ok(())
}

/// Replace the treasury and operator identities.
pub fn set_roles_handler(ctx: Context<VaultAdmin>, treasury: Pubkey, operator: Pubkey) -> Result<()> {
    let vault = &mut ctx.accounts.locked_vault;
    require_keys_eq!(ctx.accounts.signer.key(), vault.admin, FarmError::Unauthorized);
    require!(treasury != Pubkey::default(), FarmError::InvalidAuthority);

    vault.treasury = treasury;
    vault.operator = operator;

    msg!("Vault treasury: {}, operator: {}", treasury, operator);

    emit!(VaultRolesSet {
        vault: vault.key(),
        treasury,
        operator,
    });

    Ok(())
}
