/// Admin instruction handlers.
///
/// Handles admin-only operations on the farm.
///
/// ## Security Guarantees
/// - All admin functions require signer == farm.authority
/// - PDA validation ensures correct farm

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::FarmError;
use crate::events::AuthorityTransferred;
use crate::state::Farm;

/// Accounts required for admin operations.
///
/// ## Security Notes
/// - Authority must be signer
/// - Authority must match farm.authority (has_one constraint)
/// - Farm PDA validated via seeds
#[derive(Accounts)]
pub struct AdminControl<'info> {
    /// The admin authority.
    #[account(
        mut,
        constraint = authority.key() == farm.authority @ FarmError::Unauthorized
    )]
    pub authority: Signer<'info>,

    /// The farm to modify.
    #[account(
        mut,
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump,
        has_one = authority @ FarmError::Unauthorized
    )]
    pub farm: Account<'info, Farm>,
}

/// Transfer admin authority to a new address.
///
/// # Security
/// - Only current authority can call this
/// - New authority must be a valid pubkey (non-zero)
///
/// # Arguments
/// * `ctx` - AdminControl accounts context
/// * `new_authority` - New admin pubkey
pub fn transfer_authority_handler(ctx: Context<AdminControl>, new_authority: Pubkey) -> Result<()> {
    let farm = &mut ctx.accounts.farm;
    let clock = Clock::get()?;

    require!(
        new_authority != Pubkey::default(),
        FarmError::InvalidAuthority
    );

    let previous = farm.authority;
    farm.authority = new_authority;
    farm.last_updated = clock.unix_timestamp;

    msg!("Authority transferred: {} -> {}", previous, new_authority);

    emit!(AuthorityTransferred {
        farm: farm.key(),
        previous,
        authority: new_authority,
    });

    Ok(())
}
