//! Token transfer and pool-list helpers shared by the instruction handlers.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::accounting::vault::VaultSettlement;
use crate::error::FarmError;
use crate::state::{Farm, FarmPool, LockedVault};

/// Move `amount` between token accounts with a signing wallet as authority.
pub fn transfer_tokens<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    authority: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let cpi_accounts = Transfer {
        from: from.to_account_info(),
        to: to.to_account_info(),
        authority,
    };
    let cpi_ctx = CpiContext::new(token_program.to_account_info(), cpi_accounts);
    token::transfer(cpi_ctx, amount)
}

/// Move `amount` out of a program-owned custody account.
pub fn transfer_tokens_signed<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let cpi_accounts = Transfer {
        from: from.to_account_info(),
        to: to.to_account_info(),
        authority,
    };
    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token::transfer(cpi_ctx, amount)
}

/// Route a vault settlement: farm reward vault -> vault reward account -> owner.
pub fn pay_vault_rewards<'info>(
    token_program: &Program<'info, Token>,
    farm: &Account<'info, Farm>,
    reward_vault: &Account<'info, TokenAccount>,
    vault: &Account<'info, LockedVault>,
    vault_reward_account: &Account<'info, TokenAccount>,
    user_reward_account: &Account<'info, TokenAccount>,
    settlement: &VaultSettlement,
) -> Result<()> {
    let farm_seeds = farm.signer_seeds();
    transfer_tokens_signed(
        token_program,
        reward_vault,
        vault_reward_account,
        farm.to_account_info(),
        &[&farm_seeds[..]],
        settlement.farm_reward,
    )?;

    let vault_seeds = vault.signer_seeds();
    transfer_tokens_signed(
        token_program,
        vault_reward_account,
        user_reward_account,
        vault.to_account_info(),
        &[&vault_seeds[..]],
        settlement.user_reward,
    )
}

/// Bring every pool of `farm` current.
///
/// `pools` must be the farm's complete pool list in index order, each
/// writable; this is what lets a weight change or a window extension apply
/// only to blocks that have not yet been accounted.
pub fn mass_update_pools(farm: &Account<Farm>, pools: &[AccountInfo], current_block: u64) -> Result<()> {
    require!(
        pools.len() as u64 == farm.pool_count,
        FarmError::PoolListMismatch
    );

    let farm_key = farm.key();
    for (index, info) in pools.iter().enumerate() {
        require!(
            info.owner == &crate::ID && info.is_writable,
            FarmError::PoolListMismatch
        );

        let mut data = info.try_borrow_mut_data()?;
        let mut pool = FarmPool::try_deserialize(&mut &data[..])?;
        require_keys_eq!(pool.farm, farm_key, FarmError::PoolMismatch);
        require!(pool.index == index as u64, FarmError::PoolListMismatch);

        pool.update(farm, current_block)?;
        pool.try_serialize(&mut &mut data[..])?;
    }

    msg!("Mass-updated {} pools at block {}", pools.len(), current_block);
    Ok(())
}
