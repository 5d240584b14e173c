//! Events emitted by the Block Farm program.

use anchor_lang::prelude::*;

#[event]
pub struct FarmInitialized {
    pub farm: Pubkey,
    pub authority: Pubkey,
    pub reward_mint: Pubkey,
    pub reward_per_block: u64,
    pub start_block: u64,
}

#[event]
pub struct FarmAdded {
    pub farm: Pubkey,
    pub pool: Pubkey,
    pub index: u64,
    pub stake_mint: Pubkey,
    pub alloc_point: u64,
    pub total_alloc_point: u64,
}

#[event]
pub struct FarmWeightSet {
    pub pool: Pubkey,
    pub index: u64,
    pub previous_alloc_point: u64,
    pub alloc_point: u64,
    pub total_alloc_point: u64,
}

#[event]
pub struct FarmFunded {
    pub farm: Pubkey,
    pub amount: u64,
    pub blocks_added: u64,
    pub end_block: u64,
}

#[event]
pub struct Staked {
    pub owner: Pubkey,
    pub index: u64,
    pub amount: u64,
    pub reward: u64,
}

#[event]
pub struct Withdrawn {
    pub owner: Pubkey,
    pub index: u64,
    pub amount: u64,
    pub reward: u64,
}

#[event]
pub struct EmergencyWithdrawn {
    pub owner: Pubkey,
    pub index: u64,
    pub amount: u64,
    pub forfeited: u64,
}

#[event]
pub struct AuthorityTransferred {
    pub farm: Pubkey,
    pub previous: Pubkey,
    pub authority: Pubkey,
}

#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub farm_pool: Pubkey,
    pub admin: Pubkey,
    pub treasury: Pubkey,
    pub operator: Pubkey,
}

#[event]
pub struct VaultDeposited {
    pub owner: Pubkey,
    pub amount: u64,
    pub lock_end: i64,
    pub reward: u64,
}

#[event]
pub struct VaultHarvested {
    pub owner: Pubkey,
    pub reward: u64,
    pub claimed: u64,
}

#[event]
pub struct VaultWithdrawn {
    pub owner: Pubkey,
    pub payout: u64,
    pub penalty: u64,
    pub reward: u64,
}

#[event]
pub struct VaultPauseSet {
    pub vault: Pubkey,
    pub paused: bool,
}

#[event]
pub struct VaultRolesSet {
    pub vault: Pubkey,
    pub treasury: Pubkey,
    pub operator: Pubkey,
}
