use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use block_farm::accounting::farm;
use block_farm::accounting::vault::{self, VaultAccounts, VaultSettlement, VaultWithdrawal};
use block_farm::accounting::{LockExpiryPolicy, WithdrawalPolicy, WithdrawalQuote};
use block_farm::constants::{MAX_LOCK_DURATION, MIN_DEPOSIT_AMOUNT, SECONDS_PER_DAY};
use block_farm::error::FarmError;
use block_farm::state::{Farm, FarmPool, LockedPosition, LockedVault, UserStake};

const S: u64 = 100;
const WEEK: i64 = 7 * SECONDS_PER_DAY;

struct VaultHarness {
    farm: Farm,
    pool: FarmPool,
    vault_stake: UserStake,
    direct_stake: UserStake,
    vault: LockedVault,
    positions: BTreeMap<&'static str, LockedPosition>,
}

impl VaultHarness {
    /// One pool funded for 100 blocks from block 100, with a vault attached.
    fn new() -> Self {
        let mut farm = Farm {
            reward_mint: Pubkey::new_unique(),
            reward_per_block: 100,
            start_block: S,
            end_block: S,
            ..Default::default()
        };
        let mut pool = FarmPool::default();
        farm::add_pool(&mut farm, &mut pool, 10, 0).unwrap();
        farm::fund(&mut farm, 10_000, 0).unwrap();

        let vault = LockedVault {
            admin: Pubkey::new_unique(),
            treasury: Pubkey::new_unique(),
            operator: Pubkey::new_unique(),
            ..Default::default()
        };

        Self {
            farm,
            pool,
            vault_stake: UserStake::default(),
            direct_stake: UserStake::default(),
            vault,
            positions: BTreeMap::new(),
        }
    }

    fn with_position<T>(
        &mut self,
        who: &'static str,
        f: impl FnOnce(&mut VaultAccounts) -> Result<T>,
    ) -> Result<T> {
        let mut position = self.positions.remove(who).unwrap_or_default();
        let result = f(&mut VaultAccounts {
            farm: &mut self.farm,
            pool: &mut self.pool,
            vault_stake: &mut self.vault_stake,
            vault: &mut self.vault,
            position: &mut position,
        });
        self.positions.insert(who, position);
        result
    }

    fn deposit(&mut self, who: &'static str, amount: u64, lock: i64, block: u64, now: i64) -> Result<VaultSettlement> {
        self.with_position(who, |accounts| vault::deposit(accounts, amount, lock, block, now))
    }

    fn harvest(&mut self, who: &'static str, block: u64) -> Result<VaultSettlement> {
        self.with_position(who, |accounts| vault::harvest(accounts, block))
    }

    fn withdraw<P: WithdrawalPolicy>(&mut self, who: &'static str, policy: &P, block: u64, now: i64) -> Result<VaultWithdrawal> {
        self.with_position(who, |accounts| vault::withdraw(accounts, policy, block, now))
    }

    fn pending(&self, who: &'static str, block: u64) -> u64 {
        let position = self.positions.get(who).cloned().unwrap_or_default();
        vault::pending(
            &self.farm,
            &self.pool,
            &self.vault_stake,
            &self.vault,
            &position,
            block,
        )
        .unwrap()
    }

    fn position(&self, who: &'static str) -> &LockedPosition {
        &self.positions[who]
    }
}

/// Takes a fixed share of principal regardless of the lock.
struct FlatPenalty {
    bps: u64,
}

impl WithdrawalPolicy for FlatPenalty {
    fn compute_withdrawal(&self, position: &LockedPosition, _now: i64) -> Result<WithdrawalQuote> {
        let penalty = position.principal * self.bps / 10_000;
        Ok(WithdrawalQuote {
            payout: position.principal - penalty,
            penalty,
        })
    }
}

#[test]
fn deposit_bounds_are_enforced() {
    let mut h = VaultHarness::new();

    assert_eq!(
        h.deposit("alice", 0, 0, 10, 0).unwrap_err(),
        FarmError::NothingToDeposit.into()
    );
    assert_eq!(
        h.deposit("alice", MIN_DEPOSIT_AMOUNT - 1, WEEK, 10, 0).unwrap_err(),
        FarmError::BelowMinimumDeposit.into()
    );
    assert_eq!(
        h.deposit("alice", MIN_DEPOSIT_AMOUNT, WEEK - 1, 10, 0).unwrap_err(),
        FarmError::LockTooShort.into()
    );
    assert_eq!(
        h.deposit("alice", MIN_DEPOSIT_AMOUNT, MAX_LOCK_DURATION + 1, 10, 0).unwrap_err(),
        FarmError::LockTooLong.into()
    );

    // Rejected calls leave nothing behind.
    assert_eq!(h.vault.total_principal, 0);
    assert_eq!(h.pool.total_staked, 0);
    assert!(!h.position("alice").has_principal());
}

#[test]
fn harvest_without_principal_succeeds_with_zero() {
    let mut h = VaultHarness::new();
    let settlement = h.harvest("carol", S + 20).unwrap();
    assert_eq!(settlement.user_reward, 0);
    assert_eq!(h.position("carol").claimed, 0);
}

#[test]
fn deposit_forwards_principal_into_the_pool() {
    let mut h = VaultHarness::new();
    h.deposit("alice", 20_000, WEEK, 50, 1_000).unwrap();
    h.deposit("bob", 60_000, 4 * WEEK, 50, 1_000).unwrap();

    assert_eq!(h.vault.total_principal, 80_000);
    assert_eq!(h.vault.position_count, 2);
    assert_eq!(h.vault_stake.amount, 80_000);
    assert_eq!(h.pool.total_staked, 80_000);

    let alice = h.position("alice");
    assert_eq!(alice.lock_start, 1_000);
    assert_eq!(alice.lock_end, 1_000 + WEEK);
}

#[test]
fn harvest_splits_vault_reward_by_principal() {
    let mut h = VaultHarness::new();
    h.deposit("alice", 20_000, WEEK, 50, 0).unwrap();
    h.deposit("bob", 60_000, WEEK, 50, 0).unwrap();

    assert_eq!(h.pending("alice", S + 10), 250);
    assert_eq!(h.pending("bob", S + 10), 750);

    let settlement = h.harvest("alice", S + 10).unwrap();
    assert_eq!(settlement.farm_reward, 1_000);
    assert_eq!(settlement.user_reward, 250);
    assert_eq!(h.position("alice").claimed, 250);
    assert_eq!(h.vault.total_harvested, 1_000);
    assert_eq!(h.farm.total_paid_out, 1_000);

    // Bob's share sits in the vault until he harvests.
    assert_eq!(h.pending("alice", S + 10), 0);
    assert_eq!(h.pending("bob", S + 10), 750);

    let settlement = h.harvest("bob", S + 20).unwrap();
    assert_eq!(settlement.farm_reward, 1_000);
    assert_eq!(settlement.user_reward, 1_500);
    assert_eq!(h.pending("alice", S + 20), 250);
}

#[test]
fn vault_shares_the_pool_with_direct_stakers() {
    let mut h = VaultHarness::new();
    h.deposit("alice", 30_000, WEEK, 50, 0).unwrap();

    let mut direct = std::mem::take(&mut h.direct_stake);
    farm::stake(&mut h.farm, &mut h.pool, &mut direct, 10_000, 50).unwrap();

    assert_eq!(farm::pending(&h.farm, &h.pool, &direct, S + 10).unwrap(), 250);
    assert_eq!(h.pending("alice", S + 10), 750);
}

#[test]
fn top_up_inside_a_live_lock_keeps_the_lock() {
    let mut h = VaultHarness::new();
    h.deposit("alice", 20_000, WEEK, 50, 0).unwrap();

    let settlement = h.deposit("alice", 10_000, 0, S + 10, 100).unwrap();
    assert_eq!(settlement.user_reward, 1_000);
    let alice = h.position("alice");
    assert_eq!(alice.principal, 30_000);
    assert_eq!(alice.lock_end, WEEK);

    h.deposit("alice", 0, WEEK, S + 10, 200).unwrap();
    assert_eq!(h.position("alice").lock_end, 2 * WEEK);

    assert_eq!(
        h.deposit("alice", 0, MAX_LOCK_DURATION, S + 10, 300).unwrap_err(),
        FarmError::LockTooLong.into()
    );
}

#[test]
fn zero_deposit_on_existing_position_harvests() {
    let mut h = VaultHarness::new();
    h.deposit("alice", 20_000, WEEK, 50, 0).unwrap();

    let settlement = h.deposit("alice", 0, 0, S + 10, 10).unwrap();
    assert_eq!(settlement.user_reward, 1_000);
    assert_eq!(h.position("alice").principal, 20_000);
    assert_eq!(h.position("alice").lock_end, WEEK);
}

#[test]
fn paused_vault_rejects_deposits_but_allows_harvest_and_exit() {
    let mut h = VaultHarness::new();
    h.deposit("alice", 20_000, WEEK, 50, 0).unwrap();
    h.vault.paused = true;

    assert_eq!(
        h.deposit("alice", 20_000, 0, S + 5, 10).unwrap_err(),
        FarmError::VaultPaused.into()
    );
    assert_eq!(h.harvest("alice", S + 5).unwrap().user_reward, 500);
    assert!(h.withdraw("alice", &LockExpiryPolicy, S + 6, WEEK).is_ok());
}

#[test]
fn withdraw_waits_for_lock_end_then_returns_everything() {
    let mut h = VaultHarness::new();
    h.deposit("alice", 20_000, WEEK, 50, 0).unwrap();
    h.deposit("bob", 20_000, 2 * WEEK, 50, 0).unwrap();

    assert_eq!(
        h.withdraw("alice", &LockExpiryPolicy, S + 10, WEEK - 1).unwrap_err(),
        FarmError::LockNotExpired.into()
    );
    assert_eq!(h.position("alice").principal, 20_000);

    let withdrawal = h.withdraw("alice", &LockExpiryPolicy, S + 10, WEEK).unwrap();
    assert_eq!(withdrawal.quote, WithdrawalQuote { payout: 20_000, penalty: 0 });
    assert_eq!(withdrawal.settlement.user_reward, 500);

    assert!(!h.position("alice").has_principal());
    assert_eq!(h.vault.total_principal, 20_000);
    assert_eq!(h.vault.position_count, 1);
    assert_eq!(h.vault_stake.amount, 20_000);
    assert_eq!(h.pool.total_staked, 20_000);

    // Bob now earns the whole pool.
    assert_eq!(h.pending("bob", S + 20), 500 + 1_000);
    assert_eq!(h.pending("alice", S + 20), 0);

    assert_eq!(
        h.withdraw("alice", &LockExpiryPolicy, S + 20, WEEK).unwrap_err(),
        FarmError::NoActivePosition.into()
    );
}

#[test]
fn policy_penalty_is_split_from_principal() {
    let mut h = VaultHarness::new();
    h.deposit("alice", 20_000, WEEK, 50, 0).unwrap();

    let withdrawal = h.withdraw("alice", &FlatPenalty { bps: 500 }, S + 10, 10).unwrap();
    assert_eq!(withdrawal.quote.payout, 19_000);
    assert_eq!(withdrawal.quote.penalty, 1_000);
    assert_eq!(withdrawal.settlement.user_reward, 1_000);
    assert_eq!(h.pool.total_staked, 0);
}

#[test]
fn expired_lock_restarts_on_fresh_principal() {
    let mut h = VaultHarness::new();
    h.deposit("alice", 20_000, WEEK, 50, 0).unwrap();

    assert_eq!(
        h.deposit("alice", 20_000, 0, S + 10, WEEK + 1).unwrap_err(),
        FarmError::LockTooShort.into()
    );

    h.deposit("alice", 20_000, 2 * WEEK, S + 10, WEEK + 1).unwrap();
    let alice = h.position("alice");
    assert_eq!(alice.principal, 40_000);
    assert_eq!(alice.lock_start, WEEK + 1);
    assert_eq!(alice.lock_end, 3 * WEEK + 1);
}

#[test]
fn negative_lock_cannot_shorten_a_live_lock() {
    let mut h = VaultHarness::new();
    h.deposit("alice", 20_000, WEEK, 50, 0).unwrap();

    assert_eq!(
        h.deposit("alice", 0, -WEEK, 60, 10).unwrap_err(),
        FarmError::LockTooShort.into()
    );
    assert_eq!(
        h.deposit("alice", 10_000, -1, 60, 10).unwrap_err(),
        FarmError::LockTooShort.into()
    );
    assert_eq!(
        h.deposit("bob", 20_000, -WEEK, 60, 10).unwrap_err(),
        FarmError::LockTooShort.into()
    );

    let alice = h.position("alice");
    assert_eq!(alice.lock_end, WEEK);
    assert_eq!(alice.principal, 20_000);
    assert_eq!(
        h.withdraw("alice", &LockExpiryPolicy, 61, 10).unwrap_err(),
        FarmError::LockNotExpired.into()
    );
}
