//! Withdrawal policy seam for locked positions.

use anchor_lang::prelude::*;

use crate::error::FarmError;
use crate::state::LockedPosition;

/// How a position's principal is split when it leaves the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WithdrawalQuote {
    /// Principal returned to the owner.
    pub payout: u64,
    /// Principal routed to the vault treasury.
    pub penalty: u64,
}

pub trait WithdrawalPolicy {
    /// Quote the withdrawal of `position` at unix time `now`.
    ///
    /// `payout + penalty` must equal the position's principal.
    fn compute_withdrawal(&self, position: &LockedPosition, now: i64) -> Result<WithdrawalQuote>;
}

/// Full principal once the lock has ended; no early exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct LockExpiryPolicy;

impl WithdrawalPolicy for LockExpiryPolicy {
    fn compute_withdrawal(&self, position: &LockedPosition, now: i64) -> Result<WithdrawalQuote> {
        require!(position.has_principal(), FarmError::NoActivePosition);
        require!(now >= position.lock_end, FarmError::LockNotExpired);
        Ok(WithdrawalQuote {
            payout: position.principal,
            penalty: 0,
        })
    }
}
