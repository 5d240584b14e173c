//! Runtime-free accounting for the farm and the locked vault.
//!
//! Instruction handlers read the clock, call into this module with the
//! current block (and unix time for locks), then execute the token
//! movements the returned records describe.

pub mod farm;
pub mod vault;
pub mod withdrawal;

pub use withdrawal::{LockExpiryPolicy, WithdrawalPolicy, WithdrawalQuote};
