//! State structures for the Block Farm program.
//!
//! This module defines all account structures used to store program state.

pub mod farm;
pub mod farm_pool;
pub mod locked_position;
pub mod locked_vault;
pub mod user_stake;

pub use farm::*;
pub use farm_pool::*;
pub use locked_position::*;
pub use locked_vault::*;
pub use user_stake::*;
