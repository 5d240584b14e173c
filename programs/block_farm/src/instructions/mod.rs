//! Instruction handlers for the block farm program.
//!
//! Farm handlers drive `accounting::farm`; vault handlers drive
//! `accounting::vault`. Each one reads the clock, applies the transition and
//! then executes the token movements it returns.

pub mod add_farm;
pub mod admin;
pub mod emergency_withdraw;
pub mod fund_farm;
pub mod initialize_farm;
pub mod initialize_vault;
pub mod set_farm_weight;
pub mod stake_lp;
pub mod vault_admin;
pub mod vault_deposit;
pub mod vault_harvest;
pub mod vault_withdraw;
pub mod views;
pub mod withdraw_lp;

pub use add_farm::*;
pub use admin::*;
pub use emergency_withdraw::*;
pub use fund_farm::*;
pub use initialize_farm::*;
pub use initialize_vault::*;
pub use set_farm_weight::*;
pub use stake_lp::*;
pub use vault_admin::*;
pub use vault_deposit::*;
pub use vault_harvest::*;
pub use vault_withdraw::*;
pub use views::*;
pub use withdraw_lp::*;
