//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{MAX_AMOUNT, MONEY_DP, from_cents, round_money};
