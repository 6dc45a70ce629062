//! Balance calculations between users.
//!
//! - Expense, settlement and transfer records
//! - Pairwise net balance, with and without settlements
//! - Group member positions and settle-up suggestions

pub mod group;
pub mod net;
pub mod types;

#[cfg(test)]
mod props;

pub use group::{member_positions, suggest_settlements};
pub use net::{compute_net_balance, compute_settled_net_balance};
pub use types::{ExpenseRecord, ExpenseSplit, SettlementRecord, Transfer};
