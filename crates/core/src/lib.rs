//! Core business logic for Billsplit.
//!
//! This crate contains pure split and balance arithmetic with ZERO web or
//! database dependencies. Every function is synchronous and side-effect free.
//!
//! # Modules
//!
//! - `split` - Equal, exact and percentage split calculation
//! - `balance` - Pairwise net balances, member positions and settle-up plans

pub mod balance;
pub mod split;
