//! Expense split calculation.
//!
//! - Split input/output types
//! - Split calculator with configurable percentage rounding
//! - Validation errors

pub mod calculator;
pub mod error;
pub mod types;

#[cfg(test)]
mod props;

pub use calculator::{PERCENTAGE_TOLERANCE, SplitCalculator, SplitPolicy};
pub use error::SplitError;
pub use types::{SplitEntry, SplitInput, SplitMethod, SplitResult, SplitShare};
