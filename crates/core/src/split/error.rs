//! Split validation errors.

use billsplit_shared::types::UserId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a split request is rejected.
///
/// Every variant is a deterministic validation failure; retrying with the
/// same input yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// A split needs at least one participant.
    #[error("split requires at least one participant")]
    NoParticipants,

    /// The total to split must be strictly positive.
    #[error("total amount must be greater than zero, got {0}")]
    NonPositiveTotal(Decimal),

    /// An amount exceeds [`MAX_AMOUNT`](billsplit_shared::types::MAX_AMOUNT).
    #[error("amount {0} exceeds the maximum of 1000000000000")]
    AmountTooLarge(Decimal),

    /// A percentage lies outside `[0, 100]`.
    #[error("percentage {0} is outside 0..=100")]
    PercentageOutOfRange(Decimal),

    /// Percentages do not add up to 100 within tolerance.
    #[error("percentages must sum to 100 (got {sum})")]
    PercentageSumMismatch {
        /// Sum of the supplied percentages.
        sum: Decimal,
    },

    /// An exact share is negative.
    #[error("share for user {0} cannot be negative")]
    NegativeShare(UserId),

    /// Exact shares do not reconcile to the total.
    #[error("split amounts sum to {actual} but total is {expected}")]
    ExactSumMismatch {
        /// Stated total, rounded to cents.
        expected: Decimal,
        /// Sum of the supplied shares, rounded to cents.
        actual: Decimal,
    },
}

impl SplitError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoParticipants => "NO_PARTICIPANTS",
            Self::NonPositiveTotal(_) => "NON_POSITIVE_TOTAL",
            Self::AmountTooLarge(_) => "AMOUNT_TOO_LARGE",
            Self::PercentageOutOfRange(_) => "PERCENTAGE_OUT_OF_RANGE",
            Self::PercentageSumMismatch { .. } => "PERCENTAGE_SUM_MISMATCH",
            Self::NegativeShare(_) => "NEGATIVE_SHARE",
            Self::ExactSumMismatch { .. } => "EXACT_SUM_MISMATCH",
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// All split errors are client input errors.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn http_status_code(&self) -> u16 {
        400
    }
}
