//! Split input and output types.

use billsplit_shared::types::UserId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The way an expense total is divided between participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMethod {
    /// Everyone owes the same amount, give or take a cent.
    Equal,
    /// Each participant's amount is stated directly.
    Exact,
    /// Each participant owes a percentage of the total.
    Percentage,
}

impl std::fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equal => write!(f, "equal"),
            Self::Exact => write!(f, "exact"),
            Self::Percentage => write!(f, "percentage"),
        }
    }
}

/// A participant paired with a caller-supplied value.
///
/// The value is an amount for exact splits and a percentage for percentage
/// splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitEntry {
    /// Participant.
    pub user_id: UserId,
    /// Amount or percentage, depending on the split method.
    pub value: Decimal,
}

impl SplitEntry {
    /// Creates a new entry.
    #[must_use]
    pub const fn new(user_id: UserId, value: Decimal) -> Self {
        Self { user_id, value }
    }
}

/// A request to split a total between participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitInput {
    /// Split evenly between the listed participants, in order.
    Equal {
        /// Amount to split.
        total_amount: Decimal,
        /// Participants; earlier entries absorb leftover cents.
        participant_ids: Vec<UserId>,
    },
    /// Use the supplied amounts as-is once they reconcile to the total.
    Exact {
        /// Stated total.
        total_amount: Decimal,
        /// Per-participant amounts.
        entries: Vec<SplitEntry>,
    },
    /// Split by percentage of the total.
    Percentage {
        /// Amount to split.
        total_amount: Decimal,
        /// Per-participant percentages.
        entries: Vec<SplitEntry>,
    },
}

impl SplitInput {
    /// Returns the split method.
    #[must_use]
    pub const fn method(&self) -> SplitMethod {
        match self {
            Self::Equal { .. } => SplitMethod::Equal,
            Self::Exact { .. } => SplitMethod::Exact,
            Self::Percentage { .. } => SplitMethod::Percentage,
        }
    }

    /// Returns the amount being split.
    #[must_use]
    pub const fn total_amount(&self) -> Decimal {
        match self {
            Self::Equal { total_amount, .. }
            | Self::Exact { total_amount, .. }
            | Self::Percentage { total_amount, .. } => *total_amount,
        }
    }
}

/// One participant's computed share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitShare {
    /// Participant.
    pub user_id: UserId,
    /// Amount owed, with two fractional digits.
    pub amount: Decimal,
}

/// Shares in the same order as the input participants.
pub type SplitResult = Vec<SplitShare>;
