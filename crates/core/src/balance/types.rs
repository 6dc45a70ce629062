//! Expense, settlement and transfer records consumed by balance calculations.

use billsplit_shared::types::UserId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::split::SplitCalculator;

/// One participant's share of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSplit {
    /// Participant who owes the share.
    pub user_id: UserId,
    /// Amount owed.
    pub amount: Decimal,
}

/// An expense as seen by balance calculations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Total paid.
    pub amount: Decimal,
    /// Who paid.
    pub paid_by: UserId,
    /// Who owes what.
    pub splits: Vec<ExpenseSplit>,
}

impl ExpenseRecord {
    /// Returns the amount `user_id` owes for this expense.
    ///
    /// A user without a split row owes nothing. If a user has several rows,
    /// the first one counts.
    #[must_use]
    pub fn share_of(&self, user_id: UserId) -> Decimal {
        self.splits
            .iter()
            .find(|s| s.user_id == user_id)
            .map_or(Decimal::ZERO, |s| s.amount)
    }

    /// Returns the sum of all split rows.
    #[must_use]
    pub fn allocated(&self) -> Decimal {
        self.splits.iter().map(|s| s.amount).sum()
    }

    /// Returns true when the split rows reconcile to the expense amount.
    #[must_use]
    pub fn is_reconciled(&self) -> bool {
        let amounts: Vec<Decimal> = self.splits.iter().map(|s| s.amount).collect();
        SplitCalculator::validate_split_amounts(self.amount, &amounts)
    }
}

/// A direct payment from one user to another that pays down debt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    /// Who paid.
    pub from: UserId,
    /// Who received.
    pub to: UserId,
    /// Amount paid.
    pub amount: Decimal,
}

/// A suggested payment that moves balances towards zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Debtor who pays.
    pub from: UserId,
    /// Creditor who receives.
    pub to: UserId,
    /// Amount to pay.
    pub amount: Decimal,
}
