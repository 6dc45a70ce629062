//! Pairwise net balances.
//!
//! Only direct debts between the two users count: an expense paid by a third
//! party contributes nothing, even if both users owe on it.

use billsplit_shared::types::{UserId, round_money};
use rust_decimal::Decimal;

use super::types::{ExpenseRecord, SettlementRecord};

/// Computes what `user_b` owes `user_a` across `expenses`.
///
/// Positive means B owes A, negative means A owes B. For every expense paid
/// by A, B's share is added; for every expense paid by B, A's share is
/// subtracted. The result is rounded to cents.
///
/// `compute_net_balance(e, a, b) == -compute_net_balance(e, b, a)`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use billsplit_core::balance::{ExpenseRecord, ExpenseSplit, compute_net_balance};
/// use billsplit_shared::types::UserId;
///
/// let (a, b) = (UserId::new(), UserId::new());
/// let expenses = vec![ExpenseRecord {
///     amount: dec!(100),
///     paid_by: a,
///     splits: vec![
///         ExpenseSplit { user_id: a, amount: dec!(50) },
///         ExpenseSplit { user_id: b, amount: dec!(50) },
///     ],
/// }];
/// assert_eq!(compute_net_balance(&expenses, a, b), dec!(50.00));
/// assert_eq!(compute_net_balance(&expenses, b, a), dec!(-50.00));
/// ```
#[must_use]
pub fn compute_net_balance(expenses: &[ExpenseRecord], user_a: UserId, user_b: UserId) -> Decimal {
    round_money(unrounded_net(expenses, user_a, user_b))
}

/// Like [`compute_net_balance`], with direct settlements applied.
///
/// A settlement from B to A reduces what B owes A; one from A to B increases
/// it. Settlements involving anyone else are ignored. The result is rounded
/// to cents once, after everything is added up.
#[must_use]
pub fn compute_settled_net_balance(
    expenses: &[ExpenseRecord],
    settlements: &[SettlementRecord],
    user_a: UserId,
    user_b: UserId,
) -> Decimal {
    let mut balance = unrounded_net(expenses, user_a, user_b);

    for settlement in settlements {
        if settlement.from == user_b && settlement.to == user_a {
            balance -= settlement.amount;
        }
        if settlement.from == user_a && settlement.to == user_b {
            balance += settlement.amount;
        }
    }

    round_money(balance)
}

fn unrounded_net(expenses: &[ExpenseRecord], user_a: UserId, user_b: UserId) -> Decimal {
    let mut balance = Decimal::ZERO;

    for expense in expenses {
        if expense.paid_by == user_a {
            balance += expense.share_of(user_b);
        }
        if expense.paid_by == user_b {
            balance -= expense.share_of(user_a);
        }
    }

    balance
}
