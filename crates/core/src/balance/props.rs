//! Property-based tests for balance calculations.
//!
//! - Pairwise antisymmetry
//! - Member positions sum to zero
//! - Suggested transfers clear every position

use billsplit_shared::types::UserId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::group::{member_positions, suggest_settlements};
use super::net::{compute_net_balance, compute_settled_net_balance};
use super::types::{ExpenseRecord, ExpenseSplit, SettlementRecord};

/// A small pool of users so generated records overlap.
fn fixed_users() -> Vec<UserId> {
    (0..5).map(|_| UserId::new()).collect()
}

/// Strategy to generate positive amounts with sub-cent precision
/// (0.001 to 10,000.000).
fn fine_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|mills| Decimal::new(mills, 3))
}

/// Strategy to generate an expense as (payer index, [(user index, amount)]).
fn raw_expense() -> impl Strategy<Value = (usize, Vec<(usize, Decimal)>)> {
    (0usize..5, prop::collection::vec((0usize..5, fine_amount()), 1..5))
}

/// Strategy to generate a settlement as (from index, to index, amount).
fn raw_settlement() -> impl Strategy<Value = (usize, usize, Decimal)> {
    (0usize..5, 0usize..5, fine_amount())
}

fn build(
    users: &[UserId],
    raw_expenses: &[(usize, Vec<(usize, Decimal)>)],
    raw_settlements: &[(usize, usize, Decimal)],
) -> (Vec<ExpenseRecord>, Vec<SettlementRecord>) {
    let expenses = raw_expenses
        .iter()
        .map(|(payer, splits)| {
            let splits: Vec<ExpenseSplit> = splits
                .iter()
                .map(|(user, amount)| ExpenseSplit {
                    user_id: users[*user],
                    amount: *amount,
                })
                .collect();
            ExpenseRecord {
                amount: splits.iter().map(|s| s.amount).sum(),
                paid_by: users[*payer],
                splits,
            }
        })
        .collect();
    let settlements = raw_settlements
        .iter()
        .map(|(from, to, amount)| SettlementRecord {
            from: users[*from],
            to: users[*to],
            amount: *amount,
        })
        .collect();
    (expenses, settlements)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Swapping the two users negates the pairwise balance.
    #[test]
    fn prop_net_balance_antisymmetric(
        raw_expenses in prop::collection::vec(raw_expense(), 0..10),
        raw_settlements in prop::collection::vec(raw_settlement(), 0..5),
        a in 0usize..5,
        b in 0usize..5,
    ) {
        let users = fixed_users();
        let (expenses, settlements) = build(&users, &raw_expenses, &raw_settlements);

        prop_assert_eq!(
            compute_net_balance(&expenses, users[a], users[b]),
            -compute_net_balance(&expenses, users[b], users[a])
        );
        prop_assert_eq!(
            compute_settled_net_balance(&expenses, &settlements, users[a], users[b]),
            -compute_settled_net_balance(&expenses, &settlements, users[b], users[a])
        );
    }

    /// Positions across the group always add up to zero.
    #[test]
    fn prop_positions_sum_to_zero(
        raw_expenses in prop::collection::vec(raw_expense(), 0..10),
        raw_settlements in prop::collection::vec(raw_settlement(), 0..5),
    ) {
        let users = fixed_users();
        let (expenses, settlements) = build(&users, &raw_expenses, &raw_settlements);
        let positions = member_positions(&expenses, &settlements);
        prop_assert_eq!(positions.values().copied().sum::<Decimal>(), Decimal::ZERO);
    }

    /// Applying the suggested transfers clears every position.
    #[test]
    fn prop_suggested_transfers_clear_positions(
        raw_expenses in prop::collection::vec(raw_expense(), 0..10),
        raw_settlements in prop::collection::vec(raw_settlement(), 0..5),
    ) {
        let users = fixed_users();
        let (expenses, settlements) = build(&users, &raw_expenses, &raw_settlements);
        let mut positions = member_positions(&expenses, &settlements);
        let transfers = suggest_settlements(&positions);

        let non_zero = positions.values().filter(|b| !b.is_zero()).count();
        prop_assert!(transfers.len() <= non_zero.saturating_sub(1));

        for transfer in &transfers {
            prop_assert!(transfer.amount > Decimal::ZERO);
            prop_assert_ne!(transfer.from, transfer.to);
            *positions.get_mut(&transfer.from).unwrap() += transfer.amount;
            *positions.get_mut(&transfer.to).unwrap() -= transfer.amount;
        }
        prop_assert!(positions.values().all(|b| b.is_zero()));
    }

    /// Identical input gives identical output.
    #[test]
    fn prop_balances_are_deterministic(
        raw_expenses in prop::collection::vec(raw_expense(), 0..10),
    ) {
        let users = fixed_users();
        let (expenses, _) = build(&users, &raw_expenses, &[]);
        prop_assert_eq!(
            compute_net_balance(&expenses, users[0], users[1]),
            compute_net_balance(&expenses, users[0], users[1])
        );
        prop_assert_eq!(
            member_positions(&expenses, &[]),
            member_positions(&expenses, &[])
        );
    }
}
