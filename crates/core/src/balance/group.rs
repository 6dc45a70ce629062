//! Group-wide member positions and settle-up suggestions.
//!
//! A position is what the group owes a member: positive means the member is
//! owed money, negative means they owe. Positions across a group always add
//! up to zero.

use std::collections::BTreeMap;

use billsplit_shared::types::{UserId, round_money};
use rust_decimal::Decimal;

use super::types::{ExpenseRecord, SettlementRecord, Transfer};

/// Computes every member's position from expenses and settlements.
///
/// Every split row and settlement is rounded to cents before it is booked.
/// The payer of an expense is credited with the sum of its rounded split rows
/// and every split user is debited their rounded row. A settlement credits
/// the sender and debits the receiver. Each booking is balanced, so the
/// positions add up to exactly zero. Members with a zero position are still
/// listed.
#[must_use]
pub fn member_positions(
    expenses: &[ExpenseRecord],
    settlements: &[SettlementRecord],
) -> BTreeMap<UserId, Decimal> {
    let mut positions: BTreeMap<UserId, Decimal> = BTreeMap::new();

    for expense in expenses {
        let mut credited = Decimal::ZERO;
        for split in &expense.splits {
            let share = round_money(split.amount);
            credited += share;
            *positions.entry(split.user_id).or_default() -= share;
        }
        *positions.entry(expense.paid_by).or_default() += credited;
    }

    for settlement in settlements {
        let amount = round_money(settlement.amount);
        *positions.entry(settlement.from).or_default() += amount;
        *positions.entry(settlement.to).or_default() -= amount;
    }

    positions
        .into_iter()
        .map(|(user_id, balance)| (user_id, round_money(balance)))
        .collect()
}

/// Suggests transfers that bring every position to zero.
///
/// Repeatedly matches the largest debtor with the largest creditor and moves
/// the smaller of the two amounts. Ties go to the lower user ID. For
/// positions that sum to zero this needs at most `n - 1` transfers.
#[must_use]
pub fn suggest_settlements(positions: &BTreeMap<UserId, Decimal>) -> Vec<Transfer> {
    let mut creditors: Vec<(UserId, Decimal)> = positions
        .iter()
        .filter(|(_, balance)| **balance > Decimal::ZERO)
        .map(|(user_id, balance)| (*user_id, *balance))
        .collect();
    let mut debtors: Vec<(UserId, Decimal)> = positions
        .iter()
        .filter(|(_, balance)| **balance < Decimal::ZERO)
        .map(|(user_id, balance)| (*user_id, -*balance))
        .collect();

    let mut transfers = Vec::new();

    while let (Some(ci), Some(di)) = (largest(&creditors), largest(&debtors)) {
        let amount = creditors[ci].1.min(debtors[di].1);
        transfers.push(Transfer {
            from: debtors[di].0,
            to: creditors[ci].0,
            amount: round_money(amount),
        });

        creditors[ci].1 -= amount;
        debtors[di].1 -= amount;
        creditors.retain(|(_, balance)| !balance.is_zero());
        debtors.retain(|(_, balance)| !balance.is_zero());
    }

    transfers
}

/// Index of the largest amount, preferring the lower user ID on ties.
fn largest(entries: &[(UserId, Decimal)]) -> Option<usize> {
    entries
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::types::ExpenseSplit;
    use rust_decimal_macros::dec;

    /// Three users in ascending ID order.
    fn users() -> (UserId, UserId, UserId) {
        let mut ids = [UserId::new(), UserId::new(), UserId::new()];
        ids.sort();
        (ids[0], ids[1], ids[2])
    }

    fn even_expense(paid_by: UserId, amount: Decimal, members: &[UserId]) -> ExpenseRecord {
        let share = amount / Decimal::from(members.len());
        ExpenseRecord {
            amount,
            paid_by,
            splits: members
                .iter()
                .map(|user_id| ExpenseSplit {
                    user_id: *user_id,
                    amount: share,
                })
                .collect(),
        }
    }

    #[test]
    fn test_positions_single_expense() {
        let (a, b, c) = users();
        let expenses = vec![even_expense(a, dec!(90), &[a, b, c])];
        let positions = member_positions(&expenses, &[]);

        assert_eq!(positions[&a], dec!(60));
        assert_eq!(positions[&b], dec!(-30));
        assert_eq!(positions[&c], dec!(-30));
    }

    #[test]
    fn test_positions_include_settlements() {
        let (a, b, c) = users();
        let expenses = vec![even_expense(a, dec!(90), &[a, b, c])];
        let settlements = vec![SettlementRecord {
            from: b,
            to: a,
            amount: dec!(30),
        }];
        let positions = member_positions(&expenses, &settlements);

        assert_eq!(positions[&a], dec!(30));
        assert_eq!(positions[&b], Decimal::ZERO);
        assert_eq!(positions[&c], dec!(-30));
        assert_eq!(positions.values().copied().sum::<Decimal>(), Decimal::ZERO);
    }

    #[test]
    fn test_positions_are_canonical() {
        let (a, b, _) = users();
        let expenses = vec![even_expense(a, dec!(10), &[a, b])];
        let positions = member_positions(&expenses, &[]);
        assert_eq!(positions[&a].to_string(), "5.00");
    }

    #[test]
    fn test_positions_with_sub_cent_rows_sum_to_zero() {
        let (a, b, c) = users();
        let expenses = vec![ExpenseRecord {
            amount: dec!(0.01),
            paid_by: a,
            splits: vec![
                ExpenseSplit {
                    user_id: b,
                    amount: dec!(0.005),
                },
                ExpenseSplit {
                    user_id: c,
                    amount: dec!(0.005),
                },
            ],
        }];
        assert!(expenses[0].is_reconciled());

        let positions = member_positions(&expenses, &[]);
        assert_eq!(positions[&a], dec!(0.02));
        assert_eq!(positions[&b], dec!(-0.01));
        assert_eq!(positions[&c], dec!(-0.01));
        assert_eq!(positions.values().copied().sum::<Decimal>(), Decimal::ZERO);

        let transfers = suggest_settlements(&positions);
        assert_eq!(
            transfers,
            vec![
                Transfer {
                    from: b,
                    to: a,
                    amount: dec!(0.01)
                },
                Transfer {
                    from: c,
                    to: a,
                    amount: dec!(0.01)
                },
            ]
        );
    }

    #[test]
    fn test_positions_round_sub_cent_settlements() {
        let (a, b, _) = users();
        let settlements = vec![SettlementRecord {
            from: a,
            to: b,
            amount: dec!(0.005),
        }];
        let positions = member_positions(&[], &settlements);
        assert_eq!(positions[&a], dec!(0.01));
        assert_eq!(positions[&b], dec!(-0.01));
    }

    #[test]
    fn test_suggest_single_creditor() {
        let (a, b, c) = users();
        let positions = member_positions(&[even_expense(a, dec!(90), &[a, b, c])], &[]);
        let transfers = suggest_settlements(&positions);

        assert_eq!(
            transfers,
            vec![
                Transfer {
                    from: b,
                    to: a,
                    amount: dec!(30)
                },
                Transfer {
                    from: c,
                    to: a,
                    amount: dec!(30)
                },
            ]
        );
    }

    #[test]
    fn test_suggest_chain_collapses() {
        // a paid for b, b paid the same for c: c should pay a directly
        let (a, b, c) = users();
        let expenses = vec![
            ExpenseRecord {
                amount: dec!(25),
                paid_by: a,
                splits: vec![ExpenseSplit {
                    user_id: b,
                    amount: dec!(25),
                }],
            },
            ExpenseRecord {
                amount: dec!(25),
                paid_by: b,
                splits: vec![ExpenseSplit {
                    user_id: c,
                    amount: dec!(25),
                }],
            },
        ];
        let transfers = suggest_settlements(&member_positions(&expenses, &[]));

        assert_eq!(
            transfers,
            vec![Transfer {
                from: c,
                to: a,
                amount: dec!(25)
            }]
        );
    }

    #[test]
    fn test_suggest_nothing_when_settled() {
        let (a, b, _) = users();
        let expenses = vec![even_expense(a, dec!(50), &[a, b])];
        let settlements = vec![SettlementRecord {
            from: b,
            to: a,
            amount: dec!(25),
        }];
        assert!(suggest_settlements(&member_positions(&expenses, &settlements)).is_empty());
    }

    #[test]
    fn test_suggest_empty() {
        assert!(suggest_settlements(&BTreeMap::new()).is_empty());
    }
}
