//! Property-based tests for split calculation.
//!
//! - Equal split sum invariant and one-cent spread
//! - Percentage split sum invariant under largest-remainder rounding
//! - Independent rounding stays within half a cent per share
//! - Determinism

use proptest::prelude::*;
use rust_decimal::Decimal;

use billsplit_shared::config::PercentageRounding;
use billsplit_shared::types::round_money;

use super::calculator::{SplitCalculator, SplitPolicy};

/// Strategy to generate positive amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate amounts with sub-cent digits (0.001 to 100,000.000).
fn fine_amount() -> impl Strategy<Value = Decimal> {
    (10i64..100_000_000i64).prop_map(|mills| Decimal::new(mills, 3))
}

/// Strategy to generate participant counts (1 to 50).
fn participant_count() -> impl Strategy<Value = usize> {
    1usize..50
}

/// Strategy to generate percentages that sum to exactly 100.
///
/// Values are in hundredths of a percent; the last entry absorbs the rest.
fn percentages_summing_to_100() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(1u32..100, 1..10).prop_map(|weights| {
        let sum: u32 = weights.iter().sum();
        let mut hundredths: Vec<i64> = weights
            .iter()
            .map(|w| i64::from(*w) * 10_000 / i64::from(sum))
            .collect();
        let assigned: i64 = hundredths.iter().sum();
        if let Some(last) = hundredths.last_mut() {
            *last += 10_000 - assigned;
        }
        hundredths.into_iter().map(|h| Decimal::new(h, 2)).collect()
    })
}

fn policy(percentage_rounding: PercentageRounding) -> SplitCalculator {
    SplitCalculator::new(SplitPolicy {
        percentage_rounding,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Equal shares add up to the rounded total.
    #[test]
    fn prop_equal_sum_matches_total(
        total in fine_amount(),
        count in participant_count(),
    ) {
        let shares = SplitCalculator::compute_equal_splits(total, count).unwrap();
        prop_assert_eq!(shares.len(), count);
        prop_assert_eq!(shares.iter().copied().sum::<Decimal>(), round_money(total));
    }

    /// Equal shares differ by at most one cent and never increase.
    #[test]
    fn prop_equal_spread_at_most_one_cent(
        total in positive_amount(),
        count in participant_count(),
    ) {
        let shares = SplitCalculator::compute_equal_splits(total, count).unwrap();
        let max = shares.iter().copied().max().unwrap();
        let min = shares.iter().copied().min().unwrap();
        prop_assert!(max - min <= Decimal::new(1, 2));
        prop_assert!(shares.windows(2).all(|w| w[0] >= w[1]));
    }

    /// Every share carries exactly two fractional digits.
    #[test]
    fn prop_equal_shares_are_canonical(
        total in fine_amount(),
        count in participant_count(),
    ) {
        let shares = SplitCalculator::compute_equal_splits(total, count).unwrap();
        prop_assert!(shares.iter().all(|s| s.scale() == 2));
    }

    /// Largest-remainder percentage shares add up to the total.
    #[test]
    fn prop_percentage_largest_remainder_sum(
        total in positive_amount(),
        percentages in percentages_summing_to_100(),
    ) {
        let shares = policy(PercentageRounding::LargestRemainder)
            .compute_percentage_splits(total, &percentages)
            .unwrap();
        prop_assert_eq!(shares.len(), percentages.len());
        prop_assert_eq!(shares.iter().copied().sum::<Decimal>(), total);
    }

    /// Largest-remainder shares stay within a cent of the exact share.
    #[test]
    fn prop_percentage_largest_remainder_close_to_exact(
        total in positive_amount(),
        percentages in percentages_summing_to_100(),
    ) {
        let shares = policy(PercentageRounding::LargestRemainder)
            .compute_percentage_splits(total, &percentages)
            .unwrap();
        for (share, p) in shares.iter().zip(&percentages) {
            let exact = total * *p / Decimal::ONE_HUNDRED;
            prop_assert!((*share - exact).abs() < Decimal::new(1, 2));
        }
    }

    /// Independent rounding drifts at most half a cent per participant.
    #[test]
    fn prop_percentage_independent_drift_bounded(
        total in positive_amount(),
        percentages in percentages_summing_to_100(),
    ) {
        let shares = policy(PercentageRounding::Independent)
            .compute_percentage_splits(total, &percentages)
            .unwrap();
        let drift = (shares.iter().copied().sum::<Decimal>() - total).abs();
        let bound = Decimal::new(5, 3) * Decimal::from(percentages.len());
        prop_assert!(drift <= bound);
    }

    /// Identical input gives identical output.
    #[test]
    fn prop_splits_are_deterministic(
        total in positive_amount(),
        count in participant_count(),
        percentages in percentages_summing_to_100(),
    ) {
        let calculator = SplitCalculator::default();
        prop_assert_eq!(
            SplitCalculator::compute_equal_splits(total, count),
            SplitCalculator::compute_equal_splits(total, count)
        );
        prop_assert_eq!(
            calculator.compute_percentage_splits(total, &percentages),
            calculator.compute_percentage_splits(total, &percentages)
        );
    }

    /// Splits produced by the calculator always pass amount validation.
    #[test]
    fn prop_equal_splits_validate(
        total in positive_amount(),
        count in participant_count(),
    ) {
        let shares = SplitCalculator::compute_equal_splits(total, count).unwrap();
        prop_assert!(SplitCalculator::validate_split_amounts(total, &shares));
    }
}
