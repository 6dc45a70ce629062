//! Split calculation.
//!
//! Equal splits floor every share to the cent and hand the leftover cents to
//! the first participants, one each. Percentage splits either do the same
//! with the largest fractional parts (Largest Remainder Method) or round each
//! share on its own, depending on [`SplitPolicy`].

use billsplit_shared::config::{PercentageRounding, SplitsConfig};
use billsplit_shared::types::{MAX_AMOUNT, MONEY_DP, from_cents, round_money};
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::SplitError;
use super::types::{SplitInput, SplitResult, SplitShare};

/// Maximum distance of a percentage sum from 100 that is still accepted.
pub const PERCENTAGE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Rounding behaviour of a [`SplitCalculator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitPolicy {
    /// How percentage shares are rounded to cents.
    pub percentage_rounding: PercentageRounding,
}

impl From<&SplitsConfig> for SplitPolicy {
    fn from(config: &SplitsConfig) -> Self {
        Self {
            percentage_rounding: config.percentage_rounding,
        }
    }
}

/// Computes per-participant shares of an expense.
///
/// The calculator holds no state besides its policy, so it is `Copy` and can
/// be shared freely between request handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitCalculator {
    policy: SplitPolicy,
}

impl SplitCalculator {
    /// Creates a calculator with the given policy.
    #[must_use]
    pub const fn new(policy: SplitPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy this calculator was built with.
    #[must_use]
    pub const fn policy(&self) -> SplitPolicy {
        self.policy
    }

    /// Splits `total_amount` evenly across `participant_count` participants.
    ///
    /// The total is rounded to cents first. Every share is the floor of the
    /// even share, and the first `n` participants get one extra cent each,
    /// where `n` is the number of cents left over. Shares therefore differ by
    /// at most one cent and always add up to the rounded total.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use billsplit_core::split::SplitCalculator;
    ///
    /// let shares = SplitCalculator::compute_equal_splits(dec!(100), 3).unwrap();
    /// assert_eq!(shares, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
    /// ```
    pub fn compute_equal_splits(
        total_amount: Decimal,
        participant_count: usize,
    ) -> Result<Vec<Decimal>, SplitError> {
        if participant_count == 0 {
            return Err(SplitError::NoParticipants);
        }
        let total = positive_total(total_amount)?;

        let count = Decimal::from(participant_count);
        let unit = from_cents(1);

        let base = (total / count).round_dp_with_strategy(MONEY_DP, RoundingStrategy::ToZero);
        // fewer leftover cents than participants
        let mut leftover = total - base * count;

        Ok((0..participant_count)
            .map(|_| {
                if leftover >= unit {
                    leftover -= unit;
                    round_money(base + unit)
                } else {
                    round_money(base)
                }
            })
            .collect())
    }

    /// Splits `total_amount` by percentage.
    ///
    /// Percentages must each lie in `[0, 100]` and add up to 100 within
    /// [`PERCENTAGE_TOLERANCE`]; a sum outside that window is rejected, not
    /// corrected.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use billsplit_core::split::SplitCalculator;
    ///
    /// let calculator = SplitCalculator::default();
    /// let shares = calculator
    ///     .compute_percentage_splits(dec!(200), &[dec!(50), dec!(50)])
    ///     .unwrap();
    /// assert_eq!(shares, vec![dec!(100), dec!(100)]);
    /// ```
    pub fn compute_percentage_splits(
        &self,
        total_amount: Decimal,
        percentages: &[Decimal],
    ) -> Result<Vec<Decimal>, SplitError> {
        if percentages.is_empty() {
            return Err(SplitError::NoParticipants);
        }
        let total = positive_total(total_amount)?;

        if let Some(out_of_range) = percentages
            .iter()
            .find(|p| **p < Decimal::ZERO || **p > HUNDRED)
        {
            return Err(SplitError::PercentageOutOfRange(*out_of_range));
        }

        let sum: Decimal = percentages.iter().copied().sum();
        if (sum - HUNDRED).abs() > PERCENTAGE_TOLERANCE {
            return Err(SplitError::PercentageSumMismatch { sum });
        }

        let shares = match self.policy.percentage_rounding {
            PercentageRounding::Independent => percentages
                .iter()
                .map(|p| round_money(total * *p / HUNDRED))
                .collect(),
            PercentageRounding::LargestRemainder => {
                allocate_largest_remainder(total, percentages, sum)
            }
        };

        Ok(shares)
    }

    /// Returns true when `split_amounts` reconcile to `total_amount`.
    ///
    /// Both sides are rounded to cents before comparing; they must agree to
    /// within less than one cent.
    ///
    /// Amounts whose sum does not fit in a `Decimal` never reconcile.
    pub fn validate_split_amounts(total_amount: Decimal, split_amounts: &[Decimal]) -> bool {
        split_amounts
            .iter()
            .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount))
            .and_then(|sum| round_money(sum).checked_sub(round_money(total_amount)))
            .is_some_and(|diff| diff.abs() < from_cents(1))
    }

    /// Computes the shares for a split request, paired with participant IDs
    /// in input order.
    pub fn calculate(&self, input: &SplitInput) -> Result<SplitResult, SplitError> {
        match input {
            SplitInput::Equal {
                total_amount,
                participant_ids,
            } => {
                let amounts = Self::compute_equal_splits(*total_amount, participant_ids.len())?;
                Ok(participant_ids
                    .iter()
                    .zip(amounts)
                    .map(|(user_id, amount)| SplitShare {
                        user_id: *user_id,
                        amount,
                    })
                    .collect())
            }
            SplitInput::Exact {
                total_amount,
                entries,
            } => {
                if entries.is_empty() {
                    return Err(SplitError::NoParticipants);
                }
                let total = positive_total(*total_amount)?;

                if let Some(negative) = entries.iter().find(|e| e.value < Decimal::ZERO) {
                    return Err(SplitError::NegativeShare(negative.user_id));
                }
                if let Some(huge) = entries.iter().find(|e| e.value > MAX_AMOUNT) {
                    return Err(SplitError::AmountTooLarge(huge.value));
                }

                let amounts: Vec<Decimal> = entries.iter().map(|e| e.value).collect();
                if !Self::validate_split_amounts(total, &amounts) {
                    return Err(SplitError::ExactSumMismatch {
                        expected: total,
                        actual: round_money(amounts.iter().copied().sum()),
                    });
                }

                Ok(entries
                    .iter()
                    .map(|e| SplitShare {
                        user_id: e.user_id,
                        amount: round_money(e.value),
                    })
                    .collect())
            }
            SplitInput::Percentage {
                total_amount,
                entries,
            } => {
                let percentages: Vec<Decimal> = entries.iter().map(|e| e.value).collect();
                let amounts = self.compute_percentage_splits(*total_amount, &percentages)?;
                Ok(entries
                    .iter()
                    .zip(amounts)
                    .map(|(e, amount)| SplitShare {
                        user_id: e.user_id,
                        amount,
                    })
                    .collect())
            }
        }
    }
}

/// Rounds the total to cents and rejects anything not in `(0, MAX_AMOUNT]`.
fn positive_total(total_amount: Decimal) -> Result<Decimal, SplitError> {
    if total_amount > MAX_AMOUNT {
        return Err(SplitError::AmountTooLarge(total_amount));
    }
    let total = round_money(total_amount);
    if total <= Decimal::ZERO {
        return Err(SplitError::NonPositiveTotal(total_amount));
    }
    Ok(total)
}

/// Distributes `total` proportionally to `weights` so the shares add up to
/// `total` exactly.
///
/// Shares are floored to cents, then the leftover cents go one each to the
/// shares with the largest fractional parts. Ties go to the earlier index.
fn allocate_largest_remainder(
    total: Decimal,
    weights: &[Decimal],
    weight_sum: Decimal,
) -> Vec<Decimal> {
    let unit = from_cents(1);

    let exact: Vec<Decimal> = weights.iter().map(|w| total * *w / weight_sum).collect();

    let mut shares: Vec<Decimal> = exact
        .iter()
        .map(|a| a.round_dp_with_strategy(MONEY_DP, RoundingStrategy::ToZero))
        .collect();

    let allocated: Decimal = shares.iter().copied().sum();
    // every floor drops less than a cent, so at most one cent per share
    let mut leftover = total - allocated;

    if leftover >= unit {
        let mut order: Vec<usize> = (0..shares.len()).collect();
        // stable sort keeps the earlier index first on equal fractions
        order.sort_by(|&a, &b| (exact[b] - shares[b]).cmp(&(exact[a] - shares[a])));
        for idx in order {
            if leftover < unit {
                break;
            }
            shares[idx] += unit;
            leftover -= unit;
        }
    }

    shares.into_iter().map(round_money).collect()
}
