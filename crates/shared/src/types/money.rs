//! Money helpers with cent precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` values whose canonical form carries
//! exactly two fractional digits.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits in a canonical money amount.
pub const MONEY_DP: u32 = 2;

/// Largest amount accepted anywhere in a split or balance: one trillion.
///
/// Keeps `total * percentage` and sums over realistic row counts well inside
/// `Decimal`'s 96-bit range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Rounds an amount to cents and fixes its scale at two digits.
///
/// Midpoints round away from zero, so `0.005` becomes `0.01` and `-0.005`
/// becomes `-0.01`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use billsplit_shared::types::round_money;
///
/// assert_eq!(round_money(dec!(10.005)).to_string(), "10.01");
/// assert_eq!(round_money(dec!(7)).to_string(), "7.00");
/// ```
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DP);
    rounded
}

/// Builds a canonical amount from whole cents.
#[must_use]
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, MONEY_DP)
}
