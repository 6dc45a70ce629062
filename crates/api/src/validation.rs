//! Field validators shared by request bodies.

use std::borrow::Cow;

use billsplit_shared::types::MAX_AMOUNT;
use rust_decimal::Decimal;
use validator::ValidationError;

const TOO_LARGE: &str = "Amount cannot exceed 1000000000000";

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Amount must be strictly positive and at most `MAX_AMOUNT`.
pub(crate) fn positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount <= Decimal::ZERO {
        Err(invalid("positive_amount", "Amount must be greater than zero"))
    } else {
        bounded_amount(amount)
    }
}

/// Amount must be between zero and `MAX_AMOUNT`.
pub(crate) fn non_negative_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount < Decimal::ZERO {
        Err(invalid("non_negative_amount", "Amount cannot be negative"))
    } else {
        bounded_amount(amount)
    }
}

/// Magnitude must be at most `MAX_AMOUNT`.
pub(crate) fn bounded_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.abs() <= MAX_AMOUNT {
        Ok(())
    } else {
        Err(invalid("amount_too_large", TOO_LARGE))
    }
}

/// Every amount in the list must be within `MAX_AMOUNT`.
pub(crate) fn bounded_amounts(amounts: &[Decimal]) -> Result<(), ValidationError> {
    amounts.iter().try_for_each(bounded_amount)
}

/// Percentage must lie in `[0, 100]`.
pub(crate) fn percentage(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO && *value <= Decimal::ONE_HUNDRED {
        Ok(())
    } else {
        Err(invalid("percentage", "Percentage must be between 0 and 100"))
    }
}
