// src/domain/money.rs
//
// Money and percentages are `Decimal` throughout; `f64` only appears at the
// spreadsheet boundary.

use crate::errors::ServerError;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// Cents.
pub const DECIMAL_PLACES: u32 = 2;

/// Upper bound accepted for any entered amount, point count or tier bound.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Round to cents, half away from zero.
#[inline]
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `percentage` % of `amount`, rounded to cents.
pub fn percent_of(amount: Decimal, percentage: Decimal) -> Decimal {
    round_cents(amount * percentage / dec!(100))
}

/// Spreadsheet cells take `f64`; the value is rounded to cents first.
pub fn to_f64(value: Decimal) -> f64 {
    round_cents(value).to_f64().unwrap_or_default()
}

/// Reject negative or absurdly large input before it reaches any arithmetic.
pub fn check_amount(field: &str, value: Decimal) -> Result<(), ServerError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ServerError::Validation(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    if value > MAX_AMOUNT {
        return Err(ServerError::Validation(format!(
            "{field} must be at most {MAX_AMOUNT}, got {value}"
        )));
    }
    Ok(())
}
