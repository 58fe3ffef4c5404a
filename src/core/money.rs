use rust_decimal::Decimal;

use crate::core::{AppError, Result};

/// Decimal places used when presenting monetary values
pub const MONEY_SCALE: u32 = 2;

/// Rounds a monetary value for display (banker's rounding, 2 decimal places).
///
/// Only call this at presentation boundaries; accumulation keeps full precision.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp(MONEY_SCALE)
}

/// `a + b`
///
/// # Errors
/// `AppError::InputShape` naming `what` when the sum leaves the decimal range
pub fn add(a: Decimal, b: Decimal, what: &str) -> Result<Decimal> {
    a.checked_add(b).ok_or_else(|| out_of_range(what))
}

/// `part / whole * 100`, or zero when `whole` is zero
///
/// # Errors
/// `AppError::InputShape` when the ratio leaves the decimal range
pub fn percentage(part: Decimal, whole: Decimal) -> Result<Decimal> {
    if whole.is_zero() {
        return Ok(Decimal::ZERO);
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| out_of_range("percentage"))
}

/// `total / count`, or zero when `count` is zero
///
/// Dividing by a count of at least one cannot overflow.
pub fn mean(total: Decimal, count: u64) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    total / Decimal::from(count)
}

/// Formats an amount with exactly two decimal places
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.width$}", round_money(amount), width = MONEY_SCALE as usize)
}

fn out_of_range(what: &str) -> AppError {
    AppError::input_shape(format!("{} exceeds the supported decimal range", what))
}
