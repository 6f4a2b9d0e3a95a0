use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::SacSubsidyError;
use crate::types::{Money, Rate};
use crate::SacSubsidyResult;

/// Day-count basis for the stub period (actual days over a 365-day year).
pub const DAYS_IN_YEAR: Decimal = dec!(365);

/// Balances whose magnitude falls below this are reconciled to exactly zero.
pub const BALANCE_TOLERANCE: Decimal = dec!(0.01);

/// Signed calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Interest accrued over an irregular first period of `days` calendar days.
///
/// Computed as `balance * annual_rate * days / 365`. The product is taken
/// before the single division, so a stub of exactly 365 days accrues exactly
/// `balance * annual_rate`. A negative `days` yields negative interest.
pub fn stub_interest(balance: Money, annual_rate: Rate, days: i64) -> SacSubsidyResult<Money> {
    balance
        .checked_mul(annual_rate)
        .and_then(|v| v.checked_mul(Decimal::from(days)))
        .and_then(|v| v.checked_div(DAYS_IN_YEAR))
        .ok_or_else(|| overflow("stub_interest"))
}

/// Interest for one full installment period (one year at the nominal rate).
pub fn period_interest(balance: Money, annual_rate: Rate) -> SacSubsidyResult<Money> {
    balance
        .checked_mul(annual_rate)
        .ok_or_else(|| overflow("period_interest"))
}

/// Error for a product or sum outside the range of `Decimal`.
pub(crate) fn overflow(field: &str) -> SacSubsidyError {
    SacSubsidyError::InvalidInput {
        field: field.into(),
        reason: "Arithmetic overflow; amount or rate too large".into(),
    }
}

/// Snap residue within `BALANCE_TOLERANCE` of zero to exactly zero.
pub fn snap_to_zero(value: Money) -> Money {
    if value.abs() < BALANCE_TOLERANCE {
        Decimal::ZERO
    } else {
        value
    }
}
