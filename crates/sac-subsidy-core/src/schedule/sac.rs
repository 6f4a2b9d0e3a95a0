use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::accrual::{days_between, overflow, period_interest, snap_to_zero, stub_interest};
use crate::schedule::terms::LoanTerms;
use crate::types::*;
use crate::SacSubsidyResult;

/// A single installment of a constant-amortization schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentRecord {
    /// 1-based installment number
    pub number: u32,
    pub payment: Money,
    pub interest: Money,
    pub amortization: Money,
    /// Outstanding balance after this installment is paid
    pub balance: Money,
}

/// Ordered installments plus the interest they carry in total
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub installments: Vec<InstallmentRecord>,
    pub total_interest: Money,
}

impl ScheduleResult {
    pub fn len(&self) -> usize {
        self.installments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installments.is_empty()
    }

    /// Sum of every installment payment (amortization plus interest).
    pub fn total_payment(&self) -> Money {
        self.installments.iter().map(|i| i.payment).sum()
    }

    pub fn total_amortization(&self) -> Money {
        self.installments.iter().map(|i| i.amortization).sum()
    }
}

/// Build a SAC schedule of yearly installments.
///
/// The first installment accrues interest over the actual days between
/// disbursement and the first due date on a 365-day year; every later
/// installment accrues one full year at `annual_rate` on the opening balance.
///
/// Zero installments yield an empty schedule with zero interest. Date order
/// is not checked here: a first due date on or before disbursement produces
/// non-positive stub interest. Callers that need the guard use
/// [`build_schedule`]. Amounts too large for `Decimal` return `InvalidInput`.
pub fn compute_schedule(
    principal: Money,
    annual_rate: Rate,
    installments: u32,
    disbursement_date: NaiveDate,
    first_due_date: NaiveDate,
) -> SacSubsidyResult<ScheduleResult> {
    if installments == 0 {
        return Ok(ScheduleResult::default());
    }

    let amortization = principal / Decimal::from(installments);
    let stub_days = days_between(disbursement_date, first_due_date);

    let mut records = Vec::with_capacity(installments as usize);
    let mut balance = principal;
    let mut total_interest = Decimal::ZERO;

    for number in 1..=installments {
        let interest = if number == 1 {
            stub_interest(balance, annual_rate, stub_days)?
        } else {
            period_interest(balance, annual_rate)?
        };
        total_interest = total_interest
            .checked_add(interest)
            .ok_or_else(|| overflow("total_interest"))?;
        let payment = amortization
            .checked_add(interest)
            .ok_or_else(|| overflow("payment"))?;

        balance = snap_to_zero(balance - amortization);

        records.push(InstallmentRecord {
            number,
            payment,
            interest,
            amortization,
            balance,
        });
    }

    log::trace!(
        "SAC schedule: {installments} installments, stub {stub_days} days, total interest {total_interest}"
    );

    Ok(ScheduleResult {
        installments: records,
        total_interest,
    })
}

/// Validate `terms`, then build their schedule.
pub fn build_schedule(terms: &LoanTerms) -> SacSubsidyResult<ScheduleResult> {
    terms.validate()?;
    compute_schedule(
        terms.principal,
        terms.annual_rate,
        terms.installments,
        terms.disbursement_date,
        terms.first_due_date,
    )
}

/// Build a schedule wrapped in the standard computation envelope.
pub fn build_schedule_output(
    terms: &LoanTerms,
) -> SacSubsidyResult<ComputationOutput<ScheduleResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let schedule = build_schedule(terms)?;

    let stub_days = terms.stub_days();
    if stub_days != 365 {
        warnings.push(format!(
            "First period spans {stub_days} days; interest prorated on a 365-day year"
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "SAC (constant amortization) schedule",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "annual_rate": terms.annual_rate.to_string(),
            "installments": terms.installments,
            "disbursement_date": terms.disbursement_date.to_string(),
            "first_due_date": terms.first_due_date.to_string(),
            "day_count": "actual/365 for the first period, one full year per later installment",
        }),
        warnings,
        elapsed,
        schedule,
    ))
}
