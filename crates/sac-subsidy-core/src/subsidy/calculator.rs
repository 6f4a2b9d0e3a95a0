use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::accrual::overflow;
use crate::schedule::sac::{compute_schedule, ScheduleResult};
use crate::schedule::terms::{validate_date_order, LoanTerms};
use crate::subsidy::policy::{SubsidyPolicy, SUBVENTION_SHARE};
use crate::types::*;
use crate::SacSubsidyResult;

/// One installment after the subsidy reduction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalInstallment {
    pub number: u32,
    pub original_payment: Money,
    pub reduction: Money,
    pub final_payment: Money,
}

/// How the subsidy was derived, and the reduced schedule it produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsidyOutcome {
    pub potential_subvention_rate: Rate,
    pub effective_subvention_rate: Rate,
    pub subsidized_rate: Rate,
    pub nominal_total_interest: Money,
    pub subsidized_total_interest: Money,
    /// Interest saved by the subsidized rate, floored at zero
    pub raw_subsidy: Money,
    /// Subsidy after the value cap
    pub subsidy_value: Money,
    /// The rate discount hit `max_subvention_rate`
    pub rate_capped: bool,
    /// The raw subsidy exceeded `max_subsidy_value`
    pub value_capped: bool,
    /// The nominal rate was below the subvention rate; subsidized rate is zero
    pub rate_floored: bool,
    pub per_installment_reduction: Money,
    pub final_schedule: Vec<FinalInstallment>,
}

/// Size a capped interest subsidy by comparing a nominal-rate schedule to
/// one at the subsidized rate, and spread it evenly over every installment.
pub fn compute_subsidy(
    principal: Money,
    nominal_rate: Rate,
    installments: u32,
    disbursement_date: NaiveDate,
    first_due_date: NaiveDate,
    policy: &SubsidyPolicy,
) -> SacSubsidyResult<SubsidyOutcome> {
    let (_, outcome) = compute_subsidy_with_nominal(
        principal,
        nominal_rate,
        installments,
        disbursement_date,
        first_due_date,
        policy,
    )?;
    Ok(outcome)
}

/// As [`compute_subsidy`], also returning the nominal schedule the subsidy
/// was derived from.
pub fn compute_subsidy_with_nominal(
    principal: Money,
    nominal_rate: Rate,
    installments: u32,
    disbursement_date: NaiveDate,
    first_due_date: NaiveDate,
    policy: &SubsidyPolicy,
) -> SacSubsidyResult<(ScheduleResult, SubsidyOutcome)> {
    validate_date_order(disbursement_date, first_due_date)?;
    policy.validate()?;

    let nominal = compute_schedule(
        principal,
        nominal_rate,
        installments,
        disbursement_date,
        first_due_date,
    )?;

    let potential_subvention_rate = policy.potential_subvention_rate();
    let effective_subvention_rate = policy.effective_subvention_rate();
    let rate_capped = potential_subvention_rate > policy.max_subvention_rate;
    if rate_capped {
        log::debug!(
            "Subvention rate {potential_subvention_rate} capped at {}",
            policy.max_subvention_rate
        );
    }

    let discounted = nominal_rate
        .checked_sub(effective_subvention_rate)
        .ok_or_else(|| overflow("subsidized_rate"))?;
    let rate_floored = discounted < Decimal::ZERO;
    let subsidized_rate = discounted.max(Decimal::ZERO);
    if rate_floored {
        log::debug!("Nominal rate {nominal_rate} below subvention rate; subsidized rate floored at zero");
    }

    let subsidized_total_interest = compute_schedule(
        principal,
        subsidized_rate,
        installments,
        disbursement_date,
        first_due_date,
    )?
    .total_interest;

    let raw_subsidy = nominal
        .total_interest
        .checked_sub(subsidized_total_interest)
        .ok_or_else(|| overflow("raw_subsidy"))?
        .max(Decimal::ZERO);
    let value_capped = raw_subsidy > policy.max_subsidy_value;
    let subsidy_value = raw_subsidy.min(policy.max_subsidy_value);
    if value_capped {
        log::debug!(
            "Subsidy {raw_subsidy} capped at {}",
            policy.max_subsidy_value
        );
    }

    // No installments to spread over; the engine already returned nothing
    let (per_installment_reduction, final_schedule) = if installments == 0 {
        (Decimal::ZERO, Vec::new())
    } else {
        let reduction = subsidy_value / Decimal::from(installments);
        (reduction, apply_reduction(&nominal, reduction)?)
    };

    let outcome = SubsidyOutcome {
        potential_subvention_rate,
        effective_subvention_rate,
        subsidized_rate,
        nominal_total_interest: nominal.total_interest,
        subsidized_total_interest,
        raw_subsidy,
        subsidy_value,
        rate_capped,
        value_capped,
        rate_floored,
        per_installment_reduction,
        final_schedule,
    };
    Ok((nominal, outcome))
}

/// Run [`compute_subsidy`] on validated loan terms.
pub fn compute_subsidy_for_terms(
    terms: &LoanTerms,
    policy: &SubsidyPolicy,
) -> SacSubsidyResult<SubsidyOutcome> {
    terms.validate()?;
    compute_subsidy(
        terms.principal,
        terms.annual_rate,
        terms.installments,
        terms.disbursement_date,
        terms.first_due_date,
        policy,
    )
}

/// Run [`compute_subsidy_for_terms`] wrapped in the standard computation envelope.
pub fn build_subsidy_output(
    terms: &LoanTerms,
    policy: &SubsidyPolicy,
) -> SacSubsidyResult<ComputationOutput<SubsidyOutcome>> {
    let start = Instant::now();
    let outcome = compute_subsidy_for_terms(terms, policy)?;
    let warnings = subsidy_warnings(terms, policy, &outcome);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Capped interest subsidy over a SAC schedule",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "nominal_rate": terms.annual_rate.to_string(),
            "installments": terms.installments,
            "subvention_share": SUBVENTION_SHARE.to_string(),
            "reference_rate": policy.reference_rate.to_string(),
            "max_subvention_rate": policy.max_subvention_rate.to_string(),
            "max_subsidy_value": policy.max_subsidy_value.to_string(),
            "allocation": "subsidy split evenly across installments",
        }),
        warnings,
        elapsed,
        outcome,
    ))
}

/// Human-readable notes on the stub period and every cap or floor that bit.
pub fn subsidy_warnings(
    terms: &LoanTerms,
    policy: &SubsidyPolicy,
    outcome: &SubsidyOutcome,
) -> Vec<String> {
    let mut warnings = Vec::new();
    let stub_days = terms.stub_days();
    if stub_days != 365 {
        warnings.push(format!(
            "First period spans {stub_days} days; interest prorated on a 365-day year"
        ));
    }
    if outcome.rate_capped {
        warnings.push(format!(
            "Subvention rate {} capped at {}",
            outcome.potential_subvention_rate, policy.max_subvention_rate
        ));
    }
    if outcome.rate_floored {
        warnings.push(format!(
            "Nominal rate {} does not exceed the subvention rate {}; subsidized rate set to zero",
            terms.annual_rate, outcome.effective_subvention_rate
        ));
    }
    if outcome.value_capped {
        warnings.push(format!(
            "Subsidy of {} capped at the maximum of {}",
            outcome.raw_subsidy.round_dp(2),
            policy.max_subsidy_value
        ));
    }
    warnings
}

/// Reduce every nominal payment by the same amount.
pub fn apply_reduction(
    nominal: &ScheduleResult,
    reduction: Money,
) -> SacSubsidyResult<Vec<FinalInstallment>> {
    nominal
        .installments
        .iter()
        .map(|inst| {
            let final_payment = inst
                .payment
                .checked_sub(reduction)
                .ok_or_else(|| overflow("final_payment"))?;
            Ok(FinalInstallment {
                number: inst.number,
                original_payment: inst.payment,
                reduction,
                final_payment,
            })
        })
        .collect()
}
