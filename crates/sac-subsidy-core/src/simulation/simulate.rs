use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::schedule::sac::InstallmentRecord;
use crate::schedule::terms::LoanTerms;
use crate::subsidy::calculator::{compute_subsidy_with_nominal, subsidy_warnings, FinalInstallment};
use crate::subsidy::policy::SubsidyPolicy;
use crate::types::*;
use crate::SacSubsidyResult;

/// Input for a full subsidy simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    pub terms: LoanTerms,
    /// Programme defaults apply when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<SubsidyPolicy>,
}

/// Subsidy figures reported alongside the schedules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsidySummary {
    pub effective_subvention_rate: Rate,
    pub subsidized_rate: Rate,
    pub subsidized_total_interest: Money,
    pub raw_subsidy: Money,
    pub subsidy_value: Money,
    pub per_installment_reduction: Money,
    pub rate_capped: bool,
    pub value_capped: bool,
}

/// Everything a report needs for one simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub terms: LoanTerms,
    pub nominal_schedule: Vec<InstallmentRecord>,
    pub nominal_total_interest: Money,
    pub nominal_total_payment: Money,
    pub total_amortization: Money,
    /// Flat tax on principal, informational only
    pub additional_tax: Money,
    pub subsidy: SubsidySummary,
    pub final_schedule: Vec<FinalInstallment>,
    pub final_total_payment: Money,
}

/// Run the nominal schedule and the subsidy derivation for one loan.
pub fn simulate(
    input: &SimulationInput,
) -> SacSubsidyResult<ComputationOutput<SimulationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let terms = &input.terms;
    terms.validate()?;
    let policy = input.policy.clone().unwrap_or_default();
    policy.validate()?;

    let (nominal, outcome) = compute_subsidy_with_nominal(
        terms.principal,
        terms.annual_rate,
        terms.installments,
        terms.disbursement_date,
        terms.first_due_date,
        &policy,
    )?;

    warnings.extend(subsidy_warnings(terms, &policy, &outcome));

    let final_total_payment: Money = outcome
        .final_schedule
        .iter()
        .map(|i| i.final_payment)
        .sum();

    let additional_tax = policy.additional_tax(terms.principal)?;

    let output = SimulationOutput {
        terms: terms.clone(),
        nominal_total_interest: nominal.total_interest,
        nominal_total_payment: nominal.total_payment(),
        total_amortization: nominal.total_amortization(),
        additional_tax,
        subsidy: SubsidySummary {
            effective_subvention_rate: outcome.effective_subvention_rate,
            subsidized_rate: outcome.subsidized_rate,
            subsidized_total_interest: outcome.subsidized_total_interest,
            raw_subsidy: outcome.raw_subsidy,
            subsidy_value: outcome.subsidy_value,
            per_installment_reduction: outcome.per_installment_reduction,
            rate_capped: outcome.rate_capped,
            value_capped: outcome.value_capped,
        },
        nominal_schedule: nominal.installments,
        final_schedule: outcome.final_schedule,
        final_total_payment,
    };

    log::info!(
        "Simulated {} installments: subsidy {}",
        terms.installments,
        output.subsidy.subsidy_value.round_dp(2)
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "SAC schedule with capped interest subsidy",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "annual_rate": terms.annual_rate.to_string(),
            "installments": terms.installments,
            "reference_rate": policy.reference_rate.to_string(),
            "max_subvention_rate": policy.max_subvention_rate.to_string(),
            "max_subsidy_value": policy.max_subsidy_value.to_string(),
            "additional_tax_rate": policy.additional_tax_rate.to_string(),
            "allocation": "subsidy split evenly across installments",
        }),
        warnings,
        elapsed,
        output,
    ))
}
