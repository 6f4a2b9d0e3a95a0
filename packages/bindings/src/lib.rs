use napi::Result as NapiResult;
use napi_derive::napi;

use sac_subsidy_core::schedule::sac;
use sac_subsidy_core::schedule::terms::LoanTerms;
use sac_subsidy_core::simulation::simulate::{self as simulation, SimulationInput};
use sac_subsidy_core::subsidy::calculator;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_schedule(input_json: String) -> NapiResult<String> {
    let terms: LoanTerms = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = sac::build_schedule_output(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Subsidy
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_subsidy(input_json: String) -> NapiResult<String> {
    let input: SimulationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let policy = input.policy.unwrap_or_default();
    let output = calculator::build_subsidy_output(&input.terms, &policy).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn simulate(input_json: String) -> NapiResult<String> {
    let input: SimulationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = simulation::simulate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
