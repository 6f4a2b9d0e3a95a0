use clap::Args;
use serde_json::Value;

use sac_subsidy_core::simulation::simulate::SimulationInput;
use sac_subsidy_core::subsidy::calculator;

use crate::commands::schedule::LoanArgs;
use crate::input;
use crate::input::policy::{resolve_policy, PolicyArgs};

/// Arguments for the subsidy calculation
#[derive(Args)]
pub struct SubsidyArgs {
    /// Path to JSON input with `terms` and optional `policy` (overrides loan flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

/// Read terms and policy from `--input`, stdin or flags.
pub fn read_simulation_input(
    input_path: Option<&str>,
    loan: &LoanArgs,
    policy: &PolicyArgs,
) -> Result<SimulationInput, Box<dyn std::error::Error>> {
    let base: SimulationInput = if let Some(path) = input_path {
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_stdin_as()? {
        piped
    } else {
        SimulationInput {
            terms: loan.to_terms()?,
            policy: None,
        }
    };

    let resolved = resolve_policy(policy, base.policy)?;
    Ok(SimulationInput {
        terms: base.terms,
        policy: Some(resolved),
    })
}

pub fn run_subsidy(args: SubsidyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input = read_simulation_input(args.input.as_deref(), &args.loan, &args.policy)?;
    let policy = sim_input.policy.unwrap_or_default();

    let result = calculator::build_subsidy_output(&sim_input.terms, &policy)?;
    Ok(serde_json::to_value(result)?)
}
