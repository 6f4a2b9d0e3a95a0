use clap::Args;
use serde_json::Value;

use sac_subsidy_core::simulation::simulate;

use crate::commands::schedule::LoanArgs;
use crate::commands::subsidy::read_simulation_input;
use crate::input::policy::PolicyArgs;

/// Arguments for a full simulation (schedule, subsidy and final schedule)
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to JSON input with `terms` and optional `policy` (overrides loan flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input = read_simulation_input(args.input.as_deref(), &args.loan, &args.policy)?;
    let result = simulate::simulate(&sim_input)?;
    Ok(serde_json::to_value(result)?)
}
