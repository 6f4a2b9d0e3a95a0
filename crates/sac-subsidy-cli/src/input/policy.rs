use clap::Args;
use rust_decimal::Decimal;
use std::path::Path;

use sac_subsidy_core::subsidy::policy::SubsidyPolicy;

use crate::input::file;

/// Subsidy programme parameters shared by the subsidy commands
#[derive(Args, Debug, Default)]
pub struct PolicyArgs {
    /// Path to a policy file (.json, .yaml or .yml)
    #[arg(long)]
    pub policy: Option<String>,

    /// Reference (base policy) rate, e.g. 0.15
    #[arg(long)]
    pub reference_rate: Option<Decimal>,

    /// Ceiling on the subvention rate, e.g. 0.08
    #[arg(long)]
    pub max_subvention_rate: Option<Decimal>,

    /// Ceiling on the total subsidy value
    #[arg(long)]
    pub max_subsidy_value: Option<Decimal>,

    /// Informational tax rate on principal, e.g. 0.0038
    #[arg(long)]
    pub additional_tax_rate: Option<Decimal>,
}

/// Read a policy file, choosing the format from its extension.
pub fn read_policy_file(path: &str) -> Result<SubsidyPolicy, Box<dyn std::error::Error>> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("yaml") | Some("yml") => file::read_yaml(path),
        _ => file::read_json(path),
    }
}

/// Resolve the policy in precedence order: flags, `--policy` file, `base`
/// (typically from the JSON input), then programme defaults.
pub fn resolve_policy(
    args: &PolicyArgs,
    base: Option<SubsidyPolicy>,
) -> Result<SubsidyPolicy, Box<dyn std::error::Error>> {
    let mut policy = match args.policy {
        Some(ref path) => read_policy_file(path)?,
        None => base.unwrap_or_default(),
    };

    if let Some(rate) = args.reference_rate {
        policy.reference_rate = rate;
    }
    if let Some(rate) = args.max_subvention_rate {
        policy.max_subvention_rate = rate;
    }
    if let Some(value) = args.max_subsidy_value {
        policy.max_subsidy_value = value;
    }
    if let Some(rate) = args.additional_tax_rate {
        policy.additional_tax_rate = rate;
    }

    policy.validate()?;
    log::debug!("Resolved subsidy policy: {:?}", policy);
    Ok(policy)
}
