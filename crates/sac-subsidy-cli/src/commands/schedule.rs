use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use sac_subsidy_core::schedule::sac;
use sac_subsidy_core::schedule::terms::LoanTerms;

use crate::input;

/// Loan terms given as individual flags
#[derive(Args, Debug, Default)]
pub struct LoanArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual interest rate as a decimal (0.105 = 10.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Number of yearly installments (1-20)
    #[arg(long)]
    pub installments: Option<u32>,

    /// Disbursement date (YYYY-MM-DD)
    #[arg(long)]
    pub disbursement_date: Option<NaiveDate>,

    /// Due date of the first installment (YYYY-MM-DD)
    #[arg(long)]
    pub first_due_date: Option<NaiveDate>,
}

impl LoanArgs {
    /// Build validated terms from the flags.
    pub fn to_terms(&self) -> Result<LoanTerms, Box<dyn std::error::Error>> {
        let principal = self
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let rate = self.rate.ok_or("--rate is required (or provide --input)")?;
        let installments = self
            .installments
            .ok_or("--installments is required (or provide --input)")?;
        let disbursement_date = self
            .disbursement_date
            .ok_or("--disbursement-date is required (or provide --input)")?;
        let first_due_date = self
            .first_due_date
            .ok_or("--first-due-date is required (or provide --input)")?;

        Ok(LoanTerms::new(
            principal,
            rate,
            installments,
            disbursement_date,
            first_due_date,
        )?)
    }
}

/// Arguments for a SAC schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON loan terms (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_stdin_as()? {
        piped
    } else {
        args.loan.to_terms()?
    };

    let result = sac::build_schedule_output(&terms)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn full_args() -> LoanArgs {
        LoanArgs {
            principal: Some(dec!(150000)),
            rate: Some(dec!(0.105)),
            installments: Some(7),
            disbursement_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            first_due_date: NaiveDate::from_ymd_opt(2026, 3, 1),
        }
    }

    #[test]
    fn test_terms_from_flags() {
        let terms = full_args().to_terms().unwrap();
        assert_eq!(terms.principal, dec!(150000));
        assert_eq!(terms.installments, 7);
    }

    #[test]
    fn test_missing_flag_reported() {
        let args = LoanArgs {
            rate: None,
            ..full_args()
        };
        let err = args.to_terms().unwrap_err();
        assert!(err.to_string().contains("--rate"));
    }

    #[test]
    fn test_inverted_dates_rejected() {
        let args = LoanArgs {
            first_due_date: NaiveDate::from_ymd_opt(2025, 2, 1),
            ..full_args()
        };
        assert!(args.to_terms().is_err());
    }
}
