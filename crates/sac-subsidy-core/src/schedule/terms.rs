use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::SacSubsidyError;
use crate::types::*;
use crate::SacSubsidyResult;

/// Longest supported term, in yearly installments.
pub const MAX_INSTALLMENTS: u32 = 20;

/// Largest accepted principal. Keeps every interest product well inside
/// the range of `Decimal`.
pub const MAX_PRINCIPAL: Money = dec!(1000000000000000);

/// Largest accepted annual rate (1000%).
pub const MAX_ANNUAL_RATE: Rate = dec!(10);

/// Terms of a fixed-term loan repaid in yearly SAC installments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Nominal annual rate as a fraction (0.105 = 10.5%)
    pub annual_rate: Rate,
    /// Number of yearly installments
    pub installments: u32,
    pub disbursement_date: NaiveDate,
    pub first_due_date: NaiveDate,
}

impl LoanTerms {
    /// Build validated loan terms.
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        installments: u32,
        disbursement_date: NaiveDate,
        first_due_date: NaiveDate,
    ) -> SacSubsidyResult<Self> {
        let terms = LoanTerms {
            principal,
            annual_rate,
            installments,
            disbursement_date,
            first_due_date,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Check the invariants of deserialized or hand-built terms.
    pub fn validate(&self) -> SacSubsidyResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(SacSubsidyError::InvalidInput {
                field: "principal".into(),
                reason: "Principal must be positive".into(),
            });
        }
        if self.principal > MAX_PRINCIPAL {
            return Err(SacSubsidyError::InvalidInput {
                field: "principal".into(),
                reason: format!("Principal cannot exceed {MAX_PRINCIPAL}"),
            });
        }
        if self.annual_rate < Decimal::ZERO {
            return Err(SacSubsidyError::InvalidInput {
                field: "annual_rate".into(),
                reason: "Annual rate cannot be negative".into(),
            });
        }
        if self.annual_rate > MAX_ANNUAL_RATE {
            return Err(SacSubsidyError::InvalidInput {
                field: "annual_rate".into(),
                reason: format!("Annual rate cannot exceed {MAX_ANNUAL_RATE}"),
            });
        }
        if self.installments == 0 || self.installments > MAX_INSTALLMENTS {
            return Err(SacSubsidyError::InvalidInput {
                field: "installments".into(),
                reason: format!("Installments must be between 1 and {MAX_INSTALLMENTS}"),
            });
        }
        validate_date_order(self.disbursement_date, self.first_due_date)
    }

    /// Calendar days in the first (stub) accrual period.
    pub fn stub_days(&self) -> i64 {
        crate::accrual::days_between(self.disbursement_date, self.first_due_date)
    }
}

/// The first installment must fall due strictly after disbursement.
pub fn validate_date_order(
    disbursement_date: NaiveDate,
    first_due_date: NaiveDate,
) -> SacSubsidyResult<()> {
    if first_due_date <= disbursement_date {
        return Err(SacSubsidyError::DateError(format!(
            "First due date {first_due_date} must be after disbursement date {disbursement_date}"
        )));
    }
    Ok(())
}
