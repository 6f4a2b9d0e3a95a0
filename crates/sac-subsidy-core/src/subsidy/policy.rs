use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::accrual::overflow;
use crate::error::SacSubsidyError;
use crate::schedule::terms::MAX_ANNUAL_RATE;
use crate::types::*;
use crate::SacSubsidyResult;

/// Share of the reference rate that may be granted as subvention.
pub const SUBVENTION_SHARE: Decimal = dec!(0.5);

/// Subsidy programme parameters.
///
/// Passed explicitly into the calculator and never mutated. Missing fields
/// fall back to the programme defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubsidyPolicy {
    /// Base policy rate the subvention is derived from
    pub reference_rate: Rate,
    /// Ceiling on the rate discount
    pub max_subvention_rate: Rate,
    /// Ceiling on the total subsidy, in currency
    pub max_subsidy_value: Money,
    /// Flat informational tax on principal, outside amortization
    pub additional_tax_rate: Rate,
}

impl Default for SubsidyPolicy {
    fn default() -> Self {
        SubsidyPolicy {
            reference_rate: dec!(0.15),
            max_subvention_rate: dec!(0.08),
            max_subsidy_value: dec!(50000.00),
            additional_tax_rate: dec!(0.0038),
        }
    }
}

impl SubsidyPolicy {
    pub fn validate(&self) -> SacSubsidyResult<()> {
        let fields = [
            ("reference_rate", self.reference_rate),
            ("max_subvention_rate", self.max_subvention_rate),
            ("max_subsidy_value", self.max_subsidy_value),
            ("additional_tax_rate", self.additional_tax_rate),
        ];
        for (field, value) in fields {
            if value < Decimal::ZERO {
                return Err(SacSubsidyError::InvalidInput {
                    field: field.into(),
                    reason: "Policy parameters cannot be negative".into(),
                });
            }
        }
        let rates = [
            ("reference_rate", self.reference_rate),
            ("max_subvention_rate", self.max_subvention_rate),
            ("additional_tax_rate", self.additional_tax_rate),
        ];
        for (field, value) in rates {
            if value > MAX_ANNUAL_RATE {
                return Err(SacSubsidyError::InvalidInput {
                    field: field.into(),
                    reason: format!("Policy rates cannot exceed {MAX_ANNUAL_RATE}"),
                });
            }
        }
        Ok(())
    }

    /// Subvention rate before the rate cap.
    pub fn potential_subvention_rate(&self) -> Rate {
        self.reference_rate * SUBVENTION_SHARE
    }

    /// Subvention rate after the rate cap.
    pub fn effective_subvention_rate(&self) -> Rate {
        self.potential_subvention_rate().min(self.max_subvention_rate)
    }

    /// Informational tax on `principal`.
    pub fn additional_tax(&self, principal: Money) -> SacSubsidyResult<Money> {
        principal
            .checked_mul(self.additional_tax_rate)
            .ok_or_else(|| overflow("additional_tax"))
    }
}
