use chrono::{Duration, NaiveDate};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sac_subsidy_core::subsidy::calculator::compute_subsidy;
use sac_subsidy_core::subsidy::policy::SubsidyPolicy;
use sac_subsidy_core::SacSubsidyError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ===========================================================================
// Rate derivation and caps
// ===========================================================================

#[test]
fn test_programme_rates() {
    let policy = SubsidyPolicy {
        reference_rate: dec!(0.15),
        max_subvention_rate: dec!(0.08),
        ..SubsidyPolicy::default()
    };
    let out = compute_subsidy(dec!(150000), dec!(0.105), 7, date(2025, 1, 1), date(2026, 1, 1), &policy)
        .unwrap();
    assert_eq!(out.effective_subvention_rate, dec!(0.075));
    assert_eq!(out.subsidized_rate, dec!(0.03));
    assert!(!out.rate_floored);
}

#[test]
fn test_neither_cap() {
    let out = compute_subsidy(
        dec!(10000),
        dec!(0.12),
        3,
        date(2025, 1, 1),
        date(2026, 1, 1),
        &SubsidyPolicy::default(),
    )
    .unwrap();
    assert!(!out.rate_capped);
    assert!(!out.value_capped);
    // Subvention 0.075 on balances 10000, 6666.67, 3333.33 = 0.075 * 20000 = 1500
    assert!((out.subsidy_value - dec!(1500)).abs() < dec!(0.000001));
}

#[test]
fn test_value_cap_only() {
    let out = compute_subsidy(
        dec!(1000000),
        dec!(0.105),
        10,
        date(2025, 1, 1),
        date(2026, 1, 1),
        &SubsidyPolicy::default(),
    )
    .unwrap();
    assert!(!out.rate_capped);
    assert!(out.value_capped);
    assert_eq!(out.subsidy_value, dec!(50000));
    assert_eq!(out.per_installment_reduction, dec!(5000));
    for inst in &out.final_schedule {
        assert_eq!(inst.reduction, dec!(5000));
        assert_eq!(inst.final_payment, inst.original_payment - dec!(5000));
    }
}

#[test]
fn test_rate_cap_only() {
    let policy = SubsidyPolicy {
        reference_rate: dec!(0.40),
        ..SubsidyPolicy::default()
    };
    let out = compute_subsidy(dec!(10000), dec!(0.12), 3, date(2025, 1, 1), date(2026, 1, 1), &policy)
        .unwrap();
    assert!(out.rate_capped);
    assert!(!out.value_capped);
    assert_eq!(out.potential_subvention_rate, dec!(0.20));
    assert_eq!(out.effective_subvention_rate, dec!(0.08));
    assert_eq!(out.subsidized_rate, dec!(0.04));
}

#[test]
fn test_nominal_rate_equal_to_subvention_gives_zero_rate() {
    let out = compute_subsidy(
        dec!(50000),
        dec!(0.075),
        4,
        date(2025, 1, 1),
        date(2026, 1, 1),
        &SubsidyPolicy::default(),
    )
    .unwrap();
    assert_eq!(out.subsidized_rate, Decimal::ZERO);
    assert!(!out.rate_floored);
    assert_eq!(out.subsidy_value, out.nominal_total_interest);
}

#[test]
fn test_zero_value_cap_disables_subsidy() {
    let policy = SubsidyPolicy {
        max_subsidy_value: Decimal::ZERO,
        ..SubsidyPolicy::default()
    };
    let out = compute_subsidy(dec!(50000), dec!(0.10), 4, date(2025, 1, 1), date(2026, 1, 1), &policy)
        .unwrap();
    assert_eq!(out.subsidy_value, Decimal::ZERO);
    assert!(out.final_schedule.iter().all(|i| i.final_payment == i.original_payment));
}

#[test]
fn test_same_day_dates_rejected() {
    let err = compute_subsidy(
        dec!(50000),
        dec!(0.10),
        4,
        date(2025, 1, 1),
        date(2025, 1, 1),
        &SubsidyPolicy::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SacSubsidyError::DateError(_)));
}

#[test]
fn test_negative_policy_rejected() {
    let policy = SubsidyPolicy {
        reference_rate: dec!(-0.01),
        ..SubsidyPolicy::default()
    };
    let err = compute_subsidy(dec!(50000), dec!(0.10), 4, date(2025, 1, 1), date(2026, 1, 1), &policy)
        .unwrap_err();
    assert!(matches!(err, SacSubsidyError::InvalidInput { .. }));
}

// ===========================================================================
// Properties
// ===========================================================================

fn principal_strategy() -> impl Strategy<Value = Decimal> {
    (100_000i64..500_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (10i64..3_000i64).prop_map(|bp| Decimal::new(bp, 4))
}

proptest! {
    #[test]
    fn prop_subsidy_never_negative_nor_above_cap(
        principal in principal_strategy(),
        rate in rate_strategy(),
        installments in 1u32..=20,
        stub_days in 1i64..=730,
    ) {
        let policy = SubsidyPolicy::default();
        let d1 = date(2025, 1, 1);
        let out = compute_subsidy(principal, rate, installments, d1, d1 + Duration::days(stub_days), &policy).unwrap();
        prop_assert!(out.subsidy_value >= Decimal::ZERO);
        prop_assert!(out.subsidy_value <= policy.max_subsidy_value);
        prop_assert!(out.subsidized_rate >= Decimal::ZERO);
        if out.value_capped {
            prop_assert_eq!(out.subsidy_value, policy.max_subsidy_value);
        }
    }

    #[test]
    fn prop_final_payments_sum(
        principal in principal_strategy(),
        rate in rate_strategy(),
        installments in 1u32..=20,
    ) {
        let out = compute_subsidy(principal, rate, installments, date(2025, 1, 1), date(2026, 1, 1), &SubsidyPolicy::default()).unwrap();
        let original: Decimal = out.final_schedule.iter().map(|i| i.original_payment).sum();
        let reduced: Decimal = out.final_schedule.iter().map(|i| i.final_payment).sum();
        prop_assert_eq!(out.final_schedule.len(), installments as usize);
        prop_assert!((reduced - (original - out.subsidy_value)).abs() < dec!(0.000001));
    }

    #[test]
    fn prop_reduction_is_even(
        principal in principal_strategy(),
        rate in rate_strategy(),
        installments in 1u32..=20,
    ) {
        let out = compute_subsidy(principal, rate, installments, date(2025, 1, 1), date(2026, 1, 1), &SubsidyPolicy::default()).unwrap();
        for inst in &out.final_schedule {
            prop_assert_eq!(inst.reduction, out.per_installment_reduction);
        }
    }

    #[test]
    fn prop_subsidy_is_deterministic(
        principal in principal_strategy(),
        rate in rate_strategy(),
        installments in 0u32..=20,
    ) {
        let policy = SubsidyPolicy::default();
        let a = compute_subsidy(principal, rate, installments, date(2025, 1, 1), date(2026, 1, 1), &policy).unwrap();
        let b = compute_subsidy(principal, rate, installments, date(2025, 1, 1), date(2026, 1, 1), &policy).unwrap();
        prop_assert_eq!(a, b);
    }
}
