use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use sac_subsidy_core::simulation::simulate::{simulate, SimulationInput};

#[test]
fn test_simulation_from_json() {
    let input: SimulationInput = serde_json::from_str(
        r#"{
            "terms": {
                "principal": "150000",
                "annual_rate": "0.105",
                "installments": 7,
                "disbursement_date": "2025-03-01",
                "first_due_date": "2026-03-01"
            }
        }"#,
    )
    .unwrap();
    let out = simulate(&input).unwrap();
    let res = &out.result;
    assert_eq!(res.terms.installments, 7);
    assert_eq!(res.nominal_schedule[0].interest, dec!(15750));
    assert_eq!(res.additional_tax, dec!(570));
    assert_eq!(
        res.terms.first_due_date,
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    );
    assert!((res.subsidy.subsidy_value - dec!(45000)).abs() < dec!(0.000001));
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
}

#[test]
fn test_simulation_with_partial_policy() {
    let input: SimulationInput = serde_json::from_str(
        r#"{
            "terms": {
                "principal": "150000",
                "annual_rate": "0.105",
                "installments": 7,
                "disbursement_date": "2025-03-01",
                "first_due_date": "2026-03-01"
            },
            "policy": { "max_subsidy_value": "30000" }
        }"#,
    )
    .unwrap();
    let out = simulate(&input).unwrap();
    assert!(out.result.subsidy.value_capped);
    assert_eq!(out.result.subsidy.subsidy_value, dec!(30000));
    assert_eq!(out.result.final_schedule.len(), 7);
}

#[test]
fn test_simulation_output_serializes() {
    let input: SimulationInput = serde_json::from_str(
        r#"{
            "terms": {
                "principal": "20000",
                "annual_rate": "0.09",
                "installments": 2,
                "disbursement_date": "2025-01-01",
                "first_due_date": "2025-07-01"
            }
        }"#,
    )
    .unwrap();
    let out = simulate(&input).unwrap();
    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(value["result"]["nominal_schedule"].as_array().unwrap().len(), 2);
    assert_eq!(value["warnings"].as_array().unwrap().len(), 1);
}

#[test]
fn test_oversized_principal_from_json_is_an_error() {
    let input: SimulationInput = serde_json::from_str(
        r#"{
            "terms": {
                "principal": "10000000000000000000000000000",
                "annual_rate": "0.105",
                "installments": 7,
                "disbursement_date": "2025-03-01",
                "first_due_date": "2026-03-01"
            }
        }"#,
    )
    .unwrap();
    let err = simulate(&input).unwrap_err();
    assert!(err.to_string().contains("principal"));
}
