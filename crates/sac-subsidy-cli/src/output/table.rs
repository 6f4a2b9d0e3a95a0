use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;
use tabled::{builder::Builder, Table};

/// Decimal places shown for monetary values and rates in tables.
const DISPLAY_DP: u32 = 6;

/// Render the whole output envelope: scalar fields first, then one table per
/// installment list, then warnings and methodology.
pub fn render(value: &Value) -> String {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => render_result(result, map),
            None => render_fields(&flatten(map)),
        },
        Value::Array(arr) => render_rows(arr).unwrap_or_else(|| "(empty)".to_string()),
        _ => value.to_string(),
    }
}

fn render_result(result: &Value, envelope: &Map<String, Value>) -> String {
    let mut sections: Vec<String> = Vec::new();

    match result {
        Value::Object(res_map) => {
            let (scalars, lists): (Vec<_>, Vec<_>) = res_map
                .iter()
                .partition(|(_, v)| !is_row_list(v));

            let scalar_map: Map<String, Value> = scalars
                .into_iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            sections.push(render_fields(&flatten(&scalar_map)));

            for (key, val) in lists {
                if let Value::Array(rows) = val {
                    let body = render_rows(rows).unwrap_or_else(|| "(empty)".to_string());
                    sections.push(format!("{}:\n{}", key, body));
                }
            }
        }
        other => sections.push(format_value(other)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            let mut block = String::from("Warnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    block.push_str(&format!("\n  - {}", s));
                }
            }
            sections.push(block);
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        sections.push(format!("Methodology: {}", meth));
    }

    sections.join("\n\n")
}

/// A non-empty array whose first element is an object renders as rows.
fn is_row_list(value: &Value) -> bool {
    matches!(value, Value::Array(arr) if matches!(arr.first(), Some(Value::Object(_))))
}

/// Flatten nested objects one level deep into `parent.child` keys.
fn flatten(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    for (key, val) in map {
        match val {
            Value::Object(inner) => {
                for (ik, iv) in inner {
                    out.push((format!("{}.{}", key, ik), iv.clone()));
                }
            }
            _ => out.push((key.clone(), val.clone())),
        }
    }
    out
}

fn render_fields(fields: &[(String, Value)]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key.clone(), format_value(val)]);
    }
    Table::from(builder).to_string()
}

fn render_rows(arr: &[Value]) -> Option<String> {
    let Some(Value::Object(first)) = arr.first() else {
        if arr.is_empty() {
            return None;
        }
        let items: Vec<String> = arr.iter().map(format_value).collect();
        return Some(items.join("\n"));
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }

    Some(Table::from(builder).to_string())
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format_decimal_str(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Decimals arrive as strings; trim long expansions for display.
fn format_decimal_str(s: &str) -> String {
    match Decimal::from_str(s) {
        Ok(d) => d.round_dp(DISPLAY_DP).normalize().to_string(),
        Err(_) => s.to_string(),
    }
}
