use serde_json::Value;

/// Key answer fields, in priority order.
const PRIORITY_KEYS: [&str; 4] = [
    "subsidy_value",
    "total_interest",
    "nominal_total_interest",
    "final_total_payment",
];

/// Just the key answer value: a priority key in the result, then one level
/// down (the simulation nests its subsidy figures), then the first field.
pub fn minimal_value(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key).filter(|v| !v.is_null()) {
                return format_minimal(val);
            }
            let nested = map
                .values()
                .filter_map(|v| v.as_object())
                .find_map(|inner| inner.get(*key).filter(|v| !v.is_null()));
            if let Some(val) = nested {
                return format_minimal(val);
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
