use serde_json::Value;

/// Pretty-printed JSON. Decimals stay strings, so no precision is lost.
pub fn render_json(value: &Value) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decimal_strings_kept_verbatim() {
        let value = json!({ "result": { "total_interest": "21428.571428571428571428571429" } });
        let out = render_json(&value).unwrap();
        assert!(out.contains("\"21428.571428571428571428571429\""));
        let back: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(back, value);
    }
}
