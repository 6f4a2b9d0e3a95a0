use serde_json::{Map, Value};
use std::io::Write;

/// Installment lists, most useful first, written as rows when present.
const ROW_KEYS: [&str; 3] = ["final_schedule", "installments", "nominal_schedule"];

/// Render output as CSV text.
pub fn render_csv(value: &Value) -> Result<String, Box<dyn std::error::Error>> {
    let mut buf = Vec::new();
    write_csv(&mut buf, value)?;
    Ok(String::from_utf8(buf)?)
}

/// Write an installment list as rows if the result carries one, otherwise
/// two columns of field and value.
pub fn write_csv<W: Write>(writer: W, value: &Value) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);

    match value {
        Value::Object(map) => {
            let body = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            match schedule_rows(body) {
                Some(rows) => write_array_csv(&mut wtr, rows)?,
                None => {
                    wtr.write_record(["field", "value"])?;
                    for (key, val) in body {
                        wtr.write_record([key.as_str(), &format_csv_value(val)])?;
                    }
                }
            }
        }
        Value::Array(arr) => write_array_csv(&mut wtr, arr)?,
        _ => wtr.write_record([&format_csv_value(value)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn schedule_rows(map: &Map<String, Value>) -> Option<&Vec<Value>> {
    ROW_KEYS.iter().find_map(|key| match map.get(*key) {
        Some(Value::Array(arr)) if !arr.is_empty() => Some(arr),
        _ => None,
    })
}

fn write_array_csv<W: Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> Result<(), csv::Error> {
    if arr.is_empty() {
        return Ok(());
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        wtr.write_record(&headers)?;

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                wtr.write_record(&row)?;
            }
        }
    } else {
        for item in arr {
            wtr.write_record([&format_csv_value(item)])?;
        }
    }
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_string(value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_final_schedule_preferred() {
        let value = json!({
            "result": {
                "subsidy_value": "700",
                "final_schedule": [
                    { "number": 1, "final_payment": "1000" },
                    { "number": 2, "final_payment": "900" }
                ],
                "nominal_schedule": [
                    { "number": 1, "payment": "1350" }
                ]
            }
        });
        let out = to_string(&value);
        assert_eq!(out, "final_payment,number\n1000,1\n900,2\n");
    }

    #[test]
    fn test_field_value_fallback() {
        let value = json!({ "result": { "subsidy_value": "700", "value_capped": true } });
        let out = to_string(&value);
        assert_eq!(out, "field,value\nsubsidy_value,700\nvalue_capped,true\n");
    }
}
