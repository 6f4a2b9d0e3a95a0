pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Render `value` in the requested format.
pub fn render_output(
    format: &OutputFormat,
    value: &Value,
) -> Result<String, Box<dyn std::error::Error>> {
    let rendered = match format {
        OutputFormat::Json => json::render_json(value)?,
        OutputFormat::Table => table::render(value),
        OutputFormat::Csv => csv_out::render_csv(value)?,
        OutputFormat::Minimal => minimal::minimal_value(value),
    };
    Ok(rendered)
}

/// Render and print to stdout; rendering failures go back to the caller.
pub fn format_output(
    format: &OutputFormat,
    value: &Value,
) -> Result<(), Box<dyn std::error::Error>> {
    let rendered = render_output(format, value)?;
    println!("{}", rendered.trim_end_matches('\n'));
    Ok(())
}
