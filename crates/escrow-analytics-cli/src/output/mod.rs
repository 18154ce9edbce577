pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a scalar for humans: fractional numbers to cents, integers as-is.
pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => escrow_analytics_core::round_cents(f)
                .map(|d| format!("{d:.2}"))
                .unwrap_or_else(|| n.to_string()),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_scalar).collect::<Vec<_>>().join(" / "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_scalar_rounds_money() {
        assert_eq!(format_scalar(&json!(1234.5)), "1234.50");
        assert_eq!(format_scalar(&json!(0.125)), "0.13");
        assert_eq!(format_scalar(&json!(42)), "42");
        assert_eq!(format_scalar(&json!(null)), "");
        assert_eq!(format_scalar(&json!(["Tax", "Insurance"])), "Tax / Insurance");
    }
}
