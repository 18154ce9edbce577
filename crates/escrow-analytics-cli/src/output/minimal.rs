use serde_json::Value;

use super::format_scalar;

/// Headline fields, most specific first.
const PRIORITY_KEYS: [&str; 10] = [
    "shortage_delta",
    "total_shortage",
    "max_abs_difference",
    "matching",
    "written",
    "count",
    "total",
    "healthy_coverage_pct",
    "total_customers",
    "borrowers",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result_obj {
        Value::Object(map) => {
            // the dashboard nests its KPIs one level down
            let metrics = map.get("metrics").and_then(Value::as_object);
            for key in PRIORITY_KEYS {
                let hit = map
                    .get(key)
                    .or_else(|| metrics.and_then(|m| m.get(key)));
                if let Some(val) = hit.filter(|v| !v.is_null()) {
                    return format_scalar(val);
                }
            }
            match map.iter().next() {
                Some((key, val)) => format!("{}: {}", key, format_scalar(val)),
                None => String::new(),
            }
        }
        Value::Array(arr) => arr.len().to_string(),
        other => format_scalar(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_picks_priority_key() {
        let v = json!({"result": {"total_customers": 3, "total_shortage": 2500.0}});
        assert_eq!(minimal_line(&v), "2500.00");
    }

    #[test]
    fn test_reaches_into_dashboard_metrics() {
        let v = json!({"result": {"as_of": "2024-01-01", "metrics": {"total_shortage": 10.0}}});
        assert_eq!(minimal_line(&v), "10.00");
    }

    #[test]
    fn test_array_result_prints_length() {
        let v = json!({"result": [{"a": 1}, {"a": 2}]});
        assert_eq!(minimal_line(&v), "2");
    }
}
