use serde_json::{Map, Value};
use std::io;

use super::format_scalar;

/// Write output as CSV to stdout.
///
/// Array results become one row per element; object results become
/// `field,value` pairs, with the first array-of-objects field (if any)
/// taking over as the row source.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_csv(&mut wtr, value) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Array(arr) => write_rows(wtr, arr)?,
        Value::Object(map) => match first_row_set(map) {
            Some(rows) => write_rows(wtr, rows)?,
            None => {
                wtr.write_record(["field", "value"])?;
                for (key, val) in map {
                    wtr.write_record([key.as_str(), &format_scalar(val)])?;
                }
            }
        },
        other => wtr.write_record([&format_scalar(other)])?,
    }
    wtr.flush()?;
    Ok(())
}

fn first_row_set(map: &Map<String, Value>) -> Option<&Vec<Value>> {
    map.values().find_map(|v| match v {
        Value::Array(arr) if arr.first().is_some_and(Value::is_object) => Some(arr),
        _ => None,
    })
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            wtr.write_record([&format_scalar(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_scalar).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        {
            let mut wtr = csv::Writer::from_writer(&mut buf);
            write_csv(&mut wtr, value).unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_object_result_is_field_value() {
        let out = render(&json!({"result": {"total_customers": 2}}));
        assert_eq!(out, "field,value\ntotal_customers,2\n");
    }

    #[test]
    fn test_nested_rows_are_expanded() {
        let out = render(&json!({"result": {
            "page": 1,
            "records": [{"Customer Name": "Smith, John", "Loan Number": 7}]
        }}));
        assert_eq!(out, "Customer Name,Loan Number\n\"Smith, John\",7\n");
    }
}
