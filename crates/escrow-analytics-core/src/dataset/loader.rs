use std::fs;
use std::path::Path;

use super::record::EscrowRecord;
use crate::error::EscrowAnalyticsError;
use crate::EscrowAnalyticsResult;

/// Load the escrow dataset (a JSON array of records) from disk.
///
/// Any failure here is terminal for the caller: there is no retry and no
/// partial load.
pub fn load_records(path: impl AsRef<Path>) -> EscrowAnalyticsResult<Vec<EscrowRecord>> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let contents = fs::read_to_string(path).map_err(|e| EscrowAnalyticsError::DataLoad {
        path: display.clone(),
        reason: e.to_string(),
    })?;

    let records = decode(&contents).map_err(|reason| EscrowAnalyticsError::DataLoad {
        path: display.clone(),
        reason,
    })?;

    log::debug!("loaded {} escrow records from {display}", records.len());
    Ok(records)
}

/// Parse an in-memory JSON array of records.
pub fn parse_records(json: &str) -> EscrowAnalyticsResult<Vec<EscrowRecord>> {
    decode(json).map_err(|reason| EscrowAnalyticsError::DataLoad {
        path: "<memory>".into(),
        reason,
    })
}

fn decode(json: &str) -> Result<Vec<EscrowRecord>, String> {
    serde_json::from_str::<Vec<EscrowRecord>>(json).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_array() {
        let records = parse_records(
            r#"[{"Loan Number": 1, "County": "Harris"}, {"Loan Number": 2, "County": "Travis"}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].county, "Travis");
    }

    #[test]
    fn test_parse_records_empty_array() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_records_rejects_non_array() {
        let err = parse_records(r#"{"Loan Number": 1}"#).unwrap_err();
        assert!(matches!(err, EscrowAnalyticsError::DataLoad { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_records("/definitely/not/here/escrow.json").unwrap_err();
        match err {
            EscrowAnalyticsError::DataLoad { path, .. } => {
                assert!(path.contains("escrow.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
