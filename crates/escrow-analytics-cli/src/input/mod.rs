pub mod file;
pub mod stdin;

use escrow_analytics_core::dataset::{load_records, EscrowRecord};

use crate::config::Settings;

/// Resolve the dataset: `--data`, then piped stdin, then the configured path.
pub fn load_dataset(
    data: Option<&str>,
    settings: &Settings,
) -> Result<Vec<EscrowRecord>, Box<dyn std::error::Error>> {
    let records: Vec<EscrowRecord> = if let Some(path) = data {
        load_records(path)?
    } else if let Some(value) = stdin::read_stdin()? {
        serde_json::from_value(value)?
    } else {
        load_records(&settings.data_path)?
    };
    log::debug!("loaded {} escrow records", records.len());
    Ok(records)
}
