use clap::Args;
use serde_json::{json, Value};

use escrow_analytics_core::synthetic::{generate, DEFAULT_RECORD_COUNT, DEFAULT_SEED};

use crate::input;

#[derive(Args)]
pub struct GenerateArgs {
    /// Number of borrowers
    #[arg(long, default_value_t = DEFAULT_RECORD_COUNT)]
    pub count: usize,
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
    /// Date the payment history is anchored to (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub as_of: Option<String>,
    /// Write the dataset here instead of stdout
    #[arg(long)]
    pub out: Option<String>,
}

/// Without `--out` the bare record array is returned so it can be piped
/// into another command.
pub fn run_generate(args: GenerateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let as_of = super::reference_date(args.as_of.as_deref())?;
    let records = generate(args.count, args.seed, as_of)?;

    let Some(out) = args.out else {
        return Ok(serde_json::to_value(records)?);
    };

    let written = input::file::write_text(&out, &serde_json::to_string_pretty(&records)?)?;
    log::info!("wrote {} synthetic records to {}", records.len(), written.display());
    Ok(json!({
        "result": {
            "written": records.len(),
            "path": written.display().to_string(),
            "seed": args.seed,
            "as_of": as_of,
        }
    }))
}
