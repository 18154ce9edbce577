use clap::Args;
use serde_json::{json, Value};
use std::time::Instant;

use escrow_analytics_core::export::{export_file_name, upcoming_payments_csv};
use escrow_analytics_core::metrics::{
    alert_summary, payment_schedule, sort_by_next_due, upcoming_payments,
};
use escrow_analytics_core::with_metadata;

use crate::config::Settings;
use crate::input;

/// Names shown in the alert preview.
const ALERT_PREVIEW: usize = 2;

#[derive(Args)]
pub struct UpcomingArgs {
    /// Days after the reference date to look ahead (inclusive)
    #[arg(long)]
    pub window_days: Option<u32>,
    /// Maximum borrowers to list
    #[arg(long)]
    pub limit: Option<usize>,
    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub as_of: Option<String>,
    /// Order by earliest due date before applying the limit
    #[arg(long)]
    pub soonest_first: bool,
    /// Write the CSV export; without a value the file is named after the reference date
    #[arg(long)]
    pub export: Option<Option<String>>,
}

/// Flag, then config file, then built-in default.
fn window_and_limit(args: &UpcomingArgs, settings: &Settings) -> (u32, usize) {
    (
        args.window_days.unwrap_or(settings.window_days),
        args.limit.unwrap_or(settings.upcoming_limit),
    )
}

pub fn run_upcoming(
    args: UpcomingArgs,
    data: Option<&str>,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let as_of = super::reference_date(args.as_of.as_deref())?;
    let (window_days, limit) = window_and_limit(&args, settings);
    let records = input::load_dataset(data, settings)?;
    let start = Instant::now();

    let due = if args.soonest_first {
        upcoming_payments(sort_by_next_due(&records, as_of), as_of, window_days, limit)
    } else {
        upcoming_payments(&records, as_of, window_days, limit)
    };
    let rows = payment_schedule(due, as_of, window_days);
    let alerts = alert_summary(&rows, ALERT_PREVIEW);

    let mut warnings = Vec::new();
    let mut export_path = None;
    if let Some(target) = args.export {
        let path = target.unwrap_or_else(|| export_file_name(as_of));
        let written = input::file::write_text(&path, &upcoming_payments_csv(&rows)?)?;
        log::info!("exported {} rows to {}", rows.len(), written.display());
        if rows.is_empty() {
            warnings.push("Export contains the header row only".to_string());
        }
        export_path = Some(written.display().to_string());
    }

    let order = if args.soonest_first { "soonest due" } else { "dataset" };
    let output = with_metadata(
        "Upcoming tax and insurance disbursements",
        &json!({
            "as_of": as_of,
            "window_days": window_days,
            "limit": limit,
            "order": order,
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        records.len(),
        json!({
            "payments": rows,
            "alerts": alerts,
            "export_path": export_path,
        }),
    );
    Ok(serde_json::to_value(output)?)
}
