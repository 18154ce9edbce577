use clap::Args;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;

use escrow_analytics_core::dashboard::{build_dashboard, DashboardOptions, ShortageEntry};
use escrow_analytics_core::metrics::{
    compute_metrics, county_distribution, healthy_coverage_pct, interaction_types, ranked,
    segment_by_risk, shortage_queue, top_shortages, unclassified_anomalies, Distribution,
    RiskTier,
};
use escrow_analytics_core::{with_metadata, AT_RISK_THRESHOLD, HIGH_RISK_THRESHOLD};

use crate::config::Settings;
use crate::input;

#[derive(Args)]
pub struct TopShortagesArgs {
    /// Number of borrowers to list
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct QueueArgs {
    /// Restrict to one tier: high, medium, low or healthy
    #[arg(long)]
    pub tier: Option<String>,
    /// 1-based page number
    #[arg(long, default_value = "1")]
    pub page: usize,
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Serialize)]
struct DistributionRow {
    label: String,
    count: usize,
}

pub fn run_metrics(
    data: Option<&str>,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let records = input::load_dataset(data, settings)?;
    let start = Instant::now();
    let metrics = compute_metrics(&records);
    let output = with_metadata(
        "Portfolio escrow KPIs",
        &json!({ "at_risk_threshold": AT_RISK_THRESHOLD }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        records.len(),
        metrics,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_segments(
    data: Option<&str>,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let records = input::load_dataset(data, settings)?;
    let start = Instant::now();
    let segmentation = segment_by_risk(&records);

    let mut warnings = Vec::new();
    let anomalies = unclassified_anomalies(&records);
    if anomalies > 0 {
        warnings.push(format!(
            "{anomalies} records with no positive shortage and a negative or non-finite forecast were counted as healthy"
        ));
    }

    let result = json!({
        "tiers": segmentation.summaries(),
        "healthy_coverage_pct": healthy_coverage_pct(&segmentation),
        "unclassified_anomalies": anomalies,
    });
    let output = with_metadata(
        "Risk tiers by forecast shortage",
        &json!({
            "high_risk_above": HIGH_RISK_THRESHOLD,
            "medium_risk_above": AT_RISK_THRESHOLD,
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        records.len(),
        result,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_counties(
    data: Option<&str>,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let records = input::load_dataset(data, settings)?;
    let start = Instant::now();
    let distribution = county_distribution(&records);
    distribution_output("Borrowers per county", &distribution, start, records.len())
}

pub fn run_interactions(
    data: Option<&str>,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let records = input::load_dataset(data, settings)?;
    let start = Instant::now();
    let distribution = interaction_types(&records);
    distribution_output(
        "Borrowers per last interaction channel",
        &distribution,
        start,
        records.len(),
    )
}

pub fn run_top_shortages(
    args: TopShortagesArgs,
    data: Option<&str>,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let records = input::load_dataset(data, settings)?;
    let limit = top_shortage_limit(&args, settings);
    let start = Instant::now();

    let rows: Vec<ShortageEntry> = top_shortages(&records, limit)
        .into_iter()
        .map(ShortageEntry::from_record)
        .collect();

    let output = with_metadata(
        "Largest forecast shortages",
        &json!({ "limit": limit }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        records.len(),
        rows,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_queue(
    args: QueueArgs,
    data: Option<&str>,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let tier: Option<RiskTier> = args.tier.as_deref().map(str::parse::<RiskTier>).transpose()?;
    let page_size = queue_page_size(&args, settings);
    let records = input::load_dataset(data, settings)?;
    let start = Instant::now();

    let page = shortage_queue(&records, tier, args.page, page_size);
    let mut warnings = Vec::new();
    if page.page != args.page {
        warnings.push(format!(
            "Page {} is out of range; showing page {} of {}",
            args.page, page.page, page.total_pages
        ));
    }

    let output = with_metadata(
        "Shortage outreach queue",
        &json!({ "tier": tier, "page_size": page_size }),
        warnings,
        start.elapsed().as_micros() as u64,
        records.len(),
        page,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_dashboard(
    data: Option<&str>,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let records = input::load_dataset(data, settings)?;
    let options = DashboardOptions {
        as_of: None,
        window_days: settings.window_days,
        upcoming_limit: settings.upcoming_limit,
        top_shortage_limit: settings.top_shortage_limit,
    };
    let output = build_dashboard(&records, &options);
    Ok(serde_json::to_value(output)?)
}

fn top_shortage_limit(args: &TopShortagesArgs, settings: &Settings) -> usize {
    args.limit.unwrap_or(settings.top_shortage_limit)
}

fn queue_page_size(args: &QueueArgs, settings: &Settings) -> usize {
    args.page_size.unwrap_or(settings.queue_page_size)
}

fn distribution_output(
    methodology: &str,
    distribution: &Distribution,
    start: Instant,
    records_processed: usize,
) -> Result<Value, Box<dyn std::error::Error>> {
    let rows: Vec<DistributionRow> = ranked(distribution)
        .into_iter()
        .map(|(label, count)| DistributionRow { label, count })
        .collect();
    let total: usize = rows.iter().map(|r| r.count).sum();

    let output = with_metadata(
        methodology,
        &json!({ "order": "count descending, then label" }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        records_processed,
        json!({ "total": total, "distribution": rows }),
    );
    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_prefer_flag_then_config_then_default() {
        let defaults = Settings::default();
        let configured =
            Settings::from_yaml("top_shortage_limit: 12\nqueue_page_size: 40\n").unwrap();

        let no_flag = TopShortagesArgs { limit: None };
        assert_eq!(top_shortage_limit(&no_flag, &defaults), 5);
        assert_eq!(top_shortage_limit(&no_flag, &configured), 12);
        assert_eq!(top_shortage_limit(&TopShortagesArgs { limit: Some(3) }, &configured), 3);

        let queue = |page_size| QueueArgs {
            tier: None,
            page: 1,
            page_size,
        };
        assert_eq!(queue_page_size(&queue(None), &defaults), 15);
        assert_eq!(queue_page_size(&queue(None), &configured), 40);
        assert_eq!(queue_page_size(&queue(Some(5)), &configured), 5);
    }
}
