use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::dataset::EscrowRecord;
use crate::metrics::{
    classify, compute_metrics, county_distribution, healthy_coverage_pct, interaction_types,
    payment_schedule, ranked, segment_by_risk, top_shortages, unclassified_anomalies,
    upcoming_payments, DashboardMetrics, PaymentRow, RiskTier, TierSummary,
};
use crate::types::{with_metadata, ComputationOutput, LoanNumber, Money};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Knobs for the overview. Every field has a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardOptions {
    /// Reference date for the payment window; today when absent
    pub as_of: Option<NaiveDate>,
    pub window_days: u32,
    pub upcoming_limit: usize,
    pub top_shortage_limit: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            as_of: None,
            window_days: 30,
            upcoming_limit: 10,
            top_shortage_limit: 5,
        }
    }
}

impl DashboardOptions {
    pub fn reference_date(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortageEntry {
    pub loan_number: LoanNumber,
    pub customer_name: String,
    pub county: String,
    pub shortage: Money,
    pub tier: RiskTier,
}

impl ShortageEntry {
    pub fn from_record(record: &EscrowRecord) -> Self {
        Self {
            loan_number: record.loan_number,
            customer_name: record.customer_name.clone(),
            county: record.county.clone(),
            shortage: record.shortage(),
            tier: classify(record),
        }
    }
}

/// Everything the overview page renders, in one pass over the book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub as_of: NaiveDate,
    pub metrics: DashboardMetrics,
    pub tiers: Vec<TierSummary>,
    pub healthy_coverage_pct: f64,
    pub counties: Vec<(String, usize)>,
    pub interaction_types: Vec<(String, usize)>,
    pub interaction_total: usize,
    pub upcoming_payments: Vec<PaymentRow>,
    pub top_shortages: Vec<ShortageEntry>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn build_dashboard(
    records: &[EscrowRecord],
    options: &DashboardOptions,
) -> ComputationOutput<DashboardSnapshot> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let as_of = options.reference_date();

    let metrics = compute_metrics(records);
    let segmentation = segment_by_risk(records);

    let anomalies = unclassified_anomalies(records);
    if anomalies > 0 {
        warnings.push(format!(
            "{anomalies} records have no positive shortage but a negative or non-finite forecast; counted as healthy"
        ));
    }

    let unscheduled = records
        .iter()
        .filter(|r| r.next_tax_date().is_none() && r.next_insurance_date().is_none())
        .count();
    if unscheduled > 0 {
        warnings.push(format!(
            "{unscheduled} records have no parseable next tax or insurance date and are never shown as due"
        ));
    }

    let interactions = interaction_types(records);
    let interaction_total: usize = interactions.values().sum();

    let due = upcoming_payments(records, as_of, options.window_days, options.upcoming_limit);
    let upcoming = payment_schedule(due, as_of, options.window_days);

    let shortages = top_shortages(records, options.top_shortage_limit)
        .into_iter()
        .map(ShortageEntry::from_record)
        .collect();

    let snapshot = DashboardSnapshot {
        as_of,
        healthy_coverage_pct: healthy_coverage_pct(&segmentation),
        tiers: segmentation.summaries(),
        metrics,
        counties: ranked(&county_distribution(records)),
        interaction_types: ranked(&interactions),
        interaction_total,
        upcoming_payments: upcoming,
        top_shortages: shortages,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    log::debug!("dashboard over {} records built in {elapsed}us", records.len());

    with_metadata(
        "Escrow Portfolio Overview",
        options,
        warnings,
        elapsed,
        records.len(),
        snapshot,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
