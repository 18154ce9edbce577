use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use escrow_analytics_core::dashboard::DashboardOptions;
use escrow_analytics_core::dataset::{parse_as_of, parse_records, EscrowRecord};
use escrow_analytics_core::scenario::ScenarioInput;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn records_from(records_json: &str) -> NapiResult<Vec<EscrowRecord>> {
    parse_records(records_json).map_err(to_napi_error)
}

fn default_window_days() -> u32 {
    30
}

fn default_upcoming_limit() -> usize {
    10
}

fn default_top_shortage_limit() -> usize {
    5
}

#[derive(Deserialize)]
struct UpcomingInput {
    records: Vec<EscrowRecord>,
    as_of: String,
    #[serde(default = "default_window_days")]
    window_days: u32,
    #[serde(default = "default_upcoming_limit")]
    limit: usize,
}

#[derive(Deserialize)]
struct TopShortagesInput {
    records: Vec<EscrowRecord>,
    #[serde(default = "default_top_shortage_limit")]
    limit: usize,
}

#[derive(Deserialize)]
struct DashboardInput {
    records: Vec<EscrowRecord>,
    #[serde(default)]
    options: DashboardOptions,
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_metrics(records_json: String) -> NapiResult<String> {
    let records = records_from(&records_json)?;
    let output = escrow_analytics_core::metrics::compute_metrics(&records);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn segment_by_risk(records_json: String) -> NapiResult<String> {
    let records = records_from(&records_json)?;
    let output = escrow_analytics_core::metrics::segment_by_risk(&records);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn county_distribution(records_json: String) -> NapiResult<String> {
    let records = records_from(&records_json)?;
    let output = escrow_analytics_core::metrics::county_distribution(&records);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn interaction_types(records_json: String) -> NapiResult<String> {
    let records = records_from(&records_json)?;
    let output = escrow_analytics_core::metrics::interaction_types(&records);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn top_shortages(input_json: String) -> NapiResult<String> {
    let input: TopShortagesInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = escrow_analytics_core::metrics::top_shortages(&input.records, input.limit);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_dashboard(input_json: String) -> NapiResult<String> {
    let input: DashboardInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = escrow_analytics_core::dashboard::build_dashboard(&input.records, &input.options);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[napi]
pub fn upcoming_payments(input_json: String) -> NapiResult<String> {
    let input: UpcomingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let as_of = parse_as_of(&input.as_of).map_err(to_napi_error)?;
    let output = escrow_analytics_core::metrics::upcoming_payments(
        &input.records,
        as_of,
        input.window_days,
        input.limit,
    );
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Same selection as `upcoming_payments`, rendered as the CSV export.
#[napi]
pub fn upcoming_payments_csv(input_json: String) -> NapiResult<String> {
    let input: UpcomingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let as_of = parse_as_of(&input.as_of).map_err(to_napi_error)?;
    let due = escrow_analytics_core::metrics::upcoming_payments(
        &input.records,
        as_of,
        input.window_days,
        input.limit,
    );
    let rows = escrow_analytics_core::metrics::payment_schedule(due, as_of, input.window_days);
    escrow_analytics_core::export::upcoming_payments_csv(&rows).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

#[napi]
pub fn project_scenario(input_json: String) -> NapiResult<String> {
    let input: ScenarioInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = escrow_analytics_core::scenario::run_scenario(
        &input.records,
        &input.assumptions,
        input.top_counties,
    );
    serde_json::to_string(&output).map_err(to_napi_error)
}
