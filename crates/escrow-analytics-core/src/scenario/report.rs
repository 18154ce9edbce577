use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::assumptions::ScenarioAssumptions;
use super::projection::{project_scenario, CountyDelta};
use crate::dataset::EscrowRecord;
use crate::types::{with_metadata, ComputationOutput, Money};

/// Counties shown in the drill-down by default.
pub const DEFAULT_TOP_COUNTIES: usize = 6;

fn default_top_counties() -> usize {
    DEFAULT_TOP_COUNTIES
}

/// Self-contained scenario request, as accepted over the JSON boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub records: Vec<EscrowRecord>,
    #[serde(default)]
    pub assumptions: ScenarioAssumptions,
    #[serde(default = "default_top_counties")]
    pub top_counties: usize,
}

/// Headline scenario outcome with the county drill-down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub cohort_size: usize,
    pub baseline_shortage: Money,
    pub scenario_shortage: Money,
    pub shortage_delta: Money,
    pub baseline_surplus: Money,
    pub scenario_surplus: Money,
    pub surplus_delta: Money,
    pub top_counties: Vec<CountyDelta>,
}

/// Run a what-if scenario over the cohort selected by the assumptions' risk
/// filter.
pub fn run_scenario(
    records: &[EscrowRecord],
    assumptions: &ScenarioAssumptions,
    top_counties: usize,
) -> ComputationOutput<ScenarioReport> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if !assumptions.is_finite() {
        warnings.push("Scenario deltas are not finite; projected totals will not be either".into());
    }

    let cohort: Vec<&EscrowRecord> = records
        .iter()
        .filter(|r| assumptions.risk_filter.matches(r))
        .collect();

    if cohort.is_empty() {
        warnings.push(format!(
            "No borrowers match the '{}' cohort",
            assumptions.risk_filter
        ));
    }

    let result = project_scenario(
        cohort.iter().copied(),
        assumptions.tax_delta_pct,
        assumptions.insurance_delta_pct,
        assumptions.contribution_delta_pct,
    );

    log::debug!(
        "scenario tax={} ins={} contrib={}: {} records, shortage delta {:.2}",
        assumptions.tax_delta_pct,
        assumptions.insurance_delta_pct,
        assumptions.contribution_delta_pct,
        result.records_evaluated,
        result.shortage_delta
    );

    let report = ScenarioReport {
        cohort_size: result.records_evaluated,
        baseline_shortage: result.baseline_shortage,
        scenario_shortage: result.scenario_shortage,
        shortage_delta: result.shortage_delta,
        baseline_surplus: result.baseline_surplus,
        scenario_surplus: result.scenario_surplus,
        surplus_delta: result.surplus_delta,
        top_counties: result.top_counties(top_counties),
    };

    let elapsed = start.elapsed().as_micros() as u64;

    with_metadata(
        "Escrow Scenario Projection (2-month cushion)",
        assumptions,
        warnings,
        elapsed,
        records.len(),
        report,
    )
}
