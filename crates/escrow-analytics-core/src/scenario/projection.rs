use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dataset::EscrowRecord;
use crate::types::{apply_pct, LoanNumber, Money, Percent, CUSHION_MONTHS};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Scenario recomputation for a single loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordProjection {
    pub loan_number: LoanNumber,
    pub county: String,
    pub adjusted_tax: Money,
    pub adjusted_insurance: Money,
    pub annual_outflow: Money,
    pub monthly_contribution: Money,
    pub adjusted_balance: Money,
    /// Annual outflow plus the cushion
    pub required_balance: Money,
    /// Adjusted balance minus required balance; negative means shortage
    pub gap: Money,
    pub scenario_shortage: Money,
    pub scenario_surplus: Money,
    pub baseline_shortage: Money,
    pub baseline_surplus: Money,
}

/// Baseline vs scenario shortage for one county.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CountyImpact {
    pub baseline: Money,
    pub scenario: Money,
}

impl CountyImpact {
    pub fn difference(&self) -> Money {
        self.scenario - self.baseline
    }
}

/// A county row for drill-down reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountyDelta {
    pub county: String,
    pub baseline: Money,
    pub scenario: Money,
    pub difference: Money,
}

/// Scenario-wide aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub records_evaluated: usize,
    pub baseline_shortage: Money,
    pub scenario_shortage: Money,
    pub baseline_surplus: Money,
    pub scenario_surplus: Money,
    /// Scenario minus baseline; positive means more funding required
    pub shortage_delta: Money,
    /// Scenario minus baseline; negative means surplus consumed
    pub surplus_delta: Money,
    pub county_impact: BTreeMap<String, CountyImpact>,
    pub projections: Vec<RecordProjection>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Re-derive one record's shortage/surplus under the given deltas.
pub fn project_record(
    record: &EscrowRecord,
    tax_delta_pct: Percent,
    insurance_delta_pct: Percent,
    contribution_delta_pct: Percent,
) -> RecordProjection {
    let adjusted_tax = apply_pct(record.forecasted_tax, tax_delta_pct);
    let adjusted_insurance = apply_pct(record.forecasted_insurance, insurance_delta_pct);
    let annual_outflow = adjusted_tax + adjusted_insurance;
    let monthly_contribution = annual_outflow / 12.0;
    let adjusted_balance = apply_pct(record.current_escrow_balance, contribution_delta_pct);
    let required_balance = annual_outflow + monthly_contribution * CUSHION_MONTHS;
    let gap = adjusted_balance - required_balance;

    // NaN gaps land in neither bucket; infinities carry through
    let scenario_shortage = if gap < 0.0 { -gap } else { 0.0 };
    let scenario_surplus = if gap > 0.0 { gap } else { 0.0 };

    RecordProjection {
        loan_number: record.loan_number,
        county: record.county.clone(),
        adjusted_tax,
        adjusted_insurance,
        annual_outflow,
        monthly_contribution,
        adjusted_balance,
        required_balance,
        gap,
        scenario_shortage,
        scenario_surplus,
        baseline_shortage: record.shortage(),
        baseline_surplus: record.surplus(),
    }
}

/// Project every record and aggregate baseline vs scenario totals.
///
/// Pass an already-filtered cohort to scope the scenario; see
/// [`crate::scenario::RiskFilter`].
pub fn project_scenario<'a, I>(
    records: I,
    tax_delta_pct: Percent,
    insurance_delta_pct: Percent,
    contribution_delta_pct: Percent,
) -> ScenarioResult
where
    I: IntoIterator<Item = &'a EscrowRecord>,
{
    let mut result = ScenarioResult::default();

    for record in records {
        let p = project_record(record, tax_delta_pct, insurance_delta_pct, contribution_delta_pct);

        result.baseline_shortage += p.baseline_shortage;
        result.scenario_shortage += p.scenario_shortage;
        result.baseline_surplus += p.baseline_surplus;
        result.scenario_surplus += p.scenario_surplus;

        let county = result.county_impact.entry(p.county.clone()).or_default();
        county.baseline += p.baseline_shortage;
        county.scenario += p.scenario_shortage;

        result.projections.push(p);
    }

    result.records_evaluated = result.projections.len();
    result.shortage_delta = result.scenario_shortage - result.baseline_shortage;
    result.surplus_delta = result.scenario_surplus - result.baseline_surplus;
    result
}

impl ScenarioResult {
    /// Counties ordered by the magnitude of their shortage change, largest
    /// first, truncated to `n`. Equal magnitudes keep county-name order.
    pub fn top_counties(&self, n: usize) -> Vec<CountyDelta> {
        let mut rows: Vec<CountyDelta> = self
            .county_impact
            .iter()
            .map(|(county, impact)| CountyDelta {
                county: county.clone(),
                baseline: impact.baseline,
                scenario: impact.scenario,
                difference: impact.difference(),
            })
            .collect();
        rows.sort_by(|a, b| b.difference.abs().total_cmp(&a.difference.abs()));
        rows.truncate(n);
        rows
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(county: &str, balance: Money, tax: Money, ins: Money, shortage: Money) -> EscrowRecord {
        EscrowRecord {
            county: county.into(),
            current_escrow_balance: balance,
            forecasted_tax: tax,
            forecasted_insurance: ins,
            forecasted_escrow_shortage: shortage,
            ..Default::default()
        }
    }

    #[test]
    fn test_record_formula() {
        // outflow 6000 + cushion 1000 = 7000 required
        let r = record("Dallas", 4000.0, 4800.0, 1200.0, 0.0);
        let p = project_record(&r, 0.0, 0.0, 0.0);
        assert_eq!(p.annual_outflow, 6000.0);
        assert_eq!(p.monthly_contribution, 500.0);
        assert_eq!(p.required_balance, 7000.0);
        assert_eq!(p.gap, -3000.0);
        assert_eq!(p.scenario_shortage, 3000.0);
        assert_eq!(p.scenario_surplus, 0.0);
    }

    #[test]
    fn test_deltas_applied_as_whole_percent() {
        let r = record("Dallas", 10000.0, 1000.0, 200.0, 0.0);
        let p = project_record(&r, 10.0, -50.0, 100.0);
        assert!((p.adjusted_tax - 1100.0).abs() < 1e-9);
        assert!((p.adjusted_insurance - 100.0).abs() < 1e-9);
        assert!((p.adjusted_balance - 20000.0).abs() < 1e-9);
        assert!(p.scenario_surplus > 0.0);
    }

    #[test]
    fn test_aggregates_and_deltas() {
        let records = vec![
            record("Dallas", 4000.0, 4800.0, 1200.0, 2500.0),
            record("Travis", 9000.0, 4800.0, 1200.0, 0.0),
        ];
        let res = project_scenario(&records, 0.0, 0.0, 0.0);
        assert_eq!(res.records_evaluated, 2);
        assert_eq!(res.baseline_shortage, 2500.0);
        assert_eq!(res.scenario_shortage, 3000.0);
        assert_eq!(res.scenario_surplus, 2000.0);
        assert_eq!(res.shortage_delta, 500.0);
        assert_eq!(res.surplus_delta, 2000.0);
        assert_eq!(res.county_impact["Dallas"].scenario, 3000.0);
        assert_eq!(res.county_impact["Travis"].scenario, 0.0);
    }

    #[test]
    fn test_top_counties_by_absolute_difference() {
        let records = vec![
            record("Collin", 0.0, 1200.0, 0.0, 0.0),   // +1400
            record("Harris", 0.0, 600.0, 0.0, 5000.0), // -4300
            record("Travis", 0.0, 120.0, 0.0, 100.0),  // +40
        ];
        let res = project_scenario(&records, 0.0, 0.0, 0.0);
        let top: Vec<String> = res.top_counties(2).into_iter().map(|c| c.county).collect();
        assert_eq!(top, vec!["Harris", "Collin"]);
        assert!(res.top_counties(10).len() == 3);
    }

    #[test]
    fn test_empty_cohort() {
        let empty: Vec<EscrowRecord> = Vec::new();
        let res = project_scenario(&empty, 5.0, 3.0, 5.0);
        assert_eq!(res, ScenarioResult::default());
        assert!(res.top_counties(6).is_empty());
    }

    #[test]
    fn test_non_finite_input_propagates() {
        let r = record("Dallas", f64::INFINITY, 1000.0, 0.0, 0.0);
        let p = project_record(&r, 0.0, 0.0, 0.0);
        assert!(p.scenario_surplus.is_infinite());
    }
}
