use clap::Args;
use serde_json::{json, Value};
use std::time::Instant;

use escrow_analytics_core::scenario::{self, reconcile_baseline, RiskFilter, ScenarioAssumptions};
use escrow_analytics_core::with_metadata;

use crate::config::Settings;
use crate::input;

#[derive(Args)]
pub struct ScenarioArgs {
    /// Tax change in percent (e.g. 5 or -2.5)
    #[arg(long, allow_negative_numbers = true)]
    pub tax: Option<f64>,
    /// Insurance change in percent
    #[arg(long, allow_negative_numbers = true)]
    pub insurance: Option<f64>,
    /// Escrow balance change in percent
    #[arg(long, allow_negative_numbers = true)]
    pub contribution: Option<f64>,
    /// Cohort: all, high, medium, low or healthy
    #[arg(long)]
    pub tier: Option<String>,
    /// Counties in the drill-down
    #[arg(long)]
    pub top_counties: Option<usize>,
}

#[derive(Args)]
pub struct ReconcileArgs {
    /// Largest accepted difference between stored and recomputed gap
    #[arg(long, default_value = "0.01")]
    pub tolerance: f64,
}

pub fn run_scenario(
    args: ScenarioArgs,
    data: Option<&str>,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let assumptions = resolve_assumptions(&args, settings)?;
    let top_counties = args.top_counties.unwrap_or(settings.top_counties);

    let records = input::load_dataset(data, settings)?;
    let output = scenario::run_scenario(&records, &assumptions, top_counties);
    Ok(serde_json::to_value(output)?)
}

/// Flags override the configured scenario, which already carries the
/// built-in defaults for anything the config file leaves out.
fn resolve_assumptions(
    args: &ScenarioArgs,
    settings: &Settings,
) -> Result<ScenarioAssumptions, Box<dyn std::error::Error>> {
    let mut assumptions = settings.scenario;
    if let Some(tax) = args.tax {
        assumptions.tax_delta_pct = tax;
    }
    if let Some(insurance) = args.insurance {
        assumptions.insurance_delta_pct = insurance;
    }
    if let Some(contribution) = args.contribution {
        assumptions.contribution_delta_pct = contribution;
    }
    if let Some(ref tier) = args.tier {
        assumptions.risk_filter = tier.parse::<RiskFilter>()?;
    }
    Ok(assumptions)
}

pub fn run_reconcile(
    args: ReconcileArgs,
    data: Option<&str>,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    if !args.tolerance.is_finite() || args.tolerance < 0.0 {
        return Err(format!("--tolerance must be a non-negative number, got {}", args.tolerance).into());
    }
    let records = input::load_dataset(data, settings)?;
    let start = Instant::now();
    let report = reconcile_baseline(&records, args.tolerance);

    let mut warnings = Vec::new();
    if !report.is_consistent() {
        warnings.push(format!(
            "{} of {} stored forecasts differ from the cushion formula by more than {}",
            report.mismatches.len(),
            report.checked,
            args.tolerance
        ));
    }

    let output = with_metadata(
        "Stored forecast vs zero-delta scenario formula",
        &json!({ "tolerance": args.tolerance }),
        warnings,
        start.elapsed().as_micros() as u64,
        records.len(),
        report,
    );
    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ScenarioArgs {
        ScenarioArgs {
            tax: None,
            insurance: None,
            contribution: None,
            tier: None,
            top_counties: None,
        }
    }

    #[test]
    fn test_defaults_without_config_or_flags() {
        let a = resolve_assumptions(&args(), &Settings::default()).unwrap();
        assert_eq!(a, ScenarioAssumptions::default());
    }

    #[test]
    fn test_config_beats_default_and_flag_beats_config() {
        let settings = Settings::from_yaml(
            "scenario:\n  tax_delta_pct: 8\n  insurance_delta_pct: 4\n  risk_filter: medium\n",
        )
        .unwrap();

        let from_config = resolve_assumptions(&args(), &settings).unwrap();
        assert_eq!(from_config.tax_delta_pct, 8.0);
        assert_eq!(from_config.insurance_delta_pct, 4.0);
        assert_eq!(from_config.contribution_delta_pct, 5.0);
        assert_eq!(from_config.risk_filter, RiskFilter::Medium);

        let flags = ScenarioArgs {
            tax: Some(-2.5),
            tier: Some("high".into()),
            ..args()
        };
        let from_flags = resolve_assumptions(&flags, &settings).unwrap();
        assert_eq!(from_flags.tax_delta_pct, -2.5);
        assert_eq!(from_flags.insurance_delta_pct, 4.0);
        assert_eq!(from_flags.risk_filter, RiskFilter::High);
    }

    #[test]
    fn test_unknown_tier_flag_is_an_error() {
        let flags = ScenarioArgs {
            tier: Some("severe".into()),
            ..args()
        };
        assert!(resolve_assumptions(&flags, &Settings::default()).is_err());
    }
}
