use serde::Deserialize;
use std::fs;
use std::path::Path;

use escrow_analytics_core::scenario::ScenarioAssumptions;

pub const DEFAULT_DATA_PATH: &str = "mockdata/synthetic_escrow_data.json";

/// Defaults for every command, optionally overridden by a YAML file.
/// Command-line flags take precedence over both.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_path: String,
    pub window_days: u32,
    pub upcoming_limit: usize,
    pub top_shortage_limit: usize,
    pub queue_page_size: usize,
    pub top_counties: usize,
    pub scenario: ScenarioAssumptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.to_string(),
            window_days: 30,
            upcoming_limit: 10,
            top_shortage_limit: 5,
            queue_page_size: 15,
            top_counties: 6,
            scenario: ScenarioAssumptions::default(),
        }
    }
}

impl Settings {
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let p = Path::new(path);
        let contents = fs::read_to_string(p)
            .map_err(|e| format!("Failed to read config '{}': {}", p.display(), e))?;
        Self::from_yaml(&contents)
            .map_err(|e| format!("Failed to parse config '{}': {}", p.display(), e).into())
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = serde_yaml::from_str(yaml)?;
        log::debug!("loaded settings: {settings:?}");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use escrow_analytics_core::scenario::RiskFilter;

    #[test]
    fn test_empty_file_is_default() {
        let s = Settings::from_yaml("").unwrap();
        assert_eq!(s.data_path, DEFAULT_DATA_PATH);
        assert_eq!(s.queue_page_size, 15);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let s = Settings::from_yaml(
            "window_days: 45\nscenario:\n  tax_delta_pct: 10\n  risk_filter: high\n",
        )
        .unwrap();
        assert_eq!(s.window_days, 45);
        assert_eq!(s.upcoming_limit, 10);
        assert_eq!(s.scenario.tax_delta_pct, 10.0);
        assert_eq!(s.scenario.insurance_delta_pct, 3.0);
        assert_eq!(s.scenario.risk_filter, RiskFilter::High);
    }

    #[test]
    fn test_unknown_tier_is_rejected() {
        assert!(Settings::from_yaml("scenario:\n  risk_filter: severe\n").is_err());
    }
}
