use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::dataset::EscrowRecord;
use crate::error::EscrowAnalyticsError;
use crate::metrics::segmentation::{classify, RiskTier};
use crate::types::Percent;

/// Borrower cohort a scenario is run against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
    Healthy,
}

impl RiskFilter {
    pub fn matches(self, record: &EscrowRecord) -> bool {
        match self.tier() {
            None => true,
            Some(tier) => classify(record) == tier,
        }
    }

    pub fn tier(self) -> Option<RiskTier> {
        match self {
            RiskFilter::All => None,
            RiskFilter::High => Some(RiskTier::High),
            RiskFilter::Medium => Some(RiskTier::Medium),
            RiskFilter::Low => Some(RiskTier::Low),
            RiskFilter::Healthy => Some(RiskTier::Healthy),
        }
    }
}

impl std::fmt::Display for RiskFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.tier() {
            None => write!(f, "all"),
            Some(tier) => write!(f, "{tier}"),
        }
    }
}

impl From<Option<RiskTier>> for RiskFilter {
    fn from(tier: Option<RiskTier>) -> Self {
        match tier {
            None => RiskFilter::All,
            Some(RiskTier::High) => RiskFilter::High,
            Some(RiskTier::Medium) => RiskFilter::Medium,
            Some(RiskTier::Low) => RiskFilter::Low,
            Some(RiskTier::Healthy) => RiskFilter::Healthy,
        }
    }
}

impl FromStr for RiskFilter {
    type Err = EscrowAnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(RiskFilter::All);
        }
        s.parse::<RiskTier>().map(|t| RiskFilter::from(Some(t)))
    }
}

/// Hypothetical adjustments, as whole-number percentage deltas.
///
/// Deltas may be negative or exceed 100; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioAssumptions {
    pub tax_delta_pct: Percent,
    pub insurance_delta_pct: Percent,
    pub contribution_delta_pct: Percent,
    pub risk_filter: RiskFilter,
}

impl Default for ScenarioAssumptions {
    fn default() -> Self {
        Self {
            tax_delta_pct: 5.0,
            insurance_delta_pct: 3.0,
            contribution_delta_pct: 5.0,
            risk_filter: RiskFilter::All,
        }
    }
}

impl ScenarioAssumptions {
    /// Zero deltas across the whole book.
    pub fn identity() -> Self {
        Self {
            tax_delta_pct: 0.0,
            insurance_delta_pct: 0.0,
            contribution_delta_pct: 0.0,
            risk_filter: RiskFilter::All,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.tax_delta_pct.is_finite()
            && self.insurance_delta_pct.is_finite()
            && self.contribution_delta_pct.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_uses_segmentation_tiers() {
        let zero = EscrowRecord::default();
        assert!(RiskFilter::Healthy.matches(&zero));
        assert!(!RiskFilter::Low.matches(&zero));
        assert!(RiskFilter::All.matches(&zero));

        let high = EscrowRecord {
            forecasted_escrow_shortage: 4100.0,
            ..Default::default()
        };
        assert!(RiskFilter::High.matches(&high));
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!("all".parse::<RiskFilter>().unwrap(), RiskFilter::All);
        assert_eq!("Medium".parse::<RiskFilter>().unwrap(), RiskFilter::Medium);
        assert!("severe".parse::<RiskFilter>().is_err());
    }

    #[test]
    fn test_defaults_and_partial_json() {
        let a: ScenarioAssumptions = serde_json::from_str(r#"{"tax_delta_pct": 12}"#).unwrap();
        assert_eq!(a.tax_delta_pct, 12.0);
        assert_eq!(a.insurance_delta_pct, 3.0);
        assert_eq!(a.risk_filter, RiskFilter::All);
    }
}
