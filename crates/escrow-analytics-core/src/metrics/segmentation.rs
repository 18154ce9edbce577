use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::dataset::EscrowRecord;
use crate::error::EscrowAnalyticsError;
use crate::types::{Money, AT_RISK_THRESHOLD, HIGH_RISK_THRESHOLD};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Discrete risk classification by forecast shortage magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    High,
    Medium,
    Low,
    Healthy,
}

impl RiskTier {
    pub const ALL: [RiskTier; 4] = [
        RiskTier::High,
        RiskTier::Medium,
        RiskTier::Low,
        RiskTier::Healthy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::High => "High Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::Low => "Low Risk",
            RiskTier::Healthy => "Healthy",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RiskTier::High => "Shortage > $4,000",
            RiskTier::Medium => "Shortage $2,000 - $4,000",
            RiskTier::Low => "Shortage up to $2,000",
            RiskTier::Healthy => "No shortage",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::High => write!(f, "high"),
            RiskTier::Medium => write!(f, "medium"),
            RiskTier::Low => write!(f, "low"),
            RiskTier::Healthy => write!(f, "healthy"),
        }
    }
}

impl FromStr for RiskTier {
    type Err = EscrowAnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(RiskTier::High),
            "medium" => Ok(RiskTier::Medium),
            "low" => Ok(RiskTier::Low),
            "healthy" => Ok(RiskTier::Healthy),
            other => Err(EscrowAnalyticsError::InvalidInput {
                field: "risk_tier".into(),
                reason: format!("'{other}' is not one of high, medium, low, healthy"),
            }),
        }
    }
}

/// Four disjoint, exhaustive subsets of the input records.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RiskSegmentation<'a> {
    pub high_risk: Vec<&'a EscrowRecord>,
    pub medium_risk: Vec<&'a EscrowRecord>,
    pub low_risk: Vec<&'a EscrowRecord>,
    pub healthy: Vec<&'a EscrowRecord>,
}

/// Headline figures for one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSummary {
    pub tier: RiskTier,
    pub label: String,
    pub description: String,
    pub count: usize,
    /// Shortage total for risk tiers, surplus total (negatives clamped) for healthy
    pub amount: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Classify a single record.
///
/// Anything that is not a positive shortage is healthy. That includes a zero
/// shortage paired with a negative surplus, a negative shortage, and a
/// NaN shortage; see [`unclassified_anomalies`].
pub fn classify(record: &EscrowRecord) -> RiskTier {
    let s = record.shortage();
    if s > HIGH_RISK_THRESHOLD {
        RiskTier::High
    } else if s > AT_RISK_THRESHOLD {
        RiskTier::Medium
    } else if s > 0.0 {
        RiskTier::Low
    } else {
        RiskTier::Healthy
    }
}

/// Partition records into the four risk tiers, preserving input order within
/// each tier.
pub fn segment_by_risk(records: &[EscrowRecord]) -> RiskSegmentation<'_> {
    let mut seg = RiskSegmentation::default();
    for record in records {
        match classify(record) {
            RiskTier::High => seg.high_risk.push(record),
            RiskTier::Medium => seg.medium_risk.push(record),
            RiskTier::Low => seg.low_risk.push(record),
            RiskTier::Healthy => {
                if is_gap_case(record) {
                    log::warn!(
                        "loan {} classified healthy by fallback (shortage {}, surplus {})",
                        record.loan_number,
                        record.shortage(),
                        record.surplus()
                    );
                }
                seg.healthy.push(record);
            }
        }
    }
    seg
}

/// Number of records that only reach the healthy tier through the fallback
/// rule, i.e. not `shortage == 0 && surplus >= 0`.
pub fn unclassified_anomalies(records: &[EscrowRecord]) -> usize {
    records.iter().filter(|r| is_gap_case(r)).count()
}

/// Share of healthy records as a percentage of the whole book.
pub fn healthy_coverage_pct(segmentation: &RiskSegmentation<'_>) -> f64 {
    let total = segmentation.len();
    if total == 0 {
        return 0.0;
    }
    segmentation.healthy.len() as f64 / total as f64 * 100.0
}

impl<'a> RiskSegmentation<'a> {
    pub fn tier(&self, tier: RiskTier) -> &[&'a EscrowRecord] {
        match tier {
            RiskTier::High => &self.high_risk,
            RiskTier::Medium => &self.medium_risk,
            RiskTier::Low => &self.low_risk,
            RiskTier::Healthy => &self.healthy,
        }
    }

    /// Total records across all tiers.
    pub fn len(&self) -> usize {
        self.high_risk.len() + self.medium_risk.len() + self.low_risk.len() + self.healthy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count and amount per tier, in severity order.
    pub fn summaries(&self) -> Vec<TierSummary> {
        RiskTier::ALL
            .iter()
            .map(|&tier| {
                let members = self.tier(tier);
                let amount = match tier {
                    RiskTier::Healthy => members.iter().map(|r| r.surplus().max(0.0)).sum(),
                    _ => members.iter().map(|r| r.shortage()).sum(),
                };
                TierSummary {
                    tier,
                    label: tier.label().to_string(),
                    description: tier.description().to_string(),
                    count: members.len(),
                    amount,
                }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn is_gap_case(record: &EscrowRecord) -> bool {
    let (s, p) = (record.shortage(), record.surplus());
    classify(record) == RiskTier::Healthy && !(s == 0.0 && p >= 0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
