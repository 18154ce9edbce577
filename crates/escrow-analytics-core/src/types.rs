use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values. Plain `f64`: amounts are never rounded mid-calculation,
/// only when rendered (see [`round_cents`]).
pub type Money = f64;

/// Whole-number percentage deltas (5.0 = +5%). Never as decimals.
pub type Percent = f64;

/// Loan numbers are the unique key of a record.
pub type LoanNumber = u64;

/// Months of outflow held back as escrow cushion.
pub const CUSHION_MONTHS: f64 = 2.0;

/// Shortage above which a borrower counts as at-risk (medium or high tier).
pub const AT_RISK_THRESHOLD: Money = 2000.0;

/// Shortage above which a borrower is high risk.
pub const HIGH_RISK_THRESHOLD: Money = 4000.0;

/// Apply a whole-number percentage delta: `value * (1 + pct / 100)`.
pub fn apply_pct(value: Money, pct: Percent) -> Money {
    value * (1.0 + pct / 100.0)
}

/// Round an amount to cents, half away from zero.
///
/// Returns `None` for non-finite values, which have no decimal representation.
pub fn round_cents(value: Money) -> Option<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Round to cents and hand back an `f64`; non-finite values pass through untouched.
pub fn round_cents_f64(value: Money) -> Money {
    round_cents(value)
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub records_processed: usize,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    records_processed: usize,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            records_processed,
            precision: "f64".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_apply_pct_handles_negative_and_large_deltas() {
        assert_eq!(apply_pct(100.0, 0.0), 100.0);
        assert!((apply_pct(100.0, -10.0) - 90.0).abs() < 1e-9);
        assert!((apply_pct(100.0, 250.0) - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_cents_half_away_from_zero() {
        assert_eq!(round_cents(1234.5), Some(dec!(1234.50)));
        assert_eq!(round_cents(0.125), Some(dec!(0.13)));
        assert_eq!(round_cents(-0.125), Some(dec!(-0.13)));
    }

    #[test]
    fn test_round_cents_non_finite() {
        assert_eq!(round_cents(f64::NAN), None);
        assert!(round_cents_f64(f64::INFINITY).is_infinite());
    }
}
