use serde::{Deserialize, Serialize};

use crate::dataset::EscrowRecord;
use crate::types::{Money, AT_RISK_THRESHOLD};

/// Portfolio-wide KPIs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_customers: usize,
    pub total_escrow_balance: Money,
    /// Sum of forecast shortages across every record, unclamped
    pub total_shortage: Money,
    /// Records with shortage strictly above the at-risk threshold
    pub customers_with_shortage: usize,
    /// Mean shortage over at-risk records only; zero when there are none
    pub avg_shortage: Money,
}

/// Derive portfolio KPIs in a single pass. Empty input yields all zeros.
pub fn compute_metrics(records: &[EscrowRecord]) -> DashboardMetrics {
    let mut total_escrow_balance = 0.0;
    let mut total_shortage = 0.0;
    let mut customers_with_shortage = 0usize;
    let mut at_risk_shortage = 0.0;

    for record in records {
        let shortage = record.shortage();
        total_escrow_balance += record.current_escrow_balance;
        total_shortage += shortage;
        if shortage > AT_RISK_THRESHOLD {
            customers_with_shortage += 1;
            at_risk_shortage += shortage;
        }
    }

    let avg_shortage = if customers_with_shortage > 0 {
        at_risk_shortage / customers_with_shortage as f64
    } else {
        0.0
    };

    DashboardMetrics {
        total_customers: records.len(),
        total_escrow_balance,
        total_shortage,
        customers_with_shortage,
        avg_shortage,
    }
}
