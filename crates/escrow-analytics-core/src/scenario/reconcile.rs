use serde::{Deserialize, Serialize};

use super::projection::project_record;
use crate::dataset::EscrowRecord;
use crate::types::{LoanNumber, Money};

/// A record whose stored forecast disagrees with the zero-delta formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineMismatch {
    pub loan_number: LoanNumber,
    /// Stored surplus minus stored shortage
    pub stored_gap: Money,
    pub formula_gap: Money,
    pub difference: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineReconciliation {
    pub checked: usize,
    pub tolerance: Money,
    pub max_abs_difference: Money,
    pub mismatches: Vec<BaselineMismatch>,
}

impl BaselineReconciliation {
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Compare each record's stored surplus/shortage with the scenario formula
/// at zero deltas.
///
/// The stored forecast comes from an upstream process and is not guaranteed
/// to match the formula exactly (the extract rounds to cents, for one), so
/// differences within `tolerance` are accepted.
pub fn reconcile_baseline(records: &[EscrowRecord], tolerance: Money) -> BaselineReconciliation {
    let mut report = BaselineReconciliation {
        checked: records.len(),
        tolerance,
        ..Default::default()
    };

    for record in records {
        let projection = project_record(record, 0.0, 0.0, 0.0);
        let stored_gap = record.surplus() - record.shortage();
        let difference = stored_gap - projection.gap;
        let magnitude = difference.abs();

        if magnitude > report.max_abs_difference {
            report.max_abs_difference = magnitude;
        }
        if magnitude > tolerance {
            report.mismatches.push(BaselineMismatch {
                loan_number: record.loan_number,
                stored_gap,
                formula_gap: projection.gap,
                difference,
            });
        }
    }

    if !report.mismatches.is_empty() {
        log::warn!(
            "{} of {} records disagree with the cushion formula by more than {tolerance}",
            report.mismatches.len(),
            report.checked
        );
    }
    report
}
