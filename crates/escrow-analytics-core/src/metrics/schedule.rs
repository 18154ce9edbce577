use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dataset::EscrowRecord;
use crate::types::{LoanNumber, Money};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    Tax,
    Insurance,
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentType::Tax => write!(f, "Tax"),
            PaymentType::Insurance => write!(f, "Insurance"),
        }
    }
}

/// One borrower in the disbursement schedule. `payment_types`, `due_dates`
/// and `amounts` are parallel and empty when nothing falls in the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRow {
    pub customer_name: String,
    pub loan_number: LoanNumber,
    pub county: String,
    pub tax_due: bool,
    pub insurance_due: bool,
    pub payment_types: Vec<PaymentType>,
    pub due_dates: Vec<NaiveDate>,
    pub amounts: Vec<Money>,
}

impl PaymentRow {
    pub fn is_actionable(&self) -> bool {
        self.tax_due || self.insurance_due
    }
}

/// Reminder scheduling preview for the actionable rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub borrowers: usize,
    pub preview: Vec<String>,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Records with a tax or insurance disbursement in `[as_of, as_of + window_days]`.
///
/// Input order is preserved and the result is truncated to `limit`; this is
/// not a soonest-first selection (see [`sort_by_next_due`]). Unparseable
/// dates count as not due.
pub fn upcoming_payments<'a, I>(
    records: I,
    as_of: NaiveDate,
    window_days: u32,
    limit: usize,
) -> Vec<&'a EscrowRecord>
where
    I: IntoIterator<Item = &'a EscrowRecord>,
{
    let end = window_end(as_of, window_days);
    records
        .into_iter()
        .filter(|r| {
            in_window(r.next_tax_date(), as_of, end) || in_window(r.next_insurance_date(), as_of, end)
        })
        .take(limit)
        .collect()
}

/// Stable sort by earliest disbursement on or after `as_of`; records with
/// nothing upcoming (past or unparseable dates only) go last.
pub fn sort_by_next_due<'a, I>(records: I, as_of: NaiveDate) -> Vec<&'a EscrowRecord>
where
    I: IntoIterator<Item = &'a EscrowRecord>,
{
    let mut sorted: Vec<&EscrowRecord> = records.into_iter().collect();
    sorted.sort_by_cached_key(|r| {
        let due = r.next_due_on_or_after(as_of);
        (due.is_none(), due)
    });
    sorted
}

/// Build one schedule row per record, flagging which disbursements fall in
/// the window.
pub fn payment_schedule<'a, I>(records: I, as_of: NaiveDate, window_days: u32) -> Vec<PaymentRow>
where
    I: IntoIterator<Item = &'a EscrowRecord>,
{
    let end = window_end(as_of, window_days);
    let mut unparseable = 0usize;

    let rows: Vec<PaymentRow> = records
        .into_iter()
        .map(|record| {
            let tax_date = record.next_tax_date();
            let ins_date = record.next_insurance_date();
            if tax_date.is_none() || ins_date.is_none() {
                unparseable += 1;
            }

            let tax_due = in_window(tax_date, as_of, end);
            let insurance_due = in_window(ins_date, as_of, end);

            let mut payment_types = Vec::new();
            let mut due_dates = Vec::new();
            let mut amounts = Vec::new();

            if let (true, Some(date)) = (tax_due, tax_date) {
                payment_types.push(PaymentType::Tax);
                due_dates.push(date);
                amounts.push(record.forecasted_tax);
            }
            if let (true, Some(date)) = (insurance_due, ins_date) {
                payment_types.push(PaymentType::Insurance);
                due_dates.push(date);
                amounts.push(record.forecasted_insurance);
            }

            PaymentRow {
                customer_name: record.customer_name.clone(),
                loan_number: record.loan_number,
                county: record.county.clone(),
                tax_due,
                insurance_due,
                payment_types,
                due_dates,
                amounts,
            }
        })
        .collect();

    if unparseable > 0 {
        log::debug!("{unparseable} schedule rows carry an unparseable next pay date");
    }
    rows
}

/// Count actionable borrowers and preview the first `preview` names.
pub fn alert_summary(rows: &[PaymentRow], preview: usize) -> AlertSummary {
    let actionable: Vec<&PaymentRow> = rows.iter().filter(|r| r.is_actionable()).collect();

    if actionable.is_empty() {
        return AlertSummary {
            borrowers: 0,
            preview: Vec::new(),
            message: "No time-sensitive payments detected for alerting.".into(),
        };
    }

    let names: Vec<String> = actionable
        .iter()
        .take(preview)
        .map(|r| r.customer_name.clone())
        .collect();

    let mut message = format!("Alerts scheduled for {} borrowers.", actionable.len());
    if !names.is_empty() {
        message.push_str(&format!(" Preview: {}", names.join(", ")));
        if actionable.len() > names.len() {
            message.push('…');
        }
    }

    AlertSummary {
        borrowers: actionable.len(),
        preview: names,
        message,
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn window_end(as_of: NaiveDate, window_days: u32) -> NaiveDate {
    as_of
        .checked_add_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MAX)
}

fn in_window(date: Option<NaiveDate>, start: NaiveDate, end: NaiveDate) -> bool {
    matches!(date, Some(d) if d >= start && d <= end)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(loan: u64, tax: &str, ins: &str) -> EscrowRecord {
        EscrowRecord {
            customer_name: format!("Borrower {loan}"),
            loan_number: loan,
            next_tax_pay_date: tax.into(),
            next_insurance_pay_date: ins.into(),
            forecasted_tax: 5000.0,
            forecasted_insurance: 1200.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_window_inclusion() {
        let records = vec![
            record(1, "2024-01-15", ""),
            record(2, "2024-02-05", ""),
        ];
        let due = upcoming_payments(&records, ymd(2024, 1, 1), 30, 10);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].loan_number, 1);
    }

    #[test]
    fn test_window_endpoints_inclusive() {
        let records = vec![
            record(1, "2024-01-01", ""),
            record(2, "2024-01-31", ""),
            record(3, "2023-12-31", ""),
            record(4, "2024-02-01", ""),
        ];
        let loans: Vec<u64> = upcoming_payments(&records, ymd(2024, 1, 1), 30, 10)
            .iter()
            .map(|r| r.loan_number)
            .collect();
        assert_eq!(loans, vec![1, 2]);
    }

    #[test]
    fn test_insurance_date_alone_qualifies() {
        let records = vec![record(1, "garbage", "2024-01-20")];
        assert_eq!(upcoming_payments(&records, ymd(2024, 1, 1), 30, 10).len(), 1);
    }

    #[test]
    fn test_truncation_keeps_input_order() {
        let records = vec![
            record(1, "2024-01-25", ""),
            record(2, "2024-01-02", ""),
            record(3, "2024-01-03", ""),
        ];
        let loans: Vec<u64> = upcoming_payments(&records, ymd(2024, 1, 1), 30, 2)
            .iter()
            .map(|r| r.loan_number)
            .collect();
        assert_eq!(loans, vec![1, 2]);

        let soonest: Vec<u64> =
            upcoming_payments(sort_by_next_due(&records, ymd(2024, 1, 1)), ymd(2024, 1, 1), 30, 2)
                .iter()
                .map(|r| r.loan_number)
                .collect();
        assert_eq!(soonest, vec![2, 3]);
    }

    #[test]
    fn test_sort_by_next_due_puts_unparseable_last() {
        let records = vec![
            record(1, "n/a", "n/a"),
            record(2, "2024-05-01", "2024-03-01"),
            record(3, "2024-04-01", ""),
        ];
        let loans: Vec<u64> = sort_by_next_due(&records, ymd(2024, 1, 1))
            .iter()
            .map(|r| r.loan_number)
            .collect();
        assert_eq!(loans, vec![2, 3, 1]);
    }

    #[test]
    fn test_soonest_first_skips_past_dates() {
        let records = vec![
            record(1, "2023-06-01", "2024-01-25"),
            record(2, "2024-01-02", ""),
            record(3, "2023-12-15", "2023-11-01"),
        ];
        let as_of = ymd(2024, 1, 1);

        let order: Vec<u64> = sort_by_next_due(&records, as_of)
            .iter()
            .map(|r| r.loan_number)
            .collect();
        assert_eq!(order, vec![2, 1, 3]);

        let first: Vec<u64> = upcoming_payments(sort_by_next_due(&records, as_of), as_of, 30, 1)
            .iter()
            .map(|r| r.loan_number)
            .collect();
        assert_eq!(first, vec![2]);
    }

    #[test]
    fn test_schedule_rows() {
        let records = vec![
            record(1, "2024-01-10", "2024-01-12"),
            record(2, "2024-06-01", "2024-01-05"),
            record(3, "2024-06-01", "2024-06-01"),
        ];
        let rows = payment_schedule(&records, ymd(2024, 1, 1), 30);
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].payment_types, vec![PaymentType::Tax, PaymentType::Insurance]);
        assert_eq!(rows[0].amounts, vec![5000.0, 1200.0]);
        assert_eq!(rows[1].payment_types, vec![PaymentType::Insurance]);
        assert_eq!(rows[1].due_dates, vec![ymd(2024, 1, 5)]);
        assert!(!rows[2].is_actionable());
        assert!(rows[2].payment_types.is_empty());
    }

    #[test]
    fn test_alert_summary_preview() {
        let records = vec![
            record(1, "2024-01-10", ""),
            record(2, "2024-01-11", ""),
            record(3, "2024-01-12", ""),
            record(4, "2025-01-01", ""),
        ];
        let rows = payment_schedule(&records, ymd(2024, 1, 1), 30);
        let summary = alert_summary(&rows, 2);
        assert_eq!(summary.borrowers, 3);
        assert_eq!(summary.preview, vec!["Borrower 1", "Borrower 2"]);
        assert_eq!(
            summary.message,
            "Alerts scheduled for 3 borrowers. Preview: Borrower 1, Borrower 2…"
        );

        let none = alert_summary(&rows[3..], 2);
        assert_eq!(none.borrowers, 0);
    }

    #[test]
    fn test_huge_window_does_not_overflow() {
        let records = vec![record(1, "2300-01-01", "")];
        assert_eq!(upcoming_payments(&records, ymd(2024, 1, 1), u32::MAX, 10).len(), 1);
    }
}
