use chrono::NaiveDate;
use std::io;

use crate::error::EscrowAnalyticsError;
use crate::metrics::schedule::PaymentRow;
use crate::types::{round_cents, Money};
use crate::EscrowAnalyticsResult;

pub const CSV_HEADERS: [&str; 6] = [
    "Customer",
    "Loan Number",
    "Payment Types",
    "Due Dates",
    "Amounts",
    "County",
];

const JOINER: &str = " / ";
const EMPTY_CELL: &str = "N/A";

/// Write the upcoming-payments export.
///
/// Fields containing a comma, quote or newline are quoted with embedded
/// quotes doubled; records end in `\n`.
pub fn write_upcoming_payments_csv<W: io::Write>(
    writer: W,
    rows: &[PaymentRow],
) -> EscrowAnalyticsResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    wtr.write_record(CSV_HEADERS)?;
    for row in rows {
        wtr.write_record([
            row.customer_name.clone(),
            row.loan_number.to_string(),
            join_or_na(row.payment_types.iter().map(|t| t.to_string())),
            join_or_na(row.due_dates.iter().map(format_date)),
            join_or_na(row.amounts.iter().map(|a| format_amount(*a))),
            row.county.clone(),
        ])?;
    }
    wtr.flush()
        .map_err(|e| EscrowAnalyticsError::Csv(e.to_string()))?;
    Ok(())
}

/// Render the export into a string.
pub fn upcoming_payments_csv(rows: &[PaymentRow]) -> EscrowAnalyticsResult<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_upcoming_payments_csv(&mut buf, rows)?;
    String::from_utf8(buf).map_err(|e| EscrowAnalyticsError::SerializationError(e.to_string()))
}

/// `upcoming-payments-YYYY-MM-DD.csv`
pub fn export_file_name(as_of: NaiveDate) -> String {
    format!("upcoming-payments-{}.csv", as_of.format("%Y-%m-%d"))
}

/// `$1234.50`; cents rounded half away from zero.
pub fn format_amount(amount: Money) -> String {
    match round_cents(amount) {
        Some(d) => format!("${d:.2}"),
        None => format!("${amount}"),
    }
}

fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn join_or_na<I>(items: I) -> String
where
    I: Iterator<Item = String>,
{
    let joined = items.collect::<Vec<_>>().join(JOINER);
    if joined.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        joined
    }
}
