use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::EscrowAnalyticsError;
use crate::EscrowAnalyticsResult;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"];

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a free-text schedule date.
///
/// Accepts ISO dates, RFC 3339 / ISO date-times (the calendar date is kept,
/// the time of day dropped), US `MM/DD/YYYY`, and `Month D, YYYY`. Anything
/// else yields `None`; callers treat that as "not scheduled".
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|dt| dt.date())
}

/// Strict `YYYY-MM-DD` parsing for caller-supplied reference dates.
pub fn parse_as_of(text: &str) -> EscrowAnalyticsResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|e| {
        EscrowAnalyticsError::DateError(format!(
            "'{text}' is not a valid YYYY-MM-DD date: {e}"
        ))
    })
}
