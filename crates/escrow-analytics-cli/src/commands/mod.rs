pub mod generate;
pub mod payments;
pub mod portfolio;
pub mod scenario;

use chrono::{Local, NaiveDate};

use escrow_analytics_core::dataset::parse_as_of;

/// `--as-of` when given, otherwise today's local date.
pub fn reference_date(as_of: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match as_of {
        Some(text) => Ok(parse_as_of(text)?),
        None => Ok(Local::now().date_naive()),
    }
}
