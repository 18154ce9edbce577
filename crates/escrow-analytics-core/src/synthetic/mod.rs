//! Deterministic synthetic escrow book for demos and tests.
//!
//! Same seed, count and reference date always produce the same records.

pub mod catalog;

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use crate::dataset::EscrowRecord;
use crate::error::EscrowAnalyticsError;
use crate::EscrowAnalyticsResult;
use crate::types::{round_cents_f64, Money, CUSHION_MONTHS};
use catalog::{
    CountyProfile, AREA_CODES, COUNTIES, FIRST_NAMES, INTERACTION_SUMMARIES, INTERACTION_TYPES,
    LAST_NAMES, STREET_NAMES, STREET_SUFFIXES,
};

pub const DEFAULT_RECORD_COUNT: usize = 1000;
pub const DEFAULT_SEED: u64 = 42;

const LOAN_NUMBER_MIN: u64 = 10_000_000;
const LOAN_NUMBER_MAX: u64 = 99_999_999;

/// One record per distinct eight-digit loan number.
pub const MAX_RECORD_COUNT: usize = (LOAN_NUMBER_MAX - LOAN_NUMBER_MIN + 1) as usize;

/// Generate `count` borrower records relative to `as_of`.
///
/// Last disbursements fall 60 to 365 days before `as_of` and the next one
/// exactly a year later, so a slice of the book is always due within a
/// 30-day window. Stored shortage/surplus follow the 2-month cushion formula,
/// rounded to cents.
///
/// Fails with `InvalidInput` when `count` exceeds [`MAX_RECORD_COUNT`].
pub fn generate(
    count: usize,
    seed: u64,
    as_of: NaiveDate,
) -> EscrowAnalyticsResult<Vec<EscrowRecord>> {
    if count > MAX_RECORD_COUNT {
        return Err(EscrowAnalyticsError::InvalidInput {
            field: "count".into(),
            reason: format!("at most {MAX_RECORD_COUNT} unique loan numbers are available"),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut used_loans: HashSet<u64> = HashSet::with_capacity(count);

    let records: Vec<EscrowRecord> = (0..count)
        .map(|_| {
            let loan_number = loop {
                let candidate = rng.gen_range(LOAN_NUMBER_MIN..=LOAN_NUMBER_MAX);
                if used_loans.insert(candidate) {
                    break candidate;
                }
            };
            generate_one(&mut rng, loan_number, as_of)
        })
        .collect();

    log::debug!("generated {} synthetic records (seed {seed})", records.len());
    Ok(records)
}

fn generate_one(rng: &mut StdRng, loan_number: u64, as_of: NaiveDate) -> EscrowRecord {
    let county = &COUNTIES[rng.gen_range(0..COUNTIES.len())];

    let total_loan = round_cents_f64(rng.gen_range(150_000.0..900_000.0));
    let current_balance = round_cents_f64(total_loan * rng.gen_range(0.45..0.95));
    let escrow_balance = round_cents_f64(rng.gen_range(1_000.0..8_000.0));

    let prev_tax = round_cents_f64(rng.gen_range(3_000.0..7_500.0));
    let prev_ins = round_cents_f64(rng.gen_range(800.0..2_500.0));
    let forecast_tax = round_cents_f64(prev_tax * rng.gen_range(1.03..1.12));
    let forecast_ins = round_cents_f64(prev_ins * rng.gen_range(1.01..1.10));

    let last_tax_paid = days_before(as_of, rng.gen_range(60..=365));
    let last_ins_paid = days_before(as_of, rng.gen_range(60..=365));
    let last_interaction = days_before(as_of, rng.gen_range(0..=90));

    let (surplus, shortage) = cushion_forecast(escrow_balance, forecast_tax, forecast_ins);

    EscrowRecord {
        customer_name: full_name(rng),
        contact: phone_number(rng),
        loan_number,
        total_loan_amount: total_loan,
        current_balance,
        current_escrow_balance: escrow_balance,
        prev_tax,
        prev_insurance: prev_ins,
        forecasted_tax: forecast_tax,
        forecasted_insurance: forecast_ins,
        last_tax_paid_date: iso(last_tax_paid),
        last_insurance_paid_date: iso(last_ins_paid),
        next_tax_pay_date: iso(days_after(last_tax_paid, 365)),
        next_insurance_pay_date: iso(days_after(last_ins_paid, 365)),
        forecasted_escrow_surplus: surplus,
        forecasted_escrow_shortage: shortage,
        last_interaction_date: iso(last_interaction),
        last_interaction_type: pick(rng, &INTERACTION_TYPES).to_string(),
        last_interaction_summary: pick(rng, &INTERACTION_SUMMARIES).to_string(),
        county: county.name.to_string(),
        property_address: address(rng, county),
    }
}

/// `(surplus, shortage)` from the cushion formula, each rounded to cents.
fn cushion_forecast(balance: Money, tax: Money, insurance: Money) -> (Money, Money) {
    let annual_outflow = tax + insurance;
    let cushion = CUSHION_MONTHS * (annual_outflow / 12.0);
    let required = round_cents_f64(annual_outflow + cushion);
    let gap = round_cents_f64(balance - required);
    if gap > 0.0 {
        (gap, 0.0)
    } else {
        (0.0, gap.abs())
    }
}

fn full_name(rng: &mut StdRng) -> String {
    format!("{} {}", pick(rng, &FIRST_NAMES), pick(rng, &LAST_NAMES))
}

fn phone_number(rng: &mut StdRng) -> String {
    format!(
        "({}) {:03}-{:04}",
        pick(rng, &AREA_CODES),
        rng.gen_range(200..1000),
        rng.gen_range(0..10_000)
    )
}

fn address(rng: &mut StdRng, county: &CountyProfile) -> String {
    format!(
        "{} {} {}, {}, TX {:05}",
        rng.gen_range(100..10_000),
        pick(rng, &STREET_NAMES),
        pick(rng, &STREET_SUFFIXES),
        pick(rng, county.cities),
        pick(rng, county.zips)
    )
}

fn pick<T: Copy>(rng: &mut StdRng, items: &[T]) -> T {
    // catalog lists are never empty
    items[rng.gen_range(0..items.len())]
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

fn days_after(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_date;
    use crate::scenario::reconcile_baseline;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = generate(25, 7, as_of()).unwrap();
        let b = generate(25, 7, as_of()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, generate(25, 8, as_of()).unwrap());
    }

    #[test]
    fn test_count_beyond_loan_number_space_is_rejected() {
        let err = generate(MAX_RECORD_COUNT + 1, 1, as_of()).unwrap_err();
        assert!(matches!(err, EscrowAnalyticsError::InvalidInput { ref field, .. } if field == "count"));
        assert!(generate(0, 1, as_of()).unwrap().is_empty());
    }

    #[test]
    fn test_loan_numbers_unique_and_in_range() {
        let records = generate(500, DEFAULT_SEED, as_of()).unwrap();
        let loans: HashSet<u64> = records.iter().map(|r| r.loan_number).collect();
        assert_eq!(loans.len(), 500);
        assert!(records
            .iter()
            .all(|r| (LOAN_NUMBER_MIN..=LOAN_NUMBER_MAX).contains(&r.loan_number)));
    }

    #[test]
    fn test_shortage_and_surplus_exclusive() {
        for r in generate(200, 3, as_of()).unwrap() {
            assert!(r.shortage() >= 0.0 && r.surplus() >= 0.0);
            assert!(r.shortage() == 0.0 || r.surplus() == 0.0);
        }
    }

    #[test]
    fn test_dates_parse_and_next_is_a_year_later() {
        for r in generate(50, 11, as_of()).unwrap() {
            let last = parse_date(&r.last_tax_paid_date).unwrap();
            let next = r.next_tax_date().unwrap();
            assert_eq!((next - last).num_days(), 365);
            assert!(last < as_of());
        }
    }

    #[test]
    fn test_stored_forecast_matches_formula_within_rounding() {
        let records = generate(300, DEFAULT_SEED, as_of()).unwrap();
        let report = reconcile_baseline(&records, 0.02);
        assert!(report.is_consistent(), "max diff {}", report.max_abs_difference);
    }

    #[test]
    fn test_counties_and_addresses_consistent() {
        for r in generate(100, 5, as_of()).unwrap() {
            let profile = COUNTIES.iter().find(|c| c.name == r.county).unwrap();
            assert!(profile.cities.iter().any(|city| r.property_address.contains(city)));
            assert!(r.property_address.contains(", TX "));
        }
    }
}
