#![cfg(feature = "synthetic")]

use chrono::NaiveDate;
use escrow_analytics_core::dashboard::{build_dashboard, DashboardOptions};
use escrow_analytics_core::dataset::{parse_records, EscrowRecord};
use escrow_analytics_core::metrics::{compute_metrics, county_distribution, segment_by_risk};
use escrow_analytics_core::scenario::{reconcile_baseline, run_scenario, ScenarioAssumptions};
use escrow_analytics_core::synthetic::generate;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

#[test]
fn test_generated_book_survives_json_round_trip() {
    let records = generate(200, 7, as_of()).unwrap();
    let json = serde_json::to_string(&records).unwrap();
    let reloaded: Vec<EscrowRecord> = parse_records(&json).unwrap();
    assert_eq!(reloaded.len(), records.len());
    for (a, b) in reloaded.iter().zip(&records) {
        assert_eq!(a.loan_number, b.loan_number);
        assert_eq!(a.customer_name, b.customer_name);
        assert_eq!(a.next_tax_pay_date, b.next_tax_pay_date);
        assert!((a.forecasted_escrow_shortage - b.forecasted_escrow_shortage).abs() < 1e-6);
    }
}

#[test]
fn test_generated_book_pipeline_is_consistent() {
    let records = generate(500, 42, as_of()).unwrap();
    let metrics = compute_metrics(&records);
    let segmentation = segment_by_risk(&records);

    assert_eq!(segmentation.len(), metrics.total_customers);
    assert_eq!(
        county_distribution(&records).values().sum::<usize>(),
        metrics.total_customers
    );
    assert!(reconcile_baseline(&records, 0.02).is_consistent());

    let identity = run_scenario(&records, &ScenarioAssumptions::identity(), 6);
    assert!(identity.result.shortage_delta.abs() < 0.02 * records.len() as f64);
}

#[test]
fn test_dashboard_over_generated_book() {
    let records = generate(300, 3, as_of()).unwrap();
    let options = DashboardOptions {
        as_of: Some(as_of()),
        ..DashboardOptions::default()
    };
    let out = build_dashboard(&records, &options);
    let snapshot = out.result;

    assert_eq!(snapshot.as_of, as_of());
    assert_eq!(snapshot.metrics.total_customers, 300);
    assert!(snapshot.upcoming_payments.len() <= 10);
    assert!(snapshot.top_shortages.len() <= 5);
    assert_eq!(
        snapshot.interaction_total,
        snapshot.interaction_types.iter().map(|(_, n)| n).sum::<usize>()
    );
}
