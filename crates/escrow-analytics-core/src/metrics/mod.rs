pub mod distribution;
pub mod kpi;
pub mod ranking;
pub mod schedule;
pub mod segmentation;

pub use distribution::{county_distribution, interaction_types, ranked, Distribution};
pub use kpi::{compute_metrics, DashboardMetrics};
pub use ranking::{shortage_queue, top_shortages, ShortageQueuePage};
pub use schedule::{
    alert_summary, payment_schedule, sort_by_next_due, upcoming_payments, AlertSummary,
    PaymentRow, PaymentType,
};
pub use segmentation::{
    classify, healthy_coverage_pct, segment_by_risk, unclassified_anomalies, RiskSegmentation,
    RiskTier, TierSummary,
};
