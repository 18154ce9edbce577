pub mod assumptions;
pub mod projection;
pub mod reconcile;
pub mod report;

pub use assumptions::{RiskFilter, ScenarioAssumptions};
pub use projection::{
    project_record, project_scenario, CountyDelta, CountyImpact, RecordProjection, ScenarioResult,
};
pub use reconcile::{reconcile_baseline, BaselineMismatch, BaselineReconciliation};
pub use report::{run_scenario, ScenarioInput, ScenarioReport};
