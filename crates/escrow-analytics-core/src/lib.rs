pub mod error;
pub mod types;

#[cfg(feature = "dataset")]
pub mod dataset;

#[cfg(feature = "metrics")]
pub mod metrics;

#[cfg(feature = "metrics")]
pub mod dashboard;

#[cfg(feature = "scenario")]
pub mod scenario;

#[cfg(feature = "export")]
pub mod export;

#[cfg(feature = "synthetic")]
pub mod synthetic;

pub use error::EscrowAnalyticsError;
pub use types::*;

/// Standard result type for all escrow-analytics operations
pub type EscrowAnalyticsResult<T> = Result<T, EscrowAnalyticsError>;
