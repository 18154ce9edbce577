use thiserror::Error;

#[derive(Debug, Error)]
pub enum EscrowAnalyticsError {
    #[error("Unable to load escrow data from {path}: {reason}")]
    DataLoad { path: String, reason: String },

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for EscrowAnalyticsError {
    fn from(e: serde_json::Error) -> Self {
        EscrowAnalyticsError::SerializationError(e.to_string())
    }
}

impl From<csv::Error> for EscrowAnalyticsError {
    fn from(e: csv::Error) -> Self {
        EscrowAnalyticsError::Csv(e.to_string())
    }
}
