//! Errors surfaced by window resolution, aggregation, and the
//! collaborators feeding them.
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AllocationError {
    /// The anchor date is not a strict `YYYY-MM-DD` calendar date.
    #[error("Invalid date format: {0}. Expected YYYY-MM-DD")]
    InvalidDateFormat(String),

    /// An event is missing a start or end, or has one that can't be parsed.
    #[error("Malformed event '{summary}': {reason}")]
    MalformedEvent { summary: String, reason: String },

    /// The calendar or spreadsheet collaborator failed.
    #[error("Upstream fetch failed: {0}")]
    UpstreamFetchFailure(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl AllocationError {
    pub fn malformed(summary: &str, reason: impl Into<String>) -> Self {
        Self::MalformedEvent {
            summary: summary.to_string(),
            reason: reason.into(),
        }
    }

    pub fn upstream(err: anyhow::Error) -> Self {
        // Alternate formatting keeps the full context chain
        Self::UpstreamFetchFailure(format!("{:#}", err))
    }
}
