//! # Report Error Type
//!
//! Everything that can stop a report run.
//!
//! ```text
//! ConfigError ──────┐
//! DataError ────────┤
//! ValidationError ──┼──► ReportError ──► exit code 1, logged on stderr
//! serde_json ───────┤
//! io::Error ────────┘
//! ```

use ledgerdesk_core::ValidationError;
use ledgerdesk_data::DataError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// A report filter was rejected (e.g. an over-long search string).
    #[error("Invalid filter: {0}")]
    Filter(#[from] ValidationError),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
