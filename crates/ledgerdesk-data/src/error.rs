//! # Data Error Types
//!
//! Error types for decoding and loading records.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error / bad field value                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DataError (this module) ← Adds field, file and record context         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ReportError (in the report app)                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculation core never sees any of these: records that fail here
//! never reach it.

use std::path::PathBuf;

use ledgerdesk_core::ValidationError;
use thiserror::Error;

/// Data boundary errors.
#[derive(Debug, Error)]
pub enum DataError {
    /// A collection file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A collection file is not valid JSON for its record type.
    #[error("Failed to decode {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON decoding failed outside any file (e.g. an in-memory payload).
    #[error("Failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// A monetary or numeric field holds something that is not a number.
    ///
    /// ## When This Occurs
    /// - `"preco": "doze mil"`
    /// - `"quantidade": "1,5x"`
    #[error("Invalid number in {field}: '{value}'")]
    InvalidAmount { field: String, value: String },

    /// A status or kind label is not one we recognize.
    #[error("Unknown {field} label: '{value}'")]
    UnknownLabel { field: String, value: String },

    /// A date is not an ISO `YYYY-MM-DD` date.
    #[error("Invalid date in {field}: '{value}'")]
    InvalidDate { field: String, value: String },

    /// A required field is absent or null.
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The company id cannot be used to locate data.
    #[error("Invalid company id: '{0}'")]
    InvalidCompany(String),

    /// A decoded record broke a business rule (strict mode only).
    #[error("Invalid {entity} {id}: {source}")]
    Invalid {
        entity: &'static str,
        id: String,
        #[source]
        source: ValidationError,
    },
}

/// Convenience type alias for Results with DataError.
pub type DataResult<T> = Result<T, DataError>;

impl DataError {
    pub(crate) fn invalid_amount(field: &str, value: impl Into<String>) -> Self {
        DataError::InvalidAmount {
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub(crate) fn unknown_label(field: &str, value: &str) -> Self {
        DataError::UnknownLabel {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn missing(field: &str) -> Self {
        DataError::MissingField {
            field: field.to_string(),
        }
    }
}
