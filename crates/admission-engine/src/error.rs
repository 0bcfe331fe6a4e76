//! Error types for the admission engine.

use std::fmt;
use thiserror::Error;

/// Result type for admission operations.
pub type Result<T> = std::result::Result<T, AdmissionError>;

/// The reference datasets consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Entries,
    Watchlist,
    Countries,
    Config,
}

impl Dataset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Entries => "entries",
            Dataset::Watchlist => "watchlist",
            Dataset::Countries => "countries",
            Dataset::Config => "config",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while loading data or screening travellers.
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// A dataset file is missing or cannot be read. Batch-fatal.
    #[error("{dataset} dataset not found: '{path}'")]
    DatasetNotFound { dataset: Dataset, path: String },

    /// A dataset file was read but its content could not be parsed. Batch-fatal.
    #[error("Failed to parse {dataset} dataset: {message}")]
    DatasetParse { dataset: Dataset, message: String },

    /// Configuration validation failed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Required field is missing from a traveller record.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Invalid field value.
    #[error("Invalid field value for '{field}': {message}")]
    InvalidFieldValue { field: String, message: String },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl AdmissionError {
    /// Returns true for errors that must abort a whole batch.
    pub fn is_batch_fatal(&self) -> bool {
        matches!(
            self,
            AdmissionError::DatasetNotFound { .. } | AdmissionError::DatasetParse { .. }
        )
    }

    pub(crate) fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        AdmissionError::InvalidFieldValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for AdmissionError {
    fn from(err: serde_json::Error) -> Self {
        AdmissionError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for AdmissionError {
    fn from(err: serde_yaml::Error) -> Self {
        AdmissionError::SerializationError(err.to_string())
    }
}
