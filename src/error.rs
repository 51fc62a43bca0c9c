//! Custom error types for Bunker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Bunker operations
#[derive(Error, Debug)]
pub enum BunkerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for operation inputs
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Tabular store errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BunkerError {
    /// Create a "not found" error for a (card, category) balance row
    pub fn balance_not_found(card: &str, category: &str) -> Self {
        Self::NotFound {
            entity_type: "Balance",
            identifier: format!("{} / {}", card, category),
        }
    }

    /// A required table is missing from the store
    ///
    /// This is a store failure, not a lookup miss.
    pub fn table_not_found(identifier: impl Into<String>) -> Self {
        Self::Storage(format!("Table not found: {}", identifier.into()))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for BunkerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BunkerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for BunkerError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for Bunker operations
pub type BunkerResult<T> = Result<T, BunkerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BunkerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_balance_not_found() {
        let err = BunkerError::balance_not_found("Visa", "Comida");
        assert_eq!(err.to_string(), "Balance not found: Visa / Comida");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BunkerError = io_err.into();
        assert!(matches!(err, BunkerError::Io(_)));
    }
}
