//! Analyzer error types

use shared::ProviderFailure;
use thiserror::Error;
use uuid::Uuid;

/// Result type for analyzer operations
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// A provider call whose attempt budget is exhausted.
///
/// Expected during degraded operation; callers substitute a fallback
/// result rather than treating this as fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("terminal failure after {attempts} attempt(s): {last}")]
pub struct TerminalFailure {
    pub attempts: u32,
    pub last: ProviderFailure,
}

/// Analyzer error types
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Unparseable provider response: {message}")]
    UnparseableResponse { message: String },

    /// Raised by external `RecordStore` implementations; the in-memory
    /// store is infallible.
    #[error("Record store error: {message}")]
    StoreError { message: String },

    #[error("Record not found: {id}")]
    RecordNotFound { id: Uuid },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl AnalyzerError {
    pub fn unparseable(message: impl Into<String>) -> Self {
        AnalyzerError::UnparseableResponse {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AnalyzerError::ConfigError {
            message: message.into(),
        }
    }
}
