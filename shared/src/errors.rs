//! Shared error types for the acquisition analysis system

use thiserror::Error;

/// Failure of a single provider call attempt.
///
/// Retryable failures may be re-attempted by the backoff controller;
/// the rest are terminal on first occurrence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderFailure {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Service unavailable")]
    ServiceUnavailable,

    #[error("Server error: HTTP {0}")]
    ServerError(u16),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ProviderFailure {
    /// Transport-level and rate-limit failures are worth retrying;
    /// bad credentials and malformed requests are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderFailure::Network(_)
            | ProviderFailure::Timeout
            | ProviderFailure::RateLimited
            | ProviderFailure::ServiceUnavailable => true,
            ProviderFailure::ServerError(status) => *status >= 500,
            ProviderFailure::AuthenticationFailed | ProviderFailure::InvalidRequest(_) => false,
        }
    }

    /// Map a non-2xx HTTP status to a typed failure
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ProviderFailure::InvalidRequest("bad request".to_string()),
            401 | 403 => ProviderFailure::AuthenticationFailed,
            429 => ProviderFailure::RateLimited,
            503 => ProviderFailure::ServiceUnavailable,
            other => ProviderFailure::ServerError(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(ProviderFailure::Network("dns".to_string()).is_retryable());
        assert!(ProviderFailure::Timeout.is_retryable());
        assert!(ProviderFailure::RateLimited.is_retryable());
        assert!(ProviderFailure::ServiceUnavailable.is_retryable());
        assert!(ProviderFailure::ServerError(500).is_retryable());

        assert!(!ProviderFailure::AuthenticationFailed.is_retryable());
        assert!(!ProviderFailure::InvalidRequest("bad".to_string()).is_retryable());
        assert!(!ProviderFailure::ServerError(404).is_retryable());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ProviderFailure::from_status(401),
            ProviderFailure::AuthenticationFailed
        );
        assert_eq!(ProviderFailure::from_status(429), ProviderFailure::RateLimited);
        assert_eq!(
            ProviderFailure::from_status(503),
            ProviderFailure::ServiceUnavailable
        );
        assert_eq!(ProviderFailure::from_status(502), ProviderFailure::ServerError(502));
        assert!(matches!(
            ProviderFailure::from_status(400),
            ProviderFailure::InvalidRequest(_)
        ));
    }
}
