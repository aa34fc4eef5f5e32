//! Places error types

use thiserror::Error;

/// Errors that can occur while talking to places or geolocation providers
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Connection to the provider failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Provider answered with a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Provider rejected the configured credential
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// Failed to parse the provider response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Provider could not determine a position
    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl PlacesError {
    /// Map a reqwest transport failure
    pub(crate) fn from_transport(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else {
            Self::ConnectionFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlacesError::InvalidCredential("HTTP 401".into());
        assert_eq!(err.to_string(), "Invalid credential: HTTP 401");
        let err = PlacesError::Timeout { timeout_secs: 5 };
        assert!(err.to_string().contains('5'));
    }
}
