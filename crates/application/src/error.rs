//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Capability missing or refused (e.g. geolocation denied)
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Route calculation failure, one variant per user-visible kind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// User-correctable input problem; no network call was made
    #[error("ValidationError: {0}")]
    Validation(DomainError),

    /// Backend reachable but reported a failure
    #[error("ServerError (HTTP {status})")]
    Server {
        /// HTTP status code
        status: u16,
        /// Backend-supplied message, if any
        message: Option<String>,
    },

    /// Request exceeded the time bound
    #[error("TimeoutError after {timeout_ms} ms")]
    Timeout {
        /// Bound that was exceeded, in milliseconds
        timeout_ms: u64,
    },

    /// Request never reached the backend
    #[error("NetworkError: {0}")]
    Network(String),

    /// Any other failure
    #[error("UnexpectedError: {0}")]
    Unexpected(String),
}

impl RouteError {
    /// Whether this is an input validation failure
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Message to show the user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(DomainError::InputTooLong { max, .. }) => {
                format!("Origin and destination must be at most {max} characters.")
            },
            Self::Validation(_) => "Please enter both an origin and a destination.".to_string(),
            Self::Server {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Server {
                status,
                message: None,
            } => format!("The routing service returned an error (HTTP {status})."),
            Self::Timeout { .. } => {
                "The routing service took too long to respond. Please try again.".to_string()
            },
            Self::Network(_) => {
                "Could not reach the routing service. Check your connection or configuration."
                    .to_string()
            },
            Self::Unexpected(_) => "Something went wrong while calculating the route.".to_string(),
        }
    }
}
