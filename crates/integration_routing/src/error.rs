//! Routing error types

use thiserror::Error;

/// Errors that can occur while calculating a route
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Backend reachable but answered with a non-success status
    #[error("Server error (HTTP {status}){}", message_suffix(.message))]
    Server {
        /// HTTP status code
        status: u16,
        /// Backend-supplied message, if any
        message: Option<String>,
    },

    /// Request exceeded the configured bound
    #[error("Request timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout that was exceeded, in milliseconds
        timeout_ms: u64,
    },

    /// Request never reached the backend
    #[error("Network error: {0}")]
    Network(String),

    /// Anything else (invalid response body, client setup failure)
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}
