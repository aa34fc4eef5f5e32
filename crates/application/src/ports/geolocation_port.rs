//! Device position port

use async_trait::async_trait;
use domain::Coordinate;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// One-shot source of the current position
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeolocationPort: Send + Sync {
    /// Ask for the current position.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Unavailable`] when the capability is
    /// missing or permission is denied, or `ExternalService` on lookup
    /// failure. Callers fall back to a default position.
    async fn current_position(&self) -> Result<Coordinate, ApplicationError>;
}
