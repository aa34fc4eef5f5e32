//! Place autocomplete port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Suggestion source for free-text place input
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AutocompletePort: Send + Sync {
    /// Formatted-address suggestions for a partial query
    async fn suggest(&self, query: &str) -> Result<Vec<String>, ApplicationError>;
}
