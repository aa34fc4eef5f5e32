//! Autocomplete widget loader port
//!
//! Loading the provider (script download, credential check) is expensive and
//! must happen at most once per process. See [`crate::InitOnce`].

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Loads the autocomplete provider using its configured credential
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WidgetLoaderPort: Send + Sync {
    /// Load the provider.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider is unreachable or rejects the
    /// credential.
    async fn load(&self) -> Result<(), ApplicationError>;
}
