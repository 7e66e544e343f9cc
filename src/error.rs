//! Error handling module for packconf
//!
//! The selection and pricing engine never fails: unknown ids and malformed
//! quantities fall back to neutral defaults. Catalog validation has its own
//! [`CatalogError`](crate::catalog::CatalogError) and file loading reports
//! through `anyhow`. What is left are the parsers for user-written input
//! (CLI assignments and replay scripts), which funnel into
//! [`ConfiguratorError`].

use thiserror::Error;

/// Main error type for packconf
#[derive(Error, Debug)]
pub enum ConfiguratorError {
    /// JSON deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Selection input errors (malformed `id=option` pairs)
    #[error("Selection error: {0}")]
    Selection(String),

    /// Replay script errors
    #[error("Replay error: {0}")]
    Replay(String),
}

/// Result type alias for packconf operations
pub type Result<T> = std::result::Result<T, ConfiguratorError>;

impl ConfiguratorError {
    /// Create a selection error
    pub fn selection(msg: impl Into<String>) -> Self {
        Self::Selection(msg.into())
    }

    /// Create a replay error
    pub fn replay(msg: impl Into<String>) -> Self {
        Self::Replay(msg.into())
    }
}
