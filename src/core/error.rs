//! Error types for queue operations.

use thiserror::Error;

/// Errors produced by the scheduling queue and its registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// A submission timestamp could not be parsed into an instant.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
    /// The provider dependency graph is cyclic or names a provider twice.
    #[error("invalid provider graph: {0}")]
    InvalidProviderGraph(String),
    /// Configuration failed to parse or validate.
    #[error("config error: {0}")]
    Config(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
