//! Error types for Taxwise
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Taxwise operations
///
/// Covers configuration loading, provider interactions, settings storage,
/// input validation, and chat session state.
#[derive(Error, Debug)]
pub enum TaxwiseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (API calls, malformed responses, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Missing credentials for provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// User input rejected before any work was done
    #[error("Validation error: {0}")]
    Validation(String),

    /// A chat submission arrived while another one was still outstanding
    #[error("A request is already in flight; wait for the current reply")]
    RequestInFlight,

    /// Settings storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for Taxwise operations
///
/// Uses `anyhow::Error` so callers can attach context while still being
/// able to downcast to [`TaxwiseError`].
pub type Result<T> = anyhow::Result<T>;
