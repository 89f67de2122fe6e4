//! Provider module for Taxwise
//!
//! This module contains the completion provider abstraction and the Groq and
//! offline implementations.

pub mod base;
pub mod groq;
pub mod offline;

pub use base::{ChatMessage, CompletionResponse, Provider, TokenUsage};
pub use groq::GroqProvider;
pub use offline::OfflineProvider;

use crate::config::ProviderConfig;
use crate::error::{Result, TaxwiseError};

/// Create a provider instance based on configuration
///
/// A `groq` provider without credentials degrades to [`OfflineProvider`] with
/// a warning, so the assistant keeps answering from its local rule table.
///
/// # Arguments
///
/// * `provider_type` - Type of provider ("groq" or "offline")
/// * `config` - Provider configuration
///
/// # Errors
///
/// Returns error if the provider type is unknown or the HTTP client cannot
/// be initialized
pub fn create_provider(provider_type: &str, config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    match provider_type {
        "groq" => match GroqProvider::new(config.groq.clone()) {
            Ok(provider) => Ok(Box::new(provider)),
            Err(e) => match e.downcast_ref::<TaxwiseError>() {
                Some(TaxwiseError::MissingCredentials(_)) => {
                    tracing::warn!(
                        "No Groq API key configured (set GROQ_API_KEY); answering offline"
                    );
                    Ok(Box::new(OfflineProvider::new()))
                }
                _ => Err(e),
            },
        },
        "offline" => Ok(Box::new(OfflineProvider::new())),
        _ => Err(TaxwiseError::Provider(format!("Unknown provider type: {}", provider_type)).into()),
    }
}
