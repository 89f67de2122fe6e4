//! Offline provider
//!
//! Used when no remote endpoint is configured or reachable by design. Every
//! completion fails, so the resolver always answers from the local rule table.

use crate::error::{Result, TaxwiseError};
use crate::providers::{ChatMessage, CompletionResponse, Provider};
use async_trait::async_trait;

/// Provider that never reaches a remote service
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineProvider;

impl OfflineProvider {
    /// Create a new offline provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Provider for OfflineProvider {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<CompletionResponse> {
        Err(TaxwiseError::Provider("Offline mode: no completion endpoint configured".to_string())
            .into())
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_provider_always_fails() {
        let provider = OfflineProvider::new();
        let result = provider.complete(&[ChatMessage::user("hello")]).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Offline mode"));
    }

    #[test]
    fn test_offline_provider_name() {
        assert_eq!(OfflineProvider.name(), "offline");
        assert!(OfflineProvider.model().is_none());
    }
}
