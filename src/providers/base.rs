//! Base provider trait and common types for Taxwise
//!
//! This module defines the Provider trait that completion backends implement,
//! along with the wire-neutral message and response types exchanged with them.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Message structure sent to a completion provider
///
/// A plain role/content pair. The chat layer keeps richer metadata (ids,
/// timestamps, error flags) and converts to this type when building a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use taxwise::providers::ChatMessage;
    ///
    /// let msg = ChatMessage::user("What is a tax credit?");
    /// assert_eq!(msg.role, "user");
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new system message
    ///
    /// # Examples
    ///
    /// ```
    /// use taxwise::providers::ChatMessage;
    ///
    /// let msg = ChatMessage::system("You are a helpful assistant");
    /// assert_eq!(msg.role, "system");
    /// ```
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }
}

/// Token usage reported by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt
    pub prompt_tokens: usize,
    /// Tokens generated in the completion
    pub completion_tokens: usize,
    /// Sum of prompt and completion tokens
    pub total_tokens: usize,
}

impl TokenUsage {
    /// Create a new TokenUsage; `total_tokens` is derived
    ///
    /// # Examples
    ///
    /// ```
    /// use taxwise::providers::TokenUsage;
    ///
    /// let usage = TokenUsage::new(100, 50);
    /// assert_eq!(usage.total_tokens, 150);
    /// ```
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Completion response with the reply text and optional token usage
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// The assistant's reply text
    pub content: String,
    /// Optional token usage information
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    /// Create a new CompletionResponse
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }

    /// Create a new CompletionResponse with token usage
    pub fn with_usage(content: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            content: content.into(),
            usage: Some(usage),
        }
    }
}

/// Provider trait for completion backends
///
/// # Examples
///
/// ```no_run
/// use taxwise::providers::{ChatMessage, CompletionResponse, Provider};
/// use taxwise::error::Result;
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     async fn complete(&self, messages: &[ChatMessage]) -> Result<CompletionResponse> {
///         let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
///         Ok(CompletionResponse::new(last))
///     }
///
///     fn name(&self) -> &'static str {
///         "echo"
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Completes a conversation given the full ordered prompt
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the endpoint answers with a
    /// non-success status, or the response body is not the expected shape
    async fn complete(&self, messages: &[ChatMessage]) -> Result<CompletionResponse>;

    /// Short provider name used in logs and the status display
    fn name(&self) -> &'static str;

    /// Model identifier sent with requests, if the provider has one
    fn model(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        assert_eq!(ChatMessage::user("a").role, "user");
        assert_eq!(ChatMessage::assistant("b").role, "assistant");
        assert_eq!(ChatMessage::system("c").role, "system");
        assert_eq!(ChatMessage::user("hello").content, "hello");
    }

    #[test]
    fn test_message_serializes_as_role_content_pair() {
        let json = serde_json::to_value(ChatMessage::user("Hi")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "Hi"}));
    }

    #[test]
    fn test_token_usage_total() {
        let usage = TokenUsage::new(12, 30);
        assert_eq!(usage.total_tokens, 42);
    }

    #[test]
    fn test_completion_response_constructors() {
        let plain = CompletionResponse::new("ok");
        assert_eq!(plain.content, "ok");
        assert!(plain.usage.is_none());

        let with_usage = CompletionResponse::with_usage("ok", TokenUsage::new(1, 2));
        assert_eq!(with_usage.usage.unwrap().completion_tokens, 2);
    }

    #[test]
    fn test_default_model_is_none() {
        struct MockProvider;

        #[async_trait]
        impl Provider for MockProvider {
            async fn complete(&self, _messages: &[ChatMessage]) -> Result<CompletionResponse> {
                Ok(CompletionResponse::new("test"))
            }

            fn name(&self) -> &'static str {
                "mock"
            }
        }

        let provider = MockProvider;
        assert!(provider.model().is_none());

        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let response = provider.complete(&[]).await.unwrap();
            assert_eq!(response.content, "test");
        });
    }
}
