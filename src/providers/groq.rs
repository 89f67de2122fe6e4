//! Groq provider implementation for Taxwise
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint (Groq by
//! default) with a bearer credential. Only non-streaming text completions are
//! used.

use crate::config::GroqConfig;
use crate::error::{Result, TaxwiseError};
use crate::providers::{ChatMessage, CompletionResponse, Provider, TokenUsage};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Groq chat-completions provider
///
/// # Examples
///
/// ```no_run
/// use taxwise::config::GroqConfig;
/// use taxwise::providers::{ChatMessage, GroqProvider, Provider};
///
/// # async fn example() -> taxwise::error::Result<()> {
/// let config = GroqConfig {
///     api_key: Some("gsk_example".to_string()),
///     ..Default::default()
/// };
/// let provider = GroqProvider::new(config)?;
/// let reply = provider.complete(&[ChatMessage::user("Hello!")]).await?;
/// println!("{}", reply.content);
/// # Ok(())
/// # }
/// ```
pub struct GroqProvider {
    client: Client,
    config: GroqConfig,
    api_key: String,
}

/// Request body for the chat-completions endpoint
#[derive(Debug, Serialize)]
struct GroqRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

/// Response body from the chat-completions endpoint
#[derive(Debug, Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
    #[serde(default)]
    usage: Option<GroqUsage>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct GroqUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

impl GroqProvider {
    /// Create a new Groq provider instance
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` if no API key is configured, or a
    /// provider error if the HTTP client cannot be built
    ///
    /// # Examples
    ///
    /// ```
    /// use taxwise::config::GroqConfig;
    /// use taxwise::providers::GroqProvider;
    ///
    /// assert!(GroqProvider::new(GroqConfig::default()).is_err());
    ///
    /// let config = GroqConfig {
    ///     api_key: Some("gsk_example".to_string()),
    ///     ..Default::default()
    /// };
    /// assert!(GroqProvider::new(config).is_ok());
    /// ```
    pub fn new(config: GroqConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| TaxwiseError::MissingCredentials("groq".to_string()))?;

        let mut builder = Client::builder().user_agent("taxwise/0.1.0");
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| TaxwiseError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Groq provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Full URL of the chat-completions endpoint
    pub fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

/// Pull the first choice's text out of a decoded response
///
/// Empty or whitespace-only content counts as a malformed response.
fn extract_content(response: GroqResponse) -> Result<CompletionResponse> {
    let usage = response
        .usage
        .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens));

    let content = response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| TaxwiseError::Provider("Groq response contained no choices".to_string()))?;

    if content.trim().is_empty() {
        return Err(
            TaxwiseError::Provider("Groq response contained empty content".to_string()).into(),
        );
    }

    Ok(match usage {
        Some(usage) => CompletionResponse::with_usage(content, usage),
        None => CompletionResponse::new(content),
    })
}

#[async_trait]
impl Provider for GroqProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<CompletionResponse> {
        let request = GroqRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(
            "Sending Groq request: {} messages, model={}",
            messages.len(),
            self.config.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Groq request failed: {}", e);
                TaxwiseError::Provider(format!("Groq request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Groq returned error {}: {}", status, error_text);
            return Err(TaxwiseError::Provider(format!(
                "Groq returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let groq_response: GroqResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Groq response: {}", e);
            TaxwiseError::Provider(format!("Failed to parse Groq response: {}", e))
        })?;

        let completion = extract_content(groq_response)?;
        if let Some(usage) = completion.usage {
            tracing::debug!(
                "Groq response: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        Ok(completion)
    }

    fn name(&self) -> &'static str {
        "groq"
    }

    fn model(&self) -> Option<String> {
        Some(self.config.model.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed_config() -> GroqConfig {
        GroqConfig {
            api_key: Some("gsk_test".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_groq_provider_requires_api_key() {
        let err = GroqProvider::new(GroqConfig::default()).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<TaxwiseError>(),
            Some(TaxwiseError::MissingCredentials(_))
        ));
    }

    #[test]
    fn test_groq_provider_rejects_blank_api_key() {
        let config = GroqConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(GroqProvider::new(config).is_err());
    }

    #[test]
    fn test_groq_provider_endpoint() {
        let provider = GroqProvider::new(keyed_config()).unwrap();
        assert_eq!(
            provider.endpoint(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_groq_provider_endpoint_trims_trailing_slash() {
        let config = GroqConfig {
            api_base: "http://localhost:8080/v1/".to_string(),
            ..keyed_config()
        };
        let provider = GroqProvider::new(config).unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_groq_provider_model_and_name() {
        let provider = GroqProvider::new(keyed_config()).unwrap();
        assert_eq!(provider.name(), "groq");
        assert_eq!(provider.model(), Some("llama3-70b-8192".to_string()));
    }

    #[test]
    fn test_request_serialization() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hi")];
        let request = GroqRequest {
            model: "llama3-70b-8192",
            messages: &messages,
            temperature: 0.5,
            max_tokens: 1024,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama3-70b-8192");
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }

    #[test]
    fn test_extract_content_first_choice() {
        let response: GroqResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"first"}},
                           {"message":{"role":"assistant","content":"second"}}],
                "usage":{"prompt_tokens":10,"completion_tokens":4,"total_tokens":14}}"#,
        )
        .unwrap();
        let completion = extract_content(response).unwrap();
        assert_eq!(completion.content, "first");
        assert_eq!(completion.usage.unwrap().total_tokens, 14);
    }

    #[test]
    fn test_extract_content_no_choices() {
        let response: GroqResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(extract_content(response).is_err());
    }

    #[test]
    fn test_extract_content_blank_content() {
        let response: GroqResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"  "}}]}"#).unwrap();
        assert!(extract_content(response).is_err());
    }

    #[test]
    fn test_response_missing_content_fails_to_parse() {
        let parsed = serde_json::from_str::<GroqResponse>(r#"{"choices":[{"message":{}}]}"#);
        assert!(parsed.is_err());
    }
}
