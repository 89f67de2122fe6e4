//! Configuration management for Taxwise
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, TaxwiseError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Instruction sent as the first message of every completion request
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an AI Tax Assistant that helps users with tax \
calculations, explains tax concepts, and provides guidance on tax-related matters. You have \
knowledge of tax regulations and can perform calculations. Always be helpful, accurate, and clear \
in your explanations. When you don't know something specific, acknowledge that and suggest where \
the user might find more information. For calculations, show your work step by step.";

/// Main configuration structure for Taxwise
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Provider configuration (Groq or offline)
    pub provider: ProviderConfig,

    /// Chat behavior configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Settings storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Provider configuration
///
/// Specifies which completion provider to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type")]
    pub provider_type: String,

    /// Groq (OpenAI-compatible) configuration
    #[serde(default)]
    pub groq: GroqConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: "groq".to_string(),
            groq: GroqConfig::default(),
        }
    }
}

/// Groq chat-completions provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    /// API base URL; `/chat/completions` is appended to it
    ///
    /// Tests point this at a mock server.
    #[serde(default = "default_groq_api_base")]
    pub api_base: String,

    /// Model identifier sent with every request
    #[serde(default = "default_groq_model")]
    pub model: String,

    /// Bearer credential. Prefer the `GROQ_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum completion tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds; `None` keeps the HTTP client default
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_groq_api_base() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_groq_model() -> String {
    "llama3-70b-8192".to_string()
}

fn default_temperature() -> f32 {
    0.5
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_base: default_groq_api_base(),
            model: default_groq_model(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: None,
        }
    }
}

/// Chat behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// System instruction prepended to every completion request
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
        }
    }
}

/// Settings storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Path of the key-value store file; `None` uses the platform config dir
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TaxwiseError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| TaxwiseError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("TAXWISE_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(api_key) = std::env::var("GROQ_API_KEY") {
            if !api_key.trim().is_empty() {
                self.provider.groq.api_key = Some(api_key);
            }
        }

        if let Ok(model) = std::env::var("TAXWISE_GROQ_MODEL") {
            self.provider.groq.model = model;
        }

        if let Ok(api_base) = std::env::var("TAXWISE_GROQ_API_BASE") {
            self.provider.groq.api_base = api_base;
        }

        if let Ok(path) = std::env::var("TAXWISE_STORAGE_PATH") {
            tracing::debug!(path = %path, "Env override: TAXWISE_STORAGE_PATH");
            self.storage.path = Some(PathBuf::from(path));
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(path) = &cli.storage_path {
            self.storage.path = Some(path.clone());
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.provider.provider_type.is_empty() {
            return Err(TaxwiseError::Config("Provider type cannot be empty".to_string()).into());
        }

        let valid_providers = ["groq", "offline"];
        if !valid_providers.contains(&self.provider.provider_type.as_str()) {
            return Err(TaxwiseError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                valid_providers.join(", ")
            ))
            .into());
        }

        let temperature = self.provider.groq.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(TaxwiseError::Config(
                "provider.groq.temperature must be between 0.0 and 2.0".to_string(),
            )
            .into());
        }

        if self.provider.groq.max_tokens == 0 {
            return Err(TaxwiseError::Config(
                "provider.groq.max_tokens must be greater than 0".to_string(),
            )
            .into());
        }

        if self.provider.groq.model.trim().is_empty() {
            return Err(
                TaxwiseError::Config("provider.groq.model cannot be empty".to_string()).into(),
            );
        }

        if self.provider.groq.timeout_seconds == Some(0) {
            return Err(TaxwiseError::Config(
                "provider.groq.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider.provider_type, "groq");
        assert_eq!(config.provider.groq.model, "llama3-70b-8192");
        assert_eq!(config.provider.groq.temperature, 0.5);
        assert_eq!(config.provider.groq.max_tokens, 1024);
        assert!(config.provider.groq.api_key.is_none());
        assert!(config.provider.groq.timeout_seconds.is_none());
        assert!(config.chat.system_prompt.starts_with("You are an AI Tax Assistant"));
    }

    #[test]
    #[serial]
    fn test_sample_config_keeps_client_default_timeout() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/config.yaml");
        let config = Config::load(path, &crate::cli::Cli::default()).unwrap();
        assert!(config.provider.groq.timeout_seconds.is_none());
        assert_eq!(config.provider.groq.model, "llama3-70b-8192");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_provider() {
        let mut config = Config::default();
        config.provider.provider_type = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_provider() {
        let mut config = Config::default();
        config.provider.provider_type = "openai".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("groq, offline"));
    }

    #[test]
    fn test_config_validation_offline_provider() {
        let mut config = Config::default();
        config.provider.provider_type = "offline".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_temperature_out_of_range() {
        let mut config = Config::default();
        config.provider.groq.temperature = 2.5;
        assert!(config.validate().is_err());
        config.provider.groq.temperature = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_max_tokens() {
        let mut config = Config::default();
        config.provider.groq.max_tokens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = Config::default();
        config.provider.groq.timeout_seconds = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
provider:
  type: groq
  groq:
    api_base: http://localhost:9999/v1
    model: llama3-8b-8192
    temperature: 0.2
    max_tokens: 256
    timeout_seconds: 15
chat:
  system_prompt: Be brief.
storage:
  path: /tmp/taxwise/store.json
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.provider.groq.api_base, "http://localhost:9999/v1");
        assert_eq!(config.provider.groq.model, "llama3-8b-8192");
        assert_eq!(config.provider.groq.max_tokens, 256);
        assert_eq!(config.provider.groq.timeout_seconds, Some(15));
        assert_eq!(config.chat.system_prompt, "Be brief.");
        assert_eq!(
            config.storage.path,
            Some(PathBuf::from("/tmp/taxwise/store.json"))
        );
    }

    #[test]
    fn test_config_from_minimal_yaml_fills_defaults() {
        let yaml = "provider:\n  type: offline\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.provider.provider_type, "offline");
        assert_eq!(config.provider.groq.model, "llama3-70b-8192");
        assert_eq!(config.chat.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert!(config.storage.path.is_none());
    }

    #[test]
    #[serial]
    fn test_load_nonexistent_file_uses_defaults() {
        let cli = crate::cli::Cli::default();
        let config = Config::load("/nonexistent/taxwise/config.yaml", &cli).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_storage_path_override() {
        let cli = crate::cli::Cli {
            storage_path: Some(PathBuf::from("/tmp/override.json")),
            ..crate::cli::Cli::default()
        };
        let mut config = Config::default();
        config.apply_cli_overrides(&cli);
        assert_eq!(
            config.storage.path,
            Some(PathBuf::from("/tmp/override.json"))
        );
    }

    #[test]
    #[serial]
    fn test_apply_env_vars_overrides_provider_fields() {
        std::env::set_var("TAXWISE_PROVIDER", "offline");
        std::env::set_var("GROQ_API_KEY", "gsk_test");
        std::env::set_var("TAXWISE_GROQ_MODEL", "mixtral-8x7b-32768");

        let mut config = Config::default();
        config.apply_env_vars();

        assert_eq!(config.provider.provider_type, "offline");
        assert_eq!(config.provider.groq.api_key.as_deref(), Some("gsk_test"));
        assert_eq!(config.provider.groq.model, "mixtral-8x7b-32768");

        std::env::remove_var("TAXWISE_PROVIDER");
        std::env::remove_var("GROQ_API_KEY");
        std::env::remove_var("TAXWISE_GROQ_MODEL");
    }
}
