//! Taxwise - terminal tax assistant library
//!
//! This library provides the core functionality behind the `taxwise` binary:
//! a chat assistant backed by a remote completion API with an offline
//! fallback, a flat-rate tax calculator, a static tax information hub, and
//! persisted user settings.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `chat`: Conversation store, reply resolution, and chat sessions
//! - `providers`: Completion provider abstraction and implementations (Groq, offline)
//! - `calculator`: Flat-rate tax estimate
//! - `info_hub`: Static tax topics, FAQ, and topic search
//! - `settings`: User settings and their key-value store
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Handlers for each CLI subcommand
//!
//! # Example
//!
//! ```no_run
//! use taxwise::chat::{ChatSession, ResponseResolver};
//! use taxwise::providers::create_provider;
//! use taxwise::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let provider = create_provider(&config.provider.provider_type, &config.provider)?;
//!     let session = ChatSession::new(ResponseResolver::new(provider));
//!     if let Some(reply) = session.submit("What is the standard deduction?").await? {
//!         println!("{}", reply.message.content);
//!     }
//!     Ok(())
//! }
//! ```

pub mod calculator;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod info_hub;
pub mod providers;
pub mod settings;

// Re-export commonly used types
pub use calculator::{compute_tax, TaxEstimate};
pub use chat::{ChatSession, Conversation, Message, ResponseResolver, Role};
pub use config::Config;
pub use error::{Result, TaxwiseError};
pub use settings::{Settings, SettingsManager};

#[cfg(test)]
pub mod test_utils;
