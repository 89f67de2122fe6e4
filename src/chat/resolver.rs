//! Response resolver
//!
//! Turns a conversation history plus a new user message into an assistant
//! reply. The remote provider is tried once; any failure is answered from the
//! local rule table, and a failure of the dispatch itself (a panic inside a
//! provider) becomes a fixed apology. `resolve` therefore never fails.
//!
//! Reply ids are supplied by the caller, normally from
//! [`Conversation::next_id`](crate::chat::Conversation::next_id), so one
//! counter orders every message in a conversation.

use crate::chat::conversation::{Message, Role};
use crate::chat::fallback::fallback_reply;
use crate::config::DEFAULT_SYSTEM_PROMPT;
use crate::providers::{ChatMessage, Provider};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;

/// Apology shown when resolving a reply failed unexpectedly
pub const APOLOGY_TEXT: &str = "I apologize, but I'm having trouble connecting to my knowledge \
base right now. Please try again in a moment.";

/// Where a reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// First choice returned by the completion endpoint
    Remote,
    /// Local keyword rule table
    Fallback,
    /// Fixed apology after an unexpected failure
    Apology,
}

/// A resolved reply together with its origin
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The assistant message to append
    pub message: Message,
    /// Which path produced it
    pub source: ReplySource,
}

/// Obtains assistant replies from a provider with local fallback
pub struct ResponseResolver {
    provider: Box<dyn Provider>,
    system_prompt: String,
}

impl ResponseResolver {
    /// Create a resolver using the default system instruction
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self::with_system_prompt(provider, DEFAULT_SYSTEM_PROMPT)
    }

    /// Create a resolver with a custom system instruction
    pub fn with_system_prompt(provider: Box<dyn Provider>, system_prompt: impl Into<String>) -> Self {
        Self {
            provider,
            system_prompt: system_prompt.into(),
        }
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Model used by the underlying provider, if any
    pub fn provider_model(&self) -> Option<String> {
        self.provider.model()
    }

    /// Build the ordered prompt: system instruction, prior history, new text
    ///
    /// # Examples
    ///
    /// ```
    /// use taxwise::chat::{Conversation, ResponseResolver};
    /// use taxwise::providers::OfflineProvider;
    ///
    /// let resolver = ResponseResolver::new(Box::new(OfflineProvider::new()));
    /// let history = Conversation::new();
    /// let prompt = resolver.build_prompt(history.messages(), "What is a W-2?");
    /// assert_eq!(prompt.len(), 3);
    /// assert_eq!(prompt[0].role, "system");
    /// assert_eq!(prompt[2].content, "What is a W-2?");
    /// ```
    pub fn build_prompt(&self, history: &[Message], new_text: &str) -> Vec<ChatMessage> {
        let mut prompt = Vec::with_capacity(history.len() + 2);
        prompt.push(ChatMessage::system(self.system_prompt.clone()));
        prompt.extend(history.iter().map(Message::to_chat_message));
        prompt.push(ChatMessage::user(new_text));
        prompt
    }

    /// Resolve a reply for `new_text`, returning only the message
    pub async fn resolve(
        &self,
        history: &[Message],
        new_text: &str,
        reply_id: impl Into<String>,
    ) -> Message {
        self.resolve_detailed(history, new_text, reply_id)
            .await
            .message
    }

    /// Resolve a reply for `new_text`, reporting which path produced it
    ///
    /// The returned message carries `reply_id` whichever path produced it.
    pub async fn resolve_detailed(
        &self,
        history: &[Message],
        new_text: &str,
        reply_id: impl Into<String>,
    ) -> Resolution {
        let reply_id = reply_id.into();
        let dispatched = AssertUnwindSafe(self.dispatch(history, new_text))
            .catch_unwind()
            .await;

        match dispatched {
            Ok((content, source)) => Resolution {
                message: Message::new(reply_id, Role::Assistant, content),
                source,
            },
            Err(_) => {
                tracing::error!("Reply dispatch failed unexpectedly; sending apology");
                Resolution {
                    message: Message::error(reply_id, APOLOGY_TEXT),
                    source: ReplySource::Apology,
                }
            }
        }
    }

    async fn dispatch(&self, history: &[Message], new_text: &str) -> (String, ReplySource) {
        let prompt = self.build_prompt(history, new_text);

        match self.provider.complete(&prompt).await {
            Ok(response) if !response.content.trim().is_empty() => {
                (response.content, ReplySource::Remote)
            }
            Ok(_) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    "Provider returned empty content, using fallback"
                );
                (fallback_reply(new_text), ReplySource::Fallback)
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    "Completion failed, using fallback: {}",
                    e
                );
                (fallback_reply(new_text), ReplySource::Fallback)
            }
        }
    }
}
