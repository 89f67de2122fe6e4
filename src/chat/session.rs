//! Chat session
//!
//! Couples a [`Conversation`] with a [`ResponseResolver`] and enforces
//! single-flight submission: a second submit while one is outstanding is
//! rejected with [`TaxwiseError::RequestInFlight`]. The conversation lock is
//! never held across the network call.

use crate::chat::conversation::{Conversation, Message, Role};
use crate::chat::resolver::{ReplySource, Resolution, ResponseResolver};
use crate::error::{Result, TaxwiseError};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Notice recorded when the reply came from the offline rule table
pub const FALLBACK_NOTICE: &str =
    "The AI service is unavailable right now; this answer comes from the built-in tax guide.";

/// Notice recorded when the reply is the apology message
pub const APOLOGY_NOTICE: &str =
    "Sorry, there was an error connecting to the AI service. Please try again.";

/// Questions offered to users who don't know where to start
pub const SUGGESTED_QUESTIONS: &[&str] = &[
    "How do I calculate self-employment tax?",
    "What's the difference between tax credits and deductions?",
    "Can you explain capital gains tax?",
    "What deductions can I claim as a remote worker?",
];

/// An interactive chat session
///
/// Cloning is cheap and yields a handle to the same conversation.
#[derive(Clone)]
pub struct ChatSession {
    conversation: Arc<RwLock<Conversation>>,
    resolver: Arc<ResponseResolver>,
}

/// Clears the in-flight flag when the submission finishes or is dropped
struct TypingGuard {
    conversation: Arc<RwLock<Conversation>>,
}

impl Drop for TypingGuard {
    fn drop(&mut self) {
        self.conversation
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .set_typing(false);
    }
}

impl ChatSession {
    /// Create a session with a fresh conversation
    pub fn new(resolver: ResponseResolver) -> Self {
        Self {
            conversation: Arc::new(RwLock::new(Conversation::new())),
            resolver: Arc::new(resolver),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Conversation> {
        self.conversation
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Conversation> {
        self.conversation
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Submit user text and wait for the assistant's reply
    ///
    /// Blank text is ignored and yields `Ok(None)`. The reply is appended to
    /// the conversation before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`TaxwiseError::RequestInFlight`] if another submission is
    /// still waiting for its reply
    pub async fn submit(&self, text: &str) -> Result<Option<Resolution>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let (history, reply_id) = {
            let mut conversation = self.write();
            if conversation.is_typing() {
                tracing::debug!("Rejecting submission while a request is in flight");
                return Err(TaxwiseError::RequestInFlight.into());
            }
            let history = conversation.messages().to_vec();
            let id = conversation.next_id(Role::User);
            let reply_id = conversation.next_id(Role::Assistant);
            conversation.append(Message::new(id, Role::User, text));
            conversation.set_typing(true);
            conversation.set_error(None);
            (history, reply_id)
        };
        let _typing = TypingGuard {
            conversation: Arc::clone(&self.conversation),
        };

        let resolution = self.resolver.resolve_detailed(&history, text, reply_id).await;
        tracing::info!(source = ?resolution.source, "Assistant reply resolved");

        let mut conversation = self.write();
        conversation.append(resolution.message.clone());
        conversation.set_error(match resolution.source {
            ReplySource::Remote => None,
            ReplySource::Fallback => Some(FALLBACK_NOTICE.to_string()),
            ReplySource::Apology => Some(APOLOGY_NOTICE.to_string()),
        });

        Ok(Some(resolution))
    }

    /// Reset the conversation to the welcome message
    ///
    /// # Errors
    ///
    /// Returns [`TaxwiseError::RequestInFlight`] while a submission is
    /// waiting for its reply; the history is left untouched
    pub fn clear(&self) -> Result<()> {
        let mut conversation = self.write();
        if conversation.is_typing() {
            tracing::debug!("Rejecting clear while a request is in flight");
            return Err(TaxwiseError::RequestInFlight.into());
        }
        conversation.clear();
        Ok(())
    }

    /// Copy of the current messages
    pub fn snapshot(&self) -> Vec<Message> {
        self.read().messages().to_vec()
    }

    /// Number of messages in the conversation
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the conversation has no messages
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Whether a submission is waiting for its reply
    pub fn is_typing(&self) -> bool {
        self.read().is_typing()
    }

    /// Last error notice, if any
    pub fn error(&self) -> Option<String> {
        self.read().error().map(str::to_string)
    }

    /// Name of the provider answering this session
    pub fn provider_name(&self) -> &'static str {
        self.resolver.provider_name()
    }

    /// Model used by the provider, if any
    pub fn provider_model(&self) -> Option<String> {
        self.resolver.provider_model()
    }
}
