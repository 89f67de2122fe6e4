//! Conversation store
//!
//! Holds the ordered chat history for one session, the in-flight ("typing")
//! flag, and the last error notice. The history is never empty: it starts
//! with the welcome message and `clear` restores exactly that message.

use crate::providers::ChatMessage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Id of the seeded welcome message
pub const WELCOME_ID: &str = "welcome";

/// Text of the seeded welcome message
pub const WELCOME_TEXT: &str =
    "Hello! I'm your AI Tax Assistant. How can I help you with tax-related questions today?";

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person using the assistant
    User,
    /// The assistant (remote model, fallback table, or apology)
    Assistant,
}

impl Role {
    /// Role name as sent to completion providers
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in the conversation
///
/// Messages are immutable once created; the store only appends them or
/// replaces the whole history on clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique id within the session
    pub id: String,
    /// Author role
    pub role: Role,
    /// Message text
    pub content: String,
    /// Creation time, serialized as ISO-8601
    pub timestamp: DateTime<Utc>,
    /// Set on the apology produced by an unexpected failure
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl Message {
    /// Create a message stamped with the current time
    pub fn new(id: impl Into<String>, role: Role, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            is_error: false,
        }
    }

    /// Create a message flagged as an error
    pub fn error(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::new(id, Role::Assistant, content)
        }
    }

    /// The seeded welcome message
    ///
    /// # Examples
    ///
    /// ```
    /// use taxwise::chat::conversation::{Message, Role, WELCOME_ID};
    ///
    /// let welcome = Message::welcome();
    /// assert_eq!(welcome.id, WELCOME_ID);
    /// assert_eq!(welcome.role, Role::Assistant);
    /// ```
    pub fn welcome() -> Self {
        Self::new(WELCOME_ID, Role::Assistant, WELCOME_TEXT)
    }

    /// Convert to the role/content pair sent to providers
    pub fn to_chat_message(&self) -> ChatMessage {
        ChatMessage {
            role: self.role.as_str().to_string(),
            content: self.content.clone(),
        }
    }
}

/// Ordered chat history with in-flight and error state
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    typing: bool,
    error: Option<String>,
    seq: u64,
}

impl Conversation {
    /// Creates a conversation seeded with the welcome message
    ///
    /// # Examples
    ///
    /// ```
    /// use taxwise::chat::Conversation;
    ///
    /// let conversation = Conversation::new();
    /// assert_eq!(conversation.len(), 1);
    /// assert!(!conversation.is_typing());
    /// ```
    pub fn new() -> Self {
        Self {
            messages: vec![Message::welcome()],
            typing: false,
            error: None,
            seq: 0,
        }
    }

    /// Append a message to the end of the history
    pub fn append(&mut self, message: Message) {
        tracing::trace!(id = %message.id, role = %message.role, "Appending message");
        self.messages.push(message);
    }

    /// Replace the history with a fresh welcome message and clear the error
    pub fn clear(&mut self) {
        self.messages = vec![Message::welcome()];
        self.error = None;
    }

    /// Toggle the in-flight flag
    pub fn set_typing(&mut self, typing: bool) {
        self.typing = typing;
    }

    /// Whether a request is outstanding
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Record or clear the last error notice
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Last error notice, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Generate the next message id for `role`
    ///
    /// Ids look like `user-1700000000000-3`. The trailing counter keeps them
    /// unique and ordered even when two are created in the same millisecond.
    pub fn next_id(&mut self, role: Role) -> String {
        self.seq += 1;
        format!("{}-{}-{}", role, Utc::now().timestamp_millis(), self.seq)
    }

    /// All messages in insertion order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Most recent message
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the history has no messages
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// History as role/content pairs for a completion prompt
    pub fn history_for_prompt(&self) -> Vec<ChatMessage> {
        self.messages.iter().map(Message::to_chat_message).collect()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
