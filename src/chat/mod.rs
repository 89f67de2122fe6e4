//! Chat core: conversation store, reply resolution, and session handling

pub mod conversation;
pub mod fallback;
pub mod resolver;
pub mod session;

pub use conversation::{Conversation, Message, Role};
pub use resolver::{ReplySource, Resolution, ResponseResolver};
pub use session::ChatSession;
