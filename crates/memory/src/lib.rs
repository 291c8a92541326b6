//! Conversation history storage for FIFI.

pub mod conversation;

pub use conversation::ConversationManager;
