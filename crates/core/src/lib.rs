//! # FIFI Core
//!
//! Domain types, traits, and error definitions for the FIFI campus assistant.
//! This crate has **no framework dependencies**: it defines the domain model
//! that the retrieval, memory, provider, and front-end crates implement against.
//!
//! ## Seams
//!
//! Every external collaborator is a trait here:
//! - [`Provider`]: the language-model completion service
//! - [`PageFetcher`]: URL → cleaned page text
//! - [`HistoryStore`]: per-session conversation history
//!
//! Implementations live in their respective crates, so the core logic can be
//! exercised with in-process mocks.

pub mod error;
pub mod fetch;
pub mod history;
pub mod message;
pub mod provider;
pub mod text;

// Re-export key types at crate root for ergonomics
pub use error::{Error, FetchError, ProviderError};
pub use fetch::PageFetcher;
pub use history::{ConversationHistory, HistoryStore, SharedHistory};
pub use message::{Message, Role, SessionId};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use text::truncate_chars;
