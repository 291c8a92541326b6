//! Conversation history: bounded, ordered turns per session.
//!
//! [`ConversationHistory`] enforces the turn cap on every push.
//! [`HistoryStore`] maps session ids to shared histories; each history sits
//! behind its own async mutex so one session's turn can be serialized without
//! blocking any other session.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::message::{Message, SessionId};

/// Hard cap on stored turns per session.
pub const DEFAULT_MAX_TURNS: usize = 10;

/// Number of recent turns included in each prompt.
pub const DEFAULT_PROMPT_WINDOW: usize = 6;

/// The ordered turns of one session, oldest first.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    turns: Vec<Message>,
    max_turns: usize,
}

impl ConversationHistory {
    /// An empty history that keeps at most `max_turns` turns.
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: Vec::new(),
            max_turns,
        }
    }

    /// Append a turn, discarding the oldest turns beyond the cap.
    pub fn push(&mut self, message: Message) {
        self.turns.push(message);
        if self.turns.len() > self.max_turns {
            let excess = self.turns.len() - self.max_turns;
            self.turns.drain(..excess);
        }
    }

    /// Append a question and its reply as one adjacent pair.
    pub fn record_exchange(&mut self, user: &str, assistant: &str) {
        self.push(Message::user(user));
        self.push(Message::assistant(assistant));
    }

    /// The most recent `max_recent` turns, in original order.
    pub fn windowed(&self, max_recent: usize) -> Vec<Message> {
        let start = self.turns.len().saturating_sub(max_recent);
        self.turns[start..].to_vec()
    }

    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}

/// A history shared between the store and an in-flight request.
pub type SharedHistory = Arc<Mutex<ConversationHistory>>;

/// Session-keyed history storage.
///
/// The hosting layer (CLI, gateway) owns the store and passes it to the
/// assistant; nothing in the core reaches for a process-wide map.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// The backend name (e.g., "in_memory").
    fn name(&self) -> &str;

    /// The history for `session`, created empty on first reference.
    async fn get_or_create(&self, session: &SessionId) -> SharedHistory;

    /// The history for `session` if it has been referenced before.
    async fn get(&self, session: &SessionId) -> Option<SharedHistory>;

    /// Empty the history for `session`. Returns `false` if it never existed.
    async fn clear(&self, session: &SessionId) -> bool;

    /// Number of sessions currently held.
    async fn session_count(&self) -> usize;

    /// Exclusive access to one session's history until the guard is dropped.
    /// Creates the session on first reference.
    async fn lock(&self, session: &SessionId) -> OwnedMutexGuard<ConversationHistory> {
        self.get_or_create(session).await.lock_owned().await
    }
}
