//! In-memory conversation manager: one bounded history per session.
//!
//! The session map sits behind an `RwLock`; each history has its own mutex,
//! so turns in different sessions never contend and turns in the same session
//! are serialized by whoever holds that session's lock.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use fifi_core::history::{ConversationHistory, DEFAULT_MAX_TURNS, HistoryStore, SharedHistory};
use fifi_core::message::SessionId;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Session-keyed histories held for the lifetime of the process.
pub struct ConversationManager {
    sessions: RwLock<HashMap<SessionId, SharedHistory>>,
    max_turns: usize,
}

impl ConversationManager {
    pub fn new(max_turns: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_turns,
        }
    }
}

impl Default for ConversationManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}

#[async_trait]
impl HistoryStore for ConversationManager {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn get_or_create(&self, session: &SessionId) -> SharedHistory {
        if let Some(existing) = self.sessions.read().await.get(session) {
            return Arc::clone(existing);
        }
        let mut sessions = self.sessions.write().await;
        Arc::clone(sessions.entry(session.clone()).or_insert_with(|| {
            debug!(session = %session, "New conversation session");
            Arc::new(Mutex::new(ConversationHistory::new(self.max_turns)))
        }))
    }

    async fn get(&self, session: &SessionId) -> Option<SharedHistory> {
        self.sessions.read().await.get(session).cloned()
    }

    async fn clear(&self, session: &SessionId) -> bool {
        let Some(history) = self.get(session).await else {
            return false;
        };
        history.lock().await.clear();
        debug!(session = %session, "Cleared conversation session");
        true
    }

    async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
