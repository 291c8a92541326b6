//! The assistant: one question in, one reply out, history updated.

use std::sync::Arc;

use fifi_config::AppConfig;
use fifi_core::fetch::PageFetcher;
use fifi_core::history::{DEFAULT_PROMPT_WINDOW, HistoryStore};
use fifi_core::message::SessionId;
use fifi_core::provider::{Provider, ProviderRequest};
use serde::Serialize;
use tracing::{info, warn};

use crate::context::{ContextAssembler, ContextSource};
use crate::prompt::PromptComposer;

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 1000;

/// The outcome of one turn.
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub text: String,
    pub source: ContextSource,
    /// `true` when `text` is an apology for a failed completion
    pub is_error: bool,
}

/// Answers questions about the university.
///
/// The hosting layer owns the collaborators and hands them in; an assistant
/// is cheap to share behind an `Arc` across requests and sessions.
pub struct Assistant {
    provider: Arc<dyn Provider>,
    fetcher: Arc<dyn PageFetcher>,
    history: Arc<dyn HistoryStore>,
    corpus: Arc<Vec<String>>,
    assembler: ContextAssembler,
    composer: PromptComposer,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    prompt_window: usize,
}

impl Assistant {
    pub fn new(
        provider: Arc<dyn Provider>,
        fetcher: Arc<dyn PageFetcher>,
        history: Arc<dyn HistoryStore>,
        corpus: Vec<String>,
    ) -> Self {
        Self {
            provider,
            fetcher,
            history,
            corpus: Arc::new(corpus),
            assembler: ContextAssembler::default(),
            composer: PromptComposer::default(),
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            prompt_window: DEFAULT_PROMPT_WINDOW,
        }
    }

    /// An assistant with model parameters, retrieval limits and identity
    /// taken from `config`.
    pub fn from_config(
        config: &AppConfig,
        model: impl Into<String>,
        provider: Arc<dyn Provider>,
        fetcher: Arc<dyn PageFetcher>,
        history: Arc<dyn HistoryStore>,
        corpus: Vec<String>,
    ) -> Self {
        Self::new(provider, fetcher, history, corpus)
            .with_model(model)
            .with_temperature(config.default_temperature)
            .with_max_tokens(config.default_max_tokens)
            .with_prompt_window(config.conversation.prompt_window)
            .with_assembler(ContextAssembler::from_config(&config.retrieval))
            .with_composer(PromptComposer::from_identity(&config.identity))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_prompt_window(mut self, window: usize) -> Self {
        self.prompt_window = window;
        self
    }

    pub fn with_assembler(mut self, assembler: ContextAssembler) -> Self {
        self.assembler = assembler;
        self
    }

    pub fn with_composer(mut self, composer: PromptComposer) -> Self {
        self.composer = composer;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn corpus(&self) -> &[String] {
        &self.corpus
    }

    pub fn history(&self) -> &Arc<dyn HistoryStore> {
        &self.history
    }

    /// Run one turn for `session`.
    ///
    /// The session's history stays locked for the whole turn, so concurrent
    /// questions in one session are answered one at a time and always see the
    /// previous exchange.
    pub async fn respond(&self, session: &SessionId, query: &str) -> Reply {
        let mut history = self.history.lock(session).await;

        let context = self
            .assembler
            .build_context(query, &self.corpus, self.fetcher.as_ref())
            .await;
        let window = history.windowed(self.prompt_window);
        let messages = self.composer.compose(query, &context.text, &window);

        let request = ProviderRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let (text, is_error) = match self.provider.complete(request).await {
            Ok(response) => {
                if let Some(usage) = &response.usage {
                    info!(
                        session = %session,
                        model = %response.model,
                        total_tokens = usage.total_tokens,
                        "Completion received"
                    );
                }
                (response.message.content, false)
            }
            Err(e) => {
                warn!(session = %session, provider = self.provider.name(), error = %e, "Completion failed");
                (format!("I'm sorry, I encountered an error: {e}"), true)
            }
        };

        history.record_exchange(query, &text);

        Reply {
            text,
            source: context.source,
            is_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{MockFetcher, RecordingProvider};
    use fifi_core::error::ProviderError;
    use fifi_core::message::Role;
    use fifi_memory::ConversationManager;

    fn assistant(
        provider: Arc<RecordingProvider>,
        fetcher: Arc<MockFetcher>,
        corpus: &[&str],
    ) -> (Assistant, Arc<ConversationManager>) {
        let store = Arc::new(ConversationManager::default());
        let assistant = Assistant::new(
            provider,
            fetcher,
            store.clone(),
            corpus.iter().map(|u| u.to_string()).collect(),
        );
        (assistant, store)
    }

    #[tokio::test]
    async fn static_answer_reaches_the_model_without_fetching() {
        let provider = Arc::new(RecordingProvider::answering("We open at 7:30 AM."));
        let fetcher = Arc::new(MockFetcher::new(&[]));
        let (assistant, _) = assistant(provider.clone(), fetcher.clone(), &[]);

        let reply = assistant
            .respond(&SessionId::default(), "What are the library hours?")
            .await;

        assert_eq!(reply.text, "We open at 7:30 AM.");
        assert!(!reply.is_error);
        assert!(provider.last_user_turn().contains("SCHURZ LIBRARY HOURS"));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn request_carries_model_parameters() {
        let provider = Arc::new(RecordingProvider::answering("ok"));
        let (assistant, _) = assistant(provider.clone(), Arc::new(MockFetcher::new(&[])), &[]);
        assistant.respond(&SessionId::default(), "hello").await;

        let request = &provider.requests()[0];
        assert_eq!(request.model, "gpt-3.5-turbo");
        assert_eq!(request.max_tokens, Some(1000));
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(request.messages[0].role, Role::System);
    }

    #[tokio::test]
    async fn provider_failure_becomes_apology_and_is_recorded() {
        let provider = Arc::new(RecordingProvider::failing(ProviderError::Timeout(
            "deadline exceeded".into(),
        )));
        let (assistant, store) = assistant(provider, Arc::new(MockFetcher::new(&[])), &[]);
        let session = SessionId::from("s");

        let reply = assistant.respond(&session, "hello").await;

        assert!(reply.is_error);
        assert!(reply.text.starts_with("I'm sorry, I encountered an error: "));
        assert!(reply.text.contains("deadline exceeded"));
        let turns = store.lock(&session).await.turns().to_vec();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].content, reply.text);
    }

    #[tokio::test]
    async fn history_window_feeds_later_turns() {
        let provider = Arc::new(RecordingProvider::answering("answer"));
        let (assistant, store) = assistant(provider.clone(), Arc::new(MockFetcher::new(&[])), &[]);
        let session = SessionId::from("w");

        for i in 0..8 {
            assistant.respond(&session, &format!("question {i}")).await;
        }

        let last = provider.requests().pop().unwrap();
        // system + 6 windowed turns + user
        assert_eq!(last.messages.len(), 8);
        assert_eq!(last.messages[1].content, "question 4");
        assert_eq!(store.lock(&session).await.len(), 10);
    }

    #[tokio::test]
    async fn concurrent_turns_on_one_session_run_one_at_a_time() {
        let provider = Arc::new(RecordingProvider::answering("answer"));
        let (assistant, store) = assistant(provider.clone(), Arc::new(MockFetcher::new(&[])), &[]);
        let assistant = Arc::new(assistant);
        let session = SessionId::from("shared");

        let mut handles = Vec::new();
        for i in 0..4 {
            let assistant = Arc::clone(&assistant);
            let session = session.clone();
            handles.push(tokio::spawn(async move {
                assistant.respond(&session, &format!("question {i}")).await
            }));
        }
        for handle in handles {
            assert!(!handle.await.unwrap().is_error);
        }

        // Each turn saw every earlier exchange: 2, 4, 6, 8 messages.
        let lengths: Vec<usize> = provider.requests().iter().map(|r| r.messages.len()).collect();
        assert_eq!(lengths, [2, 4, 6, 8]);
        for request in provider.requests().iter().skip(1) {
            let previous = &request.messages[request.messages.len() - 2];
            assert_eq!(previous.role, Role::Assistant);
        }

        let turns = store.lock(&session).await.turns().to_vec();
        assert_eq!(turns.len(), 8);
        for pair in turns.chunks(2) {
            assert_eq!(pair[0].role, Role::User);
            assert_eq!(pair[1].role, Role::Assistant);
        }
    }

    #[tokio::test]
    async fn sessions_do_not_share_history() {
        let provider = Arc::new(RecordingProvider::answering("answer"));
        let (assistant, _) = assistant(provider.clone(), Arc::new(MockFetcher::new(&[])), &[]);

        assistant.respond(&SessionId::from("a"), "first").await;
        assistant.respond(&SessionId::from("b"), "second").await;

        assert_eq!(provider.requests()[1].messages.len(), 2);
    }
}
