//! Context assembly: the text block placed in front of the model.
//!
//! A static-table hit short-circuits everything else. Otherwise the top
//! ranked corpus URLs are fetched one after another and each success
//! contributes a `Source:` block; failed fetches are logged and skipped.

use fifi_config::RetrievalConfig;
use fifi_core::fetch::PageFetcher;
use fifi_core::text::truncate_chars;
use fifi_knowledge::{RelevanceRanker, SCORED_LIMIT, classify};
use serde::Serialize;
use tracing::{debug, warn};

/// Prefix marking context that came from the static answer table.
pub const VERIFIED_PREFIX: &str = "VERIFIED INFORMATION:";

/// Separator between fetched page blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

const DEFAULT_FETCH_LIMIT: usize = 3;
const DEFAULT_SNIPPET_CHARS: usize = 1500;

/// Where the context text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContextSource {
    /// A static table entry
    Static { topic: &'static str },
    /// Fetched pages, in the order they appear in the text
    Fetched { urls: Vec<String> },
    /// Nothing usable was found
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembledContext {
    pub text: String,
    pub source: ContextSource,
}

impl AssembledContext {
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            source: ContextSource::None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

pub struct ContextAssembler {
    ranker: RelevanceRanker,
    fetch_limit: usize,
    snippet_chars: usize,
}

impl ContextAssembler {
    pub fn new(rank_limit: usize, fetch_limit: usize, snippet_chars: usize) -> Self {
        Self {
            ranker: RelevanceRanker::new(rank_limit),
            fetch_limit,
            snippet_chars,
        }
    }

    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self::new(config.rank_limit, config.fetch_limit, config.snippet_chars)
    }

    pub async fn build_context(
        &self,
        query: &str,
        corpus: &[String],
        fetcher: &dyn PageFetcher,
    ) -> AssembledContext {
        if let Some(entry) = classify(query) {
            debug!(topic = entry.topic, "Using static answer");
            return AssembledContext {
                text: format!("{VERIFIED_PREFIX}\n{}", entry.answer),
                source: ContextSource::Static { topic: entry.topic },
            };
        }

        let ranked = self.ranker.rank(query, corpus);
        let mut blocks = Vec::new();
        let mut used = Vec::new();

        for url in ranked.into_iter().take(self.fetch_limit) {
            match fetcher.fetch(&url).await {
                Ok(content) if !content.trim().is_empty() => {
                    blocks.push(format!(
                        "Source: {url}\n{}",
                        truncate_chars(&content, self.snippet_chars)
                    ));
                    used.push(url);
                }
                Ok(_) => warn!(url = %url, "Skipping page with no text"),
                Err(e) => warn!(url = %url, error = %e, "Skipping page in context"),
            }
        }

        if blocks.is_empty() {
            debug!("No context found");
            return AssembledContext::empty();
        }

        debug!(pages = used.len(), "Assembled context from fetched pages");
        AssembledContext {
            text: blocks.join(BLOCK_SEPARATOR),
            source: ContextSource::Fetched { urls: used },
        }
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(SCORED_LIMIT, DEFAULT_FETCH_LIMIT, DEFAULT_SNIPPET_CHARS)
    }
}
