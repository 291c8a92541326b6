//! Retrieval knowledge for FIFI.
//!
//! - [`static_table`]: compiled-in canned answers and the ordered rules that
//!   map a query onto one of them
//! - [`ranker`]: keyword-overlap scoring of corpus URLs
//! - [`corpus`]: the line-oriented URL list produced by the crawler

pub mod corpus;
pub mod ranker;
pub mod static_table;

pub use corpus::{load_corpus, parse_corpus};
pub use ranker::{KeywordPattern, LISTING_LIMIT, RelevanceRanker, SCORED_LIMIT, ScoredUrl};
pub use static_table::{KnowledgeEntry, classify, static_answer};
