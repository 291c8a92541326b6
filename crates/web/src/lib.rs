//! Web access for FIFI: fetching readable page text and crawling the
//! university domain to build the URL corpus.

pub mod crawler;
pub mod fetch;

pub use crawler::{CrawlReport, Crawler, HtmlSource, clean_url, extract_links, write_corpus};
pub use fetch::{HttpPageFetcher, USER_AGENT, extract_text};
