//! Breadth-first crawl of the university domain, producing the URL corpus.
//!
//! Every link whose host matches a collect pattern is recorded; links whose
//! host also matches a follow pattern are queued for visiting. The crawl stops
//! when the queue drains or the page budget is spent.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use fifi_config::CrawlerConfig;
use fifi_core::error::FetchError;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

/// Raw HTML retrieval, the only network access the crawler needs.
#[async_trait]
pub trait HtmlSource: Send + Sync {
    async fn get_html(&self, url: &str) -> Result<String, FetchError>;
}

/// Outcome of one crawl.
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Collected URLs, sorted and deduplicated
    pub urls: Vec<String>,
    pub pages_visited: usize,
    pub pages_failed: usize,
}

pub struct Crawler<S> {
    source: S,
    config: CrawlerConfig,
}

impl<S: HtmlSource> Crawler<S> {
    pub fn new(source: S, config: CrawlerConfig) -> Self {
        Self { source, config }
    }

    pub async fn run(&self) -> CrawlReport {
        let mut queue: VecDeque<String> = self.config.seed_urls.iter().cloned().collect();
        let mut visited: HashSet<String> = HashSet::new();
        let mut collected: BTreeSet<String> = BTreeSet::new();
        let mut report = CrawlReport::default();
        let delay = Duration::from_millis(self.config.delay_ms);

        info!(
            seeds = queue.len(),
            max_pages = self.config.max_pages,
            "Starting crawl"
        );

        while report.pages_visited < self.config.max_pages {
            let Some(current) = queue.pop_front() else {
                break;
            };
            if !visited.insert(current.clone()) {
                continue;
            }

            let html = match self.source.get_html(&current).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(url = %current, error = %e, "Skipping page");
                    report.pages_failed += 1;
                    continue;
                }
            };

            let Ok(base) = Url::parse(&current) else {
                report.pages_failed += 1;
                continue;
            };

            for link in extract_links(&base, &html) {
                let Some(host) = link.host_str() else {
                    continue;
                };
                let host = host.to_lowercase();
                if !matches_any(&host, &self.config.collect_hosts) {
                    continue;
                }

                let cleaned = clean_url(&link);
                if matches_any(&host, &self.config.follow_hosts) && !visited.contains(&cleaned) {
                    queue.push_back(cleaned.clone());
                }
                collected.insert(cleaned);
            }

            report.pages_visited += 1;
            debug!(
                page = report.pages_visited,
                url = %current,
                collected = collected.len(),
                "Crawled page"
            );

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        report.urls = collected.into_iter().collect();
        info!(
            visited = report.pages_visited,
            failed = report.pages_failed,
            urls = report.urls.len(),
            "Crawl finished"
        );
        report
    }
}

fn matches_any(host: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|p| host.contains(p.as_str()))
}

/// Absolute targets of every `<a href>` in `html`, resolved against `base`.
pub fn extract_links(base: &Url, html: &str) -> Vec<Url> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| base.join(href.trim()).ok())
        .filter(|u| matches!(u.scheme(), "http" | "https"))
        .collect()
}

/// The URL without fragment or credentials; an empty query is dropped.
pub fn clean_url(url: &Url) -> String {
    let mut cleaned = url.clone();
    cleaned.set_fragment(None);
    if cleaned.query() == Some("") {
        cleaned.set_query(None);
    }
    // Only URLs that cannot carry credentials (mailto:, data:) refuse these.
    if cleaned.set_username("").is_err() || cleaned.set_password(None).is_err() {
        debug!(url = %url, "URL has no credential fields");
    }
    cleaned.to_string()
}

/// Write the corpus file: a comment header, a blank line, then one URL per line.
pub fn write_corpus(path: &Path, urls: &[String]) -> std::io::Result<()> {
    let mut out = std::io::BufWriter::new(std::fs::File::create(path)?);
    writeln!(out, "# IU South Bend URLs")?;
    writeln!(out, "# Total URLs collected: {}", urls.len())?;
    writeln!(out, "# {}", "=".repeat(50))?;
    writeln!(out)?;
    for url in urls {
        writeln!(out, "{url}")?;
    }
    out.flush()?;
    info!(path = %path.display(), urls = urls.len(), "Wrote URL corpus");
    Ok(())
}
