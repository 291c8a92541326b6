//! `fifi crawl`: rebuild the URL corpus.

use std::path::PathBuf;
use std::time::Duration;

use fifi_web::{Crawler, HttpPageFetcher, write_corpus};

pub async fn run(
    output: Option<PathBuf>,
    max_pages: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let mut crawler_config = config.crawler.clone();
    if let Some(max) = max_pages {
        crawler_config.max_pages = max;
    }
    let output = output.unwrap_or_else(|| PathBuf::from(&config.retrieval.corpus_path));

    println!("IU South Bend URL Crawler");
    println!("{}", "=".repeat(50));
    println!(
        "Starting from {} seed URLs, visiting at most {} pages",
        crawler_config.seed_urls.len(),
        crawler_config.max_pages
    );

    // Raw HTML retrieval ignores the text cap.
    let fetcher = HttpPageFetcher::new(Duration::from_secs(crawler_config.timeout_secs), usize::MAX)?;
    let report = Crawler::new(fetcher, crawler_config).run().await;

    println!(
        "\nVisited {} pages ({} failed), collected {} unique URLs",
        report.pages_visited,
        report.pages_failed,
        report.urls.len()
    );

    write_corpus(&output, &report.urls)?;
    println!("Saved {} URLs to {}", report.urls.len(), output.display());

    Ok(())
}
