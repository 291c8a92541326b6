//! `fifi sources`: show which corpus pages a question would draw on.

use std::path::Path;

use fifi_knowledge::{RelevanceRanker, classify, load_corpus};

pub async fn run(query: String, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let corpus = load_corpus(Path::new(&config.retrieval.corpus_path))?;

    if let Some(entry) = classify(&query) {
        println!("Static answer: {}", entry.topic);
        println!();
    }

    let scored = RelevanceRanker::new(limit).score(&query, &corpus);
    if scored.is_empty() {
        println!("No relevant pages among {} corpus URLs.", corpus.len());
        return Ok(());
    }

    for (i, page) in scored.iter().enumerate() {
        println!("{:>2}. [{}] {}", i + 1, page.score, page.url);
    }
    Ok(())
}
