//! Subcommand implementations and the shared assistant wiring.

pub mod ask;
pub mod chat;
pub mod crawl;
pub mod onboard;
pub mod serve;
pub mod sources;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use fifi_agent::Assistant;
use fifi_config::AppConfig;
use fifi_memory::ConversationManager;
use fifi_web::HttpPageFetcher;

/// Load the config file plus environment overrides.
pub fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

/// Fail early with setup instructions when no API key can be found.
pub fn require_api_key(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let provider_key = config
        .providers
        .get(&config.default_provider)
        .and_then(|p| p.api_key.as_ref())
        .is_some();
    if config.has_api_key() || provider_key || config.default_provider == "ollama" {
        return Ok(());
    }

    eprintln!();
    eprintln!("  ERROR: No API key configured!");
    eprintln!();
    eprintln!("  Set one of these environment variables:");
    eprintln!("    FIFI_API_KEY   = 'sk-...'");
    eprintln!("    OPENAI_API_KEY = 'sk-...'");
    eprintln!();
    eprintln!("  Or put the key in '{}' next to where you run fifi,", config.api_key_file);
    eprintln!("  or add it to your config file:");
    eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
    eprintln!();
    Err("No API key found. See above for setup instructions.".into())
}

/// Wire up provider, fetcher, history and corpus into an assistant.
pub fn build_assistant(config: &AppConfig) -> Result<Assistant, Box<dyn std::error::Error>> {
    let router = fifi_providers::build_from_config(config);
    let provider = router
        .default()
        .ok_or_else(|| format!("Provider '{}' is not registered", router.default_name()))?;

    let fetcher = HttpPageFetcher::new(
        Duration::from_secs(config.retrieval.fetch_timeout_secs),
        config.retrieval.page_text_chars,
    )?;
    let history = ConversationManager::new(config.conversation.max_turns);
    let corpus = fifi_knowledge::load_corpus(Path::new(&config.retrieval.corpus_path))?;

    Ok(Assistant::from_config(
        config,
        fifi_providers::resolve_model(config),
        provider,
        Arc::new(fetcher),
        Arc::new(history),
        corpus,
    ))
}
