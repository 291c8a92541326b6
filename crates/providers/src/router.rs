//! Provider router: builds providers from config and picks the active one.

use std::collections::HashMap;
use std::sync::Arc;

use fifi_config::AppConfig;
use fifi_core::provider::Provider;
use tracing::debug;

use crate::openai_compat::OpenAiCompatProvider;

/// Named providers plus the one used when nothing else is asked for.
pub struct ProviderRouter {
    providers: HashMap<String, Arc<dyn Provider>>,
    default_provider: String,
}

impl ProviderRouter {
    pub fn new(default_provider: impl Into<String>) -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider.into(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn Provider>) {
        self.providers.insert(name.into(), provider);
    }

    /// The default provider.
    pub fn default(&self) -> Option<Arc<dyn Provider>> {
        self.providers.get(&self.default_provider).cloned()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }

    pub fn default_name(&self) -> &str {
        &self.default_provider
    }

    /// Registered provider names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

/// Build providers from configuration.
///
/// Every `[providers.<name>]` table becomes an OpenAI-compatible provider; the
/// default provider is always registered, falling back to the top-level key.
pub fn build_from_config(config: &AppConfig) -> ProviderRouter {
    let mut router = ProviderRouter::new(&config.default_provider);

    for (name, provider_config) in &config.providers {
        let api_key = provider_config
            .api_key
            .clone()
            .or_else(|| config.api_key.clone())
            .unwrap_or_default();
        let provider = build_provider(name, provider_config.api_url.as_deref(), api_key);
        router.register(name.clone(), Arc::new(provider));
    }

    if router.get(&config.default_provider).is_none() {
        let api_key = config.api_key.clone().unwrap_or_default();
        let provider = build_provider(&config.default_provider, None, api_key);
        router.register(config.default_provider.clone(), Arc::new(provider));
    }

    debug!(default = %config.default_provider, providers = ?router.list(), "Built provider router");
    router
}

/// The model for the default provider: its own `default_model` if set,
/// otherwise the top-level one.
pub fn resolve_model(config: &AppConfig) -> String {
    config
        .providers
        .get(&config.default_provider)
        .and_then(|p| p.default_model.clone())
        .unwrap_or_else(|| config.default_model.clone())
}

/// A local Ollama server needs no key; every other provider gets the key as given.
fn build_provider(name: &str, api_url: Option<&str>, api_key: String) -> OpenAiCompatProvider {
    match (name, api_url) {
        ("ollama", _) if api_key.is_empty() => OpenAiCompatProvider::ollama(api_url),
        ("openai", None) => OpenAiCompatProvider::openai(api_key),
        (_, url) => {
            let base_url = url
                .map(str::to_string)
                .unwrap_or_else(|| default_base_url(name));
            OpenAiCompatProvider::new(name, base_url, api_key)
        }
    }
}

/// Base URLs of well-known OpenAI-compatible services.
fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "openai" => "https://api.openai.com/v1".into(),
        "openrouter" => "https://openrouter.ai/api/v1".into(),
        "ollama" => "http://localhost:11434/v1".into(),
        "groq" => "https://api.groq.com/openai/v1".into(),
        "together" => "https://api.together.xyz/v1".into(),
        "vllm" => "http://localhost:8000/v1".into(),
        _ => format!("https://{provider_name}.api.example.com/v1"),
    }
}
