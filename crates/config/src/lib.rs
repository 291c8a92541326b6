//! Configuration loading, validation, and management for FIFI.
//!
//! Loads configuration from `~/.fifi/config.toml` with environment variable
//! and API-key-file overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.fifi/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key (can be overridden per-provider)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// File holding the API key, read when no key is configured otherwise
    #[serde(default = "default_api_key_file")]
    pub api_key_file: String,

    /// Default LLM provider
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Default model
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Default temperature
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Default max tokens per LLM response
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,

    /// Retrieval (ranking, fetching, context budget)
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Conversation history limits
    #[serde(default)]
    pub conversation: ConversationConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// URL crawler configuration
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Assistant identity (system prompt)
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Provider-specific configurations
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

fn default_api_key_file() -> String {
    "api_key.txt".into()
}
fn default_provider() -> String {
    "openai".into()
}
fn default_model() -> String {
    "gpt-3.5-turbo".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    1000
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_key_file", &self.api_key_file)
            .field("default_provider", &self.default_provider)
            .field("default_model", &self.default_model)
            .field("default_temperature", &self.default_temperature)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("retrieval", &self.retrieval)
            .field("conversation", &self.conversation)
            .field("gateway", &self.gateway)
            .field("crawler", &self.crawler)
            .field("identity", &self.identity)
            .field("providers", &self.providers)
            .finish()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("default_model", &self.default_model)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Line-oriented URL corpus produced by the crawler
    #[serde(default = "default_corpus_path")]
    pub corpus_path: String,

    /// How many ranked URLs to keep per query
    #[serde(default = "default_rank_limit")]
    pub rank_limit: usize,

    /// How many of the ranked URLs to actually fetch
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,

    /// Characters of each fetched page included in the context block
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,

    /// Characters of visible text kept by the page fetcher
    #[serde(default = "default_page_text_chars")]
    pub page_text_chars: usize,

    /// Per-page fetch timeout
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_corpus_path() -> String {
    "iu_southbend_urls.txt".into()
}
fn default_rank_limit() -> usize {
    8
}
fn default_fetch_limit() -> usize {
    3
}
fn default_snippet_chars() -> usize {
    1500
}
fn default_page_text_chars() -> usize {
    3000
}
fn default_fetch_timeout_secs() -> u64 {
    10
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            corpus_path: default_corpus_path(),
            rank_limit: default_rank_limit(),
            fetch_limit: default_fetch_limit(),
            snippet_chars: default_snippet_chars(),
            page_text_chars: default_page_text_chars(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Turns of history included in each prompt
    #[serde(default = "default_prompt_window")]
    pub prompt_window: usize,

    /// Hard cap on stored turns per session
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
}

fn default_prompt_window() -> usize {
    6
}
fn default_max_turns() -> usize {
    10
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            prompt_window: default_prompt_window(),
            max_turns: default_max_turns(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    5000
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Where the crawl starts
    #[serde(default = "default_seed_urls")]
    pub seed_urls: Vec<String>,

    /// A discovered URL is collected when its host contains one of these
    #[serde(default = "default_collect_hosts")]
    pub collect_hosts: Vec<String>,

    /// A collected URL is also visited when its host contains one of these
    #[serde(default = "default_follow_hosts")]
    pub follow_hosts: Vec<String>,

    /// Maximum number of pages fetched during one crawl
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Politeness delay between page fetches
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_seed_urls() -> Vec<String> {
    [
        "https://www.iusb.edu",
        "https://www.iusb.edu/academics/index.html",
        "https://www.iusb.edu/about/index.html",
        "https://arts.iusb.edu/",
        "https://education.iusb.edu/",
        "https://business.iusb.edu/",
        "https://nursing.iusb.edu/",
        "https://science.iusb.edu/",
        "https://liberal-arts.iusb.edu/",
        "https://www.iusb.edu/computer-science/",
        "https://www.iusb.edu/mathematics/",
        "https://cs.iusb.edu/",
        "https://math.iusb.edu/",
        "https://academics.iusb.edu/",
        "https://students.iusb.edu/",
        "https://library.iusb.edu/",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
fn default_collect_hosts() -> Vec<String> {
    vec!["iusb.edu".into(), "southbend".into()]
}
fn default_follow_hosts() -> Vec<String> {
    vec!["iusb.edu".into()]
}
fn default_max_pages() -> usize {
    150
}
fn default_delay_ms() -> u64 {
    500
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seed_urls: default_seed_urls(),
            collect_hosts: default_collect_hosts(),
            follow_hosts: default_follow_hosts(),
            max_pages: default_max_pages(),
            delay_ms: default_delay_ms(),
            timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Replace the built-in system instructions entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt_override: Option<String>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.fifi/config.toml).
    ///
    /// API key resolution, first hit wins:
    /// 1. `api_key` in the config file
    /// 2. `FIFI_API_KEY`, then `OPENAI_API_KEY`
    /// 3. the contents of `api_key_file`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("FIFI_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }

        if config.api_key.is_none() {
            config.api_key = read_key_file(Path::new(&config.api_key_file))?;
        }

        if let Ok(provider) = std::env::var("FIFI_PROVIDER") {
            config.default_provider = provider;
        }

        if let Ok(model) = std::env::var("FIFI_MODEL") {
            config.default_model = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".fifi")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_temperature < 0.0 || self.default_temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "default_temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.retrieval.rank_limit == 0 || self.retrieval.fetch_limit == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval.rank_limit and retrieval.fetch_limit must be > 0".into(),
            ));
        }

        if self.conversation.max_turns == 0 {
            return Err(ConfigError::ValidationError(
                "conversation.max_turns must be > 0".into(),
            ));
        }

        if self.conversation.prompt_window > self.conversation.max_turns {
            return Err(ConfigError::ValidationError(
                "conversation.prompt_window cannot exceed conversation.max_turns".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config, environment, or key file).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_file: default_api_key_file(),
            default_provider: default_provider(),
            default_model: default_model(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
            retrieval: RetrievalConfig::default(),
            conversation: ConversationConfig::default(),
            gateway: GatewayConfig::default(),
            crawler: CrawlerConfig::default(),
            identity: IdentityConfig::default(),
            providers: HashMap::new(),
        }
    }
}

/// Read a trimmed API key from `path`. A missing or blank file yields `None`.
fn read_key_file(path: &Path) -> Result<Option<String>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let key = content.trim();
    if key.is_empty() {
        Ok(None)
    } else {
        tracing::debug!("Loaded API key from {}", path.display());
        Ok(Some(key.to_string()))
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
