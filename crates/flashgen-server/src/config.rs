//! Server configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Where saved decks are kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DeckStoreType {
    /// Process memory; lost on restart
    Memory,
    /// A single JSON file on disk
    File {
        /// Path of the deck file (default: "data/decks.json")
        #[serde(default = "default_deck_path")]
        path: PathBuf,
    },
}

fn default_deck_path() -> PathBuf {
    PathBuf::from("data/decks.json")
}

impl Default for DeckStoreType {
    fn default() -> Self {
        DeckStoreType::Memory
    }
}

/// Model service settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Credential for the model service. Generation is refused when absent.
    pub api_key: Option<String>,

    /// Override for OpenAI-compatible endpoints
    pub base_url: Option<String>,

    pub model: String,

    pub temperature: f32,

    /// Outbound request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.6,
            timeout_secs: 60,
        }
    }
}

// Keep the credential out of logs
impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Per-identity generation quota
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Generations allowed per identity per window
    pub daily_limit: u32,

    /// Window length in seconds
    pub window_secs: i64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            daily_limit: flashgen_core::rate_limit::DEFAULT_DAILY_LIMIT,
            window_secs: flashgen_core::rate_limit::DEFAULT_WINDOW_SECS,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Log level
    pub log_level: String,

    /// Model service
    pub llm: LlmConfig,

    /// Generation quota
    pub rate_limit: RateLimitConfig,

    /// Deck storage
    pub deck_store: DeckStoreType,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            llm: LlmConfig::default(),
            rate_limit: RateLimitConfig::default(),
            deck_store: DeckStoreType::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from("config/server")
    }

    /// Load configuration from the file at `name` (any extension the
    /// `config` crate understands, optional) layered under `FLASHGEN_*`
    /// environment variables.
    ///
    /// Nested keys use a double underscore, e.g. `FLASHGEN_LLM__MODEL`.
    pub fn load_from(name: &str) -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(config::File::with_name(name).required(false))
            .add_source(
                config::Environment::with_prefix("FLASHGEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build config: {}", e))?;

        let mut config: Self = cfg
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))?;

        config.llm.apply_env_fallback(
            std::env::var("OPENAI_API_KEY").ok(),
            std::env::var("OPENAI_BASE_URL").ok(),
        );

        Ok(config)
    }

    /// Filter used when `RUST_LOG` is unset: every workspace crate at
    /// `log_level`, request traces at debug.
    pub fn default_log_directives(&self) -> String {
        format!(
            "flashgen_server={level},flashgen_core={level},flashgen_llm={level},\
             flashgen_repository={level},tower_http=debug",
            level = self.log_level
        )
    }
}

impl LlmConfig {
    /// Fill unset fields from the conventional `OPENAI_*` variables.
    ///
    /// Explicit configuration wins; blank values count as unset.
    pub fn apply_env_fallback(&mut self, api_key: Option<String>, base_url: Option<String>) {
        fn non_blank(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        self.api_key = non_blank(self.api_key.take()).or_else(|| non_blank(api_key));
        self.base_url = non_blank(self.base_url.take()).or_else(|| non_blank(base_url));
    }
}
