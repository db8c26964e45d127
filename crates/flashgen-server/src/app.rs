//! Application state initialization
//!
//! Converts server configuration into the limiter, generator and deck store
//! the handlers share.

use crate::config::{DeckStoreType, ServerConfig};
use crate::service::GenerationService;
use anyhow::Result;
use flashgen_core::InMemoryRateLimiter;
use flashgen_llm::{CardGenerator, CardGeneratorConfig, OpenAIProvider};
use flashgen_repository::{DeckRepository, FileSystemDeckRepository, InMemoryDeckRepository};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub generation: Arc<GenerationService>,
    pub decks: Arc<dyn DeckRepository>,
}

impl AppState {
    pub fn new(generation: GenerationService, decks: Arc<dyn DeckRepository>) -> Self {
        Self {
            generation: Arc::new(generation),
            decks,
        }
    }
}

/// Build the application state from configuration
pub fn build_state(config: &ServerConfig) -> Result<AppState> {
    let generator = build_generator(config)?;

    let window = chrono::Duration::try_seconds(config.rate_limit.window_secs).ok_or_else(|| {
        anyhow::anyhow!(
            "rate_limit.window_secs out of range: {}",
            config.rate_limit.window_secs
        )
    })?;
    if window <= chrono::Duration::zero() {
        return Err(anyhow::anyhow!("rate_limit.window_secs must be positive"));
    }
    if config.rate_limit.daily_limit == 0 {
        return Err(anyhow::anyhow!("rate_limit.daily_limit must be positive"));
    }
    let limiter = Arc::new(InMemoryRateLimiter::new(config.rate_limit.daily_limit, window));
    info!(
        daily_limit = config.rate_limit.daily_limit,
        window_secs = config.rate_limit.window_secs,
        "rate limiter initialized"
    );

    let decks: Arc<dyn DeckRepository> = match &config.deck_store {
        DeckStoreType::Memory => {
            info!("Using in-memory deck store");
            Arc::new(InMemoryDeckRepository::new())
        }
        DeckStoreType::File { path } => {
            info!("Using file deck store at {}", path.display());
            Arc::new(FileSystemDeckRepository::new(path))
        }
    };

    Ok(AppState::new(GenerationService::new(limiter, generator), decks))
}

fn build_generator(config: &ServerConfig) -> Result<CardGenerator> {
    let llm = &config.llm;
    let generator_config =
        CardGeneratorConfig::new(llm.model.clone()).with_temperature(llm.temperature);

    let Some(api_key) = llm.api_key.clone() else {
        warn!("No model API key configured; generation requests will fail");
        return Ok(CardGenerator::unconfigured(generator_config));
    };

    let provider = match &llm.base_url {
        Some(base_url) => OpenAIProvider::with_base_url(api_key, base_url.clone()),
        None => OpenAIProvider::new(api_key),
    }
    .with_timeout(Duration::from_secs(llm.timeout_secs))?;

    info!(
        model = %llm.model,
        base_url = provider.base_url(),
        "model client initialized"
    );

    Ok(CardGenerator::new(Arc::new(provider), generator_config))
}
