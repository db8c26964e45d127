//! Card generation through an LLM client

use crate::client::{LLMClient, LLMRequest, ResponseFormat};
use crate::error::{LLMError, Result};
use crate::generator::card_extractor::extract_cards;
use crate::generator::prompt_templates::build_card_prompt;
use flashgen_core::Card;
use std::sync::Arc;

/// Configuration for card generation
#[derive(Debug, Clone)]
pub struct CardGeneratorConfig {
    /// Model to use for generation
    pub model: String,
    /// Sampling temperature; moderate so wording varies between runs
    pub temperature: f32,
    /// Output token budget per requested card
    pub tokens_per_card: u32,
    /// Hard cap on the output token budget
    pub max_tokens_cap: u32,
}

impl Default for CardGeneratorConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.6,
            tokens_per_card: 220,
            max_tokens_cap: 4000,
        }
    }
}

impl CardGeneratorConfig {
    /// Create a new configuration with a specific model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Output token budget for `count` cards: `min(tokens_per_card * count, cap)`
    pub fn max_tokens_for(&self, count: usize) -> u32 {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        self.tokens_per_card
            .saturating_mul(count)
            .min(self.max_tokens_cap)
    }
}

/// Card generator using LLM.
///
/// Holds no client when the model service is not configured; every call then
/// fails with [`LLMError::NotConfigured`] before anything goes out.
pub struct CardGenerator {
    client: Option<Arc<dyn LLMClient>>,
    config: CardGeneratorConfig,
}

impl CardGenerator {
    /// Create a new card generator
    pub fn new(client: Arc<dyn LLMClient>, config: CardGeneratorConfig) -> Self {
        Self {
            client: Some(client),
            config,
        }
    }

    /// Create with default configuration
    pub fn with_defaults(client: Arc<dyn LLMClient>) -> Self {
        Self::new(client, CardGeneratorConfig::default())
    }

    /// Create a generator for a deployment without model credentials
    pub fn unconfigured(config: CardGeneratorConfig) -> Self {
        Self {
            client: None,
            config,
        }
    }

    /// Whether a model client is available
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn config(&self) -> &CardGeneratorConfig {
        &self.config
    }

    /// Ask the model for `count` cards about `text` and return its raw output.
    ///
    /// Exactly one outbound call, no retry. Upstream failures propagate
    /// unchanged, including their HTTP status.
    pub async fn generate(&self, text: &str, count: usize) -> Result<String> {
        let client = self.client.as_ref().ok_or(LLMError::NotConfigured)?;

        let request = LLMRequest::new(build_card_prompt(text, count), self.config.model.clone())
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens_for(count))
            .with_response_format(ResponseFormat::JsonObject);

        let response = client.call(request).await?;

        if response.content.trim().is_empty() {
            return Err(LLMError::EmptyResponse);
        }

        tracing::debug!(
            client = client.name(),
            tokens_used = response.tokens_used,
            finish_reason = %response.finish_reason,
            "model returned card payload"
        );

        Ok(response.content)
    }

    /// Generate and extract cards in one step
    pub async fn generate_cards(&self, text: &str, count: usize) -> Result<Vec<Card>> {
        let raw = self.generate(text, count).await?;
        extract_cards(&raw, count)
    }
}
