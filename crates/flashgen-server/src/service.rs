//! Generation pipeline
//!
//! One generation request runs validate, then rate-limit, then the model
//! call. Validation failures never consume quota; a request that passes the
//! limiter has spent its use whether or not the model call succeeds.

use crate::error::ServerError;
use flashgen_core::{validate, GenerateResponse, RateLimiter};
use flashgen_llm::CardGenerator;
use serde_json::Value;
use std::sync::Arc;

/// Turns request payloads into generated cards under a per-identity quota
pub struct GenerationService {
    limiter: Arc<dyn RateLimiter>,
    generator: CardGenerator,
}

impl GenerationService {
    pub fn new(limiter: Arc<dyn RateLimiter>, generator: CardGenerator) -> Self {
        Self { limiter, generator }
    }

    pub fn generator(&self) -> &CardGenerator {
        &self.generator
    }

    /// Handle one parsed request body on behalf of `identity`
    pub async fn generate(
        &self,
        payload: &Value,
        identity: &str,
    ) -> Result<GenerateResponse, ServerError> {
        let request = validate(payload.get("text"), payload.get("count"))?;

        let decision = self.limiter.check(identity);
        if !decision.allowed {
            tracing::info!(identity, reset_at = %decision.reset_at, "generation quota exhausted");
            return Err(ServerError::RateLimited {
                limit: self.limiter.limit(),
                reset_at: decision.reset_at,
            });
        }

        let cards = self
            .generator
            .generate_cards(&request.text, request.count)
            .await?;

        tracing::info!(
            identity,
            requested = request.count,
            produced = cards.len(),
            remaining = decision.remaining,
            "generated cards"
        );

        Ok(GenerateResponse {
            cards,
            rate_limit_remaining: decision.remaining,
        })
    }
}
