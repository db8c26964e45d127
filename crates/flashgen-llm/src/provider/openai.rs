//! OpenAI provider implementation
//!
//! Works with any service exposing an OpenAI-compatible
//! `/chat/completions` endpoint.

use crate::client::{LLMClient, LLMRequest, LLMResponse};
use crate::error::{LLMError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI chat-completions provider
pub struct OpenAIProvider {
    api_key: String,
    base_url: String,
    client: Client,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create with custom base URL (e.g., for a compatible proxy)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Bound every outbound call by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder().timeout(timeout).build().map_err(|e| {
            LLMError::InvalidConfiguration(format!("Failed to build HTTP client: {}", e))
        })?;
        Ok(self)
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl LLMClient for OpenAIProvider {
    async fn call(&self, request: LLMRequest) -> Result<LLMResponse> {
        // The whole instruction travels in a single user message
        let messages = vec![json!({
            "role": "user",
            "content": request.prompt
        })];

        // Build request body
        let mut body = json!({
            "model": request.model,
            "messages": messages,
        });

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(format) = request.response_format {
            body["response_format"] = json!({ "type": format.as_str() });
        }

        // Make API call
        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let resp_text = resp.text().await.map_err(|e| LLMError::ApiCallFailed {
            status: Some(status.as_u16()),
            message: format!("Failed to read response: {}", e),
        })?;

        if !status.is_success() {
            return Err(LLMError::ApiCallFailed {
                status: Some(status.as_u16()),
                message: format!("OpenAI API error ({}): {}", status, resp_text),
            });
        }

        // Parse response
        let resp_json: serde_json::Value = serde_json::from_str(&resp_text)
            .map_err(|e| LLMError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        // A null or missing content is an empty answer, not a malformed envelope
        let content = resp_json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string();

        let finish_reason = resp_json["choices"][0]["finish_reason"]
            .as_str()
            .unwrap_or("stop")
            .to_string();

        let tokens_used = resp_json["usage"]["total_tokens"]
            .as_u64()
            .map(|total| u32::try_from(total).unwrap_or(u32::MAX))
            .unwrap_or(0);

        tracing::debug!(
            model = %request.model,
            tokens_used,
            finish_reason = %finish_reason,
            "OpenAI call completed"
        );

        Ok(LLMResponse::new(content, request.model)
            .with_tokens(tokens_used)
            .with_finish_reason(finish_reason))
    }

    fn name(&self) -> &str {
        "openai"
    }
}
