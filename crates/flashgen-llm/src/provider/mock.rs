//! Mock LLM provider for testing

use crate::client::{LLMClient, LLMRequest, LLMResponse};
use crate::error::{LLMError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

enum MockBehavior {
    Respond(String),
    Fail { status: Option<u16>, message: String },
}

/// Mock LLM provider for testing.
///
/// Records every request it receives so tests can assert on what was sent
/// and how many calls were made.
pub struct MockProvider {
    name: String,
    behavior: MockBehavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<LLMRequest>>,
}

impl MockProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self::with_response("Mock LLM response".to_string())
    }

    /// Create with custom default response
    pub fn with_response(response: String) -> Self {
        Self {
            name: "mock".to_string(),
            behavior: MockBehavior::Respond(response),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a provider whose every call fails like an upstream API error
    pub fn failing(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            name: "mock".to_string(),
            behavior: MockBehavior::Fail {
                status,
                message: message.into(),
            },
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Most recent request received
    pub fn last_request(&self) -> Option<LLMRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMClient for MockProvider {
    async fn call(&self, request: LLMRequest) -> Result<LLMResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let model = request.model.clone();
        *self.last_request.lock().unwrap_or_else(|e| e.into_inner()) = Some(request);

        match &self.behavior {
            MockBehavior::Respond(content) => Ok(LLMResponse::new(content.clone(), model)
                .with_tokens(10)
                .with_finish_reason("stop".to_string())),
            MockBehavior::Fail { status, message } => Err(LLMError::ApiCallFailed {
                status: *status,
                message: message.clone(),
            }),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
