//! Server error types
//!
//! Every failure of a request funnels through [`ServerError`]. The
//! classifier decides status and caller-facing message, and
//! [`ServerError::is_operational`] decides whether the failure is logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use flashgen_core::ValidationError;
use flashgen_llm::LLMError;
use flashgen_repository::RepositoryError;
use serde_json::json;
use std::fmt;

/// Message for an unparseable request body
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON in request body.";

/// Message when the model service itself throttles us
pub const UPSTREAM_RATE_LIMIT_MESSAGE: &str =
    "Too many requests to the AI service. Try again in a minute.";

/// Fallback message for upstream failures whose details stay server-side
pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "AI service temporarily unavailable. Try again later or shorten the text.";

/// Server error type
#[derive(Debug)]
pub enum ServerError {
    /// Request body is not valid JSON
    InvalidJson,

    /// Caller input failed validation
    Validation(ValidationError),

    /// Local per-identity quota exhausted
    RateLimited {
        limit: u32,
        reset_at: DateTime<Utc>,
    },

    /// Model call or model output failure
    Generation(LLMError),

    /// Deck storage failure
    Repository(RepositoryError),

    /// Invalid request
    InvalidRequest(String),

    /// Not found
    NotFound(String),
}

impl ServerError {
    /// Map the failure to a status and caller-facing message
    pub fn classify(&self) -> (StatusCode, String) {
        match self {
            ServerError::InvalidJson => (StatusCode::BAD_REQUEST, INVALID_JSON_MESSAGE.to_string()),
            ServerError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ServerError::RateLimited { limit, .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                format!("Daily generation limit reached ({}). Try again later.", limit),
            ),
            ServerError::Generation(err) if err.is_rate_limited() => (
                StatusCode::TOO_MANY_REQUESTS,
                UPSTREAM_RATE_LIMIT_MESSAGE.to_string(),
            ),
            ServerError::Generation(err) => {
                let message = match err {
                    LLMError::NotConfigured
                    | LLMError::EmptyResponse
                    | LLMError::UnparsableOutput
                    | LLMError::NoCardsProduced => err.to_string(),
                    LLMError::ApiCallFailed { .. }
                    | LLMError::HttpError(_)
                    | LLMError::InvalidResponse(_)
                    | LLMError::InvalidConfiguration(_) => {
                        SERVICE_UNAVAILABLE_MESSAGE.to_string()
                    }
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            ServerError::Repository(err) => {
                let status = match err {
                    RepositoryError::NotADeckBackup | RepositoryError::IdMismatch { .. } => {
                        StatusCode::BAD_REQUEST
                    }
                    RepositoryError::Io(_) | RepositoryError::Serialization(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, err.to_string())
            }
            ServerError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        }
    }

    /// Whether this failure is an operational incident worth logging.
    ///
    /// Caller mistakes and quota rejections are expected and stay out of the logs.
    pub fn is_operational(&self) -> bool {
        match self {
            ServerError::Generation(_) => true,
            ServerError::Repository(err) => matches!(
                err,
                RepositoryError::Io(_) | RepositoryError::Serialization(_)
            ),
            ServerError::InvalidJson
            | ServerError::Validation(_)
            | ServerError::RateLimited { .. }
            | ServerError::InvalidRequest(_)
            | ServerError::NotFound(_) => false,
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::InvalidJson => write!(f, "Invalid request: malformed JSON body"),
            ServerError::Validation(err) => write!(f, "Validation error: {}", err),
            ServerError::RateLimited { limit, reset_at } => {
                write!(f, "Rate limited: limit {} until {}", limit, reset_at)
            }
            ServerError::Generation(err) => write!(f, "Generation error: {}", err),
            ServerError::Repository(err) => write!(f, "Repository error: {}", err),
            ServerError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ServerError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Validation(err) => Some(err),
            ServerError::Generation(err) => Some(err),
            ServerError::Repository(err) => Some(err),
            _ => None,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if self.is_operational() {
            tracing::error!(error = %self, "request failed");
        }

        let (status, error_message) = self.classify();
        let mut body = json!({ "error": error_message });

        if let ServerError::RateLimited { reset_at, .. } = &self {
            body["rateLimitRemaining"] = json!(0);
            body["resetAt"] = json!(reset_at.timestamp_millis());
        }

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ServerError {
    fn from(err: ValidationError) -> Self {
        ServerError::Validation(err)
    }
}

impl From<LLMError> for ServerError {
    fn from(err: LLMError) -> Self {
        ServerError::Generation(err)
    }
}

impl From<RepositoryError> for ServerError {
    fn from(err: RepositoryError) -> Self {
        ServerError::Repository(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use http_body_util::BodyExt;

    async fn body_json(err: ServerError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_validation_maps_to_bad_request_with_message() {
        let err = ServerError::from(ValidationError::TooShort { min: 50 });
        let (status, message) = err.classify();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, ValidationError::TooShort { min: 50 }.to_string());
        assert!(!err.is_operational());
    }

    #[test]
    fn test_invalid_json() {
        let (status, message) = ServerError::InvalidJson.classify();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, INVALID_JSON_MESSAGE);
        assert!(!ServerError::InvalidJson.is_operational());
    }

    #[test]
    fn test_local_rate_limit_names_limit() {
        let err = ServerError::RateLimited {
            limit: 3,
            reset_at: Utc::now(),
        };
        let (status, message) = err.classify();
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert!(message.contains("(3)"));
        assert!(!err.is_operational());
    }

    #[test]
    fn test_upstream_rate_limit() {
        let err = ServerError::from(LLMError::ApiCallFailed {
            status: Some(429),
            message: "quota".to_string(),
        });
        let (status, message) = err.classify();
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(message, UPSTREAM_RATE_LIMIT_MESSAGE);
        assert!(err.is_operational());
    }

    #[test]
    fn test_upstream_failure_uses_generic_message() {
        let err = ServerError::from(LLMError::ApiCallFailed {
            status: Some(500),
            message: "secret upstream details".to_string(),
        });
        let (status, message) = err.classify();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, SERVICE_UNAVAILABLE_MESSAGE);
        assert!(err.is_operational());
    }

    #[test]
    fn test_model_output_errors_are_distinguished() {
        let (status, unparsable) = ServerError::from(LLMError::UnparsableOutput).classify();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let (_, no_cards) = ServerError::from(LLMError::NoCardsProduced).classify();
        assert_ne!(unparsable, no_cards);

        let (_, not_configured) = ServerError::from(LLMError::NotConfigured).classify();
        assert_eq!(not_configured, LLMError::NotConfigured.to_string());
    }

    #[test]
    fn test_repository_errors() {
        let (status, _) = ServerError::from(RepositoryError::NotADeckBackup).classify();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let io = RepositoryError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        let err = ServerError::from(io);
        assert_eq!(err.classify().0, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.is_operational());
    }

    #[test]
    fn test_display() {
        let err = ServerError::NotFound("deck d1".to_string());
        assert_eq!(err.to_string(), "Not found: deck d1");
        let err = ServerError::InvalidRequest("bad backup".to_string());
        assert_eq!(err.to_string(), "Invalid request: bad backup");
    }

    #[tokio::test]
    async fn test_rate_limited_body_carries_quota_fields() {
        let reset_at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let (status, body) = body_json(ServerError::RateLimited { limit: 3, reset_at }).await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["rateLimitRemaining"], 0);
        assert_eq!(body["resetAt"], 1_700_000_000_000i64);
        assert!(body["error"].as_str().unwrap().contains("3"));
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let (status, body) = body_json(ServerError::InvalidJson).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": INVALID_JSON_MESSAGE }));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ServerError>();
    }
}
