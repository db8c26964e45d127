//! Error types for Flashgen LLM module

use thiserror::Error;

/// Result type alias for LLM operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// LLM module errors
#[derive(Debug, Error)]
pub enum LLMError {
    /// No credentials configured for the model service
    #[error("The AI service is not configured on the server.")]
    NotConfigured,

    /// External API returned an error or could not be reached
    #[error("External API call failed: {message}")]
    ApiCallFailed {
        /// HTTP status returned by the service, if any
        status: Option<u16>,
        message: String,
    },

    /// Transport failure before the service produced a status
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Service answered but the envelope was not understood
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Service answered without any content
    #[error("Empty response from the model. Please try again.")]
    EmptyResponse,

    /// Model content was not valid structured data
    #[error("Could not parse the model response.")]
    UnparsableOutput,

    /// Model content parsed but yielded no usable cards
    #[error("The model returned no cards. Try different text or a smaller count.")]
    NoCardsProduced,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

}

impl LLMError {
    /// HTTP status reported by the upstream service, when the failure carries one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LLMError::ApiCallFailed { status, .. } => *status,
            LLMError::HttpError(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the upstream service asked us to slow down
    pub fn is_rate_limited(&self) -> bool {
        self.status_code() == Some(429)
    }
}
