//! API type definitions

use serde::Serialize;

pub use crate::app::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether a model client is available for generation
    pub generation_enabled: bool,
}
