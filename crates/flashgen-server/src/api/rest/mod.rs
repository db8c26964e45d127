//! REST API implementation
//!
//! - types: Request/response type definitions
//! - extractors: Body and caller-identity extractors
//! - handlers: API endpoint handlers
//! - router: Router creation and configuration
//! - tests: Unit tests for request parsing

mod extractors;
mod handlers;
mod router;
pub mod types;

// Re-export public API
pub use extractors::{identity_from_headers, ClientIdentity, JsonExtractor, RawJson};
pub use router::create_router;
pub use types::{AppState, HealthResponse};
