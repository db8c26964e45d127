//! Flashgen Core - Core types and request guards for flashcard generation
//!
//! This crate provides the pieces of the generation pipeline that do not talk
//! to a model:
//! - Data model (cards, decks, generation request/response)
//! - Input sanitization and validation
//! - Per-identity rate limiting
//! - Error types

pub mod error;
pub mod rate_limit;
pub mod types;
pub mod validator;

// Re-export commonly used types
pub use error::{Result, ValidationError};
pub use rate_limit::{
    Clock, InMemoryRateLimiter, ManualClock, RateLimitDecision, RateLimitRecord, RateLimiter,
    SystemClock,
};
pub use types::{new_card_id, Card, Deck, GenerateRequest, GenerateResponse};
pub use validator::{sanitize_text, validate};
