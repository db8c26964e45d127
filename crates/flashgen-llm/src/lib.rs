//! Flashgen LLM Integration
//!
//! This crate turns validated study text into flashcards with an external
//! text-generation model:
//! - Client abstraction over chat-completion style providers
//! - Prompt building with a bounded, static instruction template
//! - Card generation under a token budget scaled by card count
//! - Robust extraction of cards from the model's raw output

// Re-export core types
pub use client::{LLMClient, LLMRequest, LLMResponse, ResponseFormat};
pub use error::{LLMError, Result};

// Re-export providers
pub use provider::{MockProvider, OpenAIProvider};

// Re-export generators
pub use generator::{build_card_prompt, extract_cards, CardGenerator, CardGeneratorConfig};

pub mod client;
pub mod error;
pub mod generator;
pub mod provider;
