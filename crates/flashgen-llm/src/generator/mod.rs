//! Flashcard generation from study text
//!
//! - Prompt templates: the bounded instruction template sent to the model
//! - Card generator: one model call under a card-scaled token budget
//! - Card extractor: parsing and repairing the model's raw output
//!
//! # Example
//! ```no_run
//! use flashgen_llm::{CardGenerator, OpenAIProvider};
//! use std::sync::Arc;
//!
//! # async fn example() -> flashgen_llm::Result<()> {
//! let provider = Arc::new(OpenAIProvider::new("your-api-key".to_string()));
//! let generator = CardGenerator::with_defaults(provider);
//!
//! let text = "Photosynthesis is the process by which plants convert light into chemical energy.";
//! let cards = generator.generate_cards(text, 10).await?;
//!
//! for card in cards {
//!     println!("{} -> {}", card.question, card.answer);
//! }
//! # Ok(())
//! # }
//! ```

pub mod card_extractor;
pub mod card_generator;
pub mod prompt_templates;

// Re-export main types
pub use card_extractor::extract_cards;
pub use card_generator::{CardGenerator, CardGeneratorConfig};
pub use prompt_templates::build_card_prompt;
