//! Data model shared by the generation pipeline and deck storage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One question/answer study unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Locally assigned opaque identifier
    pub id: String,

    pub question: String,

    pub answer: String,
}

impl Card {
    /// Create a card with a freshly generated id
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: new_card_id(),
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Generate an opaque card identifier.
///
/// Ids only need to be unique within the process; a random v4 UUID is used.
pub fn new_card_id() -> String {
    Uuid::new_v4().to_string()
}

/// A named, ordered collection of cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Deck {
    /// Wrap cards into a new deck stamped with the current time
    pub fn new(name: impl Into<String>, cards: Vec<Card>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            created_at: Utc::now(),
            cards,
        }
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Validated input to the generation pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Sanitized study text, within the accepted length bounds
    pub text: String,

    /// Number of cards to request, within the accepted range
    pub count: usize,
}

/// Successful generation result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub cards: Vec<Card>,

    pub rate_limit_remaining: u32,
}
