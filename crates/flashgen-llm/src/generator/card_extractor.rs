//! Card extraction from raw model output
//!
//! The model is asked for `{"cards": [{"question", "answer"}]}` but nothing
//! about its output is trusted: the payload is decoded into a loose
//! [`serde_json::Value`] first and every entry is repaired field by field
//! into a [`Card`].

use crate::error::{LLMError, Result};
use flashgen_core::{new_card_id, Card};
use serde_json::Value;

/// Substituted when an entry has an answer but no question
pub const QUESTION_PLACEHOLDER_PREFIX: &str = "Question";

/// Substituted when an entry has a question but no answer
pub const ANSWER_PLACEHOLDER: &str = "No answer was generated; check this card manually.";

/// Extract at most `count` cards from the model's raw output.
///
/// # Returns
/// * `Ok(Vec<Card>)` - Non-empty cards in model order, each with a fresh id
/// * `Err(LLMError::UnparsableOutput)` - Output is not structured data
/// * `Err(LLMError::NoCardsProduced)` - Output parsed but held no usable entry
pub fn extract_cards(raw: &str, count: usize) -> Result<Vec<Card>> {
    let parsed = parse_payload(raw)?;

    let entries: &[Value] = match parsed.get("cards") {
        None | Some(Value::Null) => &[],
        Some(Value::Array(items)) => items,
        Some(_) => return Err(LLMError::UnparsableOutput),
    };

    let considered = entries.len().min(count);
    let cards: Vec<Card> = entries
        .iter()
        .take(count)
        .enumerate()
        .filter_map(|(index, entry)| repair_entry(index, entry))
        .collect();

    if cards.len() < considered {
        tracing::warn!(
            dropped = considered - cards.len(),
            "dropped model entries with neither question nor answer"
        );
    }

    if cards.is_empty() {
        return Err(LLMError::NoCardsProduced);
    }

    Ok(cards)
}

/// Turn one loose entry into a card, or `None` when it carries no content at all
fn repair_entry(index: usize, entry: &Value) -> Option<Card> {
    let question = field_text(entry, "question");
    let answer = field_text(entry, "answer");

    if question.is_empty() && answer.is_empty() {
        return None;
    }

    Some(Card {
        id: new_card_id(),
        question: if question.is_empty() {
            format!("{} {}", QUESTION_PLACEHOLDER_PREFIX, index + 1)
        } else {
            question
        },
        answer: if answer.is_empty() {
            ANSWER_PLACEHOLDER.to_string()
        } else {
            answer
        },
    })
}

fn field_text(entry: &Value, key: &str) -> String {
    match entry.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Parse the output as JSON, falling back to the body of a fenced code block
fn parse_payload(raw: &str) -> Result<Value> {
    let cleaned = raw.trim();

    if let Ok(value) = serde_json::from_str::<Value>(cleaned) {
        return Ok(value);
    }

    if let Some(block) = extract_from_markdown(cleaned) {
        if let Ok(value) = serde_json::from_str::<Value>(block) {
            return Ok(value);
        }
    }

    Err(LLMError::UnparsableOutput)
}

/// Extract the body of a ```json (or bare ```) fenced block
fn extract_from_markdown(content: &str) -> Option<&str> {
    for fence in ["```json", "```"] {
        if let Some(start) = content.find(fence) {
            let after_start = &content[start + fence.len()..];
            if let Some(end) = after_start.find("```") {
                return Some(after_start[..end].trim());
            }
        }
    }

    None
}
