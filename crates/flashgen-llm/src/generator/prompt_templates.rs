//! Prompt templates for card generation

/// Longest slice of study text embedded into a prompt, in characters.
///
/// Tighter than the validator's upper bound so the token budget stays bounded
/// for every accepted input.
pub const MAX_PROMPT_TEXT_LENGTH: usize = 8_000;

/// Prompt template for generating flashcards.
///
/// `{text}` and `{count}` are the only runtime-variable parts; the rest is
/// static so the output shape stays predictable for the extractor.
pub const CARD_GENERATION_PROMPT: &str = r#"You are a tutor preparing concise flashcards.
Here is the study material:
"""
{text}
"""

Generate {count} cards in JSON format.

Requirements:
- Cover the key concepts, terms, dates and definitions
- Do not invent facts, use only the text above
- Make questions specific, avoid trivial "What is X?" phrasing
- Keep answers short (1-2 sentences), without filler

Respond strictly in JSON:
{
  "cards": [
    { "question": "...", "answer": "..." }
  ]
}"#;

/// Render the card generation prompt for `text` and `count`.
///
/// Pure and deterministic: identical arguments give byte-identical output.
pub fn build_card_prompt(text: &str, count: usize) -> String {
    CARD_GENERATION_PROMPT
        .replace("{count}", &count.to_string())
        .replace("{text}", truncate_chars(text, MAX_PROMPT_TEXT_LENGTH))
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_deterministic() {
        let text = "Photosynthesis converts light energy into chemical energy.";
        assert_eq!(build_card_prompt(text, 12), build_card_prompt(text, 12));
    }

    #[test]
    fn test_prompt_embeds_count_and_text() {
        let text = "Mitochondria are the powerhouse of the cell.";
        let prompt = build_card_prompt(text, 17);

        assert!(prompt.contains("Generate 17 cards"));
        assert!(prompt.contains(&format!("\"\"\"\n{}\n\"\"\"", text)));
        assert!(prompt.contains("\"cards\""));
        assert!(prompt.contains("\"question\""));
        assert!(prompt.contains("\"answer\""));
        assert!(!prompt.contains("{count}"));
        assert!(!prompt.contains("{text}"));
    }

    #[test]
    fn test_prompt_truncates_long_text() {
        let text = format!("{}{}", "x".repeat(MAX_PROMPT_TEXT_LENGTH), "TAIL");
        let prompt = build_card_prompt(&text, 5);

        assert!(prompt.contains(&"x".repeat(MAX_PROMPT_TEXT_LENGTH)));
        assert!(!prompt.contains("TAIL"));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let text = "é".repeat(MAX_PROMPT_TEXT_LENGTH + 10);
        assert_eq!(
            truncate_chars(&text, MAX_PROMPT_TEXT_LENGTH).chars().count(),
            MAX_PROMPT_TEXT_LENGTH
        );
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn test_placeholders_in_text_are_not_expanded() {
        let prompt = build_card_prompt("Literal {count} inside the study text.", 9);
        assert!(prompt.contains("Literal {count} inside"));
    }
}
