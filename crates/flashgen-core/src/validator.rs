//! Input sanitization and validation for generation requests
//!
//! The validator never touches shared state: it turns an untrusted
//! `{text, count}` pair into a [`GenerateRequest`] or a [`ValidationError`].

use crate::error::{Result, ValidationError};
use crate::types::GenerateRequest;
use serde_json::Value;

/// Minimum accepted length of the sanitized text (inclusive)
pub const MIN_TEXT_LENGTH: usize = 50;

/// Maximum accepted length of the sanitized text (inclusive)
pub const MAX_TEXT_LENGTH: usize = 15_000;

/// Lower bound for the requested card count
pub const MIN_COUNT: usize = 5;

/// Upper bound for the requested card count
pub const MAX_COUNT: usize = 50;

/// Count used when the caller sends nothing usable
pub const DEFAULT_COUNT: usize = 20;

/// Collapse triple double-quotes and trim surrounding whitespace.
///
/// The prompt template fences the text with `"""`, so the delimiter must not
/// survive inside user text.
pub fn sanitize_text(text: &str) -> String {
    text.replace("\"\"\"", "\"").trim().to_string()
}

/// Validate and normalize a raw generation payload.
///
/// Text must be a non-empty string whose sanitized length lies within
/// [`MIN_TEXT_LENGTH`, `MAX_TEXT_LENGTH`]. The count is coerced and clamped
/// into [`MIN_COUNT`, `MAX_COUNT`]; clamping never fails.
pub fn validate(raw_text: Option<&Value>, raw_count: Option<&Value>) -> Result<GenerateRequest> {
    let text = match raw_text {
        Some(Value::String(s)) if !s.is_empty() => s,
        _ => return Err(ValidationError::MissingText),
    };

    let sanitized = sanitize_text(text);
    let length = sanitized.chars().count();

    if length < MIN_TEXT_LENGTH {
        return Err(ValidationError::TooShort {
            min: MIN_TEXT_LENGTH,
        });
    }

    if length > MAX_TEXT_LENGTH {
        return Err(ValidationError::TooLong {
            max: MAX_TEXT_LENGTH,
        });
    }

    Ok(GenerateRequest {
        text: sanitized,
        count: normalize_count(raw_count),
    })
}

/// Coerce a raw count and clamp it into range.
///
/// Non-finite values fall back to [`DEFAULT_COUNT`]; fractional values are
/// truncated after clamping.
pub fn normalize_count(raw_count: Option<&Value>) -> usize {
    let parsed = coerce_number(raw_count);
    let value = if parsed.is_finite() {
        parsed
    } else {
        DEFAULT_COUNT as f64
    };

    value.min(MAX_COUNT as f64).max(MIN_COUNT as f64).trunc() as usize
}

/// Numeric coercion with the same outcomes as a loose `Number(x)` conversion
fn coerce_number(raw: Option<&Value>) -> f64 {
    match raw {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_numeric_string(s),
        Some(Value::Array(_)) | Some(Value::Object(_)) => f64::NAN,
    }
}

/// String to number: blank is zero, and unsigned `0x`/`0o`/`0b` literals are
/// read in their radix. Anything else must be a decimal literal.
fn parse_numeric_string(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };

    match radix {
        Some(radix) => {
            let digits = &trimmed[2..];
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return f64::NAN;
            }
            // Wide literals lose precision instead of failing
            digits.chars().fold(0.0, |acc, c| {
                acc * f64::from(radix) + f64::from(c.to_digit(radix).unwrap_or(0))
            })
        }
        None => trimmed.parse::<f64>().unwrap_or(f64::NAN),
    }
}
