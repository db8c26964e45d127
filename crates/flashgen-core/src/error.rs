//! Error types for Flashgen Core

use thiserror::Error;

/// Caller-input problems found while validating a generation request.
///
/// Messages are user-facing and are returned to the caller verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Provide the text to generate cards from.")]
    MissingText,

    #[error("The text is too short. Minimum {min} characters.")]
    TooShort { min: usize },

    #[error("The text is too long. Maximum {max} characters.")]
    TooLong { max: usize },
}

pub type Result<T> = std::result::Result<T, ValidationError>;
