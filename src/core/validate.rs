//! # Input Validation
//!
//! Gatekeeper between the input box and the transcript. Nothing reaches a
//! responder unless it went through [`validate`] first, and the only way to
//! get a [`ValidText`] is through it.

use std::fmt;

/// Longest accepted input, counted in characters of the raw (untrimmed) text.
pub const MAX_INPUT_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Nothing but whitespace was entered.
    EmptyInput,
    /// Raw input exceeded [`MAX_INPUT_CHARS`].
    TooLong { len: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyInput => write!(f, "Please enter a message first"),
            ValidationError::TooLong { len } => write!(
                f,
                "Messages cannot exceed {MAX_INPUT_CHARS} characters (got {len})"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trimmed user text that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidText(String);

impl ValidText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ValidText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validates raw input.
///
/// The length check runs on the raw text so padding whitespace counts; the
/// returned text is trimmed.
pub fn validate(text: &str) -> Result<ValidText, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let len = text.chars().count();
    if len > MAX_INPUT_CHARS {
        return Err(ValidationError::TooLong { len });
    }

    Ok(ValidText(trimmed.to_string()))
}
