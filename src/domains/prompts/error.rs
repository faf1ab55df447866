//! Prompt-specific error types.

use thiserror::Error;

/// Errors that can occur during prompt operations.
///
/// Only [`PromptError::SourceUnavailable`] aborts a load; the other variants
/// are reported as per-definition warnings while the load continues.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The definition source could not be enumerated.
    #[error("Prompt source unavailable: {0}")]
    SourceUnavailable(String),

    /// A raw definition could not be decoded.
    #[error("Failed to decode {origin}: {message}")]
    Decode { origin: String, message: String },

    /// A decoded template violates the template invariants.
    #[error("Invalid prompt in {origin}: {reason}")]
    Invalid { origin: String, reason: String },

    /// A template with the same name was already loaded.
    #[error("Duplicate prompt name '{name}' in {origin}, skipping")]
    Duplicate { name: String, origin: String },
}

impl PromptError {
    /// Create a new "source unavailable" error.
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    /// Create a new "decode" error.
    pub fn decode(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// Create a new "invalid" error.
    pub fn invalid(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            origin: origin.into(),
            reason: reason.into(),
        }
    }

    /// Create a new "duplicate" error.
    pub fn duplicate(name: impl Into<String>, origin: impl Into<String>) -> Self {
        Self::Duplicate {
            name: name.into(),
            origin: origin.into(),
        }
    }
}
