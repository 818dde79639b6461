//! Error types for the validation and compilation pipeline.

use thiserror::Error;

/// A schema or invariant violation in upstream content.
///
/// `field` names the exact path to the offending value, e.g. `title`,
/// `chapters[2]`, or `chapters[0].paragraphs[1].formattingSpans[0]`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Return the same error with its field path nested under `prefix`.
    pub fn nested(self, prefix: &str) -> Self {
        Self {
            field: format!("{prefix}.{}", self.field),
            message: self.message,
        }
    }
}

/// Errors that can occur during content processing or compilation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("processing error: {0}")]
    Processing(String),

    #[error("invalid artifact: {0}")]
    Artifact(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
