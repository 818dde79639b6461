//! Core data model for validated book content.
//!
//! This module contains:
//! - The book/chapter/paragraph/span content tree
//! - Inline style types shared with the rendering layer
//! - Content metrics (word counts, plain-text projection)

mod content;
mod metrics;

pub use content::{BookContent, Chapter, FormattingSpan, Paragraph, SpanStyle};
pub use metrics::{count_words, extract_plain_text};
