//! # bookbinder
//!
//! Validation and typesetting pipeline for AI-generated book content.
//!
//! Takes a JSON-shaped book (title, chapters, paragraphs, character-offset
//! formatting spans), defends every stage against malformed upstream
//! input, and compiles it into a typeset PDF artifact plus a plain-text
//! fallback.
//!
//! ## Quick Start
//!
//! ```
//! use bookbinder::{BookCompiler, CompilerConfig, MockBackend};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "title": "Arcade Days",
//!     "author": "Jane Doe",
//!     "genre": "non-fiction",
//!     "plotSummary": "A history of the arcade era.",
//!     "chapters": [
//!         {"number": 1, "title": "Beginnings", "paragraphs": [{"text": "It started small."}]}
//!     ]
//! });
//!
//! let compiler = BookCompiler::new(CompilerConfig::draft(), MockBackend::new());
//! let result = compiler.compile(&raw);
//! assert!(result.success);
//! assert!(result.pdf.unwrap().starts_with(b"%PDF-"));
//! ```
//!
//! ## Pipeline
//!
//! - [`validate::validate_book`]: schema/invariant checking with exact
//!   error paths; the span-integrity check (`text[start..end]` must equal
//!   the span's declared text) catches upstream offset bugs
//! - [`model::count_words`] / [`model::extract_plain_text`]: metrics and
//!   the plain-text projection
//! - [`tex::TexProcessor`]: validated content to LaTeX document text
//! - [`compile::BookCompiler`]: backend invocation under timeout/retry,
//!   diagnostic parsing, artifact validation
//! - [`render`]: an alternate non-typesetting path drawing styled
//!   segments straight onto a measured surface
//! - [`markdown::parse`]: inline emphasis parsing for raw strings

pub mod compile;
pub mod error;
pub mod markdown;
pub mod model;
pub mod prompt;
pub mod render;
pub mod tex;
pub mod validate;

pub use compile::{
    BookCompiler, CommandBackend, CompilationBackend, CompilationError, CompilationResult,
    CompilerConfig, MockBackend,
};
pub use error::{Error, Result, ValidationError};
pub use model::{count_words, extract_plain_text, BookContent, Chapter, FormattingSpan, Paragraph, SpanStyle};
pub use render::{FontManager, FontState, FontStyle, LayoutConfig, LayoutRenderer, Surface};
pub use tex::{TexConfig, TexProcessor};
pub use validate::validate_book;
