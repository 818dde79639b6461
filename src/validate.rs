//! Schema and invariant validation for upstream book content.
//!
//! The generative collaborator hands us a JSON-shaped value whose shape we
//! never trust directly. [`validate_book`] walks it field by field and
//! either produces an owned, normalized [`BookContent`] or fails with a
//! [`ValidationError`] naming the exact path to the offending value
//! (`title`, `chapters[2]`, `chapters[0].paragraphs[1].formattingSpans[0]`).
//!
//! The single most important check is span integrity: every formatting
//! span's declared `text` must equal the substring of the paragraph at
//! `[start, end)` (character offsets). Off-by-one offsets are by far the
//! most common upstream generation bug, and this check catches them before
//! they can corrupt typeset output.

use serde_json::Value;

use crate::error::ValidationError;
use crate::model::{BookContent, Chapter, FormattingSpan, Paragraph, SpanStyle};

/// Validate a raw JSON-like value into a [`BookContent`].
///
/// Pure function: never mutates its input, has no side effects. String
/// fields are trimmed; all other normalization is structural.
pub fn validate_book(raw: &Value) -> Result<BookContent, ValidationError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| ValidationError::new("book", "must be an object"))?;

    let title = required_string(obj, "title")?;
    let author = required_string(obj, "author")?;
    let genre = required_string(obj, "genre")?;
    let plot_summary = required_string(obj, "plotSummary")?;

    let chapters_raw = obj
        .get("chapters")
        .ok_or_else(|| ValidationError::new("chapters", "is required"))?
        .as_array()
        .ok_or_else(|| ValidationError::new("chapters", "must be an array"))?;

    if chapters_raw.is_empty() {
        return Err(ValidationError::new(
            "chapters",
            "must contain at least one chapter",
        ));
    }

    let mut chapters = Vec::with_capacity(chapters_raw.len());
    for (i, raw_chapter) in chapters_raw.iter().enumerate() {
        let expected = (i + 1) as u32;
        let chapter = validate_chapter(raw_chapter, Some(expected))
            .map_err(|e| prefix_index(e, "chapters", i))?;
        chapters.push(chapter);
    }

    Ok(BookContent {
        title,
        author,
        genre,
        plot_summary,
        chapters,
    })
}

/// Validate a single chapter value.
///
/// When `expected_number` is given, a mismatch between it and the
/// chapter's declared `number` is a hard failure. This guarantees that
/// chapter ordering is deterministic and matches array position,
/// rejecting out-of-order or duplicated numbering from the collaborator.
pub fn validate_chapter(
    raw: &Value,
    expected_number: Option<u32>,
) -> Result<Chapter, ValidationError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| ValidationError::new("chapter", "must be an object"))?;

    let number = obj
        .get("number")
        .ok_or_else(|| ValidationError::new("number", "is required"))?
        .as_u64()
        .filter(|&n| n >= 1 && n <= u32::MAX as u64)
        .ok_or_else(|| ValidationError::new("number", "must be a positive integer"))?
        as u32;

    if let Some(expected) = expected_number {
        if number != expected {
            return Err(ValidationError::new(
                "number",
                format!("chapter number mismatch: expected {expected}, found {number}"),
            ));
        }
    }

    let title = required_string(obj, "title")?;

    let paragraphs_raw = obj
        .get("paragraphs")
        .ok_or_else(|| ValidationError::new("paragraphs", "is required"))?
        .as_array()
        .ok_or_else(|| ValidationError::new("paragraphs", "must be an array"))?;

    if paragraphs_raw.is_empty() {
        return Err(ValidationError::new(
            "paragraphs",
            "must contain at least one paragraph",
        ));
    }

    let mut paragraphs = Vec::with_capacity(paragraphs_raw.len());
    for (i, raw_paragraph) in paragraphs_raw.iter().enumerate() {
        let paragraph =
            validate_paragraph(raw_paragraph).map_err(|e| prefix_index(e, "paragraphs", i))?;
        paragraphs.push(paragraph);
    }

    Ok(Chapter {
        number,
        title,
        paragraphs,
    })
}

/// Validate a single paragraph value, including all of its spans.
pub fn validate_paragraph(raw: &Value) -> Result<Paragraph, ValidationError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| ValidationError::new("paragraph", "must be an object"))?;

    let text = obj
        .get("text")
        .ok_or_else(|| ValidationError::new("text", "is required"))?
        .as_str()
        .ok_or_else(|| ValidationError::new("text", "must be a string"))?
        .to_string();

    let paragraph = Paragraph {
        text,
        spans: Vec::new(),
    };

    let mut spans = Vec::new();
    if let Some(raw_spans) = obj.get("formattingSpans") {
        let raw_spans = raw_spans
            .as_array()
            .ok_or_else(|| ValidationError::new("formattingSpans", "must be an array"))?;

        for (i, raw_span) in raw_spans.iter().enumerate() {
            let span = validate_span(raw_span, &paragraph)
                .map_err(|e| prefix_index(e, "formattingSpans", i))?;
            spans.push(span);
        }
    }

    Ok(Paragraph {
        text: paragraph.text,
        spans,
    })
}

/// Validate a formatting span against the paragraph it annotates.
fn validate_span(raw: &Value, paragraph: &Paragraph) -> Result<FormattingSpan, ValidationError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| ValidationError::new("span", "must be an object"))?;

    // Negative offsets fail the u64 conversion and land here too.
    let start = offset_field(obj, "start")?;
    let end = offset_field(obj, "end")?;

    let len = paragraph.char_len();
    if start >= end || end > len {
        return Err(ValidationError::new(
            "range",
            format!("span range [{start}, {end}) out of range for text of length {len}"),
        ));
    }

    let style_str = obj
        .get("type")
        .ok_or_else(|| ValidationError::new("type", "is required"))?
        .as_str()
        .ok_or_else(|| ValidationError::new("type", "must be a string"))?;
    let style = SpanStyle::parse(style_str).ok_or_else(|| {
        ValidationError::new("type", format!("unknown formatting type {style_str:?}"))
    })?;

    let declared = obj
        .get("text")
        .ok_or_else(|| ValidationError::new("text", "is required"))?
        .as_str()
        .ok_or_else(|| ValidationError::new("text", "must be a string"))?;

    // The integrity checksum: the declared text must match the substring
    // the offsets actually address.
    let actual = paragraph
        .slice_chars(start, end)
        .unwrap_or_default();
    if actual != declared {
        return Err(ValidationError::new(
            "text",
            format!("span text mismatch: offsets address {actual:?} but span declares {declared:?}"),
        ));
    }

    Ok(FormattingSpan {
        start,
        end,
        style,
        text: declared.to_string(),
    })
}

/// Re-check the structural invariants of an already-typed value.
///
/// Typed content normally comes out of [`validate_book`], but nothing
/// stops a caller from constructing [`BookContent`] by hand, so the
/// document generator re-verifies before emitting anything.
pub fn verify_invariants(content: &BookContent) -> Result<(), ValidationError> {
    if content.title.trim().is_empty() {
        return Err(ValidationError::new("title", "must be a non-empty string"));
    }
    if content.author.trim().is_empty() {
        return Err(ValidationError::new("author", "must be a non-empty string"));
    }
    if content.genre.trim().is_empty() {
        return Err(ValidationError::new("genre", "must be a non-empty string"));
    }
    if content.plot_summary.trim().is_empty() {
        return Err(ValidationError::new(
            "plotSummary",
            "must be a non-empty string",
        ));
    }
    if content.chapters.is_empty() {
        return Err(ValidationError::new(
            "chapters",
            "must contain at least one chapter",
        ));
    }

    for (i, chapter) in content.chapters.iter().enumerate() {
        let expected = (i + 1) as u32;
        if chapter.number != expected {
            return Err(ValidationError::new(
                format!("chapters[{i}].number"),
                format!(
                    "chapter number mismatch: expected {expected}, found {}",
                    chapter.number
                ),
            ));
        }
        if chapter.paragraphs.is_empty() {
            return Err(ValidationError::new(
                format!("chapters[{i}].paragraphs"),
                "must contain at least one paragraph",
            ));
        }
        for (j, paragraph) in chapter.paragraphs.iter().enumerate() {
            for (k, span) in paragraph.spans.iter().enumerate() {
                let field =
                    format!("chapters[{i}].paragraphs[{j}].formattingSpans[{k}]");
                let len = paragraph.char_len();
                if span.start >= span.end || span.end > len {
                    return Err(ValidationError::new(
                        field,
                        format!(
                            "span range [{}, {}) out of range for text of length {len}",
                            span.start, span.end
                        ),
                    ));
                }
                let actual = paragraph.slice_chars(span.start, span.end).unwrap_or_default();
                if actual != span.text {
                    return Err(ValidationError::new(
                        field,
                        format!(
                            "span text mismatch: offsets address {actual:?} but span declares {:?}",
                            span.text
                        ),
                    ));
                }
            }
        }
    }

    Ok(())
}

fn required_string(
    obj: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<String, ValidationError> {
    let value = obj
        .get(key)
        .ok_or_else(|| ValidationError::new(key, "is required"))?;
    let s = value
        .as_str()
        .ok_or_else(|| ValidationError::new(key, "must be a string"))?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(key, "must be a non-empty string"));
    }
    Ok(trimmed.to_string())
}

fn offset_field(
    obj: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<usize, ValidationError> {
    let value = obj
        .get(key)
        .ok_or_else(|| ValidationError::new(key, "is required"))?;
    value
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| ValidationError::new(key, "must be a non-negative integer"))
}

fn prefix_index(e: ValidationError, name: &str, index: usize) -> ValidationError {
    e.nested(&format!("{name}[{index}]"))
}
