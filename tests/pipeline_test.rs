//! End-to-end pipeline tests against the mock backend.
//!
//! Covers the full path from raw JSON through validation, document
//! generation, backend compilation, and artifact checks.

use bookbinder::{
    count_words, validate_book, BookCompiler, CompilerConfig, MockBackend, TexProcessor,
};
use serde_json::{json, Value};

fn two_chapter_book() -> Value {
    json!({
        "title": "The Rise of Arcade Games",
        "author": "Jane Doe",
        "genre": "non-fiction",
        "plotSummary": "A history of the arcade era.",
        "chapters": [
            {
                "number": 1,
                "title": "Beginnings",
                "paragraphs": [
                    {
                        "text": "This is the first paragraph with some bold text.",
                        "formattingSpans": [
                            {"start": 38, "end": 42, "type": "bold", "text": "bold"}
                        ]
                    },
                    {
                        "text": "A plain follow-up paragraph."
                    }
                ]
            },
            {
                "number": 2,
                "title": "Golden Age",
                "paragraphs": [
                    {
                        "text": "Cabinets filled every arcade floor.",
                        "formattingSpans": [
                            {"start": 0, "end": 8, "type": "italic", "text": "Cabinets"}
                        ]
                    }
                ]
            }
        ]
    })
}

fn compiler() -> BookCompiler<MockBackend> {
    BookCompiler::new(CompilerConfig::draft(), MockBackend::new())
}

// ============================================================================
// Scenario A: bold span validates and is emitted exactly once
// ============================================================================

#[test]
fn test_bold_span_validates_and_emits_once() {
    let content = validate_book(&two_chapter_book()).unwrap();
    let paragraph = &content.chapters[0].paragraphs[0];
    assert_eq!(paragraph.spans[0].text, "bold");

    let out = TexProcessor::default()
        .format_paragraph(paragraph, true)
        .unwrap();
    assert_eq!(out.matches("\\textbf{bold}").count(), 1);
}

// ============================================================================
// Scenario B: missing chapter 1 fails validation at chapters[0]
// ============================================================================

#[test]
fn test_missing_first_chapter_fails() {
    let raw = json!({
        "title": "T",
        "author": "A",
        "genre": "G",
        "plotSummary": "S",
        "chapters": [
            {"number": 2, "title": "Two", "paragraphs": [{"text": "x"}]}
        ]
    });
    let err = validate_book(&raw).unwrap_err();
    assert!(err.field.starts_with("chapters[0]"));
    assert!(err.message.contains("mismatch"));
}

// ============================================================================
// Scenario C: emphasis parsing
// ============================================================================

#[test]
fn test_emphasis_parsing_pong() {
    let segments = bookbinder::markdown::parse("Game *Pong* was revolutionary");
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].text, "Game ");
    assert!(!segments[0].italic);
    assert_eq!(segments[1].text, "Pong");
    assert!(segments[1].italic && !segments[1].bold);
    assert_eq!(segments[2].text, " was revolutionary");
    assert!(segments.iter().all(|s| !s.text.contains('*')));
}

// ============================================================================
// Scenario D: valid two-chapter book compiles successfully
// ============================================================================

#[test]
fn test_two_chapter_book_compiles() {
    let result = compiler().compile(&two_chapter_book());
    assert!(result.success);
    assert!(result.errors.is_empty());
    let pdf = result.pdf.expect("payload present on success");
    assert!(!pdf.is_empty());
    assert!(pdf.starts_with(b"%PDF-"));
    assert_eq!(result.output_size, pdf.len());
}

// ============================================================================
// Failure shape
// ============================================================================

#[test]
fn test_empty_book_never_succeeds() {
    let raw = json!({"title": "", "chapters": []});
    let result = compiler().compile(&raw);
    assert!(!result.success);
    assert!(result.pdf.is_none());
    assert!(!result.errors.is_empty());
}

#[test]
fn test_engine_diagnostics_surface_in_result() {
    let backend = MockBackend::failing(
        "! Undefined control sequence.\nl.12 \\wat\nLaTeX Warning: Reference `ch2' undefined.\n",
    );
    let result = BookCompiler::new(CompilerConfig::draft(), backend).compile(&two_chapter_book());
    assert!(!result.success);
    assert_eq!(result.errors[0].message, "Undefined control sequence.");
    assert_eq!(result.errors[0].line, Some(12));
    assert_eq!(result.warnings.len(), 1);
}

// ============================================================================
// Cross-stage invariants
// ============================================================================

#[test]
fn test_word_count_span_invariance_end_to_end() {
    let with_spans = validate_book(&two_chapter_book()).unwrap();

    let mut raw = two_chapter_book();
    raw["chapters"][0]["paragraphs"][0]["formattingSpans"] = json!([]);
    raw["chapters"][1]["paragraphs"][0]["formattingSpans"] = json!([]);
    let without_spans = validate_book(&raw).unwrap();

    assert_eq!(count_words(&with_spans), count_words(&without_spans));
}

#[test]
fn test_document_contains_every_chapter_anchor() {
    let content = validate_book(&two_chapter_book()).unwrap();
    let processor = TexProcessor::default();
    let doc = processor.generate_complete_document(&content, true).unwrap();
    for chapter in &content.chapters {
        let anchor = processor.chapter_anchor(chapter);
        assert!(doc.contains(&format!("\\label{{{anchor}}}")), "missing {anchor}");
    }
}

#[test]
fn test_mock_artifact_page_per_chapter() {
    let result = compiler().compile(&two_chapter_book());
    let info = bookbinder::compile::validate_pdf(result.pdf.as_deref().unwrap()).unwrap();
    assert_eq!(info.page_count, 2);
    assert!(info.has_text);
}
