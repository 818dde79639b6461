//! Validator edge cases over raw JSON shapes.

use bookbinder::validate_book;
use serde_json::json;

fn base() -> serde_json::Value {
    json!({
        "title": "T",
        "author": "A",
        "genre": "G",
        "plotSummary": "S",
        "chapters": [
            {
                "number": 1,
                "title": "One",
                "paragraphs": [
                    {
                        "text": "hello world",
                        "formattingSpans": [
                            {"start": 0, "end": 5, "type": "bold", "text": "hello"}
                        ]
                    }
                ]
            }
        ]
    })
}

#[test]
fn test_accepts_well_formed_book() {
    let content = validate_book(&base()).unwrap();
    assert_eq!(content.chapters[0].paragraphs[0].spans[0].text, "hello");
}

#[test]
fn test_rejects_scalar_roots() {
    for raw in [json!(null), json!(42), json!("book"), json!([])] {
        let err = validate_book(&raw).unwrap_err();
        assert_eq!(err.message, "must be an object");
    }
}

#[test]
fn test_every_required_string_is_checked() {
    for field in ["title", "author", "genre", "plotSummary"] {
        let mut raw = base();
        raw.as_object_mut().unwrap().remove(field);
        let err = validate_book(&raw).unwrap_err();
        assert_eq!(err.field, field, "missing {field} not reported");

        let mut raw = base();
        raw[field] = json!("  ");
        let err = validate_book(&raw).unwrap_err();
        assert_eq!(err.field, field, "blank {field} not reported");
    }
}

#[test]
fn test_chapters_must_be_array() {
    let mut raw = base();
    raw["chapters"] = json!("not an array");
    let err = validate_book(&raw).unwrap_err();
    assert_eq!(err.field, "chapters");
}

#[test]
fn test_duplicate_chapter_numbers_rejected() {
    let mut raw = base();
    let chapter = raw["chapters"][0].clone();
    raw["chapters"].as_array_mut().unwrap().push(chapter);
    let err = validate_book(&raw).unwrap_err();
    assert_eq!(err.field, "chapters[1].number");
}

#[test]
fn test_error_path_reaches_span_depth() {
    let mut raw = base();
    raw["chapters"][0]["paragraphs"][0]["formattingSpans"][0]["end"] = json!(50);
    let err = validate_book(&raw).unwrap_err();
    assert_eq!(err.field, "chapters[0].paragraphs[0].formattingSpans[0].range");
    assert!(err.message.contains("length 11"));
}

#[test]
fn test_span_at_exact_text_end_accepted() {
    let mut raw = base();
    raw["chapters"][0]["paragraphs"][0]["formattingSpans"] =
        json!([{"start": 6, "end": 11, "type": "italic", "text": "world"}]);
    assert!(validate_book(&raw).is_ok());
}

#[test]
fn test_zero_length_span_rejected() {
    let mut raw = base();
    raw["chapters"][0]["paragraphs"][0]["formattingSpans"] =
        json!([{"start": 3, "end": 3, "type": "bold", "text": ""}]);
    assert!(validate_book(&raw).is_err());
}

#[test]
fn test_paragraph_text_may_be_empty_string() {
    // Empty paragraph text is legal; the layout layer treats it as a
    // spacing-only paragraph.
    let mut raw = base();
    raw["chapters"][0]["paragraphs"] = json!([{"text": ""}]);
    let content = validate_book(&raw).unwrap();
    assert_eq!(content.chapters[0].paragraphs[0].text, "");
}

#[test]
fn test_float_chapter_number_rejected() {
    let mut raw = base();
    raw["chapters"][0]["number"] = json!(1.5);
    let err = validate_book(&raw).unwrap_err();
    assert_eq!(err.field, "chapters[0].number");
}
