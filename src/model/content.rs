use serde::{Deserialize, Serialize};

/// Validated root document: title metadata plus ordered chapters.
///
/// Instances are produced by [`crate::validate::validate_book`]; the
/// validator guarantees all string fields are trimmed and non-empty, that
/// at least one chapter is present, and that `chapters[i].number == i + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookContent {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub plot_summary: String,
    pub chapters: Vec<Chapter>,
}

/// A single chapter: 1-based sequence number, title, ordered paragraphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub number: u32,
    pub title: String,
    pub paragraphs: Vec<Paragraph>,
}

/// A paragraph of flat text with character-offset style annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub text: String,
    #[serde(default, rename = "formattingSpans")]
    pub spans: Vec<FormattingSpan>,
}

/// An inline style annotation addressed by character offsets.
///
/// `text` duplicates the addressed substring and acts as an integrity
/// checksum against upstream offset errors; the validator rejects any span
/// whose declared text does not equal `paragraph[start..end]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattingSpan {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub style: SpanStyle,
    pub text: String,
}

/// Supported inline styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanStyle {
    #[serde(rename = "bold")]
    Bold,
    #[serde(rename = "italic")]
    Italic,
    #[serde(rename = "bold-italic")]
    BoldItalic,
}

impl SpanStyle {
    /// Parse the wire representation used by the upstream producer.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bold" => Some(Self::Bold),
            "italic" => Some(Self::Italic),
            "bold-italic" => Some(Self::BoldItalic),
            _ => None,
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }
}

impl Paragraph {
    /// Paragraph with no formatting spans.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// Length of the paragraph text in characters.
    ///
    /// Span offsets count characters, not bytes, so all bounds checks go
    /// through this rather than `text.len()`.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Extract the character range `[start, end)` from the paragraph text.
    ///
    /// Returns `None` when the range is reversed or out of bounds.
    pub fn slice_chars(&self, start: usize, end: usize) -> Option<String> {
        if start >= end || end > self.char_len() {
            return None;
        }
        Some(self.text.chars().skip(start).take(end - start).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_style_parse() {
        assert_eq!(SpanStyle::parse("bold"), Some(SpanStyle::Bold));
        assert_eq!(SpanStyle::parse("italic"), Some(SpanStyle::Italic));
        assert_eq!(SpanStyle::parse("bold-italic"), Some(SpanStyle::BoldItalic));
        assert_eq!(SpanStyle::parse("underline"), None);
    }

    #[test]
    fn test_slice_chars_ascii() {
        let p = Paragraph::plain("hello world");
        assert_eq!(p.slice_chars(6, 11).as_deref(), Some("world"));
        assert_eq!(p.slice_chars(0, 5).as_deref(), Some("hello"));
    }

    #[test]
    fn test_slice_chars_multibyte() {
        let p = Paragraph::plain("naïve café");
        assert_eq!(p.char_len(), 10);
        assert_eq!(p.slice_chars(6, 10).as_deref(), Some("café"));
    }

    #[test]
    fn test_slice_chars_out_of_range() {
        let p = Paragraph::plain("short");
        assert_eq!(p.slice_chars(3, 99), None);
        assert_eq!(p.slice_chars(4, 4), None);
        assert_eq!(p.slice_chars(4, 2), None);
    }

    #[test]
    fn test_span_json_shape() {
        let json = r#"{"start":0,"end":4,"type":"bold","text":"bold"}"#;
        let span: FormattingSpan = serde_json::from_str(json).unwrap();
        assert_eq!(span.style, SpanStyle::Bold);
        assert_eq!(span.text, "bold");
    }
}
