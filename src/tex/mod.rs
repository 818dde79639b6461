//! Typesetting processor: validated content to LaTeX document text.
//!
//! This module provides:
//! - [`escape`]: pure escaping and slug utilities
//! - [`TexProcessor`]: paragraph/chapter/document emission
//!
//! The processor trusts nothing it did not validate itself: every span is
//! re-checked against the live paragraph before emission, a second line of
//! defense even after upstream validation. Output is deterministic for a
//! given input and configuration.

mod escape;

pub use escape::{escape_text, slugify};

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::{BookContent, Chapter, Paragraph, SpanStyle};
use crate::validate::verify_invariants;

/// Typesetting configuration.
#[derive(Debug, Clone)]
pub struct TexConfig {
    /// Escape reserved characters in literal text (default on).
    pub escape_special_chars: bool,
    /// Emit hyperref anchors for cross-referencing.
    pub enable_hyperlinks: bool,
    /// Numbered chapter headings vs. bare titles.
    pub chapter_numbering: bool,
    /// Indent non-first paragraphs.
    pub paragraph_indentation: bool,
    /// Command-name to expansion overrides emitted into the preamble.
    pub custom_commands: BTreeMap<String, String>,
}

impl Default for TexConfig {
    fn default() -> Self {
        Self {
            escape_special_chars: true,
            enable_hyperlinks: true,
            chapter_numbering: true,
            paragraph_indentation: true,
            custom_commands: BTreeMap::new(),
        }
    }
}

/// Emits LaTeX document text from validated book content.
#[derive(Debug, Clone, Default)]
pub struct TexProcessor {
    config: TexConfig,
}

impl TexProcessor {
    pub fn new(config: TexConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TexConfig {
        &self.config
    }

    /// Escape literal text per configuration.
    ///
    /// Structural markup emitted by the processor never passes through
    /// here; only upstream-provided literal text does.
    pub fn escape(&self, text: &str) -> String {
        if self.config.escape_special_chars {
            escape_text(text)
        } else {
            text.to_string()
        }
    }

    /// Format one paragraph, applying its formatting spans.
    ///
    /// Every span is re-validated against the paragraph it annotates;
    /// a bounds or substring failure here is a processing error, not a
    /// validation error, because it means state was corrupted after
    /// upstream validation. Spans are applied left-to-right; one that
    /// starts before its predecessor ended is truncated to begin at that
    /// end (dropped when nothing remains).
    pub fn format_paragraph(&self, paragraph: &Paragraph, is_first: bool) -> Result<String> {
        for span in &paragraph.spans {
            let len = paragraph.char_len();
            if span.start >= span.end || span.end > len {
                return Err(Error::Processing(format!(
                    "span range [{}, {}) out of range for paragraph of length {len}",
                    span.start, span.end
                )));
            }
            let actual = paragraph
                .slice_chars(span.start, span.end)
                .unwrap_or_default();
            if actual != span.text {
                return Err(Error::Processing(format!(
                    "span text mismatch: offsets address {actual:?} but span declares {:?}",
                    span.text
                )));
            }
        }

        let chars: Vec<char> = paragraph.text.chars().collect();
        let mut spans = paragraph.spans.clone();
        spans.sort_by_key(|s| s.start);

        let mut out = String::new();
        if self.config.paragraph_indentation && !is_first {
            out.push_str("\\indent ");
        }

        let mut cursor = 0usize;
        for span in &spans {
            let start = span.start.max(cursor);
            if start >= span.end {
                continue;
            }
            if start > cursor {
                let gap: String = chars[cursor..start].iter().collect();
                out.push_str(&self.escape(&gap));
            }
            let body: String = chars[start..span.end].iter().collect();
            out.push_str(&self.wrap_styled(&body, span.style));
            cursor = span.end;
        }
        if cursor < chars.len() {
            let tail: String = chars[cursor..].iter().collect();
            out.push_str(&self.escape(&tail));
        }

        Ok(out)
    }

    /// Unique anchor label for a chapter, derived from number and title.
    pub fn chapter_anchor(&self, chapter: &Chapter) -> String {
        let slug = slugify(&chapter.title);
        if slug.is_empty() {
            format!("ch{}", chapter.number)
        } else {
            format!("ch{}-{slug}", chapter.number)
        }
    }

    /// Emit a chapter: page break, heading, anchor, paragraphs.
    ///
    /// The first chapter is never preceded by a forced page break; every
    /// subsequent one is.
    pub fn generate_chapter(&self, chapter: &Chapter, is_first: bool) -> Result<String> {
        let mut out = String::new();
        if !is_first {
            out.push_str("\\newpage\n");
        }

        let title = self.escape(&chapter.title);
        if self.config.chapter_numbering {
            out.push_str(&format!("\\chapter{{{title}}}\n"));
        } else {
            out.push_str(&format!("\\chapter*{{{title}}}\n"));
        }

        let anchor = self.chapter_anchor(chapter);
        out.push_str(&format!("\\label{{{anchor}}}\n"));
        if self.config.enable_hyperlinks {
            out.push_str(&format!("\\hypertarget{{{anchor}}}{{}}\n"));
        }

        for (i, paragraph) in chapter.paragraphs.iter().enumerate() {
            out.push('\n');
            out.push_str(&self.format_paragraph(paragraph, i == 0)?);
            out.push('\n');
        }

        Ok(out)
    }

    /// Map a nesting depth to a sectioning command.
    ///
    /// Depth 0 through 5 map to chapter through subparagraph; anything
    /// deeper is a processing error.
    pub fn generate_section_structure(
        &self,
        depth: usize,
        title: &str,
        numbered: bool,
    ) -> Result<String> {
        const LEVELS: [&str; 6] = [
            "chapter",
            "section",
            "subsection",
            "subsubsection",
            "paragraph",
            "subparagraph",
        ];
        let command = LEVELS
            .get(depth)
            .ok_or_else(|| Error::Processing(format!("unsupported section depth {depth}")))?;
        let star = if numbered { "" } else { "*" };
        Ok(format!("\\{command}{star}{{{}}}", self.escape(title)))
    }

    /// Generate the complete document: preamble, optional metadata front
    /// matter, chapters, closing.
    ///
    /// Validates the content invariants first and fails fast with no
    /// partial output.
    pub fn generate_complete_document(
        &self,
        content: &BookContent,
        include_metadata: bool,
    ) -> Result<String> {
        verify_invariants(content)?;

        let mut out = String::new();
        out.push_str("\\documentclass[11pt]{book}\n");
        out.push_str(
            "\\usepackage[paperwidth=5in,paperheight=8in,top=0.5in,bottom=0.5in,inner=0.375in,outer=0.375in]{geometry}\n",
        );
        if self.config.enable_hyperlinks {
            out.push_str("\\usepackage[hidelinks]{hyperref}\n");
        }
        for (name, expansion) in &self.config.custom_commands {
            out.push_str(&format!("\\newcommand{{\\{name}}}{{{expansion}}}\n"));
        }
        out.push_str(&format!("\\title{{{}}}\n", self.escape(&content.title)));
        out.push_str(&format!("\\author{{{}}}\n", self.escape(&content.author)));
        out.push_str("\\begin{document}\n");

        if include_metadata {
            out.push_str("\\begin{titlepage}\n\\centering\n\\vspace*{2in}\n");
            out.push_str(&format!("{{\\Huge {}}}\\par\n", self.escape(&content.title)));
            out.push_str("\\vspace{0.5in}\n");
            out.push_str(&format!("{{\\Large by {}}}\\par\n", self.escape(&content.author)));
            out.push_str("\\end{titlepage}\n");
            out.push_str(&format!(
                "\\noindent\\textit{{{}}} --- {}\n",
                self.escape(&content.genre),
                self.escape(&content.plot_summary)
            ));
        }

        for (i, chapter) in content.chapters.iter().enumerate() {
            out.push('\n');
            out.push_str(&self.generate_chapter(chapter, i == 0)?);
        }

        out.push_str("\n\\end{document}\n");
        Ok(out)
    }

    fn wrap_styled(&self, text: &str, style: SpanStyle) -> String {
        let body = self.escape(text);
        match style {
            SpanStyle::Bold => format!("\\textbf{{{body}}}"),
            SpanStyle::Italic => format!("\\textit{{{body}}}"),
            SpanStyle::BoldItalic => format!("\\textbf{{\\textit{{{body}}}}}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FormattingSpan;

    fn processor() -> TexProcessor {
        TexProcessor::default()
    }

    fn sample_content() -> BookContent {
        BookContent {
            title: "Arcade Days".into(),
            author: "Jane Doe".into(),
            genre: "non-fiction".into(),
            plot_summary: "Coin-op history.".into(),
            chapters: vec![
                Chapter {
                    number: 1,
                    title: "Beginnings".into(),
                    paragraphs: vec![Paragraph::plain("It started small.")],
                },
                Chapter {
                    number: 2,
                    title: "Golden Age".into(),
                    paragraphs: vec![Paragraph::plain("Then it grew.")],
                },
            ],
        }
    }

    #[test]
    fn test_format_paragraph_bold_span_once() {
        let paragraph = Paragraph {
            text: "This is the first paragraph with some bold text.".into(),
            spans: vec![FormattingSpan {
                start: 38,
                end: 42,
                style: SpanStyle::Bold,
                text: "bold".into(),
            }],
        };
        let out = processor().format_paragraph(&paragraph, true).unwrap();
        assert_eq!(out.matches("\\textbf{bold}").count(), 1);
        assert!(out.starts_with("This is the first paragraph with some "));
        assert!(out.ends_with(" text."));
    }

    #[test]
    fn test_format_paragraph_styles() {
        let p = Paragraph {
            text: "a b c".into(),
            spans: vec![
                FormattingSpan {
                    start: 0,
                    end: 1,
                    style: SpanStyle::Italic,
                    text: "a".into(),
                },
                FormattingSpan {
                    start: 4,
                    end: 5,
                    style: SpanStyle::BoldItalic,
                    text: "c".into(),
                },
            ],
        };
        let out = processor().format_paragraph(&p, true).unwrap();
        assert_eq!(out, "\\textit{a} b \\textbf{\\textit{c}}");
    }

    #[test]
    fn test_format_paragraph_stale_span_is_processing_error() {
        let p = Paragraph {
            text: "short".into(),
            spans: vec![FormattingSpan {
                start: 0,
                end: 20,
                style: SpanStyle::Bold,
                text: "short but wrong len".into(),
            }],
        };
        let err = processor().format_paragraph(&p, true).unwrap_err();
        assert!(matches!(err, Error::Processing(_)));
    }

    #[test]
    fn test_format_paragraph_mismatched_span_text() {
        let p = Paragraph {
            text: "hello world".into(),
            spans: vec![FormattingSpan {
                start: 0,
                end: 5,
                style: SpanStyle::Bold,
                text: "jello".into(),
            }],
        };
        let err = processor().format_paragraph(&p, true).unwrap_err();
        assert!(err.to_string().contains("mismatch"));
    }

    #[test]
    fn test_format_paragraph_indent_marker() {
        let p = Paragraph::plain("body");
        let proc = processor();
        assert!(!proc.format_paragraph(&p, true).unwrap().contains("\\indent"));
        assert!(proc.format_paragraph(&p, false).unwrap().starts_with("\\indent "));
    }

    #[test]
    fn test_escape_respects_toggle() {
        let mut config = TexConfig::default();
        config.escape_special_chars = false;
        let proc = TexProcessor::new(config);
        assert_eq!(proc.escape("50% off"), "50% off");
        assert_eq!(processor().escape("50% off"), "50\\% off");
    }

    #[test]
    fn test_escaping_skips_emitted_markup() {
        let p = Paragraph {
            text: "x & y".into(),
            spans: vec![FormattingSpan {
                start: 0,
                end: 1,
                style: SpanStyle::Bold,
                text: "x".into(),
            }],
        };
        let out = processor().format_paragraph(&p, true).unwrap();
        // The literal ampersand is escaped; our own braces are not.
        assert_eq!(out, "\\textbf{x} \\& y");
    }

    #[test]
    fn test_chapter_anchor() {
        let chapter = Chapter {
            number: 3,
            title: "The Golden Age!".into(),
            paragraphs: vec![Paragraph::plain("x")],
        };
        assert_eq!(processor().chapter_anchor(&chapter), "ch3-the-golden-age");
    }

    #[test]
    fn test_first_chapter_no_page_break() {
        let content = sample_content();
        let proc = processor();
        let first = proc.generate_chapter(&content.chapters[0], true).unwrap();
        let second = proc.generate_chapter(&content.chapters[1], false).unwrap();
        assert!(!first.contains("\\newpage"));
        assert!(second.starts_with("\\newpage\n"));
    }

    #[test]
    fn test_chapter_heading_numbering() {
        let chapter = &sample_content().chapters[0];
        let numbered = processor().generate_chapter(chapter, true).unwrap();
        assert!(numbered.contains("\\chapter{Beginnings}"));

        let mut config = TexConfig::default();
        config.chapter_numbering = false;
        let bare = TexProcessor::new(config).generate_chapter(chapter, true).unwrap();
        assert!(bare.contains("\\chapter*{Beginnings}"));
    }

    #[test]
    fn test_section_structure_depths() {
        let proc = processor();
        assert_eq!(
            proc.generate_section_structure(0, "T", true).unwrap(),
            "\\chapter{T}"
        );
        assert_eq!(
            proc.generate_section_structure(2, "T", false).unwrap(),
            "\\subsection*{T}"
        );
        assert_eq!(
            proc.generate_section_structure(5, "T", true).unwrap(),
            "\\subparagraph{T}"
        );
    }

    #[test]
    fn test_section_structure_depth_out_of_range() {
        let err = processor().generate_section_structure(6, "T", true).unwrap_err();
        assert!(matches!(err, Error::Processing(_)));
        assert!(err.to_string().contains("depth 6"));
    }

    #[test]
    fn test_complete_document_shape() {
        let doc = processor()
            .generate_complete_document(&sample_content(), true)
            .unwrap();
        assert!(doc.starts_with("\\documentclass"));
        assert!(doc.contains("\\begin{document}"));
        assert!(doc.trim_end().ends_with("\\end{document}"));
        assert!(doc.contains("by Jane Doe"));
        assert!(doc.contains("\\chapter{Beginnings}"));
        // Exactly one forced break for the two chapters.
        assert_eq!(doc.matches("\\newpage").count(), 1);
    }

    #[test]
    fn test_complete_document_without_metadata() {
        let doc = processor()
            .generate_complete_document(&sample_content(), false)
            .unwrap();
        assert!(!doc.contains("titlepage"));
        assert!(doc.contains("\\chapter{Golden Age}"));
    }

    #[test]
    fn test_complete_document_fails_fast_on_bad_numbering() {
        let mut content = sample_content();
        content.chapters[1].number = 7;
        let err = processor()
            .generate_complete_document(&content, false)
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_custom_commands_in_preamble() {
        let mut config = TexConfig::default();
        config
            .custom_commands
            .insert("bookspacing".into(), "\\setlength{\\parskip}{6pt}".into());
        let doc = TexProcessor::new(config)
            .generate_complete_document(&sample_content(), false)
            .unwrap();
        assert!(doc.contains("\\newcommand{\\bookspacing}{\\setlength{\\parskip}{6pt}}"));
    }

    #[test]
    fn test_anchor_labels_unique_per_chapter() {
        let content = sample_content();
        let proc = processor();
        let a = proc.chapter_anchor(&content.chapters[0]);
        let b = proc.chapter_anchor(&content.chapters[1]);
        assert_ne!(a, b);
    }
}
