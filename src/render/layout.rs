//! Greedy word-wrap layout over a measured drawing surface.
//!
//! Lines are filled token by token: each whitespace-delimited token is
//! measured at its segment's effective font and appended while it fits
//! under the maximum width; otherwise the current line is drawn and a new
//! line starts with the token. A token wider than the whole line still
//! gets a line of its own; there is no sub-word breaking. Mixed styles
//! within one wrapped line are drawn as separate sub-runs at their
//! measured offsets.
//!
//! The renderer never mutates page state. [`LayoutRenderer::needs_page_break`]
//! is a pure predicate; the caller decides when to start a new page.

use crate::markdown::Segment;
use crate::model::Paragraph;

use super::{FontManager, FontStyle, Surface};

/// Layout configuration with externally supplied spacing values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Vertical advance per wrapped line.
    pub line_height: f32,
    /// Vertical advance after every paragraph, drawn or not.
    pub paragraph_spacing: f32,
    /// First-line indent width.
    pub indent_size: f32,
    /// Font size used for segments without an explicit override.
    pub default_font_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_height: 14.0,
            paragraph_spacing: 7.0,
            indent_size: 18.0,
            default_font_size: 11.0,
        }
    }
}

/// A styled sub-run placed on the current line.
#[derive(Debug, Clone)]
struct LineRun {
    offset: f32,
    text: String,
    size: f32,
    bold: bool,
    italic: bool,
}

/// Word-wrap renderer for styled segments.
#[derive(Debug, Clone, Default)]
pub struct LayoutRenderer {
    config: LayoutConfig,
}

impl LayoutRenderer {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Render styled segments with word wrap, returning the new Y cursor.
    ///
    /// `first_line_indent` shifts only the first line; continuation lines
    /// start at `x`. Y advances by `line_height` for every line drawn.
    pub fn render_segments(
        &self,
        surface: &mut dyn Surface,
        fonts: &mut FontManager,
        segments: &[Segment],
        x: f32,
        y: f32,
        max_width: f32,
        first_line_indent: f32,
    ) -> f32 {
        let mut cursor_y = y;
        let mut indent = first_line_indent;
        let mut runs: Vec<LineRun> = Vec::new();
        let mut line_width = 0.0f32;

        for segment in segments {
            let size = segment.font_size.unwrap_or(self.config.default_font_size);
            let style = FontStyle::from_flags(segment.bold, segment.italic);

            for token in segment.text.split_whitespace() {
                let piece = if runs.is_empty() {
                    token.to_string()
                } else {
                    format!(" {token}")
                };
                let width = surface.measure_text(&piece, size, style);

                if !runs.is_empty() && line_width + width > max_width - indent {
                    self.flush_line(surface, fonts, &runs, x + indent, cursor_y);
                    cursor_y += self.config.line_height;
                    indent = 0.0;
                    runs.clear();
                    push_run(&mut runs, 0.0, token, size, segment);
                    // Re-measure without the joining space.
                    line_width = surface.measure_text(token, size, style);
                    continue;
                }

                push_run(&mut runs, line_width, &piece, size, segment);
                line_width += width;
            }
        }

        if !runs.is_empty() {
            self.flush_line(surface, fonts, &runs, x + indent, cursor_y);
            cursor_y += self.config.line_height;
        }

        cursor_y
    }

    /// Render a validated paragraph, converting its spans to segments.
    ///
    /// The first line is indented when `indent_first` is set. Y always
    /// advances by `paragraph_spacing` afterwards, including for empty or
    /// whitespace-only paragraphs where nothing is drawn.
    pub fn render_paragraph(
        &self,
        surface: &mut dyn Surface,
        fonts: &mut FontManager,
        paragraph: &Paragraph,
        x: f32,
        y: f32,
        max_width: f32,
        indent_first: bool,
    ) -> f32 {
        if paragraph.text.trim().is_empty() {
            return y + self.config.paragraph_spacing;
        }

        let segments = spans_to_segments(paragraph);
        let indent = if indent_first {
            self.config.indent_size
        } else {
            0.0
        };
        let end_y = self.render_segments(surface, fonts, &segments, x, y, max_width, indent);
        end_y + self.config.paragraph_spacing
    }

    /// Whether drawing `line_count` more lines would cross into the
    /// bottom margin. Pure; never mutates page state.
    pub fn needs_page_break(
        &self,
        current_y: f32,
        page_height: f32,
        bottom_margin: f32,
        line_count: usize,
    ) -> bool {
        current_y + line_count as f32 * self.config.line_height > page_height - bottom_margin
    }

    fn flush_line(
        &self,
        surface: &mut dyn Surface,
        fonts: &mut FontManager,
        runs: &[LineRun],
        line_x: f32,
        y: f32,
    ) {
        for run in runs {
            fonts.set_font(surface, run.size, run.bold, run.italic);
            surface.draw_text(line_x + run.offset, y, &run.text);
        }
    }
}

fn push_run(runs: &mut Vec<LineRun>, offset: f32, piece: &str, size: f32, segment: &Segment) {
    if let Some(last) = runs.last_mut() {
        if last.bold == segment.bold && last.italic == segment.italic && last.size == size {
            last.text.push_str(piece);
            return;
        }
    }
    runs.push(LineRun {
        offset,
        text: piece.to_string(),
        size,
        bold: segment.bold,
        italic: segment.italic,
    });
}

/// Project a paragraph's offset spans onto styled segments.
///
/// Spans are processed in start order and assumed non-overlapping; a span
/// that begins before its predecessor ended is truncated to start at that
/// end, and dropped if nothing remains.
pub fn spans_to_segments(paragraph: &Paragraph) -> Vec<Segment> {
    let chars: Vec<char> = paragraph.text.chars().collect();
    let mut spans = paragraph.spans.clone();
    spans.sort_by_key(|s| s.start);

    let mut segments = Vec::new();
    let mut cursor = 0usize;

    for span in &spans {
        let start = span.start.max(cursor);
        let end = span.end.min(chars.len());
        if start >= end {
            continue;
        }
        if start > cursor {
            segments.push(Segment {
                text: chars[cursor..start].iter().collect(),
                bold: false,
                italic: false,
                font_size: None,
            });
        }
        segments.push(Segment {
            text: chars[start..end].iter().collect(),
            bold: span.style.is_bold(),
            italic: span.style.is_italic(),
            font_size: None,
        });
        cursor = end;
    }

    if cursor < chars.len() {
        segments.push(Segment {
            text: chars[cursor..].iter().collect(),
            bold: false,
            italic: false,
            font_size: None,
        });
    }

    if segments.is_empty() {
        segments.push(Segment {
            text: paragraph.text.clone(),
            bold: false,
            italic: false,
            font_size: None,
        });
    }

    segments
}
