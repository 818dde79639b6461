//! Content metrics: word counting and plain-text projection.
//!
//! Word counting uses one deterministic definition: tokens are maximal
//! runs of non-whitespace characters (Unicode whitespace, via
//! `split_whitespace`), summed over paragraph text only. Formatting spans
//! never affect the count, and chapter/book titles are not counted.

use super::BookContent;

/// Count the words in all paragraphs of the book.
///
/// # Examples
///
/// ```
/// use bookbinder::model::{count_words, BookContent, Chapter, Paragraph};
///
/// let book = BookContent {
///     title: "T".into(),
///     author: "A".into(),
///     genre: "G".into(),
///     plot_summary: "S".into(),
///     chapters: vec![Chapter {
///         number: 1,
///         title: "One".into(),
///         paragraphs: vec![Paragraph::plain("two  words")],
///     }],
/// };
/// assert_eq!(count_words(&book), 2);
/// ```
pub fn count_words(content: &BookContent) -> usize {
    content
        .chapters
        .iter()
        .flat_map(|c| &c.paragraphs)
        .map(|p| p.text.split_whitespace().count())
        .sum()
}

/// Project the book to plain text, dropping all formatting spans.
///
/// Lossy on styling, lossless on word order and content: title, byline,
/// plot summary, then each chapter as a header line followed by its
/// paragraphs in order.
pub fn extract_plain_text(content: &BookContent) -> String {
    let mut out = String::new();

    out.push_str(&content.title);
    out.push('\n');
    out.push_str(&format!("By {}\n\n", content.author));
    out.push_str(&content.plot_summary);
    out.push('\n');

    for chapter in &content.chapters {
        out.push('\n');
        out.push_str(&format!("Chapter {}: {}\n", chapter.number, chapter.title));
        for paragraph in &chapter.paragraphs {
            out.push('\n');
            out.push_str(&paragraph.text);
            out.push('\n');
        }
    }

    out
}
