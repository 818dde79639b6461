//! Pure LaTeX escaping and anchor-slug utilities.
//!
//! These functions handle escaping reserved LaTeX characters in literal
//! text and generating slug identifiers for chapter anchor labels.

/// Escape reserved LaTeX characters in literal text.
///
/// Applies a fixed table:
/// - `&`, `%`, `$`, `#`, `_`, `{`, `}`: backslash-escaped
/// - `^` becomes `\textasciicircum{}`
/// - `~` becomes `\textasciitilde{}`
/// - `\` becomes `\textbackslash{}`
///
/// Single pass, so already-emitted escapes are never re-escaped. This is
/// only ever applied to literal text, never to markup the processor
/// itself emits.
///
/// # Examples
///
/// ```
/// use bookbinder::tex::escape_text;
///
/// assert_eq!(escape_text("50% off"), "50\\% off");
/// assert_eq!(escape_text("A & B"), "A \\& B");
/// ```
pub fn escape_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);

    for c in text.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                result.push('\\');
                result.push(c);
            }
            '^' => result.push_str("\\textasciicircum{}"),
            '~' => result.push_str("\\textasciitilde{}"),
            '\\' => result.push_str("\\textbackslash{}"),
            _ => result.push(c),
        }
    }

    result
}

/// Generate a slug from text for use in anchor labels.
///
/// Converts text to lowercase, replaces whitespace and separators with
/// hyphens, and removes consecutive/leading/trailing hyphens.
///
/// # Examples
///
/// ```
/// use bookbinder::tex::slugify;
///
/// assert_eq!(slugify("Chapter One"), "chapter-one");
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// ```
pub fn slugify(text: &str) -> String {
    let normalized: String = text
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c.to_ascii_lowercase())
            } else if c.is_whitespace() || c == '-' || c == '_' {
                Some('-')
            } else {
                None
            }
        })
        .collect();
    normalized
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
