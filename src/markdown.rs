//! Inline emphasis parsing for raw text.
//!
//! An alternate path into the rendering layer for text that arrives as a
//! raw string rather than as validated paragraphs with offset spans.
//! Asterisk runs toggle styles by run length: `*` italic, `**` bold,
//! `***` bold-italic. A matching run (same length) closes the innermost
//! open run; anything unmatched is demoted to literal text.
//!
//! The parser is total: it never fails, always returns at least one
//! segment covering the whole input, and preserves every literal
//! (non-marker) character in order.

/// A run of text with resolved styling.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Renderer override slot; never set by parsing.
    pub font_size: Option<f32>,
}

impl Segment {
    fn new(text: String, bold: bool, italic: bool) -> Self {
        Self {
            text,
            bold,
            italic,
            font_size: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Text(String),
    /// An asterisk run of length 1..=3, candidate emphasis marker.
    Marker(usize),
}

/// Parse inline emphasis markers into styled segments.
///
/// # Examples
///
/// ```
/// use bookbinder::markdown::parse;
///
/// let segments = parse("Game *Pong* was revolutionary");
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[1].text, "Pong");
/// assert!(segments[1].italic);
/// assert!(!segments[1].bold);
/// ```
pub fn parse(text: &str) -> Vec<Segment> {
    if text.is_empty() {
        return vec![Segment::new(String::new(), false, false)];
    }

    let tokens = resolve(tokenize(text));

    // Walk resolved tokens, toggling state and merging adjacent
    // same-style text into non-overlapping output segments.
    let mut segments: Vec<Segment> = Vec::new();
    let mut bold = false;
    let mut italic = false;
    let mut buffer = String::new();

    for token in tokens {
        match token {
            Token::Text(s) => buffer.push_str(&s),
            Token::Marker(len) => {
                if !buffer.is_empty() {
                    push_merged(&mut segments, Segment::new(std::mem::take(&mut buffer), bold, italic));
                }
                match len {
                    1 => italic = !italic,
                    2 => bold = !bold,
                    _ => {
                        bold = !bold;
                        italic = !italic;
                    }
                }
            }
        }
    }
    if !buffer.is_empty() {
        push_merged(&mut segments, Segment::new(buffer, bold, italic));
    }

    if segments.is_empty() {
        // Input was nothing but balanced markers; keep the totality
        // guarantee of at least one segment.
        segments.push(Segment::new(String::new(), false, false));
    }

    segments
}

fn push_merged(segments: &mut Vec<Segment>, segment: Segment) {
    if let Some(last) = segments.last_mut() {
        if last.bold == segment.bold && last.italic == segment.italic {
            last.text.push_str(&segment.text);
            return;
        }
    }
    segments.push(segment);
}

/// Single left-to-right scan splitting the input into text and candidate
/// marker runs. Runs longer than three asterisks carry no emphasis
/// meaning and stay literal.
fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '*' {
            literal.push(c);
            continue;
        }
        let mut run = 1;
        while chars.peek() == Some(&'*') {
            chars.next();
            run += 1;
        }
        if run > 3 {
            literal.extend(std::iter::repeat('*').take(run));
            continue;
        }
        if !literal.is_empty() {
            tokens.push(Token::Text(std::mem::take(&mut literal)));
        }
        tokens.push(Token::Marker(run));
    }
    if !literal.is_empty() {
        tokens.push(Token::Text(literal));
    }

    tokens
}

/// Pair markers with a stack; unmatched markers demote to literal text.
///
/// A marker closes the innermost open run of the same length. Markers
/// still open at end of input never resolved, so they are re-emitted as
/// the literal asterisks the author typed.
fn resolve(tokens: Vec<Token>) -> Vec<Token> {
    let mut open: Vec<(usize, usize)> = Vec::new(); // (token index, run length)
    let mut matched = vec![false; tokens.len()];

    for (i, token) in tokens.iter().enumerate() {
        if let Token::Marker(len) = token {
            if let Some(top) = open.last() {
                if top.1 == *len {
                    matched[top.0] = true;
                    matched[i] = true;
                    open.pop();
                    continue;
                }
            }
            open.push((i, *len));
        }
    }

    tokens
        .into_iter()
        .enumerate()
        .map(|(i, token)| match token {
            Token::Marker(len) if !matched[i] => Token::Text("*".repeat(len)),
            other => other,
        })
        .collect()
}
