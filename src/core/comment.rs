//! # Comments
//!
//! A `Comment` keeps two copies of its body: `raw` is exactly what was
//! typed, `text` is the display form with each mention wrapped in Markdown
//! strong emphasis (`**@Jeff**`). Mention scanning always runs on `raw`.

use chrono::{DateTime, Local};

/// A posted comment. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: u64,
    pub author: String,
    /// Display markup
    pub text: String,
    /// Body as typed
    pub raw: String,
    /// Mentioned names (without `@`), left to right, duplicates kept
    pub mentions: Vec<String>,
    pub created_at: DateTime<Local>,
}

impl Comment {
    pub fn new(
        id: u64,
        author: impl Into<String>,
        raw: impl Into<String>,
        created_at: DateTime<Local>,
    ) -> Self {
        let raw = raw.into();
        let spans = find_mentions(&raw);
        let text = emphasize(&raw, &spans);
        let mentions = spans.iter().map(|s| s.name.to_string()).collect();
        Self {
            id,
            author: author.into(),
            text,
            raw,
            mentions,
            created_at,
        }
    }
}

/// A `@name` occurrence in a comment body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MentionSpan<'a> {
    /// Byte offset of the `@`
    pub start: usize,
    /// Byte offset just past the name
    pub end: usize,
    /// Name without the `@`
    pub name: &'a str,
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Find every `@word` token that doesn't sit on a word boundary, i.e. the
/// `@` is at the start of the text or follows a non-word character. This
/// skips things like `bob@example.com`.
pub fn find_mentions(text: &str) -> Vec<MentionSpan<'_>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'@' || (i > 0 && is_word_byte(bytes[i - 1])) {
            i += 1;
            continue;
        }
        let name_start = i + 1;
        let name_len = bytes[name_start..]
            .iter()
            .take_while(|b| is_word_byte(**b))
            .count();
        if name_len == 0 {
            i += 1;
            continue;
        }
        let end = name_start + name_len;
        spans.push(MentionSpan {
            start: i,
            end,
            name: &text[name_start..end],
        });
        i = end;
    }

    spans
}

/// True when wrapping `span` would produce broken markup: it sits inside a
/// backtick code span, or touches a `*` the author typed.
fn keep_literal(text: &str, span: &MentionSpan<'_>) -> bool {
    let before = &text[..span.start];
    let in_code = before.bytes().filter(|&b| b == b'`').count() % 2 == 1;
    in_code || before.ends_with('*') || text[span.end..].starts_with('*')
}

/// Wrap every span in `**...**`, working positionally so repeated
/// mentions of the same name are each wrapped exactly once. Spans in code
/// or next to typed asterisks are left as written.
pub fn emphasize(text: &str, spans: &[MentionSpan<'_>]) -> String {
    let mut out = String::with_capacity(text.len() + spans.len() * 4);
    let mut last = 0;
    for span in spans.iter().filter(|s| !keep_literal(text, s)) {
        out.push_str(&text[last..span.start]);
        out.push_str("**");
        out.push_str(&text[span.start..span.end]);
        out.push_str("**");
        last = span.end;
    }
    out.push_str(&text[last..]);
    out
}
