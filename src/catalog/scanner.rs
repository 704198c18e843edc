//! Balanced-brace scanning over catalog text
//!
//! Quoted strings and comments are skipped, so braces inside ability text
//! never disturb depth counting. All offsets are byte offsets; every byte the
//! scanner inspects is ASCII, so multi-byte characters pass through untouched.

use super::literal::object_fields;
use std::ops::Range;

/// Half-open byte range into the catalog text
pub type Span = Range<usize>;

/// A record located by [`record_spans`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSpan {
    /// `{ ... }` including both braces
    Complete(Span),
    /// Opening brace with no matching close before the text ends
    Unterminated { start: usize },
}

/// What sits at a given byte position, lexically
enum Lexeme {
    /// Ordinary code byte
    Code,
    /// String literal or comment; scanning resumes at the contained offset
    Skip(usize),
    /// String literal or block comment that never closes
    Unclosed,
}

fn lexeme_at(bytes: &[u8], pos: usize) -> Lexeme {
    match bytes[pos] {
        quote @ (b'"' | b'\'' | b'`') => {
            let mut i = pos + 1;
            while i < bytes.len() {
                match bytes[i] {
                    b'\\' => i += 2,
                    b if b == quote => return Lexeme::Skip(i + 1),
                    _ => i += 1,
                }
            }
            Lexeme::Unclosed
        }
        b'/' if bytes.get(pos + 1) == Some(&b'/') => {
            let end = bytes[pos..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(bytes.len(), |n| pos + n);
            Lexeme::Skip(end)
        }
        b'/' if bytes.get(pos + 1) == Some(&b'*') => bytes[pos + 2..]
            .windows(2)
            .position(|w| w == b"*/")
            .map_or(Lexeme::Unclosed, |n| Lexeme::Skip(pos + 2 + n + 2)),
        _ => Lexeme::Code,
    }
}

/// Byte offset of the brace that closes the one at `open`
///
/// Returns `None` when `open` is not a `{` or the text ends before depth
/// returns to zero.
pub fn find_closing_brace(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    let mut pos = open;
    while pos < bytes.len() {
        match lexeme_at(bytes, pos) {
            Lexeme::Skip(next) => {
                pos = next;
                continue;
            }
            Lexeme::Unclosed => return None,
            Lexeme::Code => match bytes[pos] {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(pos);
                    }
                }
                _ => {}
            },
        }
        pos += 1;
    }
    None
}

/// Skip whitespace and comments starting at `pos`
fn skip_trivia(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() {
        if bytes[pos].is_ascii_whitespace() {
            pos += 1;
            continue;
        }
        if bytes[pos] == b'/' {
            if let Lexeme::Skip(next) = lexeme_at(bytes, pos) {
                pos = next;
                continue;
            }
        }
        break;
    }
    pos
}

/// Whether the brace at `open` begins an object whose first key is `id`
fn opens_record(bytes: &[u8], open: usize) -> bool {
    let mut pos = skip_trivia(bytes, open + 1);
    let quote = match bytes.get(pos) {
        Some(&q @ (b'"' | b'\'')) => {
            pos += 1;
            Some(q)
        }
        _ => None,
    };

    if !bytes[pos..].starts_with(b"id") {
        return false;
    }
    pos += 2;

    match quote {
        Some(q) => {
            if bytes.get(pos) != Some(&q) {
                return false;
            }
            pos += 1;
        }
        None => {
            if bytes
                .get(pos)
                .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'$')
            {
                return false;
            }
        }
    }

    pos = skip_trivia(bytes, pos);
    bytes.get(pos) == Some(&b':')
}

/// Whether the complete object `object` has an `id` among its top-level keys
fn has_id_field(object: &str) -> bool {
    object_fields(object).is_ok_and(|fields| fields.iter().any(|f| f.key == "id"))
}

/// Locate every record in catalog text, in file order
///
/// A record is an object with an `id` among its top-level keys. When `id` is
/// the first key the object counts as a record even if it fails to parse, so
/// decode errors get reported. Objects nested inside a record are part of
/// that record and are never reported on their own. An unterminated record
/// swallows the rest of the text, so scanning stops there.
pub fn record_spans(text: &str) -> Vec<RecordSpan> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        match lexeme_at(bytes, pos) {
            Lexeme::Skip(next) => {
                pos = next;
                continue;
            }
            Lexeme::Unclosed => break,
            Lexeme::Code => {}
        }

        if bytes[pos] == b'{' {
            let closing = find_closing_brace(text, pos);
            if opens_record(bytes, pos) {
                match closing {
                    Some(end) => {
                        spans.push(RecordSpan::Complete(pos..end + 1));
                        pos = end + 1;
                        continue;
                    }
                    None => {
                        spans.push(RecordSpan::Unterminated { start: pos });
                        break;
                    }
                }
            }
            if let Some(end) = closing.filter(|&end| has_id_field(&text[pos..=end])) {
                spans.push(RecordSpan::Complete(pos..end + 1));
                pos = end + 1;
                continue;
            }
        }
        pos += 1;
    }

    spans
}
