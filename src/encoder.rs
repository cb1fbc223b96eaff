//! Literal encoding for generated Rust source
//!
//! Every embedded value ends up inside a `"…"` or `b"…"` literal, so any
//! occurrence of the `"` delimiter, backslashes, carriage returns and other
//! control characters must be escaped. Newlines stay verbatim to keep the
//! generated file diffable line by line.

use std::fmt::Write;

/// How a content value is written into the generated table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Valid UTF-8, emitted as `"…".as_bytes()`
    Text(String),
    /// Anything else, emitted as `b"…"`
    Bytes(Vec<u8>),
}

impl Literal {
    /// Pick the literal form for raw file content
    pub fn from_content(content: &[u8]) -> Self {
        match std::str::from_utf8(content) {
            Ok(text) => Literal::Text(text.to_string()),
            Err(_) => Literal::Bytes(content.to_vec()),
        }
    }

    /// Render as a Rust expression of type `&'static [u8]`
    pub fn to_expr(&self) -> String {
        match self {
            Literal::Text(text) => format!("\"{}\".as_bytes()", escape_str(text)),
            Literal::Bytes(bytes) => format!("b\"{}\"", escape_bytes(bytes)),
        }
    }
}

/// Characters that rustc refuses inside literals or that change how the
/// surrounding source is displayed.
fn must_escape(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}' | '\u{200E}' | '\u{200F}' | '\u{FEFF}'
        )
}

/// Escape a string for the body of a `"…"` literal
///
/// Escapes: backslash, double quotes, carriage returns, tabs, NUL and any
/// other control or bidi character. Newlines pass through unchanged.
pub fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push('\n'),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if must_escape(c) => {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Escape raw bytes for the body of a `b"…"` literal
///
/// Printable ASCII passes through; everything else uses `\xNN`.
pub fn escape_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            b'\n' => out.push('\n'),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b'\0' => out.push_str("\\0"),
            0x20..=0x7e => out.push(b as char),
            b => {
                let _ = write!(out, "\\x{:02x}", b);
            }
        }
    }
    out
}

/// Make a key safe to place after `//` on a single line
pub fn escape_comment(s: &str) -> String {
    s.chars()
        .map(|c| {
            if must_escape(c) {
                c.escape_unicode().to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}

/// Convert a user supplied variable name into a `SCREAMING_SNAKE_CASE`
/// static identifier. Returns `None` when no identifier can be formed.
pub fn static_ident(name: &str) -> Option<String> {
    let mut ident = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if !(c.is_ascii_alphanumeric() || c == '_') {
            return None;
        }
        if c.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            ident.push('_');
        }
        ident.push(c.to_ascii_uppercase());
        prev = Some(c);
    }

    match ident.chars().next() {
        None => None,
        Some(first) if first.is_ascii_digit() => None,
        Some(_) if ident.chars().all(|c| c == '_') => None,
        Some(_) => Some(ident),
    }
}
