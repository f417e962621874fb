//! HTML utility functions.
//!
//! - `escape()`, `escape_attr()` - HTML entity escaping
//! - `escape_script_json()` - keep serialized JSON inside a `<script>` element
//! - `find_head_close()` - locate `</head>` in a template

use std::borrow::Cow;

// =============================================================================
// HTML Escaping
// =============================================================================

/// Characters that require HTML escaping.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters in text content.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    escape_with(s, &ESCAPE_CHARS)
}

/// Escape HTML attribute values.
///
/// Identical to `escape()` but semantically indicates attribute context.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape_with(s, &ESCAPE_CHARS)
}

#[inline]
fn escape_with<'a>(s: &'a str, chars: &[char]) -> Cow<'a, str> {
    if !s.contains(chars) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Make serialized JSON safe to embed as raw `<script>` text.
///
/// Only `</` is rewritten (to the JSON escape `<\/`), so the text still
/// parses to the same JSON value.
#[inline]
pub fn escape_script_json(json: &str) -> Cow<'_, str> {
    if !json.contains("</") {
        return Cow::Borrowed(json);
    }
    Cow::Owned(json.replace("</", "<\\/"))
}

// =============================================================================
// Template Helpers
// =============================================================================

/// Byte offset of the first `</head>` (ASCII case-insensitive).
pub fn find_head_close(html: &str) -> Option<usize> {
    const NEEDLE: &[u8] = b"</head>";
    html.as_bytes()
        .windows(NEEDLE.len())
        .position(|w| w.eq_ignore_ascii_case(NEEDLE))
}

// =============================================================================
// Tests
// =============================================================================
