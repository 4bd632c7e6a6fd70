//! XML escaping for text content and attribute values.
//!
//! Text handed to the formatter is escaped here unless its key asks for raw
//! content. Attribute values are always escaped by the writer.

use memchr::{memchr2, memchr3};
use std::borrow::Cow;

/// Escapes the five XML special characters in a string.
///
/// Returns a `Cow<str>` to avoid allocation when no escaping is needed.
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    if !needs_escape(s.as_bytes()) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + s.len() / 8);
    escape_to(s, &mut result);
    Cow::Owned(result)
}

/// Escapes `s` only when `enabled`, borrowing otherwise.
#[inline]
pub fn escape_if(s: &str, enabled: bool) -> Cow<'_, str> {
    if enabled {
        escape(s)
    } else {
        Cow::Borrowed(s)
    }
}

#[inline]
fn needs_escape(bytes: &[u8]) -> bool {
    memchr3(b'<', b'>', b'&', bytes).is_some() || memchr2(b'"', b'\'', bytes).is_some()
}

/// Escapes XML special characters and appends to the given string.
#[inline]
pub fn escape_to(s: &str, out: &mut String) {
    let mut start = 0;

    for (i, byte) in s.bytes().enumerate() {
        let escaped = match byte {
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'&' => "&amp;",
            b'"' => "&quot;",
            b'\'' => "&apos;",
            _ => continue,
        };

        // Only ASCII bytes are replaced, so `i` is always a char boundary.
        out.push_str(&s[start..i]);
        out.push_str(escaped);
        start = i + 1;
    }

    out.push_str(&s[start..]);
}
