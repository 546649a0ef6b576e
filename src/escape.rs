//! HTML escaping transform
//!
//! Replaces the five characters with reserved meaning in HTML by their
//! character references. Everything else passes through untouched, including
//! text that already looks like an entity: escaping is not idempotent.

use crate::consts::{PRE_CLOSE, PRE_OPEN};

/// Escape `&`, `<`, `>`, `"` and `'` in the given text.
///
/// `&` is replaced first so the references produced for the other characters
/// are not escaped a second time.
pub fn escape_html(unsafe_text: &str) -> String {
    unsafe_text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Wrap already escaped text in a `<pre>` block, each tag on its own line.
pub fn wrap_in_pre(escaped: &str) -> String {
    let mut wrapped = String::with_capacity(PRE_OPEN.len() + escaped.len() + PRE_CLOSE.len());
    wrapped.push_str(PRE_OPEN);
    wrapped.push_str(escaped);
    wrapped.push_str(PRE_CLOSE);
    wrapped
}
