//! UTF-8 boundary helpers for caret positioning.
//!
//! Caret and selection offsets are byte indices into UTF-8 strings; these
//! helpers keep every offset the adapters produce on a valid character
//! boundary.

/// Clamp an arbitrary byte index to a valid character boundary.
///
/// Indices beyond the string clamp to `s.len()`; indices inside a multi-byte
/// character move back to its first byte.
///
/// ```
/// use surface::clamp_to_char_boundary;
///
/// let s = "a€b"; // '€' is 3 bytes
/// assert_eq!(clamp_to_char_boundary(s, 2), 1);
/// assert_eq!(clamp_to_char_boundary(s, 100), 5);
/// ```
#[inline]
pub fn clamp_to_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Next caret position after `i`, or `s.len()` at the end.
pub fn next_char_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    match s[i..].chars().next() {
        Some(c) => i + c.len_utf8(),
        None => s.len(),
    }
}

/// Character ending at byte index `i`, if any.
pub(crate) fn char_before(s: &str, i: usize) -> Option<char> {
    s[..clamp_to_char_boundary(s, i)].chars().next_back()
}

/// Character starting at byte index `i`, if any.
pub(crate) fn char_at(s: &str, i: usize) -> Option<char> {
    s[clamp_to_char_boundary(s, i)..].chars().next()
}
