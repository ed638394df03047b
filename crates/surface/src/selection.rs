//! Flat-buffer text selection.

/// A text selection as a normalized byte range, `start <= end`.
///
/// Offsets produced by [`TextBox`](crate::TextBox) are always on valid
/// UTF-8 character boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl SelectionRange {
    /// Create a selection range, normalizing the endpoint order.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// A zero-width selection is just a caret.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Selection length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// The selected substring of `value`.
    ///
    /// # Panics
    ///
    /// Panics if the offsets are out of bounds or off character boundaries.
    #[inline]
    pub fn slice<'a>(&self, value: &'a str) -> &'a str {
        &value[self.start..self.end]
    }
}
