//! A logical line and its cached layout.

use std::borrow::Cow;

/// One logical line of raw bytes.
///
/// `dims` and `wrap_count` are filled in by the owning buffer's measurement
/// pass and go stale whenever the content or the font metrics change.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub(crate) content: Vec<u8>,
    pub(crate) dims: Option<(f32, f32)>,
    pub(crate) wrap_count: usize,
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl Line {
    /// Create an empty, unmeasured line.
    #[must_use]
    pub fn new() -> Self {
        Self::from_bytes(Vec::new())
    }

    /// Create an unmeasured line holding `content`.
    #[must_use]
    pub fn from_bytes(content: Vec<u8>) -> Self {
        Self {
            content,
            dims: None,
            wrap_count: 1,
        }
    }

    /// Raw bytes of the line.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    /// The line as text; invalid UTF-8 is replaced.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the line has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Visual rows this line occupies; at least 1.
    #[must_use]
    pub fn wrap_count(&self) -> usize {
        self.wrap_count
    }

    /// Cached `(width, height)` in pixels, if measured.
    ///
    /// Width is the unwrapped width of the whole line, spacing included;
    /// height is `wrap_count * line_advance`.
    #[must_use]
    pub fn dims(&self) -> Option<(f32, f32)> {
        self.dims
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Self::from_bytes(text.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_line_is_unmeasured() {
        let line = Line::new();
        assert!(line.is_empty());
        assert_eq!(line.wrap_count(), 1);
        assert_eq!(line.dims(), None);
    }

    #[test]
    fn test_text_is_lossy() {
        let line = Line::from_bytes(vec![b'a', 0xFF, b'b']);
        assert_eq!(line.len(), 3);
        assert_eq!(line.text(), "a\u{FFFD}b");
        assert_eq!(Line::from("héllo").len(), 6);
    }
}
