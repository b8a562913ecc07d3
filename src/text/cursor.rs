//! Cursor positions and selections.

/// A position in the buffer.
///
/// `column` is a byte offset into the line, always on a codepoint boundary.
/// Positions order by line, then column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    /// Line number (0-indexed).
    pub line: usize,
    /// Byte offset within the line.
    pub column: usize,
}

impl Cursor {
    /// Create a new cursor at position.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Create a cursor at the beginning.
    #[must_use]
    pub const fn start() -> Self {
        Self::new(0, 0)
    }
}

/// A selection between the position it was started at and the position the
/// cursor last moved to.
///
/// `anchor` and `head` are kept as stored; they are only reordered locally
/// by [`Selection::range`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Cursor,
    pub head: Cursor,
}

impl Selection {
    /// Create a new selection.
    #[must_use]
    pub const fn new(anchor: Cursor, head: Cursor) -> Self {
        Self { anchor, head }
    }

    /// An empty selection at `at`.
    #[must_use]
    pub const fn at(at: Cursor) -> Self {
        Self::new(at, at)
    }

    /// The selection as `(start, end)` with `start <= end`.
    #[must_use]
    pub fn range(&self) -> (Cursor, Cursor) {
        if self.anchor <= self.head {
            (self.anchor, self.head)
        } else {
            (self.head, self.anchor)
        }
    }

    /// Check if the selection covers nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Check if `pos` lies inside the selection.
    ///
    /// The range is open at its lower end and closed at its upper end:
    /// `start < pos <= end`. The renderer asks about the position just after
    /// a glyph, so a glyph is highlighted when its right edge is selected.
    #[must_use]
    pub fn contains(&self, pos: Cursor) -> bool {
        let (start, end) = self.range();
        start < pos && pos <= end
    }
}
