//! Byte stream over a buffer's lines.

use std::ptr;

use super::cursor::Cursor;
use super::line::Line;

/// Read-only iterator over the raw bytes of a line sequence.
///
/// A `\n` is produced after every line, including the last, so the stream
/// matches [`TextBuffer::contents`](super::TextBuffer::contents). The
/// iterator borrows the lines, so the buffer cannot change under it; clone
/// it to restart or look ahead.
#[derive(Clone, Debug)]
pub struct TextIter<'a> {
    lines: &'a [Line],
    line: usize,
    column: usize,
}

impl<'a> TextIter<'a> {
    /// Iterator positioned at the first byte of `lines`.
    #[must_use]
    pub fn new(lines: &'a [Line]) -> Self {
        Self {
            lines,
            line: 0,
            column: 0,
        }
    }

    /// Iterator positioned one past the last line.
    #[must_use]
    pub fn end(lines: &'a [Line]) -> Self {
        Self {
            lines,
            line: lines.len(),
            column: 0,
        }
    }

    /// Position of the byte the next call to `next` yields.
    ///
    /// For the implicit newline this is the line's end column.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.line, self.column)
    }

    /// The byte the next call to `next` yields, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        let line = self.lines.get(self.line)?;
        Some(line.content.get(self.column).copied().unwrap_or(b'\n'))
    }

    /// Check if the stream is exhausted.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.line >= self.lines.len()
    }
}

impl Iterator for TextIter<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let line = self.lines.get(self.line)?;
        if let Some(&byte) = line.content.get(self.column) {
            self.column += 1;
            Some(byte)
        } else {
            self.line += 1;
            self.column = 0;
            Some(b'\n')
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.lines.get(self.line).map_or(0, |line| {
            let here = line.len() + 1 - self.column;
            here + self.lines[self.line + 1..]
                .iter()
                .map(|l| l.len() + 1)
                .sum::<usize>()
        });
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TextIter<'_> {}

impl PartialEq for TextIter<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.lines, other.lines) && self.line == other.line && self.column == other.column
    }
}
