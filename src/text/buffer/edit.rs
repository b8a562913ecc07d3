//! Insertion and deletion.

use super::TextBuffer;
use crate::text::{Cursor, Line};
use crate::unicode;

/// What a tab expands to.
const TAB: &[u8] = b"    ";

impl TextBuffer {
    /// Splice raw bytes into the current line at the cursor.
    ///
    /// `bytes` must not contain a newline; use [`TextBuffer::insert_text`]
    /// for multi-line input.
    pub fn insert_bytes(&mut self, bytes: &[u8]) {
        let Cursor { line, column } = self.cursor;
        self.lines[line]
            .content
            .splice(column..column, bytes.iter().copied());
        self.cursor.column += bytes.len();
        self.clamp_cursor_and_selection();
        self.measure_line(line);
        self.mark_dirty();
    }

    /// Insert one codepoint at the cursor.
    pub fn insert_codepoint(&mut self, codepoint: u32) {
        if codepoint == u32::from(b'\n') {
            self.insert_newline();
        } else {
            self.insert_bytes(unicode::encode(codepoint).as_bytes());
        }
    }

    /// Insert text at the cursor.
    ///
    /// `\n` starts a new line, `\t` becomes four spaces and `\r` is dropped.
    pub fn insert_text(&mut self, text: &str) {
        let first = self.cursor.line;
        let mut segment = Vec::new();
        for &byte in text.as_bytes() {
            match byte {
                b'\n' => {
                    self.splice_segment(&segment);
                    segment.clear();
                    self.insert_newline();
                }
                b'\r' => {}
                b'\t' => segment.extend_from_slice(TAB),
                _ => segment.push(byte),
            }
        }
        self.splice_segment(&segment);
        self.clamp_cursor_and_selection();
        for index in first..=self.cursor.line {
            self.measure_line(index);
        }
        self.mark_dirty();
    }

    fn splice_segment(&mut self, segment: &[u8]) {
        let Cursor { line, column } = self.cursor;
        self.lines[line]
            .content
            .splice(column..column, segment.iter().copied());
        self.cursor.column += segment.len();
    }

    /// Insert text followed by a newline.
    pub fn insert_line(&mut self, text: &str) {
        self.insert_text(text);
        self.insert_newline();
    }

    /// Split the current line at the cursor; the cursor moves to the start
    /// of the new line.
    pub fn insert_newline(&mut self) {
        let Cursor { line, column } = self.cursor;
        let tail = self.lines[line].content.split_off(column);
        self.lines.insert(line + 1, Line::from_bytes(tail));
        self.cursor = Cursor::new(line + 1, 0);
        self.clamp_cursor_and_selection();
        self.measure_line(line);
        self.measure_line(line + 1);
        self.mark_dirty();
    }

    /// Remove the text between two positions and join the lines around it.
    /// The cursor ends up at the earlier position.
    fn erase_range(&mut self, a: Cursor, b: Cursor) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let start = self.clamp_position(start);
        let end = self.clamp_position(end);
        if start.line == end.line {
            self.lines[start.line]
                .content
                .drain(start.column..end.column);
        } else {
            let tail = self.lines[end.line].content.split_off(end.column);
            let first = &mut self.lines[start.line].content;
            first.truncate(start.column);
            first.extend_from_slice(&tail);
            self.lines.drain(start.line + 1..=end.line);
        }
        self.cursor = start;
        self.clamp_cursor_and_selection();
        self.measure_line(start.line);
        self.mark_dirty();
    }

    /// Delete `count` codepoints before the cursor, joining lines when a
    /// line start is crossed.
    pub fn delete_backward(&mut self, count: usize) {
        let origin = self.cursor;
        self.move_left(count, false);
        self.erase_range(self.cursor, origin);
    }

    /// Delete `count` codepoints after the cursor, joining lines when a
    /// line end is crossed.
    pub fn delete_forward(&mut self, count: usize) {
        let origin = self.cursor;
        self.move_right(count, false);
        self.erase_range(origin, self.cursor);
    }

    /// Delete `count` words before the cursor.
    pub fn delete_word_backward(&mut self, count: usize) {
        let origin = self.cursor;
        self.move_word(-isize::try_from(count).unwrap_or(isize::MAX), false);
        self.erase_range(self.cursor, origin);
    }

    /// Delete `count` words after the cursor.
    pub fn delete_word_forward(&mut self, count: usize) {
        let origin = self.cursor;
        self.move_word(isize::try_from(count).unwrap_or(isize::MAX), false);
        self.erase_range(origin, self.cursor);
    }

    /// Remove line `index`.
    pub fn delete_line(&mut self, index: usize) {
        self.delete_line_range(index, index);
    }

    /// Remove lines `first..=last`. Removing every line leaves one empty
    /// line behind.
    pub fn delete_line_range(&mut self, first: usize, last: usize) {
        let (first, last) = if first <= last { (first, last) } else { (last, first) };
        if first >= self.lines.len() {
            return;
        }
        let last = last.min(self.lines.len() - 1);
        if first == 0 && last == self.lines.len() - 1 {
            self.lines.truncate(1);
            self.lines[0] = Line::new();
        } else {
            self.lines.drain(first..=last);
        }
        self.clamp_cursor_and_selection();
        self.measure_line(self.cursor.line.min(self.lines.len() - 1));
        self.mark_dirty();
    }

    /// Reset to a single empty line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.lines.push(Line::new());
        self.cursor = Cursor::start();
        self.selection = None;
        self.scroll_v = 0.0;
        self.measure_line(0);
        self.mark_dirty();
    }

    /// Bytes between two ordered positions, lines joined with `\n`.
    fn text_between(&self, start: Cursor, end: Cursor) -> Vec<u8> {
        if start.line == end.line {
            return self.lines[start.line].content[start.column..end.column].to_vec();
        }
        let mut out = self.lines[start.line].content[start.column..].to_vec();
        out.push(b'\n');
        for line in &self.lines[start.line + 1..end.line] {
            out.extend_from_slice(&line.content);
            out.push(b'\n');
        }
        out.extend_from_slice(&self.lines[end.line].content[..end.column]);
        out
    }

    /// Selected text, or an empty string without a selection.
    #[must_use]
    pub fn copy_selection(&self) -> String {
        let Some(sel) = self.selection else {
            return String::new();
        };
        let (start, end) = sel.range();
        let start = self.clamp_position(start);
        let end = self.clamp_position(end);
        String::from_utf8_lossy(&self.text_between(start, end)).into_owned()
    }

    /// Delete the selected text and drop the selection.
    pub fn delete_selection(&mut self) {
        if let Some(sel) = self.selection.take() {
            let (start, end) = sel.range();
            self.erase_range(start, end);
        }
    }

    /// Copy then delete the selection.
    pub fn cut_selection(&mut self) -> String {
        let text = self.copy_selection();
        self.delete_selection();
        text
    }
}
