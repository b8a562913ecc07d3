//! Cursor motion.
//!
//! Every motion takes `extend`: when set, a selection is started at the
//! pre-motion cursor if none exists and its head follows the cursor.

use super::TextBuffer;
use crate::text::Cursor;
use crate::unicode;

impl TextBuffer {
    fn begin_motion(&mut self, extend: bool) {
        if extend && self.selection.is_none() {
            self.start_selection();
        }
    }

    fn end_motion(&mut self, extend: bool) {
        if extend {
            if let Some(sel) = self.selection.as_mut() {
                sel.head = self.cursor;
            }
        }
        self.scroll_cursor_into_view();
    }

    /// One codepoint left, wrapping to the end of the previous line.
    fn step_left(&mut self) -> bool {
        if self.cursor.column > 0 {
            self.cursor.column = unicode::prev_boundary(&self.current_line().content, self.cursor.column);
            true
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.column = self.current_line().len();
            true
        } else {
            false
        }
    }

    /// One codepoint right, wrapping to the start of the next line.
    fn step_right(&mut self) -> bool {
        let len = self.current_line().len();
        if self.cursor.column < len {
            self.cursor.column = unicode::next_boundary(&self.current_line().content, self.cursor.column);
            true
        } else if self.cursor.line + 1 < self.lines.len() {
            self.cursor.line += 1;
            self.cursor.column = 0;
            true
        } else {
            false
        }
    }

    fn step(&mut self, forward: bool) -> bool {
        if forward { self.step_right() } else { self.step_left() }
    }

    /// Move by `delta` codepoints; a line break counts as one.
    ///
    /// Returns the number of steps actually taken.
    pub fn move_horizontal(&mut self, delta: isize, extend: bool) -> usize {
        if delta == 0 {
            return 0;
        }
        self.begin_motion(extend);
        let mut moved = 0;
        while moved < delta.unsigned_abs() && self.step(delta > 0) {
            moved += 1;
        }
        self.end_motion(extend);
        moved
    }

    /// Move `count` codepoints left.
    pub fn move_left(&mut self, count: usize, extend: bool) -> usize {
        self.move_horizontal(-signed(count), extend)
    }

    /// Move `count` codepoints right.
    pub fn move_right(&mut self, count: usize, extend: bool) -> usize {
        self.move_horizontal(signed(count), extend)
    }

    /// Move by `delta` lines, keeping the number of codepoints before the
    /// cursor where the target line is long enough.
    ///
    /// Returns the number of lines actually moved.
    pub fn move_vertical(&mut self, delta: isize, extend: bool) -> usize {
        if delta == 0 {
            return 0;
        }
        self.begin_motion(extend);
        let last = self.lines.len() - 1;
        let target = self
            .cursor
            .line
            .saturating_add_signed(delta)
            .min(last);
        let moved = target.abs_diff(self.cursor.line);
        let chars = self.count_chars_to_cursor();
        self.cursor.line = target;
        let content = &self.lines[target].content;
        self.cursor.column = unicode::nth_char_offset(content, chars).unwrap_or(content.len());
        self.end_motion(extend);
        moved
    }

    /// Move `count` lines up.
    pub fn move_up(&mut self, count: usize, extend: bool) -> usize {
        self.move_vertical(-signed(count), extend)
    }

    /// Move `count` lines down.
    pub fn move_down(&mut self, count: usize, extend: bool) -> usize {
        self.move_vertical(signed(count), extend)
    }

    /// Move by `delta` words.
    ///
    /// The cursor steps one codepoint at a time. A word is counted when the
    /// byte after the cursor is punctuation, or when the byte under it ends
    /// a word and the byte after it starts one. Returns the number of
    /// codepoint steps taken.
    pub fn move_word(&mut self, delta: isize, extend: bool) -> usize {
        if delta == 0 {
            return 0;
        }
        self.begin_motion(extend);
        let forward = delta > 0;
        let mut words = 0;
        let mut moved = 0;
        while words < delta.unsigned_abs() && self.step(forward) {
            moved += 1;
            let under = self.char_under_cursor();
            let after = self.char_after_cursor();
            if is_punct(after) || (ends_word(under) && starts_word(after)) {
                words += 1;
            }
        }
        self.end_motion(extend);
        moved
    }

    /// Jump to column 0 of the current line.
    pub fn jump_to_line_start(&mut self, extend: bool) {
        self.begin_motion(extend);
        self.cursor.column = 0;
        self.end_motion(extend);
    }

    /// Jump to the end of the current line.
    pub fn jump_to_line_end(&mut self, extend: bool) {
        self.begin_motion(extend);
        self.cursor.column = self.current_line().len();
        self.end_motion(extend);
    }

    /// Jump to the start of the buffer.
    pub fn jump_to_buffer_top(&mut self, extend: bool) {
        self.begin_motion(extend);
        self.cursor = Cursor::start();
        self.end_motion(extend);
    }

    /// Jump to the end of the last line.
    pub fn jump_to_buffer_bottom(&mut self, extend: bool) {
        self.begin_motion(extend);
        self.cursor = self.end_position();
        self.end_motion(extend);
    }
}

fn signed(count: usize) -> isize {
    isize::try_from(count).unwrap_or(isize::MAX)
}

fn is_punct(byte: Option<u8>) -> bool {
    byte.is_some_and(|b| b.is_ascii_punctuation())
}

/// Whitespace, a line edge, or a decodable non-alphanumeric byte.
fn ends_word(byte: Option<u8>) -> bool {
    byte.is_none_or(|b| {
        b.is_ascii_whitespace()
            || (!b.is_ascii_alphanumeric() && unicode::lead_byte_length(b).is_some())
    })
}

/// An alphanumeric byte or the lead of a multi-byte codepoint.
fn starts_word(byte: Option<u8>) -> bool {
    byte.is_some_and(|b| {
        (b.is_ascii_alphanumeric() || unicode::lead_byte_length(b) != Some(1))
            && !b.is_ascii_whitespace()
    })
}
