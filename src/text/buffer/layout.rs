//! Glyph measurement, wrapping, scrolling and hit-testing.
//!
//! Measurement, drawing and hit-testing all place glyphs through
//! [`LineLayout`], so they agree on where a line wraps.

use super::TextBuffer;
use crate::backend::Vec2;
use crate::text::Cursor;
use crate::unicode;

/// Where one glyph of a line is placed, relative to the line's first row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct GlyphBox {
    pub column: usize,
    pub codepoint: u32,
    pub x: f32,
    pub row: usize,
    pub width: f32,
}

/// Walks the glyphs of one line, wrapping rows the way the buffer is
/// configured to.
pub(super) struct LineLayout<'a> {
    buffer: &'a TextBuffer,
    content: &'a [u8],
    column: usize,
    x: f32,
    row: usize,
}

impl LineLayout<'_> {
    /// Pen position after the last glyph, as `(x, row)`.
    pub(super) fn end(mut self) -> (f32, usize) {
        while self.next().is_some() {}
        (self.x, self.row)
    }
}

impl Iterator for LineLayout<'_> {
    type Item = GlyphBox;

    fn next(&mut self) -> Option<GlyphBox> {
        if self.column >= self.content.len() {
            return None;
        }
        let (codepoint, _) = unicode::decode_at(self.content, self.column);
        let width = self.buffer.glyph_width(codepoint);
        let advance = width + self.buffer.spacing;
        if self.buffer.wraps(self.x, advance) {
            self.x = 0.0;
            self.row += 1;
        }
        let glyph = GlyphBox {
            column: self.column,
            codepoint,
            x: self.x,
            row: self.row,
            width,
        };
        self.x += advance;
        self.column = unicode::next_boundary(self.content, self.column);
        Some(glyph)
    }
}

impl TextBuffer {
    /// On-screen width of `codepoint` at the current font size.
    ///
    /// Glyphs with no advance fall back to their atlas width.
    pub(crate) fn glyph_width(&self, codepoint: u32) -> f32 {
        let glyph = self.font.glyph(codepoint);
        if glyph.advance_x == 0.0 {
            glyph.atlas.width * self.scale
        } else {
            glyph.advance_x * self.scale
        }
    }

    /// Check if a glyph advancing `advance` must start a new row when the
    /// current row is `row_width` wide. A glyph never wraps away from an
    /// empty row.
    pub(super) fn wraps(&self, row_width: f32, advance: f32) -> bool {
        self.wrap && row_width > 0.0 && row_width + advance > self.bounds.width
    }

    pub(super) fn layout<'a>(&'a self, content: &'a [u8]) -> LineLayout<'a> {
        LineLayout {
            buffer: self,
            content,
            column: 0,
            x: 0.0,
            row: 0,
        }
    }

    pub(super) fn update_font_metrics(&mut self) {
        let base = self.font.base_size();
        self.scale = if base > 0.0 { self.font_size / base } else { 1.0 };
        self.line_advance = self.font.glyph(u32::from(b' ')).atlas.height * self.scale;
    }

    /// Recompute `wrap_count` and `dims` for line `index`.
    pub(super) fn measure_line(&mut self, index: usize) {
        let Some(line) = self.lines.get(index) else {
            return;
        };
        let mut width = 0.0f32;
        let mut rows = 0;
        for glyph in self.layout(&line.content) {
            width += glyph.width + self.spacing;
            rows = glyph.row;
        }
        let wrap_count = rows + 1;
        let height = wrap_count as f32 * self.line_advance;
        let line = &mut self.lines[index];
        line.wrap_count = wrap_count;
        line.dims = Some((width, height));
    }

    pub(super) fn measure_lines(&mut self) {
        for index in 0..self.lines.len() {
            self.measure_line(index);
        }
    }

    /// Sum of row heights; resets or clamps the vertical scroll to fit.
    pub(super) fn update_total_height(&mut self) {
        let rows: usize = if self.wrap {
            self.lines.iter().map(|l| l.wrap_count).sum()
        } else {
            self.lines.len()
        };
        self.total_height = rows as f32 * self.line_advance;
        self.clamp_scroll_v();
    }

    fn max_scroll_v(&self) -> f32 {
        (self.total_height - self.bounds.height).max(0.0)
    }

    fn clamp_scroll_v(&mut self) {
        self.scroll_v = self.scroll_v.clamp(0.0, self.max_scroll_v());
    }

    /// Scroll vertically by `delta` pixels. Content that fits the viewport
    /// does not scroll.
    pub fn scroll_by(&mut self, delta: f32) {
        if self.total_height <= self.bounds.height {
            return;
        }
        self.scroll_v = (self.scroll_v + delta).clamp(0.0, self.max_scroll_v());
    }

    /// Caret position within its line as `(x, row)`.
    pub(super) fn caret_in_line(&self, cursor: Cursor) -> (f32, usize) {
        let content = &self.lines[cursor.line].content;
        let mut layout = self.layout(content);
        for glyph in layout.by_ref() {
            if glyph.column >= cursor.column {
                return (glyph.x, glyph.row);
            }
        }
        layout.end()
    }

    /// Top of the cursor's visual row, in content pixels.
    pub(super) fn cursor_y(&self) -> f32 {
        let rows_above: usize = if self.wrap {
            self.lines[..self.cursor.line]
                .iter()
                .map(|l| l.wrap_count)
                .sum::<usize>()
                + self.caret_in_line(self.cursor).1
        } else {
            self.cursor.line
        };
        rows_above as f32 * self.line_advance
    }

    /// Scroll the least amount that brings the cursor's row into view, then
    /// recompute the horizontal scroll.
    pub(super) fn scroll_cursor_into_view(&mut self) {
        let y = self.cursor_y();
        if y < self.scroll_v {
            self.scroll_v = y;
        } else if y + self.line_advance > self.scroll_v + self.bounds.height {
            self.scroll_v = y + self.line_advance - self.bounds.height;
        }
        self.clamp_scroll_v();
        self.update_scroll_h();
    }

    fn update_scroll_h(&mut self) {
        if self.wrap {
            self.scroll_h = 0.0;
            return;
        }
        let (x, _) = self.caret_in_line(self.cursor);
        self.scroll_h = (x + self.spacing - self.bounds.width).max(0.0);
    }

    /// Map a point in content coordinates to a cursor position.
    ///
    /// Content coordinates are relative to the bounds' top-left corner with
    /// scrolling added back in. Points outside the scrolled viewport give
    /// `None`; points past the end of a row give the end of the line.
    #[must_use]
    pub fn hit_test(&self, point: Vec2) -> Option<Cursor> {
        if point.x < 0.0
            || point.y < 0.0
            || point.x > self.bounds.width + self.scroll_h
            || point.y > self.bounds.height + self.scroll_v
            || self.line_advance <= 0.0
        {
            return None;
        }
        let (line, row) = if self.wrap {
            let mut top = 0.0;
            let mut line = 0;
            for (index, l) in self.lines.iter().enumerate() {
                line = index;
                let bottom = top + l.wrap_count as f32 * self.line_advance;
                if point.y <= bottom {
                    break;
                }
                top = bottom;
            }
            (line, ((point.y - top) / self.line_advance) as usize)
        } else {
            ((point.y / self.line_advance) as usize % self.lines.len(), 0)
        };
        let content = &self.lines[line].content;
        for glyph in self.layout(content) {
            let in_row = !self.wrap || glyph.row == row;
            if in_row && point.x >= glyph.x && point.x <= glyph.x + glyph.width + self.spacing {
                return Some(Cursor::new(line, glyph.column));
            }
        }
        Some(Cursor::new(line, content.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::backend::{Rect, Vec2};
    use crate::text::Cursor;

    #[test]
    fn test_measure_without_wrap() {
        let buffer = buffer_with("abcd");
        let line = &buffer.lines()[0];
        assert_eq!(line.wrap_count(), 1);
        assert_eq!(line.dims(), Some((48.0, 20.0)));
    }

    #[test]
    fn test_wrap_breaks_before_overflowing_glyph() {
        let mut buffer = buffer_with("abcdefghij");
        buffer.set_width(50.0);
        buffer.set_wrap_lines(true);
        // 12px per glyph: four fit in 50px
        assert_eq!(buffer.lines()[0].wrap_count(), 3);
        assert_eq!(buffer.total_height(), 60.0);
        buffer.set_wrap_lines(false);
        assert_eq!(buffer.lines()[0].wrap_count(), 1);
        assert_eq!(buffer.total_height(), 20.0);
    }

    #[test]
    fn test_wide_glyph_keeps_its_own_row() {
        let mut buffer = buffer_with("ab");
        buffer.set_width(5.0);
        buffer.set_wrap_lines(true);
        assert_eq!(buffer.lines()[0].wrap_count(), 2);
    }

    #[test]
    fn test_scroll_follows_cursor_down() {
        let mut buffer = buffer_with(&"x\n".repeat(20));
        // 21 lines of 20px in a 200px viewport
        assert_eq!(buffer.total_height(), 420.0);
        assert_eq!(buffer.cursor().line, 20);
        assert_eq!(buffer.scroll_v(), 220.0);
        buffer.jump_to_buffer_top(false);
        assert_eq!(buffer.scroll_v(), 0.0);
    }

    #[test]
    fn test_scroll_by_clamps() {
        let mut buffer = buffer_with(&"x\n".repeat(20));
        buffer.scroll_by(-1000.0);
        assert_eq!(buffer.scroll_v(), 0.0);
        buffer.scroll_by(1000.0);
        assert_eq!(buffer.scroll_v(), 220.0);
        let mut short = buffer_with("one line");
        short.scroll_by(50.0);
        assert_eq!(short.scroll_v(), 0.0);
    }

    #[test]
    fn test_horizontal_scroll_tracks_cursor() {
        let mut buffer = buffer_with(&"a".repeat(40));
        // caret at 480px in a 400px viewport
        assert_eq!(buffer.scroll_h(), 82.0);
        buffer.jump_to_line_start(false);
        assert_eq!(buffer.scroll_h(), 0.0);
        buffer.jump_to_line_end(false);
        buffer.set_wrap_lines(true);
        assert_eq!(buffer.scroll_h(), 0.0);
    }

    #[test]
    fn test_hit_test_unwrapped() {
        let buffer = buffer_with("abc\nde");
        assert_eq!(buffer.hit_test(Vec2::new(1.0, 1.0)), Some(Cursor::new(0, 0)));
        assert_eq!(buffer.hit_test(Vec2::new(13.0, 5.0)), Some(Cursor::new(0, 1)));
        assert_eq!(buffer.hit_test(Vec2::new(13.0, 25.0)), Some(Cursor::new(1, 1)));
        assert_eq!(buffer.hit_test(Vec2::new(200.0, 25.0)), Some(Cursor::new(1, 2)));
        assert_eq!(buffer.hit_test(Vec2::new(-1.0, 5.0)), None);
        assert_eq!(buffer.hit_test(Vec2::new(5.0, 500.0)), None);
    }

    #[test]
    fn test_hit_test_wraps_rows_modulo_line_count() {
        let buffer = buffer_with("abc\nde");
        // third row is past the content: rows repeat over the lines
        assert_eq!(buffer.hit_test(Vec2::new(1.0, 45.0)), Some(Cursor::new(0, 0)));
    }

    #[test]
    fn test_hit_test_wrapped_sub_rows() {
        let mut buffer = buffer_with("abcdefgh\nxy");
        buffer.set_bounds(Rect::new(0.0, 0.0, 50.0, 200.0));
        buffer.set_wrap_lines(true);
        // line 0 occupies rows 0-1, line 1 row 2
        assert_eq!(buffer.hit_test(Vec2::new(1.0, 25.0)), Some(Cursor::new(0, 4)));
        assert_eq!(buffer.hit_test(Vec2::new(13.0, 25.0)), Some(Cursor::new(0, 5)));
        assert_eq!(buffer.hit_test(Vec2::new(13.0, 45.0)), Some(Cursor::new(1, 1)));
    }

    #[test]
    fn test_zero_advance_glyph_uses_atlas_width() {
        use std::rc::Rc;

        use crate::backend::Glyph;
        use crate::backend::headless::FixedFont;

        let font = FixedFont::new(20.0, 10.0, 20.0).with_glyph(
            'i',
            Glyph {
                advance_x: 0.0,
                atlas: Rect::new(0.0, 0.0, 4.0, 20.0),
            },
        );
        let mut buffer = buffer_with("ii");
        buffer.set_font(Rc::new(font));
        assert_eq!(buffer.lines()[0].dims(), Some((12.0, 20.0)));
    }
}
