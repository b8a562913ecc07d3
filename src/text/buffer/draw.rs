//! Drawing the buffer onto a [`Canvas`].

use super::TextBuffer;
use crate::backend::{Canvas, Rect, Vec2};
use crate::text::Cursor;

/// Scroll bar width as a fraction of the viewport width.
const SCROLL_BAR_WIDTH: f32 = 0.02;
const SCROLL_BAR_ROUNDNESS: f32 = 0.5;

impl TextBuffer {
    /// Draw the visible part of the buffer, clipped to its bounds.
    ///
    /// Selected glyphs are drawn inverted. Glyphs without a syntax color use
    /// the foreground color.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let bounds = self.bounds;
        let adv = self.line_advance;
        canvas.begin_scissor(bounds);
        canvas.fill_rect(bounds, self.background);

        let origin_x = bounds.x - if self.wrap { 0.0 } else { self.scroll_h };
        let mut top = bounds.y - self.scroll_v;
        let bottom = bounds.y + bounds.height;

        for (index, line) in self.lines.iter().enumerate() {
            let rows = if self.wrap { line.wrap_count.max(1) } else { 1 };
            let height = rows as f32 * adv;
            if top >= bottom {
                break;
            }
            let row_rect = Rect::new(bounds.x, top, bounds.width, height);
            if bounds.intersect(&row_rect).is_none() {
                top += height;
                continue;
            }

            let mut layout = self.layout(&line.content);
            for glyph in layout.by_ref() {
                let pos = Vec2::new(origin_x + glyph.x, top + glyph.row as f32 * adv);
                let here = Cursor::new(index, glyph.column);
                if here == self.cursor {
                    self.draw_caret(canvas, pos);
                }
                let selected = self
                    .selection
                    .is_some_and(|sel| sel.contains(Cursor::new(index, glyph.column + 1)));
                if selected {
                    let cell = Rect::new(pos.x, pos.y, glyph.width + self.spacing, adv);
                    canvas.fill_rect(cell, self.foreground);
                    canvas.draw_glyph(&*self.font, glyph.codepoint, pos, self.font_size, self.background);
                } else {
                    let color = self.colors.get(&here).copied().unwrap_or(self.foreground);
                    canvas.draw_glyph(&*self.font, glyph.codepoint, pos, self.font_size, color);
                }
            }
            if self.cursor == Cursor::new(index, line.len()) {
                let (x, row) = layout.end();
                self.draw_caret(canvas, Vec2::new(origin_x + x, top + row as f32 * adv));
            }
            top += height;
        }
        canvas.end_scissor();

        if let Some(bar) = self.scroll_bar() {
            canvas.fill_rounded_rect(bar, SCROLL_BAR_ROUNDNESS, self.foreground);
        }
    }

    fn draw_caret(&self, canvas: &mut dyn Canvas, pos: Vec2) {
        if self.cursor_visible {
            canvas.fill_rect(Rect::new(pos.x, pos.y, self.spacing, self.line_advance), self.foreground);
        }
    }

    /// Thumb of the vertical scroll bar, when the content overflows.
    fn scroll_bar(&self) -> Option<Rect> {
        let bounds = self.bounds;
        if bounds.is_empty() || self.total_height <= bounds.height {
            return None;
        }
        let shown = bounds.height / self.total_height;
        let width = bounds.width * SCROLL_BAR_WIDTH;
        Some(Rect::new(
            bounds.x + bounds.width - width,
            bounds.y + self.scroll_v / self.total_height * bounds.height,
            width,
            shown * bounds.height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::backend::headless::{DrawCommand, RecordingCanvas};
    use crate::backend::Rect;
    use crate::color::Color;
    use crate::highlight::{Grammar, SyntaxParser, theme};
    use crate::text::Cursor;

    fn render(buffer: &crate::text::TextBuffer) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        buffer.draw(&mut canvas);
        canvas
    }

    #[test]
    fn test_draw_clips_and_clears() {
        let buffer = buffer_with("ab");
        let canvas = render(&buffer);
        let bounds = Rect::new(0.0, 0.0, 400.0, 200.0);
        assert_eq!(canvas.commands[0], DrawCommand::BeginScissor(bounds));
        assert_eq!(
            canvas.commands[1],
            DrawCommand::FillRect {
                rect: bounds,
                color: Color::BLACK
            }
        );
        assert_eq!(canvas.commands.last(), Some(&DrawCommand::EndScissor));
        assert_eq!(canvas.text(), "ab");
    }

    #[test]
    fn test_caret_at_line_end() {
        let buffer = buffer_with("ab");
        let canvas = render(&buffer);
        assert_eq!(
            canvas.rects_with_color(Color::WHITE),
            vec![Rect::new(24.0, 0.0, 2.0, 20.0)]
        );
    }

    #[test]
    fn test_caret_before_glyph_on_second_line() {
        let mut buffer = buffer_with("ab\ncd");
        buffer.set_cursor(Cursor::new(1, 1));
        let canvas = render(&buffer);
        assert_eq!(
            canvas.rects_with_color(Color::WHITE),
            vec![Rect::new(12.0, 20.0, 2.0, 20.0)]
        );
    }

    #[test]
    fn test_hidden_caret_not_drawn() {
        let mut buffer = buffer_with("ab");
        buffer.set_cursor_visible(false);
        let canvas = render(&buffer);
        assert!(canvas.rects_with_color(Color::WHITE).is_empty());
    }

    #[test]
    fn test_selection_is_inverted() {
        let mut buffer = buffer_with("abcd");
        buffer.set_cursor_visible(false);
        buffer.jump_to_line_start(false);
        buffer.move_right(2, true);
        let canvas = render(&buffer);
        let glyphs = canvas.glyphs();
        assert_eq!(glyphs[0], ('a', Color::BLACK));
        assert_eq!(glyphs[1], ('b', Color::BLACK));
        assert_eq!(glyphs[2], ('c', Color::WHITE));
        assert_eq!(
            canvas.rects_with_color(Color::WHITE),
            vec![Rect::new(0.0, 0.0, 12.0, 20.0), Rect::new(12.0, 0.0, 12.0, 20.0)]
        );
    }

    #[test]
    fn test_syntax_colors_used() {
        let mut buffer = buffer_with("x = 1");
        buffer.set_syntax_parser(Some(SyntaxParser::new(Grammar::Script, Color::WHITE)));
        let canvas = render(&buffer);
        let glyphs = canvas.glyphs();
        assert_eq!(glyphs[0], ('x', Color::X_AXIS));
        assert_eq!(glyphs[4], ('1', theme::DIGIT));
    }

    #[test]
    fn test_wrapped_rows_stack() {
        let mut buffer = buffer_with(&"a".repeat(40));
        buffer.set_wrap_lines(true);
        let canvas = render(&buffer);
        let rows: Vec<f32> = canvas
            .commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Glyph { position, .. } => Some(position.y),
                _ => None,
            })
            .collect();
        assert_eq!(rows.len(), 40);
        // 33 glyphs of 12px fit in 400px
        assert_eq!(rows[32], 0.0);
        assert_eq!(rows[33], 20.0);
    }

    #[test]
    fn test_rows_below_viewport_culled() {
        let buffer = buffer_with(&"x\n".repeat(30));
        let canvas = render(&buffer);
        // the cursor sits on the last line, so the view is scrolled to it
        assert!(canvas.glyphs().len() <= 11);
        assert!(
            canvas
                .commands
                .iter()
                .any(|cmd| matches!(cmd, DrawCommand::RoundedRect { .. }))
        );
    }

    #[test]
    fn test_rows_above_viewport_culled() {
        let buffer = buffer_with(&"x\n".repeat(30));
        assert_eq!(buffer.scroll_v(), 420.0);
        let canvas = render(&buffer);
        let rows: Vec<f32> = canvas
            .commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Glyph { position, .. } => Some(position.y),
                _ => None,
            })
            .collect();
        // lines 21..=29 are on screen; line 30 is empty
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0], 0.0);
        assert_eq!(rows[8], 160.0);
    }

    #[test]
    fn test_collapsed_bounds_draw_no_scroll_bar() {
        let mut buffer = buffer_with(&"x\n".repeat(30));
        buffer.set_height(0.0);
        let canvas = render(&buffer);
        assert!(canvas.glyphs().is_empty());
        assert!(
            !canvas
                .commands
                .iter()
                .any(|cmd| matches!(cmd, DrawCommand::RoundedRect { .. }))
        );
    }

    #[test]
    fn test_no_scroll_bar_when_content_fits() {
        let buffer = buffer_with("short");
        let canvas = render(&buffer);
        assert!(
            !canvas
                .commands
                .iter()
                .any(|cmd| matches!(cmd, DrawCommand::RoundedRect { .. }))
        );
    }
}
