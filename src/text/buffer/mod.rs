//! The text buffer shared by every panel.
//!
//! A [`TextBuffer`] owns its lines, one cursor, an optional selection and the
//! layout state needed to draw them with a proportional font inside a
//! rectangle. The public operations never fail: out-of-range requests clamp
//! and motions at the ends of the buffer stop.
//!
//! Edits mark derived state (total height, scroll offsets, syntax colors) as
//! stale. Outside of [`TextBuffer::update`] it is recomputed immediately;
//! inside, once at the end of the frame.

mod draw;
mod edit;
mod layout;
mod motion;
mod update;

use std::fmt;

use crate::backend::{FontHandle, Rect, Vec2};
use crate::color::Color;
use crate::event::emit_event;
use crate::highlight::{SyntaxMap, SyntaxParser};
use crate::text::{Cursor, Line, Selection, TextIter};
use crate::unicode;

/// Smallest font size reachable through the font-size keys.
pub const MIN_FONT_SIZE: f32 = 10.0;
/// Largest font size reachable through the font-size keys.
pub const MAX_FONT_SIZE: f32 = 60.0;

const DEFAULT_FONT_SIZE: f32 = 24.0;
const DEFAULT_SPACING: f32 = 2.0;

/// Multi-line text editor state.
pub struct TextBuffer {
    lines: Vec<Line>,
    cursor: Cursor,
    selection: Option<Selection>,

    font: FontHandle,
    font_size: f32,
    spacing: f32,
    bounds: Rect,
    scale: f32,
    line_advance: f32,

    total_height: f32,
    scroll_h: f32,
    scroll_v: f32,

    foreground: Color,
    background: Color,
    wrap: bool,
    readonly: bool,
    focused: bool,
    cursor_visible: bool,

    syntax: Option<SyntaxParser>,
    colors: SyntaxMap,

    in_update: bool,
    dirty: bool,
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("lines", &self.lines.len())
            .field("cursor", &self.cursor)
            .field("selection", &self.selection)
            .field("font_size", &self.font_size)
            .field("bounds", &self.bounds)
            .field("wrap", &self.wrap)
            .field("readonly", &self.readonly)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

impl TextBuffer {
    /// Create an empty buffer drawing with `font` inside `bounds`.
    #[must_use]
    pub fn new(font: FontHandle, bounds: Rect) -> Self {
        let mut buffer = Self {
            lines: vec![Line::new()],
            cursor: Cursor::start(),
            selection: None,
            font,
            font_size: DEFAULT_FONT_SIZE,
            spacing: DEFAULT_SPACING,
            bounds,
            scale: 1.0,
            line_advance: 0.0,
            total_height: 0.0,
            scroll_h: 0.0,
            scroll_v: 0.0,
            foreground: Color::WHITE,
            background: Color::BLACK,
            wrap: false,
            readonly: false,
            focused: false,
            cursor_visible: true,
            syntax: None,
            colors: SyntaxMap::new(),
            in_update: false,
            dirty: false,
        };
        buffer.update_font_metrics();
        buffer.measure_lines();
        buffer.refresh();
        buffer
    }

    // ---- font and geometry ----

    /// The font glyphs are measured and drawn with.
    #[must_use]
    pub fn font(&self) -> &FontHandle {
        &self.font
    }

    /// Replace the font and re-measure every line.
    pub fn set_font(&mut self, font: FontHandle) {
        self.font = font;
        self.font_changed();
    }

    /// Font size in pixels.
    #[must_use]
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Set the font size, clamped to `[MIN_FONT_SIZE, MAX_FONT_SIZE]`.
    pub fn set_font_size(&mut self, size: f32) {
        let size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        if size == self.font_size {
            return;
        }
        self.font_size = size;
        emit_event("font_size", &size.to_string());
        self.font_changed();
    }

    /// Grow the font by one pixel.
    pub fn increase_font_size(&mut self) {
        self.set_font_size(self.font_size + 1.0);
    }

    /// Shrink the font by one pixel.
    pub fn decrease_font_size(&mut self) {
        self.set_font_size(self.font_size - 1.0);
    }

    /// Horizontal gap between glyphs in pixels.
    #[must_use]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Set the gap between glyphs; negative values become zero.
    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = spacing.max(0.0);
        self.font_changed();
    }

    /// The rectangle the buffer draws into.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Move or resize the buffer.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.measure_lines();
        self.mark_dirty();
    }

    /// Top-left corner of the bounds.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.bounds.position()
    }

    /// Move the buffer without resizing it.
    pub fn set_position(&mut self, position: Vec2) {
        self.set_bounds(Rect {
            x: position.x,
            y: position.y,
            ..self.bounds
        });
    }

    /// Width of the bounds.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.bounds.width
    }

    /// Change only the width of the bounds.
    pub fn set_width(&mut self, width: f32) {
        self.set_bounds(Rect {
            width,
            ..self.bounds
        });
    }

    /// Height of the bounds.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.bounds.height
    }

    /// Change only the height of the bounds.
    pub fn set_height(&mut self, height: f32) {
        self.set_bounds(Rect {
            height,
            ..self.bounds
        });
    }

    /// Height of one visual row in pixels.
    #[must_use]
    pub fn line_advance(&self) -> f32 {
        self.line_advance
    }

    /// Height of all content in pixels.
    #[must_use]
    pub fn total_height(&self) -> f32 {
        self.total_height
    }

    /// Vertical scroll offset in pixels.
    #[must_use]
    pub fn scroll_v(&self) -> f32 {
        self.scroll_v
    }

    /// Horizontal scroll offset in pixels; always 0 while wrapping.
    #[must_use]
    pub fn scroll_h(&self) -> f32 {
        self.scroll_h
    }

    // ---- colors and flags ----

    /// Text color.
    #[must_use]
    pub fn foreground(&self) -> Color {
        self.foreground
    }

    /// Set the text color.
    pub fn set_foreground(&mut self, color: Color) {
        self.foreground = color;
    }

    /// Fill color behind the text.
    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Set the fill color behind the text.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Check if long lines wrap at the bounds width.
    #[must_use]
    pub fn is_wrapping_lines(&self) -> bool {
        self.wrap
    }

    /// Enable or disable line wrapping.
    pub fn set_wrap_lines(&mut self, wrap: bool) {
        if self.wrap == wrap {
            return;
        }
        self.wrap = wrap;
        self.measure_lines();
        self.mark_dirty();
    }

    /// Flip line wrapping.
    pub fn toggle_wrap_lines(&mut self) {
        self.set_wrap_lines(!self.wrap);
    }

    /// Check if key input is prevented from editing the text.
    #[must_use]
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Make the buffer readonly for key input. The editing methods keep
    /// working so the owner can still fill it.
    pub fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
    }

    /// Flip the readonly flag.
    pub fn toggle_readonly(&mut self) {
        self.readonly = !self.readonly;
    }

    /// Check if the cursor is drawn.
    #[must_use]
    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Show or hide the cursor.
    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    /// Flip cursor visibility.
    pub fn toggle_cursor(&mut self) {
        self.cursor_visible = !self.cursor_visible;
    }

    /// Check if the buffer receives key input.
    #[must_use]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Give or take away key focus.
    pub fn set_focus(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            emit_event("focus", if focused { "gained" } else { "lost" });
        }
    }

    // ---- content queries ----

    /// Number of lines; at least 1.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// All lines.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Line `index`, if it exists.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// The line the cursor is on.
    #[must_use]
    pub fn current_line(&self) -> &Line {
        &self.lines[self.cursor.line]
    }

    /// All lines joined, each followed by `\n`.
    #[must_use]
    pub fn contents(&self) -> String {
        let mut bytes = Vec::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            bytes.extend_from_slice(&line.content);
            bytes.push(b'\n');
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Byte stream over the lines, for syntax passes.
    #[must_use]
    pub fn iter(&self) -> TextIter<'_> {
        TextIter::new(&self.lines)
    }

    /// The iterator position one past the last line.
    #[must_use]
    pub fn iter_end(&self) -> TextIter<'_> {
        TextIter::end(&self.lines)
    }

    // ---- cursor and selection ----

    /// Current cursor position.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Place the cursor, clamped into the buffer and snapped back to the
    /// start of the codepoint it lands in.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = self.clamp_position(cursor);
        self.scroll_cursor_into_view();
    }

    /// The byte just before the cursor.
    #[must_use]
    pub fn char_under_cursor(&self) -> Option<u8> {
        let col = self.cursor.column;
        if col == 0 {
            return None;
        }
        self.current_line().content.get(col - 1).copied()
    }

    /// The byte at the cursor.
    #[must_use]
    pub fn char_after_cursor(&self) -> Option<u8> {
        self.current_line().content.get(self.cursor.column).copied()
    }

    /// Codepoints between the start of the line and the cursor.
    #[must_use]
    pub fn count_chars_to_cursor(&self) -> usize {
        unicode::char_count(&self.current_line().content, self.cursor.column)
    }

    /// Check if the cursor is at the very start of the buffer.
    #[must_use]
    pub fn is_cursor_at_beginning(&self) -> bool {
        self.cursor == Cursor::start()
    }

    /// Check if the cursor is at the very end of the buffer.
    #[must_use]
    pub fn is_cursor_at_end(&self) -> bool {
        self.cursor == self.end_position()
    }

    /// The current selection, possibly empty.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Check if a non-empty selection exists.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.selection.is_some_and(|s| !s.is_empty())
    }

    /// Start an empty selection at the cursor.
    pub fn start_selection(&mut self) {
        self.selection = Some(Selection::at(self.cursor));
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    // ---- syntax ----

    /// The active syntax pass.
    #[must_use]
    pub fn syntax_parser(&self) -> Option<SyntaxParser> {
        self.syntax
    }

    /// Install or remove a syntax pass and recolor.
    pub fn set_syntax_parser(&mut self, parser: Option<SyntaxParser>) {
        self.syntax = parser;
        self.update_syntax();
    }

    /// Colors from the last syntax pass.
    #[must_use]
    pub fn syntax_colors(&self) -> &SyntaxMap {
        &self.colors
    }

    // ---- internals ----

    fn end_position(&self) -> Cursor {
        let last = self.lines.len() - 1;
        Cursor::new(last, self.lines[last].len())
    }

    /// Clamp a position into the buffer, on a codepoint boundary.
    pub(crate) fn clamp_position(&self, pos: Cursor) -> Cursor {
        let line = pos.line.min(self.lines.len() - 1);
        let content = &self.lines[line].content;
        let mut column = pos.column.min(content.len());
        while column > 0 && column < content.len() && unicode::is_continuation_byte(content[column]) {
            column -= 1;
        }
        Cursor::new(line, column)
    }

    fn clamp_cursor_and_selection(&mut self) {
        self.cursor = self.clamp_position(self.cursor);
        if let Some(sel) = self.selection {
            self.selection = Some(Selection::new(
                self.clamp_position(sel.anchor),
                self.clamp_position(sel.head),
            ));
        }
    }

    fn font_changed(&mut self) {
        self.update_font_metrics();
        self.measure_lines();
        self.mark_dirty();
    }

    /// Recompute derived state now, or at the end of the running update.
    pub(crate) fn mark_dirty(&mut self) {
        if self.in_update {
            self.dirty = true;
        } else {
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        self.dirty = false;
        self.update_total_height();
        self.scroll_cursor_into_view();
        self.update_syntax();
    }

    fn update_syntax(&mut self) {
        self.colors.clear();
        if let Some(parser) = self.syntax {
            parser.run(
                &mut self.colors,
                TextIter::new(&self.lines),
                &TextIter::end(&self.lines),
            );
        }
    }
}
