//! Backend implementations with no window system behind them.
//!
//! Used by tests and benchmarks, and handy for driving a buffer from a tool.

use std::collections::{HashMap, HashSet, VecDeque};

use super::{Canvas, Font, Glyph, Input, Rect, Vec2};
use crate::color::Color;
use crate::input::{Key, MouseButton};

/// A monospace font with optional per-codepoint overrides.
#[derive(Clone, Debug)]
pub struct FixedFont {
    base_size: f32,
    advance: f32,
    line_height: f32,
    overrides: HashMap<u32, Glyph>,
}

impl FixedFont {
    /// Every glyph advances `advance` and is `line_height` tall at
    /// `base_size`.
    #[must_use]
    pub fn new(base_size: f32, advance: f32, line_height: f32) -> Self {
        Self {
            base_size,
            advance,
            line_height,
            overrides: HashMap::new(),
        }
    }

    /// Replace the metrics for one codepoint.
    #[must_use]
    pub fn with_glyph(mut self, ch: char, glyph: Glyph) -> Self {
        self.overrides.insert(ch as u32, glyph);
        self
    }
}

impl Font for FixedFont {
    fn base_size(&self) -> f32 {
        self.base_size
    }

    fn glyph(&self, codepoint: u32) -> Glyph {
        self.overrides.get(&codepoint).copied().unwrap_or(Glyph {
            advance_x: self.advance,
            atlas: Rect::new(0.0, 0.0, self.advance, self.line_height),
        })
    }
}

/// Input whose state is set by hand, one frame at a time.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    down: HashSet<Key>,
    pressed: HashSet<Key>,
    mouse_down: HashSet<MouseButton>,
    mouse_pressed: HashSet<MouseButton>,
    mouse: Vec2,
    wheel: f32,
    chars: VecDeque<u32>,
    clipboard: Option<String>,
}

impl ScriptedInput {
    /// Create an input with nothing held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `key` until [`ScriptedInput::release`].
    pub fn hold(&mut self, key: Key) {
        self.down.insert(key);
    }

    /// Release a held key.
    pub fn release(&mut self, key: Key) {
        self.down.remove(&key);
    }

    /// Press `key` for this frame.
    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
        self.down.insert(key);
    }

    /// Press `key` this frame with `modifier` held.
    pub fn chord(&mut self, modifier: Key, key: Key) {
        self.hold(modifier);
        self.press(key);
    }

    /// Queue typed text for this frame.
    pub fn type_text(&mut self, text: &str) {
        self.chars.extend(text.chars().map(|c| c as u32));
    }

    /// Move the mouse without clicking.
    pub fn move_mouse(&mut self, position: Vec2) {
        self.mouse = position;
    }

    /// Move the mouse and press `button` this frame.
    pub fn click(&mut self, button: MouseButton, position: Vec2) {
        self.mouse = position;
        self.mouse_pressed.insert(button);
        self.mouse_down.insert(button);
    }

    /// Hold `button` until [`ScriptedInput::release_mouse`], without a
    /// press event.
    pub fn hold_mouse(&mut self, button: MouseButton) {
        self.mouse_down.insert(button);
    }

    /// Release a held mouse button.
    pub fn release_mouse(&mut self, button: MouseButton) {
        self.mouse_down.remove(&button);
    }

    /// Turn the wheel this frame.
    pub fn scroll(&mut self, delta: f32) {
        self.wheel = delta;
    }

    /// Set the clipboard contents.
    pub fn set_clipboard_text(&mut self, text: &str) {
        self.clipboard = Some(text.to_string());
    }

    /// Advance to the next frame: presses, clicks, wheel and unread
    /// characters expire, held keys stay held.
    pub fn next_frame(&mut self) {
        for key in self.pressed.drain() {
            self.down.remove(&key);
        }
        for button in self.mouse_pressed.drain() {
            self.mouse_down.remove(&button);
        }
        self.wheel = 0.0;
        self.chars.clear();
    }
}

impl Input for ScriptedInput {
    fn is_key_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.mouse_down.contains(&button)
    }

    fn mouse_position(&self) -> Vec2 {
        self.mouse
    }

    fn wheel_delta(&self) -> f32 {
        self.wheel
    }

    fn next_char(&mut self) -> Option<u32> {
        self.chars.pop_front()
    }

    fn clipboard(&self) -> Option<String> {
        self.clipboard.clone()
    }

    fn set_clipboard(&mut self, text: &str) {
        self.clipboard = Some(text.to_string());
    }
}

/// A primitive recorded by [`RecordingCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    BeginScissor(Rect),
    EndScissor,
    FillRect {
        rect: Rect,
        color: Color,
    },
    RoundedRect {
        rect: Rect,
        roundness: f32,
        color: Color,
    },
    Glyph {
        codepoint: u32,
        position: Vec2,
        size: f32,
        color: Color,
    },
}

/// Canvas that records every primitive instead of drawing it.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create an empty canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything recorded so far.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Drawn glyphs in order, as `(char, color)`.
    #[must_use]
    pub fn glyphs(&self) -> Vec<(char, Color)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Glyph {
                    codepoint, color, ..
                } => Some((char::from_u32(*codepoint).unwrap_or('?'), *color)),
                _ => None,
            })
            .collect()
    }

    /// Drawn glyphs concatenated into a string.
    #[must_use]
    pub fn text(&self) -> String {
        self.glyphs().into_iter().map(|(c, _)| c).collect()
    }

    /// Filled rectangles drawn with `color`.
    #[must_use]
    pub fn rects_with_color(&self, color: Color) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRect { rect, color: c } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn begin_scissor(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::BeginScissor(rect));
    }

    fn end_scissor(&mut self) {
        self.commands.push(DrawCommand::EndScissor);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_rounded_rect(&mut self, rect: Rect, roundness: f32, color: Color) {
        self.commands.push(DrawCommand::RoundedRect {
            rect,
            roundness,
            color,
        });
    }

    fn draw_glyph(&mut self, _font: &dyn Font, codepoint: u32, position: Vec2, size: f32, color: Color) {
        self.commands.push(DrawCommand::Glyph {
            codepoint,
            position,
            size,
            color,
        });
    }
}
