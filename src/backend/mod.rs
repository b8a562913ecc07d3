//! Contracts with the rendering and input backend.
//!
//! The buffer never talks to a window system directly. Each frame it polls an
//! [`Input`], measures text through a [`Font`] and emits primitives into a
//! [`Canvas`]. A game binds these to its graphics library; tests use the
//! [`headless`] implementations.

pub mod headless;

use std::rc::Rc;

use crate::color::Color;
use crate::input::{Key, KeyModifiers, MouseButton};

/// A 2D point or offset in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a point is inside this rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x <= self.x + self.width
            && point.y <= self.y + self.height
    }

    /// Compute intersection with another rectangle.
    #[must_use]
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.width).min(other.x + other.width);
        let y2 = (self.y + self.height).min(other.y + other.height);
        if x2 > x1 && y2 > y1 {
            Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
        } else {
            None
        }
    }

    /// Top-left corner.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Check if this rectangle is empty (zero area).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Metrics of one glyph at the font's base size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Glyph {
    /// Horizontal advance; zero for glyphs that only report atlas width.
    pub advance_x: f32,
    /// Rectangle of the glyph in the font atlas.
    pub atlas: Rect,
}

/// A bitmap font as seen by text layout.
pub trait Font {
    /// Size in pixels the atlas was rasterized at.
    fn base_size(&self) -> f32;

    /// Metrics for `codepoint`. Fonts return a fallback glyph for codepoints
    /// they do not cover.
    fn glyph(&self, codepoint: u32) -> Glyph;
}

/// Shared handle to a font; several buffers usually draw with the same one.
pub type FontHandle = Rc<dyn Font>;

/// Per-frame input state.
pub trait Input {
    /// Key is held this frame.
    fn is_key_down(&self, key: Key) -> bool;

    /// Key went down this frame or auto-repeated.
    fn is_key_pressed(&self, key: Key) -> bool;

    /// Mouse button went down this frame.
    fn is_mouse_pressed(&self, button: MouseButton) -> bool;

    /// Mouse button is held this frame.
    fn is_mouse_down(&self, button: MouseButton) -> bool;

    /// Mouse position in screen pixels.
    fn mouse_position(&self) -> Vec2;

    /// Wheel movement this frame, positive away from the user.
    fn wheel_delta(&self) -> f32;

    /// Pop the next typed codepoint from this frame's character queue.
    fn next_char(&mut self) -> Option<u32>;

    /// Current clipboard text.
    fn clipboard(&self) -> Option<String>;

    /// Replace the clipboard text.
    fn set_clipboard(&mut self, text: &str);

    /// Modifier state folded from the left/right modifier keys.
    fn modifiers(&self) -> KeyModifiers {
        Key::MODIFIER_KEYS
            .iter()
            .filter(|(left, right, _)| self.is_key_down(*left) || self.is_key_down(*right))
            .fold(KeyModifiers::empty(), |acc, (_, _, flag)| acc | *flag)
    }
}

/// Immediate-mode draw target.
pub trait Canvas {
    /// Clip subsequent draws to `rect` until [`Canvas::end_scissor`].
    fn begin_scissor(&mut self, rect: Rect);

    /// Remove the clip rectangle.
    fn end_scissor(&mut self);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill a rectangle with rounded corners; `roundness` is in `0.0..=1.0`.
    fn fill_rounded_rect(&mut self, rect: Rect, roundness: f32, color: Color);

    /// Draw one glyph with its top-left corner at `position`, scaled to
    /// `size` pixels.
    fn draw_glyph(&mut self, font: &dyn Font, codepoint: u32, position: Vec2, size: f32, color: Color);
}
