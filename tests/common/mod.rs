//! Shared helpers for the integration tests.

#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Not every test binary uses every helper

use std::rc::Rc;
use std::sync::Once;

use cubecode::backend::headless::FixedFont;
use cubecode::{Rect, TextBuffer};

/// Install a test-writer subscriber once per test binary.
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Viewport every helper buffer draws into.
pub const VIEWPORT: Rect = Rect::new(0.0, 0.0, 400.0, 200.0);

/// 10px glyphs plus 2px spacing, 20px rows.
pub fn buffer() -> TextBuffer {
    let font = Rc::new(FixedFont::new(20.0, 10.0, 20.0));
    let mut buffer = TextBuffer::new(font, VIEWPORT);
    buffer.set_font_size(20.0);
    buffer
}

pub fn buffer_with(text: &str) -> TextBuffer {
    let mut buffer = buffer();
    buffer.insert_text(text);
    buffer
}

pub fn line_texts(buffer: &TextBuffer) -> Vec<String> {
    buffer
        .lines()
        .iter()
        .map(|l| l.text().into_owned())
        .collect()
}
