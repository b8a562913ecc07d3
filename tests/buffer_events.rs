//! Events emitted by the buffer through the global callback.
//!
//! Kept in its own test binary: the callback is process-wide.

mod common;

use std::sync::{Arc, Mutex};

use common::buffer;
use cubecode::backend::headless::ScriptedInput;
use cubecode::event::clear_event_callback;
use cubecode::{MouseButton, Vec2, set_event_callback};

#[test]
fn focus_and_font_size_events() {
    let seen: Arc<Mutex<Vec<(String, String)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    set_event_callback(move |name, data| {
        if let Ok(mut events) = sink.lock() {
            events.push((name.to_string(), data.to_string()));
        }
    });

    let mut buffer = buffer();
    seen.lock().unwrap().clear();

    let mut input = ScriptedInput::new();
    input.click(MouseButton::Left, Vec2::new(10.0, 10.0));
    buffer.update(&mut input);
    input.next_frame();
    input.click(MouseButton::Left, Vec2::new(900.0, 10.0));
    buffer.update(&mut input);

    buffer.increase_font_size();
    // already at the requested size: no event
    buffer.set_font_size(21.0);

    clear_event_callback();
    let events = seen.lock().unwrap().clone();
    assert_eq!(
        events,
        [
            ("focus".to_string(), "gained".to_string()),
            ("focus".to_string(), "lost".to_string()),
            ("font_size".to_string(), "21".to_string()),
        ]
    );
}
