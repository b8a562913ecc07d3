//! Per-frame input handling.
//!
//! Input is applied in a fixed order: mouse, navigation keys, deletion keys,
//! insertion and clipboard keys, then the typed-character queue.

use super::TextBuffer;
use crate::backend::{Input, Vec2};
use crate::input::{Key, KeyModifiers, MouseButton};

/// Wheel scroll per notch, in multiples of half the font size.
const WHEEL_STEP: f32 = -5.0;

#[derive(Clone, Copy, Debug)]
struct Mods {
    shift: bool,
    ctrl: bool,
}

impl TextBuffer {
    /// Handle one frame of input.
    pub fn update(&mut self, input: &mut dyn Input) {
        let modifiers = input.modifiers();
        let mods = Mods {
            shift: modifiers.contains(KeyModifiers::SHIFT),
            ctrl: modifiers.contains(KeyModifiers::CTRL),
        };

        self.in_update = true;
        self.update_mouse(input, mods);
        if self.focused {
            let start = self.cursor;
            self.update_navigation(input, mods);
            if !self.readonly {
                self.update_deletion(input, mods);
            }
            self.update_insertion(input, mods);
            self.drain_chars(input);
            if start != self.cursor && !mods.shift {
                self.clear_selection();
            }
        }
        self.in_update = false;
        if self.dirty {
            self.refresh();
        }
    }

    fn update_mouse(&mut self, input: &mut dyn Input, mods: Mods) {
        let mouse = input.mouse_position();
        let inside = self.bounds.contains(mouse);
        let pressed = input.is_mouse_pressed(MouseButton::Left);
        if pressed {
            self.set_focus(inside);
        }
        if !inside || !self.focused {
            return;
        }
        let point = Vec2::new(
            mouse.x - self.bounds.x + if self.wrap { 0.0 } else { self.scroll_h },
            mouse.y - self.bounds.y + self.scroll_v,
        );
        if pressed {
            self.clear_selection();
            if let Some(hit) = self.hit_test(point) {
                self.cursor = hit;
            }
        }
        if input.is_mouse_down(MouseButton::Left) {
            if self.selection.is_none() {
                self.start_selection();
            } else {
                if let Some(hit) = self.hit_test(point) {
                    self.cursor = hit;
                }
                if let Some(sel) = self.selection.as_mut() {
                    sel.head = self.cursor;
                }
            }
        }
        let wheel = input.wheel_delta();
        if wheel != 0.0 {
            if mods.ctrl {
                if wheel > 0.0 {
                    self.increase_font_size();
                } else {
                    self.decrease_font_size();
                }
            } else {
                self.scroll_by(wheel * WHEEL_STEP * (self.font_size / 2.0));
            }
        }
    }

    fn update_navigation(&mut self, input: &dyn Input, mods: Mods) {
        let Mods { shift, ctrl } = mods;
        let pressed = |key: Key| input.is_key_pressed(key);
        let chord = |key: Key| chord(input, ctrl, key);

        if pressed(Key::Left) {
            if ctrl {
                self.move_word(-1, shift);
            } else {
                self.move_left(1, shift);
            }
        }
        if chord(Key::Char('h')) {
            self.move_left(1, shift);
        }
        if chord(Key::Char('a')) {
            self.jump_to_line_start(shift);
        }
        if chord(Key::Char('b')) {
            self.move_word(-1, shift);
        }
        if pressed(Key::Right) {
            if ctrl {
                self.move_word(1, shift);
            } else {
                self.move_right(1, shift);
            }
        }
        if chord(Key::Char('l')) {
            self.move_right(1, shift);
        }
        if chord(Key::Char('e')) {
            self.jump_to_line_end(shift);
        }
        if chord(Key::Char('w')) {
            self.move_word(1, shift);
        }
        if pressed(Key::Up) || chord(Key::Char('k')) {
            self.move_up(1, shift);
        }
        if pressed(Key::Down) || chord(Key::Char('j')) {
            self.move_down(1, shift);
        }
        if pressed(Key::End) {
            self.jump_to_line_end(shift);
        }
        if pressed(Key::Home) {
            self.jump_to_line_start(shift);
        }
    }

    fn update_deletion(&mut self, input: &dyn Input, mods: Mods) {
        if input.is_key_pressed(Key::Backspace) {
            if mods.ctrl {
                self.delete_word_backward(1);
            } else if self.has_selection() {
                self.delete_selection();
            } else {
                self.delete_backward(1);
            }
        }
        if input.is_key_pressed(Key::Delete) {
            if mods.ctrl {
                self.delete_word_forward(1);
            } else {
                self.delete_forward(1);
            }
        }
    }

    fn update_insertion(&mut self, input: &mut dyn Input, mods: Mods) {
        let Mods { shift, ctrl } = mods;
        let writable = !self.readonly;

        if writable
            && (input.is_key_pressed(Key::Enter)
                || input.is_key_pressed(Key::KpEnter)
                || chord(input, ctrl, Key::Char('o')))
        {
            self.insert_newline();
        }
        if writable && input.is_key_pressed(Key::Tab) {
            self.insert_text("\t");
        }
        if writable && chord(input, ctrl, Key::Char('v')) {
            if let Some(text) = input.clipboard() {
                self.insert_text(&text);
            }
        }
        if chord(input, ctrl, Key::Char('c')) {
            let text = self.copy_selection();
            input.set_clipboard(&text);
        }
        if chord(input, ctrl, Key::Char('x')) {
            let text = if writable {
                self.cut_selection()
            } else {
                self.copy_selection()
            };
            input.set_clipboard(&text);
        }
        if shift && chord(input, ctrl, Key::Equal) {
            self.increase_font_size();
        }
        if chord(input, ctrl, Key::Minus) {
            self.decrease_font_size();
        }
        if chord(input, ctrl, Key::Char('g')) {
            self.jump_to_buffer_bottom(shift);
        }
        if chord(input, ctrl, Key::Char('t')) {
            self.jump_to_buffer_top(shift);
        }
    }

    /// Insert the typed characters, replacing the selection.
    fn drain_chars(&mut self, input: &mut dyn Input) {
        while let Some(codepoint) = input.next_char() {
            if self.readonly {
                continue;
            }
            if self.selection.is_some() {
                self.delete_selection();
            }
            self.insert_codepoint(codepoint);
        }
    }
}

/// `key` pressed this frame with Ctrl held.
fn chord(input: &dyn Input, ctrl: bool, key: Key) -> bool {
    ctrl && input.is_key_pressed(key)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::backend::Vec2;
    use crate::backend::headless::ScriptedInput;
    use crate::input::{Key, MouseButton};
    use crate::text::Cursor;

    fn focused(text: &str) -> crate::text::TextBuffer {
        let mut buffer = buffer_with(text);
        buffer.set_focus(true);
        buffer
    }

    #[test]
    fn test_typing_inserts_codepoints() {
        let mut buffer = focused("");
        let mut input = ScriptedInput::new();
        input.type_text("hé!");
        buffer.update(&mut input);
        assert_eq!(line_texts(&buffer), ["hé!"]);
        assert_eq!(buffer.cursor(), Cursor::new(0, 4));
    }

    #[test]
    fn test_unfocused_buffer_ignores_keys() {
        let mut buffer = buffer_with("abc");
        let mut input = ScriptedInput::new();
        input.press(Key::Backspace);
        input.type_text("x");
        buffer.update(&mut input);
        assert_eq!(line_texts(&buffer), ["abc"]);
    }

    #[test]
    fn test_click_focuses_and_places_cursor() {
        let mut buffer = buffer_with("abc\nde");
        let mut input = ScriptedInput::new();
        input.click(MouseButton::Left, Vec2::new(13.0, 25.0));
        buffer.update(&mut input);
        assert!(buffer.has_focus());
        assert_eq!(buffer.cursor(), Cursor::new(1, 1));

        input.next_frame();
        input.click(MouseButton::Left, Vec2::new(500.0, 25.0));
        buffer.update(&mut input);
        assert!(!buffer.has_focus());
    }

    #[test]
    fn test_drag_selects() {
        let mut buffer = buffer_with("hello");
        let mut input = ScriptedInput::new();
        input.click(MouseButton::Left, Vec2::new(1.0, 5.0));
        buffer.update(&mut input);
        input.next_frame();
        input.hold_mouse(MouseButton::Left);
        input.move_mouse(Vec2::new(37.0, 5.0));
        buffer.update(&mut input);
        let sel = buffer.selection().map(|s| s.range());
        assert_eq!(sel, Some((Cursor::new(0, 0), Cursor::new(0, 3))));
    }

    #[test]
    fn test_shift_arrow_extends_and_plain_arrow_clears() {
        let mut buffer = focused("abcd");
        buffer.jump_to_line_start(false);
        let mut input = ScriptedInput::new();
        input.chord(Key::LeftShift, Key::Right);
        buffer.update(&mut input);
        input.next_frame();
        input.press(Key::Right);
        buffer.update(&mut input);
        assert_eq!(buffer.selection().map(|s| s.head), Some(Cursor::new(0, 2)));

        input.next_frame();
        input.release(Key::LeftShift);
        input.press(Key::Right);
        buffer.update(&mut input);
        assert_eq!(buffer.selection(), None);
        assert_eq!(buffer.cursor(), Cursor::new(0, 3));
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut buffer = focused("abcd");
        buffer.jump_to_line_start(false);
        buffer.move_right(2, true);
        let mut input = ScriptedInput::new();
        input.type_text("X");
        buffer.update(&mut input);
        assert_eq!(line_texts(&buffer), ["Xcd"]);
    }

    #[test]
    fn test_backspace_deletes_selection_first() {
        let mut buffer = focused("abcd");
        buffer.move_left(2, true);
        let mut input = ScriptedInput::new();
        input.press(Key::Backspace);
        buffer.update(&mut input);
        assert_eq!(line_texts(&buffer), ["ab"]);
    }

    #[test]
    fn test_ctrl_backspace_deletes_word() {
        let mut buffer = focused("foo bar");
        let mut input = ScriptedInput::new();
        input.chord(Key::LeftControl, Key::Backspace);
        buffer.update(&mut input);
        assert_eq!(line_texts(&buffer), ["foo "]);
    }

    #[test]
    fn test_enter_and_tab() {
        let mut buffer = focused("ab");
        buffer.move_left(1, false);
        let mut input = ScriptedInput::new();
        input.press(Key::Enter);
        input.press(Key::Tab);
        buffer.update(&mut input);
        assert_eq!(line_texts(&buffer), ["a", "    b"]);
    }

    #[test]
    fn test_clipboard_round_trip() {
        let mut buffer = focused("copy me");
        buffer.jump_to_line_start(false);
        buffer.move_right(4, true);
        let mut input = ScriptedInput::new();
        input.chord(Key::LeftControl, Key::Char('x'));
        buffer.update(&mut input);
        assert_eq!(line_texts(&buffer), [" me"]);

        input.next_frame();
        buffer.jump_to_line_end(false);
        input.press(Key::Char('v'));
        buffer.update(&mut input);
        assert_eq!(line_texts(&buffer), [" mecopy"]);
    }

    #[test]
    fn test_readonly_ignores_edits_but_moves() {
        let mut buffer = focused("abc");
        buffer.set_readonly(true);
        let mut input = ScriptedInput::new();
        input.press(Key::Backspace);
        input.press(Key::Left);
        input.type_text("zz");
        buffer.update(&mut input);
        assert_eq!(line_texts(&buffer), ["abc"]);
        assert_eq!(buffer.cursor(), Cursor::new(0, 2));
    }

    #[test]
    fn test_ctrl_wheel_changes_font_size() {
        let mut buffer = focused("abc");
        let mut input = ScriptedInput::new();
        input.move_mouse(Vec2::new(5.0, 5.0));
        input.hold(Key::LeftControl);
        input.scroll(1.0);
        buffer.update(&mut input);
        assert_eq!(buffer.font_size(), 21.0);
    }

    #[test]
    fn test_wheel_scrolls() {
        let mut buffer = focused(&"line\n".repeat(30));
        buffer.jump_to_buffer_top(false);
        let mut input = ScriptedInput::new();
        input.move_mouse(Vec2::new(5.0, 5.0));
        input.scroll(-1.0);
        buffer.update(&mut input);
        // one notch is 5 * font_size / 2
        assert_eq!(buffer.scroll_v(), 50.0);
    }
}
