//! Keyboard key identifiers.

use bitflags::bitflags;

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        /// Either Shift key.
        const SHIFT = 0b0000_0001;
        /// Either Alt/Option key.
        const ALT = 0b0000_0010;
        /// Either Control key.
        const CTRL = 0b0000_0100;
        /// Either Super/Command key.
        const SUPER = 0b0000_1000;
    }
}

/// A physical key polled by the buffer.
///
/// Letter keys are reported as `Char` with the lowercase ASCII letter,
/// regardless of Shift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Backspace,
    Delete,
    Enter,
    /// Enter on the numeric keypad.
    KpEnter,
    Tab,
    Escape,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Equal,
    Minus,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    LeftSuper,
    RightSuper,
    /// A letter or digit key.
    Char(char),
}

impl Key {
    /// The left/right key pairs folded into each modifier flag.
    pub const MODIFIER_KEYS: [(Self, Self, KeyModifiers); 4] = [
        (Self::LeftShift, Self::RightShift, KeyModifiers::SHIFT),
        (Self::LeftControl, Self::RightControl, KeyModifiers::CTRL),
        (Self::LeftAlt, Self::RightAlt, KeyModifiers::ALT),
        (Self::LeftSuper, Self::RightSuper, KeyModifiers::SUPER),
    ];

    /// Check if this is a navigation key (arrows, home, end, page up/down).
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::Left
                | Self::Right
                | Self::Up
                | Self::Down
                | Self::Home
                | Self::End
                | Self::PageUp
                | Self::PageDown
        )
    }

    /// Check if this is one of the modifier keys.
    #[must_use]
    pub fn is_modifier(&self) -> bool {
        Self::MODIFIER_KEYS
            .iter()
            .any(|(left, right, _)| self == left || self == right)
    }

    /// Get the character if this is a character key.
    #[must_use]
    pub fn char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Self::Char(c.to_ascii_lowercase())
    }
}
