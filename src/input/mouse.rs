//! Mouse button identifiers.

/// A mouse button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// All buttons, in polling order.
    pub const ALL: [Self; 3] = [Self::Left, Self::Right, Self::Middle];
}
