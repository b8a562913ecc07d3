//! Key, modifier and mouse button identifiers.
//!
//! These name the physical keys the buffer polls each frame. The backend
//! maps its own key codes onto them; see [`crate::backend::Input`].

mod keyboard;
mod mouse;

pub use keyboard::{Key, KeyModifiers};
pub use mouse::MouseButton;
