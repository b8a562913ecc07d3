//! Multi-line UTF-8 text editing with proportional-font layout.
//!
//! Key types:
//!
//! - [`TextBuffer`]: lines, cursor, selection, layout and the per-frame
//!   update/draw cycle shared by every panel
//! - [`Cursor`] and [`Selection`]: byte-column positions and ranges
//! - [`TextIter`]: read-only byte stream over the lines, consumed by syntax
//!   passes
//!
//! # Examples
//!
//! ```
//! use std::rc::Rc;
//! use cubecode::backend::headless::FixedFont;
//! use cubecode::{Cursor, Rect, TextBuffer};
//!
//! let font = Rc::new(FixedFont::new(20.0, 10.0, 20.0));
//! let mut buffer = TextBuffer::new(font, Rect::new(0.0, 0.0, 400.0, 300.0));
//! buffer.insert_text("abc\n\nde");
//! assert_eq!(buffer.line_count(), 3);
//! assert_eq!(buffer.cursor(), Cursor::new(2, 2));
//! assert_eq!(buffer.contents(), "abc\n\nde\n");
//! ```

mod buffer;
mod cursor;
mod iter;
mod line;

pub use buffer::TextBuffer;
pub use cursor::{Cursor, Selection};
pub use iter::TextIter;
pub use line::Line;
