//! `cubecode` - text editing core for a voxel-painting scripting puzzle.
//!
//! Players write small scripts that paint the cells of a 3D grid until it
//! matches a target shape. Every panel of the game (code editor, level list,
//! help viewer, config editor) is built on the same [`TextBuffer`]: a
//! multi-line, UTF-8 aware editor that lays out proportional glyphs, wraps
//! lines, scrolls, hit-tests the mouse and colors its content with a
//! pluggable syntax pass.
//!
//! Rendering and input are supplied by the embedding application through
//! the traits in [`backend`].

// Crate-level lint configuration
#![allow(clippy::cast_possible_truncation)] // Intentional pixel/index casts
#![allow(clippy::cast_sign_loss)] // Intentional pixel/index conversions
#![allow(clippy::cast_precision_loss)] // Intentional for layout math
#![allow(clippy::cast_possible_wrap)] // Intentional index conversions
#![allow(clippy::module_name_repetitions)] // Allow TextBuffer in text etc
#![allow(clippy::struct_excessive_bools)] // Buffer state needs multiple flags
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::float_cmp)] // Pixel values are compared exactly in tests

pub mod backend;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod highlight;
pub mod input;
pub mod level;
pub mod panel;
pub mod script;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use backend::{Canvas, Font, FontHandle, Glyph, Input, Rect, Vec2};
pub use color::Color;
pub use config::Config;
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use highlight::{Grammar, SyntaxMap, SyntaxParser};
pub use input::{Key, KeyModifiers, MouseButton};
pub use level::{CubeData, LevelData, parse_level};
pub use panel::Panel;
pub use script::{VoxelGlobals, VoxelScript, evaluate_cube};
pub use text::{Cursor, Line, Selection, TextBuffer, TextIter};
