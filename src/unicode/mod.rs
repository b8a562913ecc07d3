//! Unicode utilities for byte-oriented line storage.
//!
//! Lines are stored as raw UTF-8 bytes and columns are byte offsets, so the
//! buffer needs a small codec to step over whole codepoints.

mod utf8;

pub use utf8::{
    Encoded, REPLACEMENT, char_count, decode_at, encode, is_continuation_byte, lead_byte_length,
    next_boundary, nth_char_offset, prev_boundary,
};
