//! UTF-8 encoding and codepoint stepping over raw bytes.

/// Codepoint reported for bytes that do not start a valid sequence.
pub const REPLACEMENT: u32 = '?' as u32;

/// A codepoint encoded as 1-4 UTF-8 bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encoded {
    buf: [u8; 4],
    len: u8,
}

impl Encoded {
    /// The encoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    /// Number of encoded bytes (1-4).
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false; an encoding holds at least one byte.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Encode a codepoint with the standard UTF-8 bit packing.
///
/// No surrogate or range validation is done: input comes from the input
/// backend, which only reports real characters. Values above `0x10FFFF` are
/// truncated to 21 bits.
#[must_use]
pub fn encode(codepoint: u32) -> Encoded {
    let cp = codepoint & 0x1F_FFFF;
    let mut buf = [0u8; 4];
    let len = if cp <= 0x7F {
        buf[0] = cp as u8;
        1
    } else if cp <= 0x7FF {
        buf[0] = 0b1100_0000 | (cp >> 6) as u8;
        buf[1] = 0b1000_0000 | (cp & 0x3F) as u8;
        2
    } else if cp <= 0xFFFF {
        buf[0] = 0b1110_0000 | (cp >> 12) as u8;
        buf[1] = 0b1000_0000 | ((cp >> 6) & 0x3F) as u8;
        buf[2] = 0b1000_0000 | (cp & 0x3F) as u8;
        3
    } else {
        buf[0] = 0b1111_0000 | (cp >> 18) as u8;
        buf[1] = 0b1000_0000 | ((cp >> 12) & 0x3F) as u8;
        buf[2] = 0b1000_0000 | ((cp >> 6) & 0x3F) as u8;
        buf[3] = 0b1000_0000 | (cp & 0x3F) as u8;
        4
    };
    Encoded { buf, len }
}

/// Length of the sequence started by `byte`, or `None` for continuation
/// bytes (`10xxxxxx`) and bytes that never start a sequence.
#[inline]
#[must_use]
pub fn lead_byte_length(byte: u8) -> Option<usize> {
    match byte {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

/// Whether `byte` continues a multi-byte sequence.
#[inline]
#[must_use]
pub fn is_continuation_byte(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

/// Decode the codepoint starting at `at`.
///
/// Returns the codepoint and the number of bytes it spans. Truncated or
/// malformed sequences decode as [`REPLACEMENT`] spanning one byte, so a
/// caller walking a line always makes progress.
#[must_use]
pub fn decode_at(bytes: &[u8], at: usize) -> (u32, usize) {
    let Some(&lead) = bytes.get(at) else {
        return (REPLACEMENT, 1);
    };
    let Some(len) = lead_byte_length(lead) else {
        return (REPLACEMENT, 1);
    };
    if len == 1 {
        return (u32::from(lead), 1);
    }
    let Some(tail) = bytes.get(at + 1..at + len) else {
        return (REPLACEMENT, 1);
    };
    if !tail.iter().all(|&b| is_continuation_byte(b)) {
        return (REPLACEMENT, 1);
    }
    let lead_bits = u32::from(lead) & (0x7F >> len);
    let cp = tail
        .iter()
        .fold(lead_bits, |acc, &b| (acc << 6) | u32::from(b & 0x3F));
    (cp, len)
}

/// Byte offset of the codepoint after the one starting at `col`.
///
/// Clamped to `bytes.len()`.
#[must_use]
pub fn next_boundary(bytes: &[u8], col: usize) -> usize {
    if col >= bytes.len() {
        return bytes.len();
    }
    let step = lead_byte_length(bytes[col]).unwrap_or(1);
    let mut next = (col + step).min(bytes.len());
    // a stray lead byte may be followed by fewer continuation bytes than it
    // announces; never stop inside the next sequence
    while next > col + 1 && !is_continuation_byte(bytes[next - 1]) {
        next -= 1;
    }
    next
}

/// Byte offset of the codepoint that ends at `col`.
///
/// Returns 0 when `col` is 0.
#[must_use]
pub fn prev_boundary(bytes: &[u8], col: usize) -> usize {
    let mut prev = col.min(bytes.len()).saturating_sub(1);
    while prev > 0 && is_continuation_byte(bytes[prev]) {
        prev -= 1;
    }
    prev
}

/// Number of codepoints in `bytes[..col]`.
#[must_use]
pub fn char_count(bytes: &[u8], col: usize) -> usize {
    let mut count = 0;
    let mut i = 0;
    let end = col.min(bytes.len());
    while i < end {
        i = next_boundary(bytes, i);
        count += 1;
    }
    count
}

/// Byte offset of the `n`th codepoint, or `None` if the line is shorter.
#[must_use]
pub fn nth_char_offset(bytes: &[u8], n: usize) -> Option<usize> {
    let mut i = 0;
    for _ in 0..n {
        if i >= bytes.len() {
            return None;
        }
        i = next_boundary(bytes, i);
    }
    Some(i)
}
