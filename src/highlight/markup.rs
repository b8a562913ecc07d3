//! Markup pass for help text.
//!
//! Recognized tokens:
//!
//! - `#` runs followed by a space or another `#` start a heading; the whole
//!   line takes the depth's color, depths past 6 use the base color
//! - a space followed by `-`, `*` or `+` is a list bullet
//! - `[...]` and `<...>` spans, nested, closed on the same line

use super::{SyntaxMap, paint_to_line_end, peek_second, theme};
use crate::color::Color;
use crate::text::TextIter;

pub(super) fn highlight(base: Color, map: &mut SyntaxMap, mut it: TextIter<'_>, end: &TextIter<'_>) {
    while it != *end {
        let Some(byte) = it.peek() else { break };
        match byte {
            b'#' => heading(base, map, &mut it, end),
            b' ' => bullet(base, map, &mut it, end),
            b'[' => span(base, theme::BRACKETS, (b'[', b']'), map, &mut it, end),
            b'<' => span(base, theme::ANGLE_BRACKETS, (b'<', b'>'), map, &mut it, end),
            _ => {
                map.insert(it.cursor(), base);
                it.next();
            }
        }
    }
}

fn heading(base: Color, map: &mut SyntaxMap, it: &mut TextIter<'_>, end: &TextIter<'_>) {
    if !matches!(peek_second(it, end), Some(b' ' | b'#')) {
        map.insert(it.cursor(), base);
        it.next();
        return;
    }
    let mut ahead = it.clone();
    let mut depth = 0;
    while ahead != *end && ahead.peek() == Some(b'#') {
        depth += 1;
        ahead.next();
    }
    let color = theme::heading(depth).unwrap_or(base);
    paint_to_line_end(color, map, it, end);
}

fn bullet(base: Color, map: &mut SyntaxMap, it: &mut TextIter<'_>, end: &TextIter<'_>) {
    if matches!(peek_second(it, end), Some(b'-' | b'*' | b'+')) {
        for _ in 0..2 {
            map.insert(it.cursor(), theme::LIST_ELEMENT);
            it.next();
        }
    } else {
        map.insert(it.cursor(), base);
        it.next();
    }
}

/// Color a bracketed span if it closes before the end of the line.
///
/// An unclosed opener is colored as plain text and scanning resumes right
/// after it.
fn span(
    base: Color,
    color: Color,
    (open, close): (u8, u8),
    map: &mut SyntaxMap,
    it: &mut TextIter<'_>,
    end: &TextIter<'_>,
) {
    let mut ahead = it.clone();
    let mut depth: i32 = 0;
    let mut closed = false;
    while ahead != *end {
        match ahead.next() {
            Some(b) if b == open => depth += 1,
            Some(b) if b == close => depth -= 1,
            Some(b'\n') | None => break,
            Some(_) => {}
        }
        if depth == 0 {
            closed = true;
            break;
        }
    }
    if !closed {
        map.insert(it.cursor(), base);
        it.next();
        return;
    }
    while *it != ahead {
        map.insert(it.cursor(), color);
        it.next();
    }
}
