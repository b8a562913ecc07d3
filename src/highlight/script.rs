//! Script pass for the code editor.
//!
//! Colors parentheses, numbers, string literals, `--` comments and
//! identifiers found in a fixed table: Lua keywords, `true`/`false`/`nil`,
//! the axis globals and palette color names. Identifier lookup ignores case.

use super::{SyntaxMap, paint_to_line_end, peek_second, theme};
use crate::color::Color;
use crate::text::TextIter;

const KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "for", "function", "goto", "if", "in", "local",
    "not", "or", "repeat", "return", "then", "until", "while",
];

const LITERALS: &[&str] = &["true", "false", "nil"];

/// Longest identifier looked up in the table; longer ones are plain.
const MAX_WORD: usize = 16;

pub(super) fn highlight(base: Color, map: &mut SyntaxMap, mut it: TextIter<'_>, end: &TextIter<'_>) {
    while it != *end {
        let Some(byte) = it.peek() else { break };
        match byte {
            b'(' | b')' => {
                map.insert(it.cursor(), theme::PAREN);
                it.next();
            }
            b'0'..=b'9' => number(map, &mut it, end),
            b'"' | b'\'' => string(byte, map, &mut it, end),
            b'-' if peek_second(&it, end) == Some(b'-') => {
                paint_to_line_end(theme::COMMENT, map, &mut it, end);
            }
            b if b.is_ascii_alphabetic() || b == b'_' => identifier(base, map, &mut it, end),
            _ => {
                map.insert(it.cursor(), base);
                it.next();
            }
        }
    }
}

/// Digits with at most one decimal point.
fn number(map: &mut SyntaxMap, it: &mut TextIter<'_>, end: &TextIter<'_>) {
    let mut seen_dot = false;
    while *it != *end {
        match it.peek() {
            Some(b'0'..=b'9') => {}
            Some(b'.') if !seen_dot => seen_dot = true,
            _ => break,
        }
        map.insert(it.cursor(), theme::DIGIT);
        it.next();
    }
}

/// A quoted literal up to the matching quote or the end of the line.
fn string(quote: u8, map: &mut SyntaxMap, it: &mut TextIter<'_>, end: &TextIter<'_>) {
    map.insert(it.cursor(), theme::STRING);
    it.next();
    while *it != *end {
        match it.peek() {
            Some(b'\n') | None => break,
            Some(b) => {
                map.insert(it.cursor(), theme::STRING);
                it.next();
                if b == quote {
                    break;
                }
            }
        }
    }
}

fn identifier(base: Color, map: &mut SyntaxMap, it: &mut TextIter<'_>, end: &TextIter<'_>) {
    let start = it.clone();
    let mut word = Vec::new();
    while *it != *end {
        match it.peek() {
            Some(b) if b.is_ascii_alphanumeric() || b == b'_' => {
                word.push(b.to_ascii_lowercase());
                it.next();
            }
            _ => break,
        }
    }
    let color = if word.len() <= MAX_WORD {
        std::str::from_utf8(&word)
            .ok()
            .and_then(word_color)
            .unwrap_or(base)
    } else {
        base
    };
    let mut paint = start;
    while paint != *it {
        map.insert(paint.cursor(), color);
        paint.next();
    }
}

/// Table lookup for a lowercased identifier.
fn word_color(word: &str) -> Option<Color> {
    if KEYWORDS.contains(&word) {
        return Some(theme::KEYWORD);
    }
    if LITERALS.contains(&word) {
        return Some(theme::LITERAL);
    }
    match word {
        "x" => Some(Color::X_AXIS),
        "y" => Some(Color::Y_AXIS),
        "z" => Some(Color::Z_AXIS),
        "color" => Some(theme::GLOBAL),
        // an invisible keyword is no use to anyone
        "blank" => Some(Color::GRAY),
        _ => Color::from_name(word),
    }
}
