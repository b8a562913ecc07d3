//! Single-pass syntax coloring over a buffer's byte stream.
//!
//! A pass walks a [`TextIter`] once, left to right, and writes a color for
//! every byte it recognizes into a [`SyntaxMap`]. Positions it leaves out are
//! drawn in the buffer's foreground color. The buffer reruns its pass after
//! each batch of edits.
//!
//! Two grammars exist: [`Grammar::Script`] for the voxel scripts typed into
//! the editor and [`Grammar::Markup`] for the help text.

mod markup;
mod script;
pub mod theme;

use std::collections::HashMap;

use crate::color::Color;
use crate::text::{Cursor, TextIter};

/// Color overlay keyed by byte position.
pub type SyntaxMap = HashMap<Cursor, Color>;

/// The grammars a buffer can be colored with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// Lua-flavored voxel scripts: keywords, literals, axis names, colors.
    Script,
    /// Lightweight markup: headings, bullets, bracketed spans.
    Markup,
}

impl Grammar {
    /// Short lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Markup => "markup",
        }
    }
}

/// A grammar bound to the base color it falls back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyntaxParser {
    pub grammar: Grammar,
    pub base: Color,
}

impl SyntaxParser {
    /// Create a parser for `grammar` with `base` as the default color.
    #[must_use]
    pub const fn new(grammar: Grammar, base: Color) -> Self {
        Self { grammar, base }
    }

    /// Color the bytes in `[begin, end)` into `map`.
    ///
    /// `map` is not cleared; the caller decides whether a run starts fresh.
    pub fn run(&self, map: &mut SyntaxMap, begin: TextIter<'_>, end: &TextIter<'_>) {
        match self.grammar {
            Grammar::Script => script::highlight(self.base, map, begin, end),
            Grammar::Markup => markup::highlight(self.base, map, begin, end),
        }
    }

    /// Color a whole line sequence into a fresh map.
    #[must_use]
    pub fn colorize(&self, lines: &[crate::text::Line]) -> SyntaxMap {
        let mut map = SyntaxMap::new();
        self.run(&mut map, TextIter::new(lines), &TextIter::end(lines));
        map
    }
}

/// Write `color` for every byte from `it` up to, not including, the next
/// newline or `end`.
pub(crate) fn paint_to_line_end(
    color: Color,
    map: &mut SyntaxMap,
    it: &mut TextIter<'_>,
    end: &TextIter<'_>,
) {
    while *it != *end && it.peek() != Some(b'\n') {
        map.insert(it.cursor(), color);
        it.next();
    }
}

/// Peek at the byte after the next one, honoring `end`.
pub(crate) fn peek_second(it: &TextIter<'_>, end: &TextIter<'_>) -> Option<u8> {
    let mut ahead = it.clone();
    ahead.next();
    if ahead == *end { None } else { ahead.peek() }
}

#[cfg(test)]
#[path = "tests/pass_tests.rs"]
mod pass_tests;
