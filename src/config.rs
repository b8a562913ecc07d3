//! Player configuration.
//!
//! The config is edited as text in the config panel and read back with
//! [`Config::parse`]. Each setting is an assignment line:
//!
//! ```text
//! -- colors are palette names or 0xRRGGBBAA
//! ForeColor = "white"
//! BackColor = 0x202020FF
//! WrapLines = false
//! FontSize = 40
//! Syntax = true
//! ```

use std::fmt::Write as _;

use chumsky::error::SimpleReason;
use chumsky::prelude::*;

use crate::color::Color;
use crate::error::{Error, Result};

const FORE_COLOR: &str = "ForeColor";
const BACK_COLOR: &str = "BackColor";
const WRAP_LINES: &str = "WrapLines";
const FONT_SIZE: &str = "FontSize";
const SYNTAX: &str = "Syntax";

/// Settings pushed down to every panel on reload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub foreground_color: Color,
    pub background_color: Color,
    pub wrap_lines: bool,
    pub font_size: f32,
    pub syntax_highlighting: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            foreground_color: Color::WHITE,
            background_color: Color::BLACK,
            wrap_lines: false,
            font_size: 40.0,
            syntax_highlighting: true,
        }
    }
}

impl Config {
    /// Parse config text, starting from the defaults.
    ///
    /// Blank lines, `--` comments and unknown keys are skipped. A line that
    /// is not an assignment, or a known key with a malformed value, fails
    /// with [`Error::Parse`].
    pub fn parse(text: &str) -> Result<Self> {
        let assignments = config_file()
            .parse(text)
            .map_err(|errors| syntax_error(text, &errors))?;
        let mut config = Self::default();
        for Assignment { key, value, offset } in assignments {
            let parse_err = |what: &str| Error::Parse {
                line: line_at(text, offset),
                message: format!("{key} expects {what}, found `{value}`"),
            };
            match key.as_str() {
                FORE_COLOR => {
                    config.foreground_color =
                        Color::from_token(&value).map_err(|_| parse_err("a color"))?;
                }
                BACK_COLOR => {
                    config.background_color =
                        Color::from_token(&value).map_err(|_| parse_err("a color"))?;
                }
                WRAP_LINES => {
                    config.wrap_lines = parse_bool(&value).ok_or_else(|| parse_err("a boolean"))?;
                }
                FONT_SIZE => {
                    config.font_size = value
                        .parse::<f32>()
                        .ok()
                        .filter(|size| size.is_finite() && *size > 0.0)
                        .ok_or_else(|| parse_err("a positive number"))?;
                }
                SYNTAX => {
                    config.syntax_highlighting =
                        parse_bool(&value).ok_or_else(|| parse_err("a boolean"))?;
                }
                _ => {}
            }
        }
        Ok(config)
    }

    /// Render the config in the form [`Config::parse`] reads.
    #[must_use]
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "-- colors are palette names or 0xRRGGBBAA");
        let _ = writeln!(out, "{FORE_COLOR} = {}", color_source(self.foreground_color));
        let _ = writeln!(out, "{BACK_COLOR} = {}", color_source(self.background_color));
        let _ = writeln!(out, "{WRAP_LINES} = {}", self.wrap_lines);
        let _ = writeln!(out, "{FONT_SIZE} = {}", self.font_size);
        let _ = writeln!(out, "{SYNTAX} = {}", self.syntax_highlighting);
        out
    }
}

/// One `key = value` line; `offset` is the char index it starts at.
#[derive(Clone, Debug, PartialEq)]
struct Assignment {
    key: String,
    value: String,
    offset: usize,
}

fn hspace() -> impl Parser<char, (), Error = Simple<char>> + Clone {
    filter(|c: &char| c.is_whitespace() && *c != '\n')
        .repeated()
        .ignored()
}

fn comment() -> impl Parser<char, (), Error = Simple<char>> + Clone {
    just("--")
        .then(filter(|c: &char| *c != '\n').repeated())
        .ignored()
}

fn key() -> impl Parser<char, String, Error = Simple<char>> + Clone {
    filter(|c: &char| c.is_ascii_alphabetic() || *c == '_')
        .chain(filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_').repeated())
        .collect()
}

fn quoted(quote: char) -> impl Parser<char, String, Error = Simple<char>> + Clone {
    just(quote)
        .ignore_then(filter(move |c: &char| *c != quote && *c != '\n').repeated())
        .then_ignore(just(quote))
        .collect()
}

fn value() -> impl Parser<char, String, Error = Simple<char>> + Clone {
    let bare = filter(|c: &char| !c.is_whitespace())
        .repeated()
        .at_least(1)
        .collect::<String>();
    quoted('"').or(quoted('\'')).or(bare)
}

fn assignment() -> impl Parser<char, Assignment, Error = Simple<char>> + Clone {
    key()
        .then_ignore(hspace())
        .then_ignore(just('='))
        .then_ignore(hspace())
        .then(value())
        .map_with_span(|(key, value), span| Assignment {
            key,
            value,
            offset: span.start,
        })
}

fn config_file() -> impl Parser<char, Vec<Assignment>, Error = Simple<char>> {
    let line = hspace()
        .ignore_then(assignment().or_not())
        .then_ignore(hspace())
        .then_ignore(comment().or_not());
    line.separated_by(just('\n'))
        .then_ignore(end())
        .map(|lines| lines.into_iter().flatten().collect())
}

fn syntax_error(text: &str, errors: &[Simple<char>]) -> Error {
    let Some(e) = errors.first() else {
        return Error::Parse {
            line: 1,
            message: "malformed config".to_string(),
        };
    };
    let message = match e.reason() {
        SimpleReason::Unexpected => {
            let found = e
                .found()
                .map_or_else(|| "end of input".to_string(), |c| format!("'{c}'"));
            let expected: Vec<_> = e
                .expected()
                .filter_map(|exp| exp.as_ref().map(|c| format!("'{c}'")))
                .collect();
            if expected.is_empty() {
                format!("unexpected {found}")
            } else {
                format!("expected {}, found {found}", expected.join(" or "))
            }
        }
        SimpleReason::Unclosed { delimiter, .. } => format!("unclosed delimiter '{delimiter}'"),
        SimpleReason::Custom(msg) => msg.clone(),
    };
    Error::Parse {
        line: line_at(text, e.span().start),
        message,
    }
}

/// 1-based line of a char offset.
fn line_at(text: &str, offset: usize) -> usize {
    text.chars().take(offset).filter(|&c| c == '\n').count() + 1
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn color_source(color: Color) -> String {
    match color.name() {
        Some(name) => format!("\"{name}\""),
        None => format!("0x{:08X}", color.to_hex_u32()),
    }
}
