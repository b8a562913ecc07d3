//! RGBA color type and the game's named palette.
//!
//! Colors travel through the game in three textual forms: palette names
//! (`red`, `Orange`, ...), packed hex literals (`0xRRGGBBAA`) produced by user
//! scripts and level files, and CSS-style `#RRGGBB` strings in tests and tools.
//!
//! # Examples
//!
//! ```
//! use cubecode::Color;
//!
//! let red = Color::from_name("RED").unwrap();
//! assert_eq!(red, Color::RED);
//!
//! let packed = Color::from_hex_u32(0x4194_D4FF);
//! assert_eq!(packed.to_hex_u32(), 0x4194_D4FF);
//! ```

use std::fmt;

use crate::error::{Error, Result};

/// RGBA color with u8 components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent black; what an unpainted voxel holds.
    pub const BLANK: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const RED: Self = Self::new(230, 41, 55, 255);
    pub const GREEN: Self = Self::new(0, 228, 48, 255);
    pub const BLUE: Self = Self::new(0, 121, 241, 255);
    pub const MAGENTA: Self = Self::new(255, 0, 255, 255);
    pub const ORANGE: Self = Self::new(255, 161, 0, 255);
    pub const YELLOW: Self = Self::new(253, 249, 0, 255);
    pub const PINK: Self = Self::new(255, 109, 194, 255);
    pub const GRAY: Self = Self::new(130, 130, 130, 255);
    pub const BROWN: Self = Self::new(127, 106, 79, 255);

    /// Axis colors used when drawing the grid gizmo and highlighting the
    /// `x`/`y`/`z` script globals.
    pub const X_AXIS: Self = Self::RED;
    pub const Y_AXIS: Self = Self::GREEN;
    pub const Z_AXIS: Self = Self::BLUE;

    /// Palette names accepted by scripts, level files and the config.
    pub const NAMED: [(&'static str, Self); 12] = [
        ("blank", Self::BLANK),
        ("red", Self::RED),
        ("green", Self::GREEN),
        ("blue", Self::BLUE),
        ("magenta", Self::MAGENTA),
        ("orange", Self::ORANGE),
        ("yellow", Self::YELLOW),
        ("pink", Self::PINK),
        ("black", Self::BLACK),
        ("white", Self::WHITE),
        ("gray", Self::GRAY),
        ("brown", Self::BROWN),
    ];

    /// Create a color from u8 RGBA components.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from u8 RGB components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Decode a packed `0xRRGGBBAA` value.
    #[must_use]
    pub const fn from_hex_u32(hex: u32) -> Self {
        Self {
            r: (hex >> 24) as u8,
            g: (hex >> 16) as u8,
            b: (hex >> 8) as u8,
            a: hex as u8,
        }
    }

    /// Pack into `0xRRGGBBAA`.
    #[must_use]
    pub const fn to_hex_u32(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | self.a as u32
    }

    /// Look up a palette color by name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, c)| c)
    }

    /// Palette name of this color, if it is one.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        Self::NAMED.iter().find(|(_, c)| *c == self).map(|&(n, _)| n)
    }

    /// Parse a hex color string (e.g., "#FF0000" or "FF0000").
    ///
    /// Supports 3-char (#RGB), 6-char (#RRGGBB), and 8-char (#RRGGBBAA) formats.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }

        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let value = u32::from_str_radix(hex, 16).ok()?;
                Some(Self::from_hex_u32((value << 8) | 0xFF))
            }
            8 => u32::from_str_radix(hex, 16).ok().map(Self::from_hex_u32),
            _ => None,
        }
    }

    /// Parse a color token as written in level files and the config:
    /// a palette name or a `0x` packed literal.
    pub fn from_token(token: &str) -> Result<Self> {
        let token = token.trim();
        if let Some(digits) = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
        {
            return u32::from_str_radix(digits, 16)
                .map(Self::from_hex_u32)
                .map_err(|_| Error::InvalidColor(token.to_string()));
        }
        Self::from_name(token).ok_or_else(|| Error::InvalidColor(token.to_string()))
    }

    /// Return a new color with the specified alpha value.
    #[must_use]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a: alpha,
        }
    }

    /// Check if this color is fully transparent.
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:08X}", self.to_hex_u32()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_hex_layout() {
        let c = Color::from_hex_u32(0x1122_3344);
        assert_eq!((c.r, c.g, c.b, c.a), (0x11, 0x22, 0x33, 0x44));
        assert_eq!(c.to_hex_u32(), 0x1122_3344);
    }

    #[test]
    fn test_from_name_ignores_case() {
        assert_eq!(Color::from_name("Orange"), Some(Color::ORANGE));
        assert_eq!(Color::from_name("BLANK"), Some(Color::BLANK));
        assert_eq!(Color::from_name("teal"), None);
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#FF0000"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(Color::from_hex("0f0"), Some(Color::rgb(0, 255, 0)));
        assert_eq!(
            Color::from_hex("#00000080"),
            Some(Color::new(0, 0, 0, 0x80))
        );
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#ééé"), None);
    }

    #[test]
    fn test_from_token() {
        assert_eq!(Color::from_token("red").unwrap(), Color::RED);
        assert_eq!(
            Color::from_token("0x4EC37FFF").unwrap(),
            Color::from_hex_u32(0x4EC3_7FFF)
        );
        assert!(matches!(
            Color::from_token("0xZZ"),
            Err(Error::InvalidColor(_))
        ));
        assert!(matches!(
            Color::from_token("chartreuse"),
            Err(Error::InvalidColor(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::PINK.to_string(), "pink");
        assert_eq!(Color::from_hex_u32(0x0102_0304).to_string(), "0x01020304");
    }
}
