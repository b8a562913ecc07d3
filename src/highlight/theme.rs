//! Token colors shared by the syntax passes.

use crate::color::Color;

pub const DIGIT: Color = Color::from_hex_u32(0xB4CC_A1FF);
pub const LIST_ELEMENT: Color = Color::from_hex_u32(0xC266_3AFF);
pub const KEYWORD: Color = Color::from_hex_u32(0xC185_BCFF);
pub const LITERAL: Color = Color::from_hex_u32(0x4194_D4FF);
pub const STRING: Color = Color::from_hex_u32(0xCE91_78FF);
pub const COMMENT: Color = Color::from_hex_u32(0x6A99_55FF);
pub const PAREN: Color = Color::from_hex_u32(0xFFD7_00FF);
/// The `color` result global.
pub const GLOBAL: Color = Color::from_hex_u32(0xDBDB_A9FF);

pub const HEADER_1: Color = Color::from_hex_u32(0x4194_D4FF);
pub const HEADER_2: Color = LIST_ELEMENT;
pub const HEADER_3: Color = Color::from_hex_u32(0xDBDB_A9FF);
pub const HEADER_4: Color = Color::from_hex_u32(0x4EC3_7FFF);
pub const HEADER_5: Color = HEADER_1;
pub const HEADER_6: Color = Color::from_hex_u32(0xC185_BCFF);
pub const BRACKETS: Color = HEADER_4;
pub const ANGLE_BRACKETS: Color = HEADER_6;

/// Color of a heading `depth` hashes deep, for depths 1 through 6.
#[must_use]
pub const fn heading(depth: usize) -> Option<Color> {
    match depth {
        1 => Some(HEADER_1),
        2 => Some(HEADER_2),
        3 => Some(HEADER_3),
        4 => Some(HEADER_4),
        5 => Some(HEADER_5),
        6 => Some(HEADER_6),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_depths() {
        assert_eq!(heading(1), Some(HEADER_1));
        assert_eq!(heading(6), Some(HEADER_6));
        assert_eq!(heading(0), None);
        assert_eq!(heading(7), None);
    }

    #[test]
    fn test_colors_are_opaque() {
        for color in [DIGIT, LIST_ELEMENT, KEYWORD, HEADER_3, STRING, COMMENT] {
            assert_eq!(color.a, 255);
        }
    }
}
