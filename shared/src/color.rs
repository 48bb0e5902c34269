//! Hex color parsing

use serde::{Deserialize, Serialize};

/// 8-bit RGBA color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// All channels zero. Returned for hex strings that cannot be parsed.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Pack as 0xRRGGBBAA
    pub fn to_u32(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }
}

/// Parse `#RRGGBB` (opaque) or `#RRGGBBAA`.
///
/// Any other length, or a string containing non-hex digits, yields
/// [`Rgba::TRANSPARENT`]. Short forms like `#fff` are not supported.
pub fn parse_hex_color(hex: &str) -> Rgba {
    let Some(digits) = hex.strip_prefix('#') else {
        return Rgba::TRANSPARENT;
    };
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Rgba::TRANSPARENT;
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    let parsed = match digits.len() {
        6 => channel(0)
            .zip(channel(2))
            .zip(channel(4))
            .map(|((r, g), b)| Rgba::new(r, g, b, 0xff)),
        8 => channel(0)
            .zip(channel(2))
            .zip(channel(4))
            .zip(channel(6))
            .map(|(((r, g), b), a)| Rgba::new(r, g, b, a)),
        _ => None,
    };
    parsed.unwrap_or(Rgba::TRANSPARENT)
}
