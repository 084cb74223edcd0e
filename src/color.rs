//! Text-level entry point and the packed color type

use crate::error::ColorError;
use std::fmt;
use std::str::FromStr;

/// A color packed as ARGB32: `[A][R][G][B]` from most to least significant byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Argb32(u32);

impl Argb32 {
    pub const fn from_argb(word: u32) -> Self {
        Argb32(word)
    }

    pub const fn argb(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }
}

impl From<Argb32> for u32 {
    fn from(color: Argb32) -> u32 {
        color.0
    }
}

/// Renders as `#RRGGBBAA`, the order the text came in
impl fmt::Display for Argb32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.red(),
            self.green(),
            self.blue(),
            self.alpha()
        )
    }
}

impl FromStr for Argb32 {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s)
    }
}

/// Parse `RRGGBB` or `RRGGBBAA`, with or without a leading `#`.
///
/// Length decides the form. Characters are not validated: anything that is
/// not a hex digit decodes to an unspecified nibble.
pub fn parse_hex_color(text: &str) -> Result<Argb32, ColorError> {
    let digits = text.strip_prefix('#').unwrap_or(text).as_bytes();

    if digits.is_empty() {
        return Err(ColorError::EmptyInput);
    }

    if let Ok(rgb) = <&[u8; 6]>::try_from(digits) {
        return Ok(Argb32(crate::decode_rgb(rgb)));
    }
    if let Ok(rgba) = <&[u8; 8]>::try_from(digits) {
        return Ok(Argb32(crate::decode_rgba(rgba)));
    }

    Err(ColorError::invalid_length(digits.len()))
}
