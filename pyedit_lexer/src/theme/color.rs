//! Hex colors
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("color '{0}' must start with '#'")]
    MissingHash(String),

    #[error("color '{value}' has {digits} hex digits (expected 3, 6 or 8)")]
    BadLength { value: String, digits: usize },

    #[error("color '{0}' contains a non-hex digit")]
    BadDigit(String),
}

/// An ARGB color.
///
/// Accepts `#rgb`, `#rrggbb` and `#aarrggbb` (alpha first, as editor widgets
/// expect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            alpha: 0xff,
            red,
            green,
            blue,
        }
    }

    pub const fn argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self {
            alpha,
            red,
            green,
            blue,
        }
    }

    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(value.to_string()))?;

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(value.to_string()));
        }

        // All digits are ASCII from here on, so byte slicing is safe
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map(|n| n * 0x11);

        let parsed = match digits.len() {
            3 => (Ok(0xff), nibble(0), nibble(1), nibble(2)),
            6 => (Ok(0xff), byte(0), byte(2), byte(4)),
            8 => (byte(0), byte(2), byte(4), byte(6)),
            n => {
                return Err(ColorError::BadLength {
                    value: value.to_string(),
                    digits: n,
                })
            }
        };

        match parsed {
            (Ok(alpha), Ok(red), Ok(green), Ok(blue)) => Ok(Self::argb(alpha, red, green, blue)),
            _ => Err(ColorError::BadDigit(value.to_string())),
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha == 0xff
    }

    /// 24-bit ANSI foreground escape
    pub fn ansi_foreground(&self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.red, self.green, self.blue)
    }

    /// 24-bit ANSI background escape
    pub fn ansi_background(&self) -> String {
        format!("\x1b[48;2;{};{};{}m", self.red, self.green, self.blue)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.alpha, self.red, self.green, self.blue
            )
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
