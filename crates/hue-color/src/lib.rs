// SPDX-License-Identifier: MIT
//
// hue-color — the color value type and WCAG contrast engine.
//
// Everything downstream (palette, generator, history) treats `Color` as an
// opaque value: an 8-bit sRGB triple with total equality and a canonical
// `#rrggbb` display form. All color math lives in [`contrast`], which is a
// pure function library over this type.

//! # hue-color
//!
//! - **[`Color`]** — canonical 8-bit sRGB color with hex parsing/formatting
//! - **[`contrast`]** — relative luminance, contrast ratio, and WCAG tier
//!   classification

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub mod contrast;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An sRGB color with 8-bit channels.
///
/// The canonical display form is lowercase `#rrggbb`. Equality is exact
/// channel equality — two colors parsed from `"#FFF"` and `"#ffffff"` are
/// equal because both canonicalize to the same triple.
///
/// # Examples
///
/// ```
/// use hue_color::Color;
///
/// let teal: Color = "#2c7cb0".parse().unwrap();
/// assert_eq!(teal.to_hex(), "#2c7cb0");
/// assert_eq!("fff".parse::<Color>().unwrap(), Color::WHITE);
/// assert!("#nope".parse::<Color>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel, 0–255.
    pub r: u8,
    /// Green channel, 0–255.
    pub g: u8,
    /// Blue channel, 0–255.
    pub b: u8,
}

impl Color {
    /// Pure black, `#000000`.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Pure white, `#ffffff`.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create a color from 8-bit channel values.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string.
    ///
    /// Supports `#RGB` and `#RRGGBB`, case-insensitive, with or without the
    /// leading `#`. Shorthand digits are doubled (`#abc` → `#aabbcc`).
    ///
    /// # Errors
    ///
    /// Returns [`ParseColorError`] if the string is not a valid hex color.
    /// The rejected input is preserved in the error so callers can report
    /// exactly what the user typed.
    pub fn parse(s: &str) -> Result<Self, ParseColorError> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        let color = match digits.len() {
            3 => {
                let r = parse_hex_digit(digits.as_bytes()[0]);
                let g = parse_hex_digit(digits.as_bytes()[1]);
                let b = parse_hex_digit(digits.as_bytes()[2]);
                match (r, g, b) {
                    (Some(r), Some(g), Some(b)) => {
                        Some(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b))
                    }
                    _ => None,
                }
            }
            6 => {
                let r = parse_hex_byte(&digits.as_bytes()[0..2]);
                let g = parse_hex_byte(&digits.as_bytes()[2..4]);
                let b = parse_hex_byte(&digits.as_bytes()[4..6]);
                match (r, g, b) {
                    (Some(r), Some(g), Some(b)) => Some(Self::rgb(r, g, b)),
                    _ => None,
                }
            }
            _ => None,
        };

        color.ok_or_else(|| ParseColorError {
            input: s.to_string(),
        })
    }

    /// The canonical `#rrggbb` form of this color.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({self})")
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Serialized as the hex string rather than a channel struct — the stored
// form stays readable and matches what the share encoding emits.
impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// ParseColorError
// ---------------------------------------------------------------------------

/// A string could not be parsed as a hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid hex color: {input:?}")]
pub struct ParseColorError {
    /// The rejected input, verbatim.
    pub input: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
