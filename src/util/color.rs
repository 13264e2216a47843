// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! RGB colours for classes and box strokes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Hue step between consecutive generated colours, in degrees.
const GOLDEN_ANGLE: f32 = 137.5;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid colour {0:?}, expected #RRGGBB")]
pub struct ParseColorError(String);

/// An opaque 8-bit RGB colour, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Distinct colour for the `index`-th item of a palette.
    pub fn from_index(index: usize) -> Self {
        let hue = (index as f32 * GOLDEN_ANGLE) % 360.0;
        let (r, g, b) = hsv_to_rgb(hue, 0.7, 0.9);
        Self::rgb(
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
        )
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Parses `#RRGGBB`, short `#RGB`, and hex strings of 1 to 6 digits.
///
/// Three digits always read as the CSS short form (`#abc` is `#AABBCC`),
/// the way a browser would have shown the colour. Any other length is a
/// number missing its leading zeroes (`#abcd` is `#00ABCD`).
impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if hex.is_empty() || hex.len() > 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let full = if hex.len() == 3 {
            hex.chars().flat_map(|c| [c, c]).collect::<String>()
        } else {
            // Shorter values lost their leading zeroes.
            format!("{:0>6}", hex)
        };

        let value = u32::from_str_radix(&full, 16).map_err(|_| err())?;
        Ok(Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h as u32 {
        0..=59 => (c, x, 0.0),
        60..=119 => (x, c, 0.0),
        120..=179 => (0.0, c, x),
        180..=239 => (0.0, x, c),
        240..=299 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let red: Color = "#FF0000".parse().unwrap();
        assert_eq!(red, Color::rgb(255, 0, 0));
        assert_eq!(red.to_string(), "#FF0000");

        assert_eq!("#0f0".parse::<Color>().unwrap(), Color::rgb(0, 255, 0));
        assert_eq!("#ff00f".parse::<Color>().unwrap(), Color::rgb(0x0f, 0xf0, 0x0f));
    }

    #[test]
    fn test_three_digits_read_as_short_form() {
        assert_eq!("#abc".parse::<Color>().unwrap(), Color::rgb(0xaa, 0xbb, 0xcc));
        // A padded value has to be written with its zeroes to mean 0x000abc
        assert_eq!("#000abc".parse::<Color>().unwrap(), Color::rgb(0x00, 0x0a, 0xbc));
        assert_eq!("#abcd".parse::<Color>().unwrap(), Color::rgb(0x00, 0xab, 0xcd));
        assert_eq!("#0abc".parse::<Color>().unwrap(), Color::rgb(0x00, 0x0a, 0xbc));
        assert_eq!("#f".parse::<Color>().unwrap(), Color::rgb(0x00, 0x00, 0x0f));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("FF0000".parse::<Color>().is_err());
        assert!("#GG0000".parse::<Color>().is_err());
        assert!("#1234567".parse::<Color>().is_err());
        assert!("#".parse::<Color>().is_err());
    }

    #[test]
    fn test_palette_is_distinct() {
        let a = Color::from_index(0);
        let b = Color::from_index(1);
        let c = Color::from_index(2);
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Color::rgb(0, 128, 255)).unwrap();
        assert_eq!(json, "\"#0080FF\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(0, 128, 255));
    }
}
