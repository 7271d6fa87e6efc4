use std::fmt::Display;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{ModelError, Result};

lazy_static::lazy_static! {
    static ref HEX_REGEX: Regex = Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$").unwrap();
}

/// A palette color with float channels.
///
/// Channels are nominally in `0.0..=1.0` but are stored as given; nothing here clamps
/// them. On the wire a color is the sequence `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{Color: r={}, g={}, b={}, a={}}}", self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    /// Opaque black, the color new palette slots start with.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Color { r, g, b, a }
    }

    pub fn get_rgb_u8(&self) -> (u8, u8, u8) {
        (channel_to_u8(self.r), channel_to_u8(self.g), channel_to_u8(self.b))
    }

    /// Formats the rgb channels as `#rrggbb`. Alpha is not represented.
    ///
    /// Channels are rounded to 8 bit and clamped to `0..=255`.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.get_rgb_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Parses `#rrggbb` (either case) into an opaque color.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidHexColor`] for anything but a `#` followed by
    /// exactly six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let (r, g, b) = parse_hex_rgb(hex)?;
        Ok(Color::new(r, g, b, 1.0))
    }

    /// Replaces the rgb channels from a hex string, keeping this color's alpha.
    pub fn with_hex_rgb(&self, hex: &str) -> Result<Self> {
        let (r, g, b) = parse_hex_rgb(hex)?;
        Ok(Color::new(r, g, b, self.a))
    }
}

fn channel_to_u8(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

fn parse_hex_rgb(hex: &str) -> Result<(f64, f64, f64)> {
    let Some(cap) = HEX_REGEX.captures(hex) else {
        return Err(ModelError::InvalidHexColor { value: hex.to_string() });
    };
    let (_, [r, g, b]) = cap.extract();
    let parse = |s: &str| u8::from_str_radix(s, 16).map(|v| v as f64 / 255.0).map_err(|_| ModelError::InvalidHexColor { value: hex.to_string() });
    Ok((parse(r)?, parse(g)?, parse(b)?))
}

impl From<[f64; 4]> for Color {
    fn from(value: [f64; 4]) -> Self {
        Color::new(value[0], value[1], value[2], value[3])
    }
}

impl From<Color> for [f64; 4] {
    fn from(value: Color) -> [f64; 4] {
        [value.r, value.g, value.b, value.a]
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from(value: (u8, u8, u8)) -> Self {
        Color::new(value.0 as f64 / 255.0, value.1 as f64 / 255.0, value.2 as f64 / 255.0, 1.0)
    }
}
