//! Linear RGB colors parsed from sRGB hex strings.
//!
//! Panel and config colors are authored as `#rrggbb` in sRGB. They are converted
//! to linear RGB on parse so gradients are interpolated in linear space, and
//! converted back when displayed.

use thiserror::Error;

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color `{0}` must have 3 or 6 hex digits")]
    InvalidLength(String),
    #[error("color `{0}` contains a non-hex digit")]
    InvalidDigit(String),
}

/// A color in linear RGB, each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb` (sRGB) into linear RGB.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(hex.to_string()));
        }
        let (r, g, b) = match digits.len() {
            6 => (
                u8::from_str_radix(&digits[0..2], 16),
                u8::from_str_radix(&digits[2..4], 16),
                u8::from_str_radix(&digits[4..6], 16),
            ),
            3 => {
                // #abc expands to #aabbcc
                let expand = |s: &str| u8::from_str_radix(s, 16).map(|v| v * 17);
                (expand(&digits[0..1]), expand(&digits[1..2]), expand(&digits[2..3]))
            }
            _ => return Err(ColorParseError::InvalidLength(hex.to_string())),
        };
        let invalid = || ColorParseError::InvalidDigit(hex.to_string());
        Ok(Self::from_srgb8(
            r.map_err(|_| invalid())?,
            g.map_err(|_| invalid())?,
            b.map_err(|_| invalid())?,
        ))
    }

    /// Build a linear color from 8-bit sRGB channels.
    pub fn from_srgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: srgb_to_linear(r as f32 / 255.0),
            g: srgb_to_linear(g as f32 / 255.0),
            b: srgb_to_linear(b as f32 / 255.0),
        }
    }

    /// Format as a `#rrggbb` sRGB string.
    pub fn to_hex(&self) -> String {
        let channel = |c: f32| (linear_to_srgb(c) * 255.0).round().clamp(0.0, 255.0) as u8;
        format!("#{:02x}{:02x}{:02x}", channel(self.r), channel(self.g), channel(self.b))
    }

    /// Interpolate toward `other` by `t`. Returns a new color; `self` is untouched.
    /// Weighted form so `t = 0` and `t = 1` reproduce the endpoints bit-for-bit.
    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        let s = 1.0 - t;
        Color {
            r: self.r * s + other.r * t,
            g: self.g * s + other.g * t,
            b: self.b * s + other.b * t,
        }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Color> for [f32; 3] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

/// sRGB transfer function, decode direction.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}

/// sRGB transfer function, encode direction.
#[inline]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c < 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_black_and_white() {
        assert_eq!(Color::from_hex("#000000").unwrap(), Color::BLACK);
        let white = Color::from_hex("#ffffff").unwrap();
        assert!((white.r - 1.0).abs() < 1e-5);
        assert!((white.g - 1.0).abs() < 1e-5);
        assert!((white.b - 1.0).abs() < 1e-5);
    }

    #[test]
    fn parse_short_form_matches_long_form() {
        assert_eq!(Color::from_hex("#fa0").unwrap(), Color::from_hex("#ffaa00").unwrap());
        assert_eq!(Color::from_hex("1b3984").unwrap(), Color::from_hex("#1b3984").unwrap());
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(matches!(Color::from_hex("#12345"), Err(ColorParseError::InvalidLength(_))));
        assert!(matches!(Color::from_hex("#zzzzzz"), Err(ColorParseError::InvalidDigit(_))));
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn parsed_colors_are_linear() {
        // sRGB mid-grey decodes to roughly 0.216 linear
        let grey = Color::from_hex("#808080").unwrap();
        assert!((grey.r - 0.2158).abs() < 1e-3, "got {}", grey.r);
    }

    #[test]
    fn hex_round_trip() {
        for hex in ["#fa7000", "#1b3984", "#f8d4c9"] {
            assert_eq!(Color::from_hex(hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn lerp_endpoints_and_base_untouched() {
        let a = Color::from_hex("#fa7000").unwrap();
        let b = Color::from_hex("#1b3984").unwrap();
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        let mid = a.lerp(&b, 0.5);
        assert!((mid.g - (a.g + b.g) * 0.5).abs() < 1e-6);
        assert_eq!(a, Color::from_hex("#fa7000").unwrap());
    }
}
