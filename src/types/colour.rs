//! Colour type and parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::{SwapError, Result};

/// Channels at or below this value on every channel count as black.
pub const BLACK_LIMIT: u8 = 10;

/// Channels at or above this value on every channel count as white.
pub const WHITE_LIMIT: u8 = 245;

/// An RGBA colour value.
///
/// Ordering is lexicographic over `(r, g, b, a)`, which is what palette
/// extraction uses to break frequency ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Build a colour from a 3- or 4-channel slice.
    ///
    /// Three channels produce an opaque colour. Any other length is rejected.
    pub fn from_channels(channels: &[u8]) -> Result<Self> {
        match *channels {
            [r, g, b] => Ok(Self::rgb(r, g, b)),
            [r, g, b, a] => Ok(Self::new(r, g, b, a)),
            _ => Err(SwapError::Parse {
                message: format!(
                    "Expected 3 or 4 colour channels, got {}",
                    channels.len()
                ),
                help: Some("Colours are RGB or RGBA".to_string()),
            }),
        }
    }

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RGBA` (4 digits, expanded to 8)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        let channels: Vec<u8> = match hex.len() {
            3 | 4 => hex
                .chars()
                .map(|c| parse_hex_digit(c).map(|d| d << 4 | d))
                .collect::<Result<_>>()?,
            6 | 8 => (0..hex.len())
                .step_by(2)
                .map(|i| parse_hex_byte(&hex[i..i + 2]))
                .collect::<Result<_>>()?,
            _ => return Err(invalid_hex(s)),
        };

        Self::from_channels(&channels)
    }

    /// Parse a comma-separated channel tuple: `r,g,b` or `r,g,b,a`.
    ///
    /// Surrounding parentheses are allowed, so `(255, 0, 0)` works too.
    pub fn from_tuple(s: &str) -> Result<Self> {
        let inner = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')');

        let channels = inner
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<u8>().map_err(|_| SwapError::Parse {
                    message: format!("Invalid colour channel '{}' in '{}'", part, s),
                    help: Some("Channels must be integers from 0 to 255".to_string()),
                })
            })
            .collect::<Result<Vec<u8>>>()?;

        Self::from_channels(&channels)
    }

    /// Parse `hsl(h, s%, l%)` into an opaque colour.
    pub fn from_hsl_str(s: &str) -> Result<Self> {
        use palette::{Hsl, IntoColor, Srgb};

        let trimmed = s.trim();
        let args = trimmed
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| SwapError::Parse {
                message: format!("Invalid hsl colour: {}", s),
                help: Some("Usage: hsl(210, 50%, 40%)".to_string()),
            })?;

        let parts: Vec<f32> = args
            .split(',')
            .map(|p| {
                let p = p.trim().trim_end_matches('%');
                p.parse::<f32>().map_err(|_| SwapError::Parse {
                    message: format!("Invalid hsl component '{}' in '{}'", p, s),
                    help: None,
                })
            })
            .collect::<Result<_>>()?;

        let &[hue, saturation, lightness] = parts.as_slice() else {
            return Err(SwapError::Parse {
                message: format!("hsl() takes three components, got {}", parts.len()),
                help: Some("Usage: hsl(210, 50%, 40%)".to_string()),
            });
        };

        let hsl = Hsl::new(
            hue,
            (saturation / 100.0).clamp(0.0, 1.0),
            (lightness / 100.0).clamp(0.0, 1.0),
        );
        let rgb: Srgb<f32> = hsl.into_color();

        Ok(Self::rgb(
            unit_to_channel(rgb.red),
            unit_to_channel(rgb.green),
            unit_to_channel(rgb.blue),
        ))
    }

    /// Hue in degrees plus saturation and lightness as percentages.
    pub fn to_hsl(self) -> (f32, f32, f32) {
        use palette::{Hsl, IntoColor, Srgb};

        let rgb: Srgb<f32> = Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        );
        let hsl: Hsl = rgb.into_color();

        (
            hsl.hue.into_positive_degrees(),
            hsl.saturation * 100.0,
            hsl.lightness * 100.0,
        )
    }

    /// Convert to RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same colour with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Exact comparison of the colour channels, ignoring alpha.
    pub fn same_rgb(self, other: Colour) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// Squared Euclidean distance in RGB space.
    pub fn distance_sq(self, other: Colour) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Euclidean distance in RGB space.
    pub fn distance(self, other: Colour) -> f64 {
        (self.distance_sq(other) as f64).sqrt()
    }

    /// Mean of the three colour channels.
    pub fn brightness(self) -> f64 {
        (self.r as f64 + self.g as f64 + self.b as f64) / 3.0
    }

    pub fn is_black(self) -> bool {
        self.r <= BLACK_LIMIT && self.g <= BLACK_LIMIT && self.b <= BLACK_LIMIT
    }

    pub fn is_white(self) -> bool {
        self.r >= WHITE_LIMIT && self.g >= WHITE_LIMIT && self.b >= WHITE_LIMIT
    }
}

impl FromStr for Colour {
    type Err = SwapError;

    /// Accepts hex (`#F00`, `#FF000080`), tuples (`255,0,0`) and `hsl(...)`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with("hsl(") {
            Self::from_hsl_str(s)
        } else if s.contains(',') {
            Self::from_tuple(s)
        } else {
            Self::from_hex(s)
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

fn unit_to_channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn invalid_hex(s: &str) -> SwapError {
    SwapError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| SwapError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| SwapError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}
