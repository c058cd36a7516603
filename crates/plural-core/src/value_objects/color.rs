//! Theme colors parsed from hex notation
//!
//! Accepted forms:
//! - `#RGB`: each digit is replicated (`digit * 17`), alpha is opaque
//! - `#RRGGBB`: alpha is opaque
//! - `#RRGGBBAA`: explicit alpha

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Normalized 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThemeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Error when parsing a hex color
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("invalid format")]
    InvalidFormat,
}

impl ThemeColor {
    /// Create a fully opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Create a color with explicit alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`
    ///
    /// Malformed input is logged before the error is returned.
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let Some(digits) = s.strip_prefix('#') else {
            warn!(input = s, "color is missing the leading '#'");
            return Err(ColorParseError::InvalidFormat);
        };

        let Some(nibbles) = digits.bytes().map(hex_value).collect::<Option<Vec<u8>>>() else {
            warn!(input = s, "color contains a non-hex digit");
            return Err(ColorParseError::InvalidFormat);
        };

        let pair = |i: usize| (nibbles[i] << 4) | nibbles[i + 1];

        match nibbles.len() {
            3 => Ok(Self::rgb(nibbles[0] * 17, nibbles[1] * 17, nibbles[2] * 17)),
            6 => Ok(Self::rgb(pair(0), pair(2), pair(4))),
            8 => Ok(Self::rgba(pair(0), pair(2), pair(4), pair(6))),
            len => {
                warn!(input = s, digits = len, "color has an unsupported length");
                Err(ColorParseError::InvalidFormat)
            }
        }
    }

    /// Format as `#rrggbbaa`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    /// Check if the color is fully opaque
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a == 0xff
    }
}

fn hex_value(b: u8) -> Option<u8> {
    char::from(b).to_digit(16).map(|d| d as u8)
}

impl FromStr for ThemeColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ThemeColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ThemeColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .map_err(|e| serde::de::Error::custom(format!("{e}: {raw:?}")))
    }
}
