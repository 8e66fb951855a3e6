//! Canvas color representation and the RGBA adapter.
//!
//! Canvas items carry either a solid 8-bit RGB color or nothing at all. There
//! is no partial transparency: an RGBA color is drawn only when its alpha is
//! exactly 1.0, anything lower becomes fully transparent.

use serde::{Deserialize, Serialize};
use sphereview_core::Rgba;
use std::fmt;
use std::str::FromStr;

/// A canvas fill or outline color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CanvasColor {
    /// Nothing is painted.
    #[default]
    Transparent,
    /// An opaque 8-bit RGB color.
    Solid([u8; 3]),
}

impl CanvasColor {
    pub const BLACK: CanvasColor = CanvasColor::Solid([0, 0, 0]);
    pub const WHITE: CanvasColor = CanvasColor::Solid([255, 255, 255]);

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Solid([r, g, b])
    }

    /// Applies the alpha threshold and quantizes the channels to 8 bits.
    pub fn from_rgba(color: &Rgba) -> Self {
        if !color.is_opaque() {
            return Self::Transparent;
        }
        Self::Solid([
            quantize(color.r()),
            quantize(color.g()),
            quantize(color.b()),
        ])
    }

    /// Maps back to floats. Transparent reads as alpha 0.0.
    pub fn to_rgba(&self) -> Rgba {
        match self {
            Self::Transparent => Rgba::TRANSPARENT,
            Self::Solid([r, g, b]) => Rgba::opaque(
                f64::from(*r) / 255.0,
                f64::from(*g) / 255.0,
                f64::from(*b) / 255.0,
            )
            .unwrap_or(Rgba::TRANSPARENT),
        }
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, Self::Transparent)
    }

    /// Uppercase `#RRGGBB`, or the empty string for transparent.
    pub fn to_hex(&self) -> String {
        match self {
            Self::Transparent => String::new(),
            Self::Solid([r, g, b]) => format!("#{:02X}{:02X}{:02X}", r, g, b),
        }
    }
}

fn quantize(channel: f64) -> u8 {
    (255.0 * channel.clamp(0.0, 1.0)).round() as u8
}

/// Parse failure for a canvas color string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unrecognized canvas color: '{}'", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for CanvasColor {
    type Err = ParseColorError;

    /// Accepts `#RGB`, `#RRGGBB`, a handful of names, and `""`/`transparent`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let err = || ParseColorError(s.to_string());

        if value.is_empty() || value.eq_ignore_ascii_case("transparent") {
            return Ok(Self::Transparent);
        }

        if let Some(hex) = value.strip_prefix('#') {
            let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| err());
            return match hex.len() {
                3 if hex.is_ascii() => {
                    let r = channel(&hex[0..1].repeat(2))?;
                    let g = channel(&hex[1..2].repeat(2))?;
                    let b = channel(&hex[2..3].repeat(2))?;
                    Ok(Self::rgb(r, g, b))
                }
                6 if hex.is_ascii() => {
                    let r = channel(&hex[0..2])?;
                    let g = channel(&hex[2..4])?;
                    let b = channel(&hex[4..6])?;
                    Ok(Self::rgb(r, g, b))
                }
                _ => Err(err()),
            };
        }

        match value.to_lowercase().as_str() {
            "black" => Ok(Self::BLACK),
            "white" => Ok(Self::WHITE),
            "red" => Ok(Self::rgb(255, 0, 0)),
            "green" => Ok(Self::rgb(0, 255, 0)),
            "blue" => Ok(Self::rgb(0, 0, 255)),
            "gray" | "grey" => Ok(Self::rgb(190, 190, 190)),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for CanvasColor {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CanvasColor> for String {
    fn from(color: CanvasColor) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for CanvasColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transparent => write!(f, "transparent"),
            Self::Solid(_) => write!(f, "{}", self.to_hex()),
        }
    }
}
