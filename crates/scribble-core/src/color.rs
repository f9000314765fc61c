//! Color handling for Scribble scenes
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Any CSS color string is accepted on input, while the
//! output is always the form Excalidraw expects: a lowercase `#rrggbb` string,
//! or `transparent` for a fully transparent color.
//!
//! The scene format has no per-color alpha, so only opaque and fully
//! transparent colors are accepted. Element opacity is set separately.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{input}`: {reason}")]
pub struct ColorError {
    input: String,
    reason: String,
}

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Default stroke color used by the Excalidraw editor.
    pub const STROKE_HEX: &'static str = "#1e1e1e";

    /// Default background color for both elements and the canvas.
    pub const BACKGROUND_HEX: &'static str = "#ffffff";

    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] if the string is not a CSS color, or if its alpha
    /// is strictly between 0 and 1 (e.g. `rgba(255, 0, 0, 0.5)`).
    ///
    /// # Examples
    ///
    /// ```
    /// use scribble_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// assert_eq!(red.to_hex(), "#ff0000");
    ///
    /// let blue = Color::new("blue").unwrap();
    /// assert_eq!(blue.to_hex(), "#0000ff");
    /// ```
    pub fn new(color_str: &str) -> Result<Self, ColorError> {
        let color = DynamicColor::from_str(color_str).map_err(|err| ColorError {
            input: color_str.to_string(),
            reason: err.to_string(),
        })?;

        let alpha = color.components[3];
        if alpha > 0.0 && alpha < 1.0 {
            return Err(ColorError {
                input: color_str.to_string(),
                reason: format!("alpha {alpha} is not supported; use opacity instead"),
            });
        }

        Ok(Self { color })
    }

    /// The default Excalidraw stroke color, `#1e1e1e`.
    pub fn stroke() -> Self {
        Self::new(Self::STROKE_HEX).expect("default stroke color is valid hex")
    }

    /// White, the default element background and canvas color.
    pub fn white() -> Self {
        Self::new(Self::BACKGROUND_HEX).expect("default background color is valid hex")
    }

    /// Returns true when the alpha channel is zero.
    pub fn is_transparent(self) -> bool {
        self.color.components[3] == 0.0
    }

    /// Returns the color in the notation written to scene files.
    ///
    /// Fully transparent colors become `transparent`; everything else is
    /// opaque and is converted to sRGB and written as six lowercase hex digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use scribble_core::color::Color;
    ///
    /// assert_eq!(Color::new("rgb(30, 30, 30)").unwrap().to_hex(), "#1e1e1e");
    /// assert_eq!(Color::new("transparent").unwrap().to_hex(), "transparent");
    /// ```
    pub fn to_hex(self) -> String {
        if self.is_transparent() {
            return "transparent".to_string();
        }
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::stroke()
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}
