//! RGB colors for shapes and canvas pens.

use std::fmt;
use std::str::FromStr;

use crate::error::{GeometryError, Result};

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse any SVG color syntax: `#f00`, `#ff0000`, `rgb(255, 0, 0)`, `red`.
    ///
    /// Alpha, if present, is dropped.
    pub fn parse(text: &str) -> Result<Self> {
        let color = svgtypes::Color::from_str(text.trim())
            .map_err(|e| GeometryError::InvalidColor(format!("{:?}: {}", text, e)))?;
        Ok(Self::new(color.red, color.green, color.blue))
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        Rgb::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_black() {
        assert_eq!(Rgb::default(), Rgb::BLACK);
    }

    #[test]
    fn parses_hex_and_names() {
        assert_eq!(Rgb::parse("#E63946").unwrap(), Rgb::new(0xe6, 0x39, 0x46));
        assert_eq!(Rgb::parse("#0f0").unwrap(), Rgb::new(0, 255, 0));
        assert_eq!(Rgb::parse("blue").unwrap(), Rgb::BLUE);
        assert_eq!(Rgb::parse(" rgb(1, 2, 3) ").unwrap(), Rgb::new(1, 2, 3));
    }

    #[test]
    fn rejects_garbage() {
        let err = Rgb::parse("not-a-color").unwrap_err();
        assert!(matches!(err, GeometryError::InvalidColor(_)));
    }

    #[test]
    fn hex_output() {
        assert_eq!(Rgb::new(255, 0, 16).to_hex(), "#ff0010");
        assert_eq!(Rgb::WHITE.to_string(), "#ffffff");
    }
}
