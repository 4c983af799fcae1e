//! Short hex colors used for outlines and labels.

use serde::{Deserialize, Serialize};

/// A `#rgb` color, one hex nibble per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct HexColor {
    nibbles: [u8; 3],
}

impl HexColor {
    /// Build from three nibbles; values above 15 are masked.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            nibbles: [r & 0xf, g & 0xf, b & 0xf],
        }
    }

    /// Build from three random bytes, keeping the low nibble of each.
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Expanded 8-bit RGBA (`#a` becomes `0xaa`), for rasterizers.
    pub fn to_rgba(self, alpha: u8) -> [u8; 4] {
        let [r, g, b] = self.nibbles.map(|n| n * 17);
        [r, g, b, alpha]
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b] = self.nibbles;
        write!(f, "#{:x}{:x}{:x}", r, g, b)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| format!("color must start with '#': {value}"))?;
        let parsed: Vec<u8> = digits
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()
            .ok_or_else(|| format!("invalid hex digit in {value}"))?;
        match parsed.as_slice() {
            [r, g, b] => Ok(Self::new(*r, *g, *b)),
            _ => Err(format!("expected three hex digits: {value}")),
        }
    }
}
