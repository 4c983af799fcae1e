//! Outline colors.

use highlighter_types::HexColor;

use crate::error::HighlightError;

/// Source of one color per overlay entry
pub trait Palette {
    fn next_color(&mut self) -> Result<HexColor, HighlightError>;
}

/// Uniformly random `#rgb` colors from the OS (or browser) RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPalette;

impl Palette for RandomPalette {
    fn next_color(&mut self) -> Result<HexColor, HighlightError> {
        let mut bytes = [0u8; 3];
        getrandom::fill(&mut bytes).map_err(HighlightError::Random)?;
        Ok(HexColor::from_bytes(bytes))
    }
}

/// Repeats a fixed list of colors. Deterministic output for tests and snapshots.
#[derive(Debug, Clone)]
pub struct CyclePalette {
    colors: Vec<HexColor>,
    next: usize,
}

impl CyclePalette {
    pub fn new(colors: Vec<HexColor>) -> Self {
        Self { colors, next: 0 }
    }
}

impl Default for CyclePalette {
    fn default() -> Self {
        Self::new(vec![
            HexColor::new(0xe, 0x3, 0x3),
            HexColor::new(0x2, 0x9, 0xd),
            HexColor::new(0x3, 0xb, 0x5),
            HexColor::new(0xf, 0x9, 0x1),
            HexColor::new(0x9, 0x4, 0xc),
        ])
    }
}

impl Palette for CyclePalette {
    fn next_color(&mut self) -> Result<HexColor, HighlightError> {
        let color = self
            .colors
            .get(self.next % self.colors.len().max(1))
            .copied()
            .unwrap_or(HexColor::new(0, 0, 0));
        self.next += 1;
        Ok(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_palette_produces_colors() {
        let mut palette = RandomPalette;
        let color = palette.next_color().unwrap();
        let text = color.to_string();
        assert_eq!(text.len(), 4);
        assert!(text.starts_with('#'));
    }

    #[test]
    fn test_cycle_palette_wraps() {
        let red = HexColor::new(0xf, 0, 0);
        let blue = HexColor::new(0, 0, 0xf);
        let mut palette = CyclePalette::new(vec![red, blue]);
        let colors: Vec<_> = (0..3).map(|_| palette.next_color().unwrap()).collect();
        assert_eq!(colors, vec![red, blue, red]);
    }

    #[test]
    fn test_empty_cycle_palette_falls_back_to_black() {
        let mut palette = CyclePalette::new(vec![]);
        assert_eq!(palette.next_color().unwrap(), HexColor::new(0, 0, 0));
    }
}
