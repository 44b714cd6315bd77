//! Value-to-color mapping for one slice.

use crate::navigation::RenderableSlice;
use crate::util::ColorPalette;
use ratatui::style::Color;

/// Maps raw slice values onto a palette using the slice's finite range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    palette: ColorPalette,
    min: f64,
    max: f64,
    missing: Color,
}

impl ColorScale {
    /// Scale spanning the finite values of `slice`. Non-finite values draw
    /// as `missing`.
    pub fn for_slice(slice: &RenderableSlice, palette: ColorPalette, missing: Color) -> Self {
        let (min, max) = slice.min_max().unwrap_or((0.0, 1.0));
        Self {
            palette,
            min,
            max,
            missing,
        }
    }

    /// Palette in use.
    pub fn palette(&self) -> ColorPalette {
        self.palette
    }

    /// Lower and upper end of the value range.
    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Position of `value` along the palette, or `None` for NaN and infinities.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let span = self.max - self.min;
        if span.abs() < 1e-10 {
            // Constant slice: every cell sits at the low end.
            return Some(0.0);
        }
        Some(((value - self.min) / span).clamp(0.0, 1.0))
    }

    /// Glyph and color of a heatmap cell holding `value`.
    pub fn cell(&self, value: f64) -> (char, Color) {
        match self.normalize(value) {
            Some(t) => ('█', self.palette.color(t)),
            None => ('·', self.missing),
        }
    }

    /// Color of step `i` of a colorbar `width` cells wide.
    pub fn ramp(&self, i: usize, width: usize) -> Color {
        self.palette.color(i as f64 / width.max(1) as f64)
    }
}
