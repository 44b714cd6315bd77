//! Heatmap palettes as evenly spaced RGB stops.

use ratatui::style::Color;

/// Palette used to color heatmap cells and the colorbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorPalette {
    /// Dark purple to yellow.
    #[default]
    Viridis,
    /// Deep blue to orange.
    Plasma,
    /// Blue through green to red.
    Rainbow,
    /// Diverging, white at the midpoint.
    BlueRed,
}

type Rgb = [u8; 3];

const VIRIDIS: &[Rgb] = &[[68, 1, 84], [33, 104, 109], [253, 231, 37]];
const PLASMA: &[Rgb] = &[[13, 8, 135], [180, 54, 121], [240, 175, 12]];
const RAINBOW: &[Rgb] = &[
    [0, 0, 255],
    [0, 255, 255],
    [0, 255, 0],
    [255, 255, 0],
    [255, 0, 0],
];
const BLUE_RED: &[Rgb] = &[[0, 0, 255], [255, 255, 255], [255, 0, 0]];

impl ColorPalette {
    /// Cycle order used by the `c` key.
    pub const ALL: [Self; 4] = [Self::Viridis, Self::Plasma, Self::Rainbow, Self::BlueRed];

    /// Palette after this one in [`Self::ALL`], wrapping.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&p| p == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Name shown in the plot title.
    pub fn name(self) -> &'static str {
        match self {
            Self::Viridis => "Viridis",
            Self::Plasma => "Plasma",
            Self::Rainbow => "Rainbow",
            Self::BlueRed => "Blue-Red",
        }
    }

    fn stops(self) -> &'static [Rgb] {
        match self {
            Self::Viridis => VIRIDIS,
            Self::Plasma => PLASMA,
            Self::Rainbow => RAINBOW,
            Self::BlueRed => BLUE_RED,
        }
    }

    /// Color at position `t` along the palette; `t` is clamped to `0..=1`.
    pub fn color(self, t: f64) -> Color {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (stops.len() - 1) as f64;
        let lo = (pos.floor() as usize).min(stops.len() - 2);
        let frac = pos - lo as f64;

        let channel = |c: usize| {
            let (a, b) = (stops[lo][c] as f64, stops[lo + 1][c] as f64);
            (a + (b - a) * frac).round() as u8
        };
        Color::Rgb(channel(0), channel(1), channel(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_clamped() {
        for palette in ColorPalette::ALL {
            assert_eq!(palette.color(-3.0), palette.color(0.0));
            assert_eq!(palette.color(7.0), palette.color(1.0));
        }
    }

    #[test]
    fn stops_are_hit_exactly() {
        assert_eq!(ColorPalette::Viridis.color(0.0), Color::Rgb(68, 1, 84));
        assert_eq!(ColorPalette::Viridis.color(0.5), Color::Rgb(33, 104, 109));
        assert_eq!(ColorPalette::Plasma.color(1.0), Color::Rgb(240, 175, 12));
        assert_eq!(ColorPalette::Rainbow.color(0.0), Color::Rgb(0, 0, 255));
        assert_eq!(ColorPalette::Rainbow.color(0.5), Color::Rgb(0, 255, 0));
        assert_eq!(ColorPalette::Rainbow.color(1.0), Color::Rgb(255, 0, 0));
        assert_eq!(ColorPalette::BlueRed.color(0.5), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn interpolates_between_stops() {
        assert_eq!(ColorPalette::BlueRed.color(0.25), Color::Rgb(128, 128, 255));
    }

    #[test]
    fn cycle_visits_every_palette() {
        let mut p = ColorPalette::default();
        let mut seen = vec![p];
        for _ in 1..ColorPalette::ALL.len() {
            p = p.next();
            seen.push(p);
        }
        assert_eq!(seen, ColorPalette::ALL);
        assert_eq!(p.next(), ColorPalette::Viridis);
    }
}
