//! Pointer readout over the current slice.

use super::RenderableSlice;
use std::fmt;

/// Value under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverReadout {
    /// Variable name.
    pub variable: String,
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
    /// Value at `[y, x]`.
    pub value: f64,
}

impl fmt::Display for HoverReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VAR={} x={:03}, y={:03}, c={:.3}",
            self.variable, self.x, self.y, self.value
        )
    }
}

/// Look up the slice value under a pointer given in data coordinates.
///
/// Coordinates are truncated to integer positions. Anything negative,
/// non-finite or past the slice extent yields no readout. Lines only use `x`.
pub fn hover_readout(
    slice: &RenderableSlice,
    variable: &str,
    data_x: f64,
    data_y: f64,
) -> Option<HoverReadout> {
    let x = to_index(data_x)?;
    let y = match slice {
        RenderableSlice::Line { .. } => 0,
        RenderableSlice::Image { .. } => to_index(data_y)?,
    };

    slice.get(x, y).map(|value| HoverReadout {
        variable: variable.to_string(),
        x,
        y,
        value,
    })
}

fn to_index(v: f64) -> Option<usize> {
    (v.is_finite() && v >= 0.0).then(|| v.trunc() as usize)
}
