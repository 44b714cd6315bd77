//! The array handed to the renderer.

use crate::data::finite_min_max;
use ndarray::{Array1, Array2};

/// A 1-D or 2-D view of a variable, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderableSlice {
    /// Raw values of a 0-D or 1-D variable.
    Line {
        /// Values in dimension order.
        values: Array1<f64>,
        /// Y-axis label (the variable name).
        label: String,
    },
    /// A 2-D slice, row axis first.
    Image {
        /// Values indexed `[row, col]`.
        values: Array2<f64>,
        /// Name of the row dimension.
        row_label: String,
        /// Name of the column dimension.
        col_label: String,
        /// Variable name with the fixed positions.
        title: String,
    },
}

impl RenderableSlice {
    /// `(height, width)`; a line is one row.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Self::Line { values, .. } => (1, values.len()),
            Self::Image { values, .. } => values.dim(),
        }
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        let (h, w) = self.shape();
        h == 0 || w == 0
    }

    /// Value at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        match self {
            Self::Line { values, .. } => (y == 0).then(|| values.get(x).copied()).flatten(),
            Self::Image { values, .. } => values.get((y, x)).copied(),
        }
    }

    /// Finite value range, used for the color scale.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        match self {
            Self::Line { values, .. } => finite_min_max(values.iter().copied()),
            Self::Image { values, .. } => finite_min_max(values.iter().copied()),
        }
    }
}
