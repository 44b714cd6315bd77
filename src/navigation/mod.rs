//! Dimensional navigation and slicing.
//!
//! A [`NavigationState`] tracks, for one variable, which two dimensions are
//! shown as the rows and columns of the heatmap and which position is held
//! along every other dimension. Rotating a display slot or stepping a fixed
//! index never leaves the state degenerate: the two display axes stay
//! distinct and every fixed index stays inside its dimension.

mod hover;
mod slice;

pub use hover::{hover_readout, HoverReadout};
pub use slice::RenderableSlice;

use crate::data::Variable;
use ndarray::{Array1, Array2, Axis, Ix2};

/// One of the two display positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSlot {
    /// Vertical extent of the image.
    Row,
    /// Horizontal extent of the image.
    Col,
}

impl AxisSlot {
    /// Both slots, in display order.
    pub const ALL: [AxisSlot; 2] = [AxisSlot::Row, AxisSlot::Col];

    /// The other slot.
    pub fn other(self) -> Self {
        match self {
            AxisSlot::Row => AxisSlot::Col,
            AxisSlot::Col => AxisSlot::Row,
        }
    }

    /// Short name.
    pub fn name(self) -> &'static str {
        match self {
            AxisSlot::Row => "Y",
            AxisSlot::Col => "X",
        }
    }
}

/// One line of the per-dimension control panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRow {
    /// Dimension index.
    pub dim: usize,
    /// Dimension name.
    pub name: String,
    /// First coordinate label.
    pub first: String,
    /// Label at the fixed index; `None` for display axes.
    pub current: Option<String>,
    /// Last coordinate label.
    pub last: String,
    /// Whether the dimension holds a fixed index.
    pub is_fixed: bool,
}

impl ControlRow {
    /// Current label, or a blank placeholder for display axes.
    pub fn current_or_blank(&self) -> &str {
        self.current.as_deref().unwrap_or("   ")
    }
}

/// Navigation state for the displayed variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    shape: Vec<usize>,
    display_axes: Option<(usize, usize)>,
    fixed_index: Vec<Option<usize>>,
}

impl NavigationState {
    /// Initial state for a variable of the given shape.
    ///
    /// With two or more dimensions the last two are displayed and every
    /// other dimension is fixed at position 0.
    pub fn new(shape: &[usize]) -> Self {
        let ndims = shape.len();
        if ndims < 2 {
            return Self {
                shape: shape.to_vec(),
                display_axes: None,
                fixed_index: vec![None; ndims],
            };
        }

        let mut state = Self {
            shape: shape.to_vec(),
            display_axes: Some((ndims - 2, ndims - 1)),
            fixed_index: vec![None; ndims],
        };
        state.reset_fixed_indices();
        state
    }

    /// Initial state for a variable.
    pub fn for_variable(var: &Variable) -> Self {
        Self::new(&var.shape)
    }

    /// Rank of the variable.
    pub fn ndims(&self) -> usize {
        self.shape.len()
    }

    /// Extents of the variable.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Whether axis rotation and fixed indices apply.
    pub fn is_multidim(&self) -> bool {
        self.display_axes.is_some()
    }

    /// `(row_axis, col_axis)` for multi-dimensional variables.
    pub fn display_axes(&self) -> Option<(usize, usize)> {
        self.display_axes
    }

    /// Dimension shown in a slot.
    ///
    /// # Panics
    /// If the variable has fewer than two dimensions.
    pub fn axis(&self, slot: AxisSlot) -> usize {
        let (row, col) = self.require_multidim("axis");
        match slot {
            AxisSlot::Row => row,
            AxisSlot::Col => col,
        }
    }

    /// Fixed position along `dim`, `None` for display axes.
    pub fn fixed_index(&self, dim: usize) -> Option<usize> {
        self.fixed_index.get(dim).copied().flatten()
    }

    /// Whether `dim` is a fixed dimension.
    pub fn is_fixed(&self, dim: usize) -> bool {
        self.fixed_index(dim).is_some()
    }

    /// Fixed dimensions with their positions, in dimension order.
    pub fn fixed_dims(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.fixed_index
            .iter()
            .enumerate()
            .filter_map(|(d, idx)| idx.map(|i| (d, i)))
    }

    /// Advance the dimension shown in `slot` to the next one that is not
    /// shown in the other slot, then reset every fixed index to 0.
    ///
    /// With exactly two dimensions the slot wraps back onto itself.
    ///
    /// # Panics
    /// If the variable has fewer than two dimensions.
    pub fn rotate_display_axis(&mut self, slot: AxisSlot) {
        let (row, col) = self.require_multidim("rotate_display_axis");
        let ndims = self.ndims();

        let (old, other) = match slot {
            AxisSlot::Row => (row, col),
            AxisSlot::Col => (col, row),
        };
        let mut next = (old + 1) % ndims;
        if next == other {
            next = (next + 1) % ndims;
        }

        self.display_axes = Some(match slot {
            AxisSlot::Row => (next, col),
            AxisSlot::Col => (row, next),
        });
        self.reset_fixed_indices();

        tracing::debug!(?slot, from = old, to = next, "Rotated display axis");
    }

    /// Move the fixed index of `dim` forward, wrapping to 0 past the end.
    ///
    /// # Panics
    /// If `dim` is not a fixed dimension.
    pub fn step_fixed_index(&mut self, dim: usize) {
        let current = self.require_fixed(dim, "step_fixed_index");
        let extent = self.shape[dim];
        let next = if extent == 0 { 0 } else { (current + 1) % extent };
        self.fixed_index[dim] = Some(next);
        tracing::debug!(dim, index = next, "Stepped fixed index");
    }

    /// Move the fixed index of `dim` backward, wrapping to the end below 0.
    ///
    /// # Panics
    /// If `dim` is not a fixed dimension.
    pub fn step_fixed_index_back(&mut self, dim: usize) {
        let current = self.require_fixed(dim, "step_fixed_index_back");
        let extent = self.shape[dim];
        let next = if extent == 0 {
            0
        } else {
            (current + extent - 1) % extent
        };
        self.fixed_index[dim] = Some(next);
        tracing::debug!(dim, index = next, "Stepped fixed index back");
    }

    /// The array to render for the current selection.
    ///
    /// Variables with fewer than two dimensions yield their raw values as a
    /// line. Otherwise every fixed dimension is indexed away and the result
    /// is oriented so the row axis is the first array axis.
    pub fn current_slice(&self, var: &Variable) -> RenderableSlice {
        debug_assert_eq!(var.shape, self.shape, "state belongs to another variable");

        let Some((row, col)) = self.display_axes else {
            return RenderableSlice::Line {
                values: Array1::from_iter(var.values.iter().copied()),
                label: var.name.clone(),
            };
        };

        let title = self.slice_title(var);
        let row_label = var.dims[row].clone();
        let col_label = var.dims[col].clone();

        if self.fixed_dims().any(|(d, _)| self.shape[d] == 0) {
            return RenderableSlice::Image {
                values: Array2::zeros((0, 0)),
                row_label,
                col_label,
                title,
            };
        }

        // Highest dimension first so lower axis numbers stay valid.
        let mut view = var.values.view();
        for d in (0..self.ndims()).rev() {
            if let Some(i) = self.fixed_index[d] {
                view = view.index_axis_move(Axis(d), i);
            }
        }
        let values = match view.into_dimensionality::<Ix2>() {
            Ok(plane) if row > col => plane.reversed_axes().to_owned(),
            Ok(plane) => plane.to_owned(),
            Err(error) => {
                tracing::error!(%error, name = %var.name, "Slice is not two-dimensional");
                Array2::zeros((0, 0))
            },
        };

        RenderableSlice::Image {
            values,
            row_label,
            col_label,
            title,
        }
    }

    /// One control row per dimension.
    pub fn control_rows(&self, var: &Variable) -> Vec<ControlRow> {
        (0..self.ndims())
            .map(|d| {
                let coord = var.coordinate(d);
                let label = |i: usize| coord.map(|c| c.label(i)).unwrap_or_default();
                ControlRow {
                    dim: d,
                    name: var.dims[d].clone(),
                    first: coord.map(|c| c.first_label()).unwrap_or_default(),
                    current: self.fixed_index(d).map(label),
                    last: coord.map(|c| c.last_label()).unwrap_or_default(),
                    is_fixed: self.is_fixed(d),
                }
            })
            .collect()
    }

    /// Labels of the two display-axis buttons, row first.
    pub fn display_buttons(&self, var: &Variable) -> Option<[String; 2]> {
        self.display_axes
            .map(|(row, col)| [var.dims[row].clone(), var.dims[col].clone()])
    }

    fn slice_title(&self, var: &Variable) -> String {
        let fixed: Vec<String> = self
            .fixed_dims()
            .map(|(d, i)| {
                let label = var.coordinate(d).map(|c| c.label(i)).unwrap_or_default();
                format!("{}={}", var.dims[d], label)
            })
            .collect();
        if fixed.is_empty() {
            var.name.clone()
        } else {
            format!("{} [{}]", var.name, fixed.join(", "))
        }
    }

    fn reset_fixed_indices(&mut self) {
        if let Some((row, col)) = self.display_axes {
            for (d, idx) in self.fixed_index.iter_mut().enumerate() {
                *idx = if d == row || d == col { None } else { Some(0) };
            }
        }
    }

    fn require_multidim(&self, op: &str) -> (usize, usize) {
        match self.display_axes {
            Some(axes) => axes,
            None => panic!(
                "{} requires at least two dimensions, variable has {}",
                op,
                self.ndims()
            ),
        }
    }

    fn require_fixed(&self, dim: usize, op: &str) -> usize {
        assert!(
            dim < self.ndims(),
            "{}: dimension {} out of range for rank {}",
            op,
            dim,
            self.ndims()
        );
        match self.fixed_index[dim] {
            Some(i) => i,
            None => panic!("{}: dimension {} is a display axis", op, dim),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ArrayD, Dimension, IxDyn};

    /// Values encode their own index: v[i, j, k] = 100 i + 10 j + k.
    fn indexed(name: &str, dims: &[&str], shape: &[usize]) -> Variable {
        let values = ArrayD::from_shape_fn(IxDyn(shape), |idx| {
            idx.slice()
                .iter()
                .fold(0.0, |acc, &i| acc * 10.0 + i as f64)
        });
        Variable::with_positional_coords(name, dims, values).unwrap()
    }

    fn image(slice: RenderableSlice) -> Array2<f64> {
        match slice {
            RenderableSlice::Image { values, .. } => values,
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn low_rank_is_not_multidim() {
        let line = indexed("x", &["x"], &[4]);
        let state = NavigationState::for_variable(&line);
        assert!(!state.is_multidim());
        assert_eq!(state.display_axes(), None);
        match state.current_slice(&line) {
            RenderableSlice::Line { values, label } => {
                assert_eq!(values.to_vec(), vec![0.0, 1.0, 2.0, 3.0]);
                assert_eq!(label, "x");
            },
            other => panic!("expected line, got {:?}", other),
        }

        let scalar = Variable::with_positional_coords("s", &[], ArrayD::from_elem(IxDyn(&[]), 2.5))
            .unwrap();
        let state = NavigationState::for_variable(&scalar);
        assert!(!state.is_multidim());
        assert_eq!(state.current_slice(&scalar).shape(), (1, 1));
    }

    #[test]
    fn init_displays_last_two_dims() {
        for ndims in 2..6 {
            let shape = vec![2; ndims];
            let state = NavigationState::new(&shape);
            assert_eq!(state.display_axes(), Some((ndims - 2, ndims - 1)));
            for d in 0..ndims - 2 {
                assert_eq!(state.fixed_index(d), Some(0));
            }
            assert_eq!(state.fixed_index(ndims - 2), None);
            assert_eq!(state.fixed_index(ndims - 1), None);
        }
    }

    #[test]
    fn rotation_keeps_axes_distinct() {
        for ndims in 2..6 {
            let shape: Vec<usize> = (0..ndims).map(|d| d + 2).collect();
            let mut state = NavigationState::new(&shape);
            // Deterministic but irregular slot sequence.
            for step in 0..50 {
                let slot = if step % 3 == 0 || step % 7 == 0 {
                    AxisSlot::Row
                } else {
                    AxisSlot::Col
                };
                state.rotate_display_axis(slot);
                let (row, col) = state.display_axes().unwrap();
                assert_ne!(row, col, "ndims {} step {}", ndims, step);
                assert!(row < ndims && col < ndims);
            }
        }
    }

    #[test]
    fn two_dim_rotation_is_a_no_op() {
        let mut state = NavigationState::new(&[3, 4]);
        state.rotate_display_axis(AxisSlot::Row);
        assert_eq!(state.display_axes(), Some((0, 1)));
        state.rotate_display_axis(AxisSlot::Col);
        assert_eq!(state.display_axes(), Some((0, 1)));
    }

    #[test]
    fn step_wraps_after_extent_steps() {
        let mut state = NavigationState::new(&[5, 2, 3]);
        for i in 1..=5 {
            state.step_fixed_index(0);
            let idx = state.fixed_index(0).unwrap();
            assert!(idx < 5);
            assert_eq!(idx, i % 5);
        }
        assert_eq!(state.fixed_index(0), Some(0));
    }

    #[test]
    fn step_back_wraps_to_end() {
        let mut state = NavigationState::new(&[4, 2, 3]);
        state.step_fixed_index_back(0);
        assert_eq!(state.fixed_index(0), Some(3));
        state.step_fixed_index(0);
        assert_eq!(state.fixed_index(0), Some(0));
    }

    #[test]
    fn rotation_resets_fixed_indices() {
        let mut state = NavigationState::new(&[3, 3, 3, 3]);
        state.step_fixed_index(0);
        state.step_fixed_index(1);
        state.step_fixed_index(1);
        state.rotate_display_axis(AxisSlot::Col);
        assert!(state.fixed_dims().all(|(_, i)| i == 0));
        assert_eq!(state.fixed_dims().count(), 2);
    }

    #[test]
    fn transposed_orientation() {
        let var = indexed("v", &["a", "b", "c"], &[2, 3, 4]);
        let mut state = NavigationState::for_variable(&var);

        // (1, 2) -> Col: 2 -> 0 gives (1, 0).
        state.rotate_display_axis(AxisSlot::Col);
        assert_eq!(state.display_axes(), Some((1, 0)));
        let swapped = image(state.current_slice(&var));

        let mut direct = NavigationState::for_variable(&var);
        direct.rotate_display_axis(AxisSlot::Row); // (0, 2)
        direct.rotate_display_axis(AxisSlot::Col); // (0, 1)
        assert_eq!(direct.display_axes(), Some((0, 1)));
        let straight = image(direct.current_slice(&var));

        assert_eq!(swapped.dim(), (3, 2));
        assert_eq!(straight.dim(), (2, 3));
        assert_eq!(swapped, straight.t());
        // Row axis is `b`, column axis is `a`, c fixed at 0.
        assert_eq!(swapped[[2, 1]], 120.0);
    }

    #[test]
    fn slice_matches_source_cells() {
        let var = indexed("v", &["a", "b", "c", "d"], &[2, 3, 4, 2]);
        let mut state = NavigationState::for_variable(&var);
        // (2, 3) -> Col: 3 -> 0 gives (2, 0), rows after columns.
        state.rotate_display_axis(AxisSlot::Col);
        assert_eq!(state.display_axes(), Some((2, 0)));
        state.step_fixed_index(1);
        state.step_fixed_index(3);

        let values = image(state.current_slice(&var));
        assert_eq!(values.dim(), (4, 2));
        for ((r, c), &v) in values.indexed_iter() {
            assert_eq!(v, var.values[IxDyn(&[c, 1, r, 1])]);
        }
    }

    #[test]
    fn slice_fixes_non_display_dims() {
        let var = indexed("v", &["t", "y", "x"], &[3, 2, 2]);
        let mut state = NavigationState::for_variable(&var);
        state.step_fixed_index(0);
        state.step_fixed_index(0);
        let values = image(state.current_slice(&var));
        assert_eq!(values[[0, 0]], 200.0);
        assert_eq!(values[[1, 1]], 211.0);
    }

    #[test]
    fn time_lat_lon_walkthrough() {
        let var = indexed("temp", &["time", "lat", "lon"], &[3, 4, 5]);
        let mut state = NavigationState::for_variable(&var);
        assert_eq!(state.display_axes(), Some((1, 2)));
        assert_eq!(state.fixed_dims().collect::<Vec<_>>(), vec![(0, 0)]);

        state.step_fixed_index(0);
        assert_eq!(state.fixed_dims().collect::<Vec<_>>(), vec![(0, 1)]);
        assert_eq!(state.current_slice(&var).shape(), (4, 5));

        // Row 1 -> 2 collides with col 2, skips to 0.
        state.rotate_display_axis(AxisSlot::Row);
        assert_eq!(state.display_axes(), Some((0, 2)));
        assert_eq!(state.fixed_dims().collect::<Vec<_>>(), vec![(1, 0)]);
        assert_eq!(state.fixed_index(0), None);
        assert_eq!(state.current_slice(&var).shape(), (3, 5));
    }

    #[test]
    fn control_rows_follow_state() {
        let var = indexed("temp", &["time", "lat", "lon"], &[3, 4, 5]);
        let mut state = NavigationState::for_variable(&var);
        state.step_fixed_index(0);

        let rows = state.control_rows(&var);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "time");
        assert_eq!(rows[0].first, "0");
        assert_eq!(rows[0].current.as_deref(), Some("1"));
        assert_eq!(rows[0].last, "2");
        assert!(rows[0].is_fixed);
        assert!(!rows[2].is_fixed);
        assert_eq!(rows[2].current_or_blank(), "   ");
        assert_eq!(rows[2].last, "4");

        assert_eq!(
            state.display_buttons(&var),
            Some(["lat".to_string(), "lon".to_string()])
        );
    }

    #[test]
    fn slice_title_names_fixed_positions() {
        let var = indexed("temp", &["time", "lat", "lon"], &[3, 4, 5]);
        let state = NavigationState::for_variable(&var);
        match state.current_slice(&var) {
            RenderableSlice::Image {
                row_label,
                col_label,
                title,
                ..
            } => {
                assert_eq!(row_label, "lat");
                assert_eq!(col_label, "lon");
                assert_eq!(title, "temp [time=0]");
            },
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn zero_extent_fixed_dim_gives_empty_image() {
        let var = indexed("e", &["t", "y", "x"], &[0, 2, 2]);
        let mut state = NavigationState::for_variable(&var);
        state.step_fixed_index(0);
        assert_eq!(state.fixed_index(0), Some(0));
        assert_eq!(state.current_slice(&var).shape(), (0, 0));
    }

    #[test]
    #[should_panic(expected = "display axis")]
    fn stepping_a_display_axis_panics() {
        let mut state = NavigationState::new(&[2, 3, 4]);
        state.step_fixed_index(2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn stepping_out_of_range_panics() {
        let mut state = NavigationState::new(&[2, 3, 4]);
        state.step_fixed_index(7);
    }

    #[test]
    #[should_panic(expected = "at least two dimensions")]
    fn rotating_a_line_panics() {
        let mut state = NavigationState::new(&[6]);
        state.rotate_display_axis(AxisSlot::Row);
    }
}
