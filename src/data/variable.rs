//! Materialized variables and their coordinate labels.

use crate::error::{MeridianError, Result};
use ndarray::ArrayD;
use std::collections::BTreeMap;

/// Ordered labels along one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    /// Dimension name.
    pub name: String,
    /// One label per position along the dimension.
    pub values: Vec<f64>,
    /// Units of the coordinate variable, if any.
    pub units: Option<String>,
    /// True when no coordinate variable exists and labels are positions.
    pub positional: bool,
}

impl Coordinate {
    /// Coordinate backed by a coordinate variable's values.
    pub fn from_values(name: impl Into<String>, values: Vec<f64>, units: Option<String>) -> Self {
        Self {
            name: name.into(),
            values,
            units,
            positional: false,
        }
    }

    /// Positional labels `0..len` for a dimension without a coordinate variable.
    pub fn positional(name: impl Into<String>, len: usize) -> Self {
        Self {
            name: name.into(),
            values: (0..len).map(|i| i as f64).collect(),
            units: None,
            positional: true,
        }
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the dimension has zero extent.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Label value at a position.
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Formatted label at a position, empty when out of range.
    pub fn label(&self, index: usize) -> String {
        self.value(index).map(format_label).unwrap_or_default()
    }

    /// Formatted first label.
    pub fn first_label(&self) -> String {
        self.label(0)
    }

    /// Formatted last label.
    pub fn last_label(&self) -> String {
        self.label(self.len().saturating_sub(1))
    }
}

/// Format a coordinate label: integers without decimals, others trimmed to 4 places.
pub fn format_label(val: f64) -> String {
    if !val.is_finite() {
        return format!("{}", val);
    }
    if val.fract() == 0.0 && val.abs() < 1e15 {
        return format!("{:.0}", val);
    }
    let s = format!("{:.4}", val);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// A named, N-dimensional labeled array held fully in memory.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Variable name, unique within a dataset.
    pub name: String,
    /// Dimension names in array order.
    pub dims: Vec<String>,
    /// Extent of each dimension.
    pub shape: Vec<usize>,
    /// Labels for each dimension, same order as `dims`.
    pub coordinates: Vec<Coordinate>,
    /// The materialized values.
    pub values: ArrayD<f64>,
    /// Storage type as reported by the reader.
    pub dtype: String,
    /// Rendered attribute values.
    pub attributes: BTreeMap<String, String>,
}

impl Variable {
    /// Build a variable, checking that dims, coordinates and values agree.
    pub fn new(
        name: impl Into<String>,
        dims: Vec<String>,
        coordinates: Vec<Coordinate>,
        values: ArrayD<f64>,
    ) -> Result<Self> {
        let name = name.into();
        let shape = values.shape().to_vec();

        if dims.len() != shape.len() {
            return Err(MeridianError::shape_mismatch(
                &name,
                format!("{} dimension names for rank {}", dims.len(), shape.len()),
            ));
        }
        if coordinates.len() != shape.len() {
            return Err(MeridianError::shape_mismatch(
                &name,
                format!("{} coordinates for rank {}", coordinates.len(), shape.len()),
            ));
        }
        for (coord, &extent) in coordinates.iter().zip(&shape) {
            if coord.len() != extent {
                return Err(MeridianError::shape_mismatch(
                    &name,
                    format!(
                        "coordinate {} has {} labels, dimension extent is {}",
                        coord.name,
                        coord.len(),
                        extent
                    ),
                ));
            }
        }

        Ok(Self {
            name,
            dims,
            shape,
            coordinates,
            values,
            dtype: "f64".to_string(),
            attributes: BTreeMap::new(),
        })
    }

    /// Variable whose dimensions all use positional labels.
    pub fn with_positional_coords(
        name: impl Into<String>,
        dims: &[&str],
        values: ArrayD<f64>,
    ) -> Result<Self> {
        let coordinates = dims
            .iter()
            .zip(values.shape())
            .map(|(d, &n)| Coordinate::positional(*d, n))
            .collect();
        Self::new(
            name,
            dims.iter().map(|d| d.to_string()).collect(),
            coordinates,
            values,
        )
    }

    /// Set the storage type.
    pub fn with_dtype(mut self, dtype: impl Into<String>) -> Self {
        self.dtype = dtype.into();
        self
    }

    /// Set the attributes.
    pub fn with_attributes(mut self, attributes: BTreeMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    pub fn total_elements(&self) -> usize {
        self.values.len()
    }

    /// Labels of one dimension.
    pub fn coordinate(&self, dim: usize) -> Option<&Coordinate> {
        self.coordinates.get(dim)
    }

    /// Index of a dimension by name.
    pub fn dim_index(&self, dim: &str) -> Option<usize> {
        self.dims.iter().position(|d| d == dim)
    }

    /// `units` attribute.
    pub fn units(&self) -> Option<&str> {
        self.attributes.get("units").map(String::as_str)
    }

    /// `long_name` attribute.
    pub fn long_name(&self) -> Option<&str> {
        self.attributes.get("long_name").map(String::as_str)
    }

    /// Minimum and maximum over finite values.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        finite_min_max(self.values.iter().copied())
    }
}

/// Minimum and maximum over the finite values of an iterator.
pub fn finite_min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ArrayD, IxDyn};

    #[test]
    fn labels_drop_trailing_zeros() {
        assert_eq!(format_label(3.0), "3");
        assert_eq!(format_label(-12.5), "-12.5");
        assert_eq!(format_label(0.1 + 0.2), "0.3");
        assert_eq!(format_label(f64::NAN), "NaN");
    }

    #[test]
    fn positional_coordinate_labels() {
        let c = Coordinate::positional("x", 4);
        assert_eq!(c.first_label(), "0");
        assert_eq!(c.last_label(), "3");
        assert_eq!(c.label(9), "");
        assert!(c.positional);
    }

    #[test]
    fn new_rejects_mismatched_coordinates() {
        let values = ArrayD::<f64>::zeros(IxDyn(&[2, 3]));
        let coords = vec![Coordinate::positional("a", 2), Coordinate::positional("b", 4)];
        let err = Variable::new("v", vec!["a".into(), "b".into()], coords, values).unwrap_err();
        assert!(matches!(err, MeridianError::ShapeMismatch { .. }));
    }

    #[test]
    fn new_rejects_wrong_rank() {
        let values = ArrayD::<f64>::zeros(IxDyn(&[2]));
        let err = Variable::new("v", vec![], vec![], values).unwrap_err();
        assert!(matches!(err, MeridianError::ShapeMismatch { .. }));
    }

    #[test]
    fn scalar_variable_has_rank_zero() {
        let values = ArrayD::from_elem(IxDyn(&[]), 7.0);
        let var = Variable::with_positional_coords("s", &[], values).unwrap();
        assert_eq!(var.ndim(), 0);
        assert_eq!(var.total_elements(), 1);
        assert_eq!(var.min_max(), Some((7.0, 7.0)));
    }

    #[test]
    fn min_max_skips_nan() {
        assert_eq!(finite_min_max([f64::NAN, 2.0, -1.0]), Some((-1.0, 2.0)));
        assert_eq!(finite_min_max([f64::NAN]), None);
    }
}
