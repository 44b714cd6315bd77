//! Variables grouped by dimensionality.

use crate::data::DataSource;
use crate::error::Result;
use std::collections::BTreeMap;

/// Index from rank to the names of variables with that rank.
///
/// Names keep dataset order within a bucket. Keys iterate ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableCatalog {
    groups: BTreeMap<usize, Vec<String>>,
}

impl VariableCatalog {
    /// Group `(name, ndims)` pairs by rank.
    pub fn build<I, S>(variables: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut groups: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for (name, ndims) in variables {
            let name = name.into();
            let bucket = groups.entry(ndims).or_default();
            if !bucket.contains(&name) {
                bucket.push(name);
            }
        }
        Self { groups }
    }

    /// Build the catalog from a data source's metadata.
    pub fn from_source(source: &dyn DataSource) -> Result<Self> {
        let mut entries = Vec::new();
        for name in source.variable_names() {
            let ndims = source.ndims_of(&name)?;
            entries.push((name, ndims));
        }
        Ok(Self::build(entries))
    }

    /// Ranks present in the dataset, ascending.
    pub fn dimensionalities(&self) -> Vec<usize> {
        self.groups.keys().copied().collect()
    }

    /// Variables of one rank.
    pub fn variables(&self, ndims: usize) -> &[String] {
        self.groups.get(&ndims).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Button label for a rank.
    pub fn group_label(ndims: usize) -> String {
        format!("{}D Variables", ndims)
    }

    /// Whether the dataset has no variables.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of variables.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MemorySource, Variable};
    use ndarray::{ArrayD, IxDyn};

    #[test]
    fn groups_by_rank() {
        let catalog = VariableCatalog::build([
            ("temp", 3),
            ("lat", 1),
            ("lon", 1),
            ("mask", 2),
            ("time", 1),
        ]);

        assert_eq!(catalog.dimensionalities(), vec![1, 2, 3]);
        assert_eq!(catalog.variables(1), ["lat", "lon", "time"]);
        assert_eq!(catalog.variables(3), ["temp"]);
        assert!(catalog.variables(4).is_empty());
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn empty_input_gives_empty_catalog() {
        let catalog = VariableCatalog::build(Vec::<(String, usize)>::new());
        assert!(catalog.is_empty());
        assert!(catalog.dimensionalities().is_empty());
    }

    #[test]
    fn every_variable_lands_in_one_bucket() {
        let catalog = VariableCatalog::build([("a", 0), ("a", 0), ("b", 0)]);
        assert_eq!(catalog.variables(0), ["a", "b"]);
    }

    #[test]
    fn from_source_uses_ranks() {
        let scalar = Variable::with_positional_coords("s", &[], ArrayD::zeros(IxDyn(&[]))).unwrap();
        let grid =
            Variable::with_positional_coords("g", &["y", "x"], ArrayD::zeros(IxDyn(&[2, 2])))
                .unwrap();
        let source = MemorySource::new().with_variable(scalar).with_variable(grid);

        let catalog = VariableCatalog::from_source(&source).unwrap();
        assert_eq!(catalog.dimensionalities(), vec![0, 2]);
        assert_eq!(VariableCatalog::group_label(2), "2D Variables");
    }
}
