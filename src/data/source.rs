//! Read-only access to a dataset's variables.

use super::{Coordinate, Variable};
use crate::error::{MeridianError, Result};

/// A dataset the viewer can browse and materialize variables from.
pub trait DataSource {
    /// Variable names in dataset order.
    fn variable_names(&self) -> Vec<String>;

    /// Dimension names of a variable.
    fn dims_of(&self, name: &str) -> Result<Vec<String>>;

    /// Dimension extents of a variable.
    fn shape_of(&self, name: &str) -> Result<Vec<usize>>;

    /// Labels along one dimension of a variable.
    fn coordinates_of(&self, name: &str, dim: &str) -> Result<Coordinate>;

    /// Read a variable's full contents into memory.
    fn load(&self, name: &str) -> Result<Variable>;

    /// Rank of a variable.
    fn ndims_of(&self, name: &str) -> Result<usize> {
        Ok(self.dims_of(name)?.len())
    }
}

/// A dataset held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    variables: Vec<Variable>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, replacing any with the same name.
    pub fn with_variable(mut self, var: Variable) -> Self {
        self.variables.retain(|v| v.name != var.name);
        self.variables.push(var);
        self
    }

    fn get(&self, name: &str) -> Result<&Variable> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| MeridianError::variable_not_found(name))
    }
}

impl DataSource for MemorySource {
    fn variable_names(&self) -> Vec<String> {
        self.variables.iter().map(|v| v.name.clone()).collect()
    }

    fn dims_of(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.get(name)?.dims.clone())
    }

    fn shape_of(&self, name: &str) -> Result<Vec<usize>> {
        Ok(self.get(name)?.shape.clone())
    }

    fn coordinates_of(&self, name: &str, dim: &str) -> Result<Coordinate> {
        let var = self.get(name)?;
        var.dim_index(dim)
            .and_then(|i| var.coordinate(i))
            .cloned()
            .ok_or_else(|| MeridianError::Load(format!("{} has no dimension {}", name, dim)))
    }

    fn load(&self, name: &str) -> Result<Variable> {
        self.get(name).cloned()
    }
}
