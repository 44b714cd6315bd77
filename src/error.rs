//! Error types for Meridian.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Meridian operations.
pub type Result<T> = std::result::Result<T, MeridianError>;

/// Errors that can occur in Meridian.
#[derive(Debug, Error)]
pub enum MeridianError {
    /// The dataset file is missing or cannot be opened as a dataset.
    #[error("Cannot read dataset {}: {reason}", path.display())]
    FileNotReadable {
        /// Path that was requested.
        path: PathBuf,
        /// Human readable cause.
        reason: String,
    },

    /// Any other failure while reading metadata or values.
    #[error("Load error: {0}")]
    Load(String),

    /// Variable is not part of the dataset.
    #[error("Variable not found: {name}")]
    VariableNotFound {
        /// Requested variable name.
        name: String,
    },

    /// Variable has a type that cannot be plotted.
    #[error("Unsupported variable type for {name}: {dtype}")]
    UnsupportedType {
        /// Variable name.
        name: String,
        /// Type as reported by the reader.
        dtype: String,
    },

    /// Dims, shape, coordinates or values disagree.
    #[error("Shape mismatch in {name}: {detail}")]
    ShapeMismatch {
        /// Variable name.
        name: String,
        /// What did not line up.
        detail: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeridianError {
    /// Create a FileNotReadable error.
    pub fn file_not_readable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FileNotReadable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a VariableNotFound error.
    pub fn variable_not_found(name: impl Into<String>) -> Self {
        Self::VariableNotFound { name: name.into() }
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            name: name.into(),
            detail: detail.into(),
        }
    }
}

impl From<netcdf::Error> for MeridianError {
    fn from(err: netcdf::Error) -> Self {
        Self::Load(err.to_string())
    }
}
