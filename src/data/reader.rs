//! NetCDF-backed data source.

use super::{Coordinate, DataSource, Variable};
use crate::error::{MeridianError, Result};
use ndarray::{ArrayD, IxDyn};
use netcdf::types::{FloatType, IntType, NcVariableType};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A netCDF file opened for reading.
pub struct NetcdfSource {
    path: PathBuf,
    file: netcdf::File,
}

impl fmt::Debug for NetcdfSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetcdfSource")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl NetcdfSource {
    /// Open a netCDF file.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MeridianError::file_not_readable(path, "file not found"));
        }
        if !path.is_file() {
            return Err(MeridianError::file_not_readable(path, "not a regular file"));
        }

        let file = netcdf::open(path)
            .map_err(|e| MeridianError::file_not_readable(path, e.to_string()))?;

        tracing::info!(path = %path.display(), "Opened dataset");

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Path of the opened file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn variable(&self, name: &str) -> Result<netcdf::Variable<'_>> {
        self.file
            .variable(name)
            .ok_or_else(|| MeridianError::variable_not_found(name))
    }

    /// Coordinate labels for `dim`, taken from the 1-D variable of the same name
    /// when it spans exactly that dimension, positional otherwise.
    fn coordinate(&self, dim: &str, len: usize) -> Coordinate {
        let Some(coord_var) = self.file.variable(dim) else {
            return Coordinate::positional(dim, len);
        };

        let spans_dim = match coord_var.dimensions() {
            [only] => only.name() == dim && only.len() == len,
            _ => false,
        };
        if !spans_dim {
            return Coordinate::positional(dim, len);
        }

        match read_f64_values(&coord_var) {
            Ok(values) if values.len() == len => {
                let units = coord_var
                    .attribute("units")
                    .map(|attr| attr_value_to_string(&attr));
                Coordinate::from_values(dim, values, units)
            },
            Ok(_) | Err(_) => {
                tracing::debug!(dim, "Coordinate variable not numeric, using positions");
                Coordinate::positional(dim, len)
            },
        }
    }
}

impl DataSource for NetcdfSource {
    fn variable_names(&self) -> Vec<String> {
        self.file
            .variables()
            .map(|v| v.name().to_string())
            .collect()
    }

    fn dims_of(&self, name: &str) -> Result<Vec<String>> {
        Ok(self
            .variable(name)?
            .dimensions()
            .iter()
            .map(|d| d.name().to_string())
            .collect())
    }

    fn shape_of(&self, name: &str) -> Result<Vec<usize>> {
        Ok(self
            .variable(name)?
            .dimensions()
            .iter()
            .map(|d| d.len())
            .collect())
    }

    fn coordinates_of(&self, name: &str, dim: &str) -> Result<Coordinate> {
        let var = self.variable(name)?;
        let len = var
            .dimensions()
            .iter()
            .find(|d| d.name() == dim)
            .map(|d| d.len())
            .ok_or_else(|| MeridianError::Load(format!("{} has no dimension {}", name, dim)))?;
        Ok(self.coordinate(dim, len))
    }

    fn load(&self, name: &str) -> Result<Variable> {
        let var = self.variable(name)?;

        let dims: Vec<String> = var.dimensions().iter().map(|d| d.name().to_string()).collect();
        let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();

        let mut attributes = BTreeMap::new();
        for attr in var.attributes() {
            attributes.insert(attr.name().to_string(), attr_value_to_string(&attr));
        }

        let dtype = format!("{:?}", var.vartype())
            .replace("NcVariableType::", "")
            .to_lowercase();

        let raw = read_f64_values(&var).map_err(|e| match e {
            MeridianError::UnsupportedType { dtype, .. } => MeridianError::UnsupportedType {
                name: name.to_string(),
                dtype,
            },
            other => other,
        })?;
        let mut values = ArrayD::from_shape_vec(IxDyn(&shape), raw)
            .map_err(|e| MeridianError::shape_mismatch(name, e.to_string()))?;

        // CF conventions: mask fill and missing values, then unpack.
        let sentinels: Vec<f64> = ["_FillValue", "missing_value"]
            .iter()
            .filter_map(|key| attributes.get(*key))
            .flat_map(|text| parse_sentinels(text))
            .collect();
        let scale_factor = attributes
            .get("scale_factor")
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(1.0);
        let add_offset = attributes
            .get("add_offset")
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(0.0);

        if !sentinels.is_empty() {
            let single = matches!(var.vartype(), NcVariableType::Float(FloatType::F32));
            mask_sentinels(&mut values, &sentinels, single);
        }
        if scale_factor != 1.0 || add_offset != 0.0 {
            values.mapv_inplace(|v| v * scale_factor + add_offset);
        }

        let coordinates = dims
            .iter()
            .zip(&shape)
            .map(|(d, &n)| self.coordinate(d, n))
            .collect();

        tracing::debug!(name, ?shape, %dtype, "Loaded variable");

        Ok(Variable::new(name, dims, coordinates, values)?
            .with_dtype(dtype)
            .with_attributes(attributes))
    }
}

/// Numbers in a rendered fill/missing attribute, scalar or `[a, b]` list.
fn parse_sentinels(text: &str) -> Vec<f64> {
    text.trim_matches(|c| c == '[' || c == ']')
        .split(',')
        .filter_map(|part| part.trim().parse::<f64>().ok())
        .collect()
}

/// Replace every value equal to a sentinel with NaN.
///
/// `single` compares at f32 precision, since f32 sentinels lose digits
/// through their text rendering.
fn mask_sentinels(values: &mut ArrayD<f64>, sentinels: &[f64], single: bool) {
    values.mapv_inplace(|v| {
        let hit = sentinels
            .iter()
            .any(|&s| v == s || (single && v as f32 == s as f32));
        if hit {
            f64::NAN
        } else {
            v
        }
    });
}

/// Read all values of a numeric variable as `f64`.
fn read_f64_values(var: &netcdf::Variable<'_>) -> Result<Vec<f64>> {
    let vartype = var.vartype();

    let read_err =
        |kind: &str, e: netcdf::Error| MeridianError::Load(format!("Failed to read {} data: {}", kind, e));

    match vartype {
        NcVariableType::Float(FloatType::F64) => {
            var.get_values::<f64, _>(..).map_err(|e| read_err("f64", e))
        },
        NcVariableType::Float(FloatType::F32) => {
            let values: Vec<f32> = var.get_values(..).map_err(|e| read_err("f32", e))?;
            Ok(values.into_iter().map(f64::from).collect())
        },
        NcVariableType::Int(IntType::I64) => {
            let values: Vec<i64> = var.get_values(..).map_err(|e| read_err("i64", e))?;
            Ok(values.into_iter().map(|x| x as f64).collect())
        },
        NcVariableType::Int(IntType::I32) => {
            let values: Vec<i32> = var.get_values(..).map_err(|e| read_err("i32", e))?;
            Ok(values.into_iter().map(f64::from).collect())
        },
        NcVariableType::Int(IntType::I16) => {
            let values: Vec<i16> = var.get_values(..).map_err(|e| read_err("i16", e))?;
            Ok(values.into_iter().map(f64::from).collect())
        },
        NcVariableType::Int(IntType::I8) => {
            let values: Vec<i8> = var.get_values(..).map_err(|e| read_err("i8", e))?;
            Ok(values.into_iter().map(f64::from).collect())
        },
        NcVariableType::Int(IntType::U64) => {
            let values: Vec<u64> = var.get_values(..).map_err(|e| read_err("u64", e))?;
            Ok(values.into_iter().map(|x| x as f64).collect())
        },
        NcVariableType::Int(IntType::U32) => {
            let values: Vec<u32> = var.get_values(..).map_err(|e| read_err("u32", e))?;
            Ok(values.into_iter().map(f64::from).collect())
        },
        NcVariableType::Int(IntType::U16) => {
            let values: Vec<u16> = var.get_values(..).map_err(|e| read_err("u16", e))?;
            Ok(values.into_iter().map(f64::from).collect())
        },
        NcVariableType::Int(IntType::U8) => {
            let values: Vec<u8> = var.get_values(..).map_err(|e| read_err("u8", e))?;
            Ok(values.into_iter().map(f64::from).collect())
        },
        other => Err(MeridianError::UnsupportedType {
            name: var.name().to_string(),
            dtype: format!("{:?}", other),
        }),
    }
}

/// Render an attribute value as display text.
pub(crate) fn attr_value_to_string(attr: &netcdf::Attribute<'_>) -> String {
    use netcdf::AttributeValue;

    match attr.value() {
        Ok(AttributeValue::Uchar(v)) => format!("{}", v),
        Ok(AttributeValue::Schar(v)) => format!("{}", v),
        Ok(AttributeValue::Ushort(v)) => format!("{}", v),
        Ok(AttributeValue::Short(v)) => format!("{}", v),
        Ok(AttributeValue::Uint(v)) => format!("{}", v),
        Ok(AttributeValue::Int(v)) => format!("{}", v),
        Ok(AttributeValue::Ulonglong(v)) => format!("{}", v),
        Ok(AttributeValue::Longlong(v)) => format!("{}", v),
        Ok(AttributeValue::Float(v)) => format!("{}", v),
        Ok(AttributeValue::Double(v)) => format!("{}", v),
        Ok(AttributeValue::Str(v)) => v,
        Ok(AttributeValue::Uchars(v)) => format!("{:?}", v),
        Ok(AttributeValue::Schars(v)) => format!("{:?}", v),
        Ok(AttributeValue::Ushorts(v)) => format!("{:?}", v),
        Ok(AttributeValue::Shorts(v)) => format!("{:?}", v),
        Ok(AttributeValue::Uints(v)) => format!("{:?}", v),
        Ok(AttributeValue::Ints(v)) => format!("{:?}", v),
        Ok(AttributeValue::Ulonglongs(v)) => format!("{:?}", v),
        Ok(AttributeValue::Longlongs(v)) => format!("{:?}", v),
        Ok(AttributeValue::Floats(v)) => format!("{:?}", v),
        Ok(AttributeValue::Doubles(v)) => format!("{:?}", v),
        Ok(AttributeValue::Strs(v)) => v.join(", "),
        Err(_) => String::from("<unreadable>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_parse_scalars_and_lists() {
        assert_eq!(parse_sentinels("-999"), vec![-999.0]);
        assert_eq!(parse_sentinels("[-1, 32767]"), vec![-1.0, 32767.0]);
        assert!(parse_sentinels("none").is_empty());
    }

    #[test]
    fn every_sentinel_is_masked() {
        let mut values = ArrayD::from_shape_vec(IxDyn(&[4]), vec![1.0, -1.0, 1e20, 2.0]).unwrap();
        mask_sentinels(&mut values, &[-1.0, 1e20], false);
        assert_eq!(values[[0]], 1.0);
        assert!(values[[1]].is_nan());
        assert!(values[[2]].is_nan());
        assert_eq!(values[[3]], 2.0);
    }

    #[test]
    fn single_precision_sentinel_matches_stored_value() {
        let stored = 9.96921e36f32 as f64;
        let mut values = ArrayD::from_shape_vec(IxDyn(&[2]), vec![stored, 0.5]).unwrap();
        mask_sentinels(&mut values, &[9.96921e36], true);
        assert!(values[[0]].is_nan());
        assert_eq!(values[[1]], 0.5);
    }
}
