//! NetCDF fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

type Result<T> = std::result::Result<T, netcdf::Error>;

/// Write a small climate-like dataset:
///
/// - `time(3)`, `lat(4)`, `lon(5)` coordinate variables (lat/lon with units)
/// - `temp(time, lat, lon)` = `t*100 + y*10 + x` with units and long_name
/// - `mask(lat, lon)` stored as i32
/// - `level(band)` where `band` has no coordinate variable
/// - `packed(lat, lon)` stored as i16 with scale/offset, a fill value at `[0, 0]`
///   and a missing value at `[0, 1]`
pub fn write_climate(path: &Path) -> Result<()> {
    let mut file = netcdf::create(path)?;

    file.add_dimension("time", 3)?;
    file.add_dimension("lat", 4)?;
    file.add_dimension("lon", 5)?;
    file.add_dimension("band", 2)?;
    file.add_attribute("title", "meridian test data")?;

    {
        let mut time = file.add_variable::<f64>("time", &["time"])?;
        time.put_attribute("units", "days since 2000-01-01")?;
        time.put_values(&[0.0, 31.0, 59.0], ..)?;
    }
    {
        let mut lat = file.add_variable::<f32>("lat", &["lat"])?;
        lat.put_attribute("units", "degrees_north")?;
        lat.put_values(&[-45.0f32, -15.0, 15.0, 45.0], ..)?;
    }
    {
        let mut lon = file.add_variable::<f32>("lon", &["lon"])?;
        lon.put_attribute("units", "degrees_east")?;
        lon.put_values(&[0.0f32, 72.0, 144.0, 216.0, 288.0], ..)?;
    }
    {
        let values: Vec<f64> = (0..3)
            .flat_map(|t| (0..4).flat_map(move |y| (0..5).map(move |x| (t * 100 + y * 10 + x) as f64)))
            .collect();
        let mut temp = file.add_variable::<f64>("temp", &["time", "lat", "lon"])?;
        temp.put_attribute("units", "K")?;
        temp.put_attribute("long_name", "Air temperature")?;
        temp.put_values(&values, ..)?;
    }
    {
        let values: Vec<i32> = (0..20).map(|i| i % 2).collect();
        let mut mask = file.add_variable::<i32>("mask", &["lat", "lon"])?;
        mask.put_values(&values, ..)?;
    }
    {
        let mut level = file.add_variable::<f64>("level", &["band"])?;
        level.put_values(&[1.5, 2.5], ..)?;
    }
    {
        let mut values: Vec<i16> = (0..20).collect();
        values[0] = -999;
        values[1] = -1;
        let mut packed = file.add_variable::<i16>("packed", &["lat", "lon"])?;
        packed.put_attribute("_FillValue", -999i16)?;
        packed.put_attribute("missing_value", -1i16)?;
        packed.put_attribute("scale_factor", 0.5f64)?;
        packed.put_attribute("add_offset", 10.0f64)?;
        packed.put_values(&values, ..)?;
    }

    Ok(())
}

/// Create a temp dir holding `climate.nc`.
pub fn climate_fixture() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("climate.nc");
    write_climate(&path).expect("write fixture");
    (dir, path)
}
