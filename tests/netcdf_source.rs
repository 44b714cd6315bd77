//! End-to-end tests over real netCDF files.

mod common;

use meridian::app::{App, Theme};
use meridian::catalog::VariableCatalog;
use meridian::data::{DataSource, NetcdfSource};
use meridian::navigation::{hover_readout, AxisSlot, NavigationState, RenderableSlice};
use meridian::viewer::ColorPalette;
use meridian::MeridianError;
use std::path::Path;

#[test]
fn lists_variables_and_dims() {
    let (_dir, path) = common::climate_fixture();
    let source = NetcdfSource::open(&path).unwrap();

    let names = source.variable_names();
    for name in ["time", "lat", "lon", "temp", "mask", "level", "packed"] {
        assert!(names.iter().any(|n| n == name), "missing {}", name);
    }
    assert_eq!(source.dims_of("temp").unwrap(), ["time", "lat", "lon"]);
    assert_eq!(source.shape_of("temp").unwrap(), [3, 4, 5]);
    assert_eq!(source.ndims_of("mask").unwrap(), 2);
}

#[test]
fn coordinates_come_from_coordinate_variables() {
    let (_dir, path) = common::climate_fixture();
    let source = NetcdfSource::open(&path).unwrap();

    let lat = source.coordinates_of("temp", "lat").unwrap();
    assert!(!lat.positional);
    assert_eq!(lat.values, vec![-45.0, -15.0, 15.0, 45.0]);
    assert_eq!(lat.units.as_deref(), Some("degrees_north"));

    let band = source.coordinates_of("level", "band").unwrap();
    assert!(band.positional);
    assert_eq!(band.values, vec![0.0, 1.0]);

    assert!(source.coordinates_of("temp", "band").is_err());
}

#[test]
fn load_materializes_values_and_attributes() {
    let (_dir, path) = common::climate_fixture();
    let source = NetcdfSource::open(&path).unwrap();

    let temp = source.load("temp").unwrap();
    assert_eq!(temp.shape, vec![3, 4, 5]);
    assert_eq!(temp.values[[2, 3, 4]], 234.0);
    assert_eq!(temp.units(), Some("K"));
    assert_eq!(temp.long_name(), Some("Air temperature"));
    assert_eq!(temp.coordinate(2).unwrap().last_label(), "288");

    let mask = source.load("mask").unwrap();
    assert_eq!(mask.values[[0, 1]], 1.0);
}

#[test]
fn packed_values_are_unpacked_and_masked() {
    let (_dir, path) = common::climate_fixture();
    let source = NetcdfSource::open(&path).unwrap();

    let packed = source.load("packed").unwrap();
    assert!(packed.values[[0, 0]].is_nan());
    assert!(packed.values[[0, 1]].is_nan());
    assert_eq!(packed.values[[0, 2]], 11.0);
    assert_eq!(packed.values[[3, 4]], 19.5);
}

#[test]
fn unknown_variable_is_an_error() {
    let (_dir, path) = common::climate_fixture();
    let source = NetcdfSource::open(&path).unwrap();
    assert!(matches!(
        source.load("nope"),
        Err(MeridianError::VariableNotFound { .. })
    ));
}

#[test]
fn missing_file_is_not_readable() {
    let err = NetcdfSource::open(Path::new("/definitely/not/here.nc")).unwrap_err();
    assert!(matches!(err, MeridianError::FileNotReadable { .. }));
}

#[test]
fn garbage_file_is_not_readable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("junk.nc");
    std::fs::write(&path, b"this is not netcdf").unwrap();
    let err = NetcdfSource::open(&path).unwrap_err();
    assert!(matches!(err, MeridianError::FileNotReadable { .. }));
}

#[test]
fn catalog_groups_file_variables() {
    let (_dir, path) = common::climate_fixture();
    let source = NetcdfSource::open(&path).unwrap();
    let catalog = VariableCatalog::from_source(&source).unwrap();

    assert_eq!(catalog.dimensionalities(), vec![1, 2, 3]);
    assert_eq!(catalog.variables(3), ["temp"]);
    assert_eq!(catalog.variables(2).len(), 2);
    assert_eq!(catalog.variables(1).len(), 4);
}

#[test]
fn navigate_a_file_variable() {
    let (_dir, path) = common::climate_fixture();
    let source = NetcdfSource::open(&path).unwrap();
    let temp = source.load("temp").unwrap();
    let mut nav = NavigationState::for_variable(&temp);

    nav.step_fixed_index(0);
    let slice = nav.current_slice(&temp);
    match &slice {
        RenderableSlice::Image { title, .. } => assert_eq!(title, "temp [time=31]"),
        other => panic!("expected image, got {:?}", other),
    }
    let readout = hover_readout(&slice, "temp", 4.0, 2.0).unwrap();
    assert_eq!(readout.to_string(), "VAR=temp x=004, y=002, c=124.000");

    nav.rotate_display_axis(AxisSlot::Col);
    // (lat, time) with lon fixed at 0.
    let slice = nav.current_slice(&temp);
    assert_eq!(slice.shape(), (4, 3));
    assert_eq!(slice.get(2, 3), Some(230.0));

    let rows = nav.control_rows(&temp);
    assert_eq!(rows[2].current.as_deref(), Some("0"));
    assert_eq!(rows[1].first, "-45");
    assert_eq!(rows[1].current_or_blank(), "   ");
}

#[test]
fn app_opens_file() {
    let (_dir, path) = common::climate_fixture();
    let mut app = App::open(&path, ColorPalette::Plasma, Theme::GruvboxLight).unwrap();
    assert_eq!(app.catalog.len(), 7);

    app.select_variable("packed");
    assert_eq!(app.viewer.slice().unwrap().shape(), (4, 5));
    assert!(app.viewer.control_rows().iter().all(|r| !r.is_fixed));
}
