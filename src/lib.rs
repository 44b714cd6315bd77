//! Meridian - a terminal viewer for multi-dimensional netCDF variables.
//!
//! Variables are grouped by rank. Selecting one puts it under a
//! [`navigation::NavigationState`] that picks two display dimensions and a
//! position along every other dimension, and the resulting 2-D slice is drawn
//! as a heatmap (1-D variables as a line chart) with a pointer readout.
//!
//! # Example
//!
//! ```ignore
//! use meridian::data::{DataSource, NetcdfSource};
//! use meridian::navigation::{AxisSlot, NavigationState};
//! use std::path::Path;
//!
//! let source = NetcdfSource::open(Path::new("data.nc"))?;
//! let var = source.load("temperature")?;
//!
//! let mut nav = NavigationState::for_variable(&var);
//! nav.step_fixed_index(0);
//! nav.rotate_display_axis(AxisSlot::Row);
//! let slice = nav.current_slice(&var);
//! println!("slice shape {:?}", slice.shape());
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod catalog;
pub mod data;
pub mod error;
pub mod navigation;
pub mod ui;
pub mod util;
pub mod viewer;

pub use error::{MeridianError, Result};
