//! Utility functions.
//!
//! This module provides color mapping and layout configuration.

mod colormaps;
mod layout_config;

pub use colormaps::ColorPalette;
pub use layout_config::{HeatmapLayoutConfig, LayoutConfig, PlotLayoutConfig};
