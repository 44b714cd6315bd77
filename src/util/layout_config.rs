//! Layout constants for the plot area.

/// Configuration for heatmap layout.
#[derive(Debug, Clone)]
pub struct HeatmapLayoutConfig {
    /// Terminal characters per data pixel horizontally.
    pub pixel_width: u16,
    /// Rows reserved for the colorbar above the image.
    pub colorbar_height: u16,
    /// Maximum width of the colorbar in characters.
    pub colorbar_width: usize,
    /// Rows reserved below the image for column labels.
    pub axis_label_height: u16,
    /// Columns reserved left of the image for row labels.
    pub left_margin: u16,
    /// Character height:width ratio of a terminal cell.
    pub char_aspect_ratio: f64,
}

impl Default for HeatmapLayoutConfig {
    fn default() -> Self {
        Self {
            pixel_width: 2,
            colorbar_height: 1,
            colorbar_width: 40,
            axis_label_height: 1,
            left_margin: 8,
            char_aspect_ratio: 2.0,
        }
    }
}

/// Configuration for line plot layout.
#[derive(Debug, Clone)]
pub struct PlotLayoutConfig {
    /// Padding factor for the Y-axis (0.15 = 15% margin).
    pub y_axis_padding_factor: f64,
    /// Rows the chart uses below the graph for labels and axis title.
    pub x_axis_rows: u16,
}

impl Default for PlotLayoutConfig {
    fn default() -> Self {
        Self {
            y_axis_padding_factor: 0.15,
            x_axis_rows: 2,
        }
    }
}

/// Combined layout configuration.
#[derive(Debug, Clone, Default)]
pub struct LayoutConfig {
    /// Configuration for heatmaps.
    pub heatmap: HeatmapLayoutConfig,
    /// Configuration for line plots.
    pub plot: PlotLayoutConfig,
}
