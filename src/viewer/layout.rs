//! Screen geometry of the last drawn plot, used to map the pointer back to
//! data coordinates.

use crate::util::{HeatmapLayoutConfig, PlotLayoutConfig};
use ratatui::layout::Rect;

/// Placement of a heatmap image inside its area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapGeometry {
    /// Screen column of the first image pixel.
    pub origin_x: u16,
    /// Screen row of the first image pixel.
    pub origin_y: u16,
    /// Image rows drawn on screen.
    pub disp_rows: usize,
    /// Image columns drawn on screen (each `pixel_width` characters wide).
    pub disp_cols: usize,
    /// Characters per image column.
    pub pixel_width: u16,
    /// Data rows.
    pub rows: usize,
    /// Data columns.
    pub cols: usize,
}

impl HeatmapGeometry {
    /// Fit a `rows x cols` image into `area`.
    ///
    /// The scale is the smaller of the fits for both orientations, so
    /// swapping rows and columns transposes the picture without resizing it.
    pub fn compute(
        area: Rect,
        rows: usize,
        cols: usize,
        config: &HeatmapLayoutConfig,
    ) -> Option<Self> {
        if rows == 0 || cols == 0 || config.pixel_width == 0 {
            return None;
        }

        let pixel_width = config.pixel_width as usize;
        let max_h = area.height as usize;
        let max_w = area.width as usize / pixel_width;
        if max_h == 0 || max_w == 0 {
            return None;
        }

        let max_w_adjusted = max_w as f64 * (pixel_width as f64 / config.char_aspect_ratio);

        let scale_normal = (max_h as f64 / rows as f64).min(max_w_adjusted / cols as f64);
        let scale_transposed = (max_h as f64 / cols as f64).min(max_w_adjusted / rows as f64);
        let scale = scale_normal.min(scale_transposed);

        let disp_rows = ((rows as f64 * scale).floor() as usize).clamp(1, max_h);
        let disp_cols = ((cols as f64 * scale).floor() as usize).clamp(1, max_w);

        let offset_x = ((max_w - disp_cols) * pixel_width / 2) as u16;
        let offset_y = ((max_h - disp_rows) / 2) as u16;

        Some(Self {
            origin_x: area.x + offset_x,
            origin_y: area.y + offset_y,
            disp_rows,
            disp_cols,
            pixel_width: config.pixel_width,
            rows,
            cols,
        })
    }

    /// Data row drawn at screen row offset `y`.
    pub fn data_row(&self, y: usize) -> usize {
        (y * self.rows / self.disp_rows).min(self.rows - 1)
    }

    /// Data column drawn at image column `px`.
    pub fn data_col(&self, px: usize) -> usize {
        (px * self.cols / self.disp_cols).min(self.cols - 1)
    }

    /// Screen position of the first cell drawn for data `(row, col)`.
    pub fn screen_cell(&self, row: usize, col: usize) -> (u16, u16) {
        let cy = (row * self.disp_rows).div_ceil(self.rows).min(self.disp_rows - 1);
        let cx = (col * self.disp_cols).div_ceil(self.cols).min(self.disp_cols - 1);
        (
            self.origin_x + cx as u16 * self.pixel_width,
            self.origin_y + cy as u16,
        )
    }

    fn to_data(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        let dx = column.checked_sub(self.origin_x)? / self.pixel_width;
        let dy = row.checked_sub(self.origin_y)?;
        let (px, y) = (dx as usize, dy as usize);
        if px >= self.disp_cols || y >= self.disp_rows {
            return None;
        }
        Some((self.data_col(px) as f64, self.data_row(y) as f64))
    }
}

/// Graph area of a line chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineGeometry {
    /// Screen area covered by the plotted series.
    pub graph: Rect,
    /// Number of samples.
    pub len: usize,
}

impl LineGeometry {
    /// Graph area of a chart drawn in `inner` with `y_label_width` columns of
    /// tick labels on the left.
    pub fn compute(inner: Rect, y_label_width: u16, len: usize, config: &PlotLayoutConfig) -> Self {
        let left = (y_label_width + 1).min(inner.width);
        Self {
            graph: Rect {
                x: inner.x + left,
                y: inner.y,
                width: inner.width - left,
                height: inner.height.saturating_sub(config.x_axis_rows),
            },
            len,
        }
    }

    fn to_data(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        let g = self.graph;
        if self.len == 0
            || g.width == 0
            || column < g.x
            || column >= g.x + g.width
            || row < g.y
            || row >= g.y + g.height
        {
            return None;
        }
        let span = (g.width - 1).max(1) as f64;
        let frac = (column - g.x) as f64 / span;
        // Half-sample offset so truncation picks the nearest sample.
        Some((frac * (self.len - 1) as f64 + 0.5, 0.0))
    }
}

/// Geometry of whichever plot was drawn last.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlotLayout {
    /// Heatmap of a 2-D slice.
    Heatmap(HeatmapGeometry),
    /// Line chart of a 1-D slice.
    Line(LineGeometry),
}

impl PlotLayout {
    /// Map a screen cell to data coordinates `(x, y)`, `None` outside the plot.
    pub fn to_data(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        match self {
            PlotLayout::Heatmap(g) => g.to_data(column, row),
            PlotLayout::Line(g) => g.to_data(column, row),
        }
    }
}
