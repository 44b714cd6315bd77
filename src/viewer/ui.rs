//! Plot and info pane rendering.

use super::color_scale::ColorScale;
use super::details::format_variable_details;
use super::layout::{HeatmapGeometry, LineGeometry, PlotLayout};
use super::{ColorPalette, ViewerState};
use crate::data::Variable;
use crate::navigation::{AxisSlot, HoverReadout, NavigationState, RenderableSlice};
use crate::ui::formatters::format_axis_label;
use crate::ui::ThemeColors;
use crate::util::{HeatmapLayoutConfig, LayoutConfig, PlotLayoutConfig};
use ndarray::{Array1, Array2};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Draw the plot for the current selection and record its geometry.
pub fn draw_plot(f: &mut Frame<'_>, area: Rect, state: &mut ViewerState, colors: &ThemeColors) {
    state.layout = None;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.bg2))
        .style(Style::default().bg(colors.bg0));

    if let Some(ref error) = state.error {
        let inner = block.inner(area);
        f.render_widget(block.title(" Plot "), area);
        draw_error(f, inner, error, colors);
        return;
    }

    let Some((var, nav)) = state.active() else {
        let para = Paragraph::new("Select a variable from the group bar")
            .style(Style::default().fg(colors.gray))
            .alignment(Alignment::Center)
            .block(block.title(" Plot "));
        f.render_widget(para, area);
        return;
    };

    let config = LayoutConfig::default();
    let slice = nav.current_slice(var);
    let view = PlotView {
        var,
        nav,
        scale: ColorScale::for_slice(&slice, state.color_palette, colors.gray),
        hover: state.hover.as_ref(),
        colors,
    };

    let layout = match &slice {
        RenderableSlice::Image {
            values,
            row_label,
            col_label,
            title,
        } => {
            let title = plot_title(view.hover, title, view.scale.palette());
            let block = block
                .title(title)
                .title_style(Style::default().fg(colors.yellow))
                .title_bottom(Line::from(format!(" {} ↓  {} → ", row_label, col_label)).right_aligned());
            let inner = block.inner(area);
            f.render_widget(block, area);
            draw_image(f, inner, values, &view, &config.heatmap).map(PlotLayout::Heatmap)
        },
        RenderableSlice::Line { values, label } => {
            let title = plot_title(view.hover, label, view.scale.palette());
            let block = block
                .title(title)
                .title_style(Style::default().fg(colors.yellow));
            let inner = block.inner(area);
            f.render_widget(block, area);
            draw_line(f, inner, values, label, &view, &config.plot).map(PlotLayout::Line)
        },
    };

    state.layout = layout;
}

/// Draw the info pane for the displayed variable.
pub fn draw_info(f: &mut Frame<'_>, area: Rect, state: &ViewerState, focused: bool, colors: &ThemeColors) {
    let border = if focused { colors.yellow } else { colors.bg2 };
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(colors.bg0));

    let lines = match &state.variable {
        Some(var) => format_variable_details(var, colors),
        None => vec![Line::from(Span::styled(
            "No variable selected",
            Style::default().fg(colors.gray),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.info_scroll, 0));
    f.render_widget(paragraph, area);
}

struct PlotView<'a> {
    var: &'a Variable,
    nav: &'a NavigationState,
    scale: ColorScale,
    hover: Option<&'a HoverReadout>,
    colors: &'a ThemeColors,
}

impl PlotView<'_> {
    /// Coordinate label of the dimension shown in `slot`.
    fn axis_label(&self, slot: AxisSlot, index: usize) -> String {
        self.var
            .coordinate(self.nav.axis(slot))
            .map(|c| c.label(index))
            .unwrap_or_else(|| index.to_string())
    }
}

fn plot_title(hover: Option<&HoverReadout>, fallback: &str, palette: ColorPalette) -> String {
    match hover {
        Some(readout) => format!(" {} | {} ", readout, palette.name()),
        None => format!(" {} | {} ", fallback, palette.name()),
    }
}

/// Draw a 2-D slice as a heatmap with a colorbar and axis labels.
fn draw_image(
    f: &mut Frame<'_>,
    inner: Rect,
    values: &Array2<f64>,
    view: &PlotView<'_>,
    config: &HeatmapLayoutConfig,
) -> Option<HeatmapGeometry> {
    let colors = view.colors;
    let (rows, cols) = values.dim();

    if rows == 0 || cols == 0 {
        let para = Paragraph::new("Empty slice")
            .style(Style::default().fg(colors.gray))
            .alignment(Alignment::Center);
        f.render_widget(para, inner);
        return None;
    }
    if inner.width < 4 || inner.height < 4 {
        return None;
    }

    let heatmap_area = Rect {
        x: inner.x + config.left_margin.min(inner.width),
        y: inner.y + config.colorbar_height,
        width: inner.width.saturating_sub(config.left_margin),
        height: inner
            .height
            .saturating_sub(config.colorbar_height + config.axis_label_height),
    };

    draw_colorbar(f, inner, heatmap_area, view, config);

    let geometry = HeatmapGeometry::compute(heatmap_area, rows, cols, config)?;
    let right = heatmap_area.x + heatmap_area.width;
    let bottom = heatmap_area.y + heatmap_area.height;

    for y in 0..geometry.disp_rows {
        let row_idx = geometry.data_row(y);
        let screen_y = geometry.origin_y + y as u16;
        if screen_y >= bottom {
            break;
        }
        for px in 0..geometry.disp_cols {
            let (glyph, color) = view.scale.cell(values[[row_idx, geometry.data_col(px)]]);
            for i in 0..geometry.pixel_width {
                let screen_x = geometry.origin_x + px as u16 * geometry.pixel_width + i;
                if screen_x >= right {
                    break;
                }
                if let Some(cell) = f.buffer_mut().cell_mut((screen_x, screen_y)) {
                    cell.set_char(glyph).set_fg(color);
                }
            }
        }
    }

    // Row labels, right-aligned against the image.
    for y_pos in [0, geometry.disp_rows / 2, geometry.disp_rows - 1] {
        let label: String = view
            .axis_label(AxisSlot::Row, geometry.data_row(y_pos))
            .chars()
            .take(7)
            .collect();
        let label_len = label.width() as u16;
        let screen_y = geometry.origin_y + y_pos as u16;
        let start_x = if geometry.origin_x > inner.x + label_len {
            geometry.origin_x - label_len - 1
        } else {
            inner.x
        };
        put_str(f, start_x, screen_y, &label, geometry.origin_x, colors.green);
    }

    // Column labels directly under the image.
    let label_y = geometry.origin_y + geometry.disp_rows as u16;
    if label_y < inner.y + inner.height {
        for x_pos in [0, geometry.disp_cols / 2, geometry.disp_cols - 1] {
            let label: String = view
                .axis_label(AxisSlot::Col, geometry.data_col(x_pos))
                .chars()
                .take(8)
                .collect();
            let screen_x = geometry.origin_x + x_pos as u16 * geometry.pixel_width;
            put_str(f, screen_x, label_y, &label, right, colors.green);
        }
    }

    if let Some(readout) = view.hover {
        if readout.y < rows && readout.x < cols {
            let (sx, sy) = geometry.screen_cell(readout.y, readout.x);
            for i in 0..geometry.pixel_width {
                if let Some(cell) = f.buffer_mut().cell_mut((sx + i, sy)) {
                    cell.set_char('┼').set_fg(colors.yellow);
                }
            }
        }
    }

    Some(geometry)
}

fn draw_colorbar(
    f: &mut Frame<'_>,
    inner: Rect,
    heatmap_area: Rect,
    view: &PlotView<'_>,
    config: &HeatmapLayoutConfig,
) {
    let colors = view.colors;
    let limit = inner.x + inner.width;
    let colorbar_width = config
        .colorbar_width
        .min((inner.width as usize).saturating_sub(20));
    if colorbar_width == 0 {
        return;
    }
    let start = heatmap_area.x + (heatmap_area.width as usize).saturating_sub(colorbar_width) as u16 / 2;

    for i in 0..colorbar_width {
        let x = start + i as u16;
        if x >= limit {
            break;
        }
        if let Some(cell) = f.buffer_mut().cell_mut((x, inner.y)) {
            cell.set_char('█').set_fg(view.scale.ramp(i, colorbar_width));
        }
    }

    let (min_val, max_val) = view.scale.bounds();
    let min_label = format_axis_label(min_val);
    let min_x = start.saturating_sub(min_label.width() as u16 + 1);
    put_str(f, min_x, inner.y, &min_label, limit, colors.green);

    let max_label = format_axis_label(max_val);
    put_str(f, start + colorbar_width as u16 + 1, inner.y, &max_label, limit, colors.green);

    if let Some(units) = view.var.units() {
        let unit_label = format!("[{}]", units);
        let unit_x = (inner.x + inner.width / 2).saturating_sub(unit_label.width() as u16 / 2);
        put_str(f, unit_x, inner.y, &unit_label, limit, colors.aqua);
    }
}

/// Draw a 1-D slice as a line chart.
fn draw_line(
    f: &mut Frame<'_>,
    inner: Rect,
    values: &Array1<f64>,
    label: &str,
    view: &PlotView<'_>,
    config: &PlotLayoutConfig,
) -> Option<LineGeometry> {
    let colors = view.colors;
    let series: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| (i as f64, v))
        .collect();

    if series.is_empty() {
        let para = Paragraph::new("No valid data to display")
            .style(Style::default().fg(colors.gray))
            .alignment(Alignment::Center);
        f.render_widget(para, inner);
        return None;
    }

    let (min_val, max_val) =
        crate::data::finite_min_max(series.iter().map(|&(_, v)| v)).unwrap_or((0.0, 1.0));
    let padding = match (max_val - min_val).abs() * config.y_axis_padding_factor {
        p if p > 0.0 => p,
        _ => 1.0,
    };
    let (y_min, y_max) = (min_val - padding, max_val + padding);
    let x_max = (values.len().saturating_sub(1)).max(1) as f64;

    let x_label = |i: usize| {
        view.var
            .coordinate(0)
            .map(|c| c.label(i))
            .unwrap_or_else(|| i.to_string())
    };
    let last = values.len() - 1;
    let x_labels = vec![x_label(0), x_label(last / 2), x_label(last)];
    let y_labels = vec![
        format_axis_label(y_min),
        format_axis_label((y_min + y_max) / 2.0),
        format_axis_label(y_max),
    ];

    let y_label_width = y_labels.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    let first_x_width = x_labels[0].width() as u16;
    let geometry = LineGeometry::compute(
        inner,
        y_label_width.max(first_x_width.saturating_sub(1)),
        values.len(),
        config,
    );

    let mut datasets = vec![Dataset::default()
        .name(label.to_string())
        .marker(ratatui::symbols::Marker::Braille)
        .graph_type(if series.len() == 1 {
            GraphType::Scatter
        } else {
            GraphType::Line
        })
        .style(Style::default().fg(view.scale.palette().color(0.6)))
        .data(&series)];

    let cursor: Vec<(f64, f64)> = view
        .hover
        .map(|r| vec![(r.x as f64, y_min), (r.x as f64, y_max)])
        .unwrap_or_default();
    if !cursor.is_empty() {
        datasets.push(
            Dataset::default()
                .graph_type(GraphType::Line)
                .style(Style::default().fg(colors.yellow))
                .data(&cursor),
        );
    }

    let x_axis = Axis::default()
        .style(Style::default().fg(colors.fg0))
        .bounds([0.0, x_max])
        .labels(x_labels);
    let y_axis = Axis::default()
        .style(Style::default().fg(colors.fg0))
        .bounds([y_min, y_max])
        .labels(y_labels);

    let chart = Chart::new(datasets)
        .x_axis(x_axis)
        .y_axis(y_axis)
        .legend_position(None);
    f.render_widget(chart, inner);

    Some(geometry)
}

fn draw_error(f: &mut Frame<'_>, area: Rect, error: &str, colors: &ThemeColors) {
    let lines = vec![
        Line::from(Span::styled(
            "Error Loading Variable",
            Style::default()
                .fg(colors.red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(error.to_string(), Style::default().fg(colors.fg0))),
    ];

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(colors.fg0))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

/// Write `text` starting at `(x, y)`, stopping before column `limit`.
fn put_str(f: &mut Frame<'_>, x: u16, y: u16, text: &str, limit: u16, color: ratatui::style::Color) {
    for (i, ch) in text.chars().enumerate() {
        let cx = x + i as u16;
        if cx >= limit {
            break;
        }
        if let Some(cell) = f.buffer_mut().cell_mut((cx, y)) {
            cell.set_char(ch).set_fg(color);
        }
    }
}
