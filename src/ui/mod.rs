//! User interface rendering.

mod controls;
pub mod formatters;
mod keymap_bar;
mod status_bar;
mod theme;

use crate::app::{App, Focus};
use crate::viewer::ui::{draw_info, draw_plot};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub use theme::ThemeColors;

/// Draw the UI and record the clickable regions of this frame.
pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    let colors = ThemeColors::from_theme(&app.theme);
    app.hit_regions.clear();

    f.render_widget(
        Block::default().style(Style::default().bg(colors.bg0)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Group bar
            Constraint::Min(5),    // Main
            Constraint::Length(1), // Status
            Constraint::Length(1), // Keymap
        ])
        .split(f.area());

    let header = Line::from(vec![
        Span::styled(
            " meridian ",
            Style::default()
                .fg(colors.bg0)
                .bg(colors.aqua)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", app.file_label),
            Style::default().fg(colors.fg0),
        ),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    controls::draw_group_bar(f, chunks[1], app, &colors);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[2]);

    let control_height = app.viewer.control_rows().len() as u16
        + if app.viewer.is_multidim() { 2 } else { 0 }
        + 2;
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(control_height.max(3)),
            Constraint::Min(3),
        ])
        .split(main[0]);

    controls::draw_dimension_controls(f, left[0], app, &colors);
    draw_info(f, left[1], &app.viewer, app.focus == Focus::Info, &colors);
    draw_plot(f, main[1], &mut app.viewer, &colors);

    status_bar::draw_status(f, chunks[3], &app.status, &app.viewer, &colors);
    keymap_bar::draw_keymap(f, chunks[4], app.focus, app.menu.is_some(), &colors);

    // Drawn last so it sits above the panels and wins hit tests.
    controls::draw_group_menu(f, chunks[1], app, &colors);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Theme;
    use crate::data::{MemorySource, Variable};
    use crate::viewer::ColorPalette;
    use ndarray::{ArrayD, IxDyn};
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn full_frame_hovers_through_plot() {
        let cube = ArrayD::from_shape_fn(IxDyn(&[2, 6, 9]), |idx| {
            (idx[0] * 100 + idx[1] * 10 + idx[2]) as f64
        });
        let source = MemorySource::new().with_variable(
            Variable::with_positional_coords("temp", &["time", "lat", "lon"], cube).unwrap(),
        );
        let mut app =
            App::with_source(Box::new(source), "test.nc", ColorPalette::Viridis, Theme::GruvboxDark)
                .unwrap();
        app.select_variable("temp");

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let Some(crate::viewer::layout::PlotLayout::Heatmap(g)) = app.viewer.layout else {
            panic!("expected a heatmap");
        };
        let (sx, sy) = g.screen_cell(4, 7);
        app.pointer_moved(sx, sy);
        let readout = app.viewer.hover.clone().unwrap();
        assert_eq!((readout.x, readout.y, readout.value), (7, 4, 47.0));

        // Rotation clears the readout and the next frame redraws cleanly.
        app.rotate(crate::navigation::AxisSlot::Row);
        assert!(app.viewer.hover.is_none());
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        assert!(app
            .hit_regions
            .iter()
            .any(|r| r.action == crate::app::Action::StepIndex(1)));
    }
}
