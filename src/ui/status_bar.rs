//! Status bar UI component.

use crate::ui::ThemeColors;
use crate::viewer::ViewerState;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Draw the status bar: message on the left, palette and hover on the right.
pub fn draw_status(
    f: &mut Frame<'_>,
    area: Rect,
    status: &str,
    viewer: &ViewerState,
    colors: &ThemeColors,
) {
    let right = match &viewer.hover {
        Some(readout) => format!("{} | {} ", readout, viewer.color_palette.name()),
        None => format!("{} ", viewer.color_palette.name()),
    };

    let left = Span::styled(format!(" {}", status), Style::default().fg(colors.fg0));
    let paragraph = Paragraph::new(Line::from(left)).style(Style::default().bg(colors.bg1));
    f.render_widget(paragraph, area);

    let right = Line::from(Span::styled(right, Style::default().fg(colors.aqua))).right_aligned();
    f.render_widget(Paragraph::new(right), area);
}
