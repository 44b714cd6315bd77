//! Clickable controls: group bar, variable dropdown, display buttons and
//! dimension control rows.

use crate::app::{Action, App, Focus, HitRegion};
use crate::catalog::VariableCatalog;
use crate::navigation::AxisSlot;
use crate::ui::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Builds a line left to right while recording where each button lands.
struct LineBuilder<'a> {
    origin: Rect,
    x: u16,
    spans: Vec<Span<'static>>,
    regions: &'a mut Vec<HitRegion>,
}

impl<'a> LineBuilder<'a> {
    fn new(x: u16, y: u16, width: u16, regions: &'a mut Vec<HitRegion>) -> Self {
        Self {
            origin: Rect::new(x, y, width, 1),
            x,
            spans: Vec::new(),
            regions,
        }
    }

    fn text(&mut self, text: String, style: Style) {
        self.x = self.x.saturating_add(text.width() as u16);
        self.spans.push(Span::styled(text, style));
    }

    fn button(&mut self, text: String, style: Style, action: Action) {
        let width = text.width() as u16;
        let right = self.origin.x + self.origin.width;
        if self.x < right {
            self.regions.push(HitRegion {
                area: Rect::new(self.x, self.origin.y, width.min(right - self.x), 1),
                action,
            });
        }
        self.text(text, style);
    }

    fn finish(self) -> Line<'static> {
        Line::from(self.spans)
    }
}

fn button_style(colors: &ThemeColors, highlighted: bool) -> Style {
    if highlighted {
        Style::default()
            .fg(colors.bg0)
            .bg(colors.yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.fg0).bg(colors.bg2)
    }
}

/// Draw one button per variable rank.
pub fn draw_group_bar(f: &mut Frame<'_>, area: Rect, app: &mut App, colors: &ThemeColors) {
    let focused = app.focus == Focus::Groups;
    let mut regions = Vec::new();
    let mut line = LineBuilder::new(area.x, area.y, area.width, &mut regions);

    if app.catalog.is_empty() {
        line.text(
            " No variables in dataset".to_string(),
            Style::default().fg(colors.gray),
        );
    }
    for (i, ndims) in app.catalog.dimensionalities().into_iter().enumerate() {
        line.text(" ".to_string(), Style::default());
        let highlighted = focused && app.group_cursor == i;
        line.button(
            format!(" {} ▾ ", VariableCatalog::group_label(ndims)),
            button_style(colors, highlighted),
            Action::OpenGroup(i),
        );
    }

    let paragraph = Paragraph::new(line.finish()).style(Style::default().bg(colors.bg1));
    f.render_widget(paragraph, area);
    app.hit_regions.extend(regions);
}

/// Draw the dropdown of the open group below its button.
pub fn draw_group_menu(f: &mut Frame<'_>, bar: Rect, app: &mut App, colors: &ThemeColors) {
    let Some(menu) = app.menu.clone() else {
        return;
    };
    let names = app.catalog.variables(menu.ndims).to_vec();
    if names.is_empty() {
        return;
    }

    // Anchor under the button that opened the menu.
    let anchor_x = app
        .hit_regions
        .iter()
        .find(|r| r.action == Action::OpenGroup(app.group_cursor))
        .map(|r| r.area.x)
        .unwrap_or(bar.x);

    let screen = f.area();
    let width = (names.iter().map(|n| n.width()).max().unwrap_or(0) as u16 + 4)
        .max(16)
        .min(screen.width.saturating_sub(anchor_x));
    let height = (names.len() as u16 + 2).min(screen.height.saturating_sub(bar.y + 1));
    if width < 3 || height < 3 {
        return;
    }
    let area = Rect::new(anchor_x, bar.y + 1, width, height);

    let items: Vec<ListItem<'_>> = names
        .iter()
        .map(|n| ListItem::new(n.as_str()).style(Style::default().fg(colors.fg0)))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" {} ", VariableCatalog::group_label(menu.ndims)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.yellow))
                .style(Style::default().bg(colors.bg1)),
        )
        .highlight_style(button_style(colors, true))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(menu.cursor));
    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);

    let visible = (height - 2) as usize;
    let offset = state.offset();
    for (row, name) in names.iter().enumerate().skip(offset).take(visible) {
        app.hit_regions.push(HitRegion {
            area: Rect::new(area.x + 1, area.y + 1 + (row - offset) as u16, width - 2, 1),
            action: Action::SelectVariable(name.clone()),
        });
    }
}

/// Draw the display-axis buttons and one control row per dimension.
pub fn draw_dimension_controls(f: &mut Frame<'_>, area: Rect, app: &mut App, colors: &ThemeColors) {
    let focused = matches!(app.focus, Focus::DisplayButtons | Focus::Controls);
    let block = Block::default()
        .title(" Dimensions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { colors.yellow } else { colors.bg2 }))
        .style(Style::default().bg(colors.bg0));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = app.viewer.control_rows();
    if rows.is_empty() {
        let message = match &app.viewer.variable {
            Some(var) => format!("{} is a scalar", var.name),
            None => "No variable selected".to_string(),
        };
        let para = Paragraph::new(Span::styled(message, Style::default().fg(colors.gray)));
        f.render_widget(para, inner);
        return;
    }

    let mut regions = Vec::new();
    let mut lines = Vec::new();
    let mut y = inner.y;

    if let Some(buttons) = app.viewer.display_buttons() {
        let mut line = LineBuilder::new(inner.x, y, inner.width, &mut regions);
        for (slot, name) in AxisSlot::ALL.into_iter().zip(buttons) {
            let highlighted = app.focus == Focus::DisplayButtons && app.slot_cursor == slot;
            line.text(
                format!("{}: ", slot.name()),
                Style::default().fg(colors.green),
            );
            line.button(
                format!(" {} ⟳ ", name),
                button_style(colors, highlighted),
                Action::RotateAxis(slot),
            );
            line.text("  ".to_string(), Style::default());
        }
        lines.push(line.finish());
        lines.push(Line::from(""));
        y += 2;
    }

    let name_w = rows.iter().map(|r| r.name.width()).max().unwrap_or(0);
    let first_w = rows.iter().map(|r| r.first.width()).max().unwrap_or(0);
    let current_w = rows
        .iter()
        .map(|r| r.current_or_blank().width())
        .max()
        .unwrap_or(0);

    for row in &rows {
        if y >= inner.y + inner.height {
            break;
        }
        let mut line = LineBuilder::new(inner.x, y, inner.width, &mut regions);
        line.text(
            format!("{:<w$} ", row.name, w = name_w),
            Style::default().fg(colors.aqua),
        );
        line.text(
            format!("{:>w$} ", row.first, w = first_w),
            Style::default().fg(colors.fg1),
        );
        let label = format!(" {:^w$} ", row.current_or_blank(), w = current_w);
        if row.is_fixed {
            let highlighted = app.focus == Focus::Controls && app.control_cursor == row.dim;
            line.button(label, button_style(colors, highlighted), Action::StepIndex(row.dim));
        } else {
            line.text(label, Style::default());
        }
        line.text(format!(" {}", row.last), Style::default().fg(colors.fg1));
        lines.push(line.finish());
        y += 1;
    }

    f.render_widget(Paragraph::new(lines), inner);
    app.hit_regions.extend(regions);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Theme;
    use crate::data::{MemorySource, Variable};
    use crate::viewer::ColorPalette;
    use ndarray::{ArrayD, IxDyn};
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let cube = ArrayD::from_shape_fn(IxDyn(&[3, 4, 5]), |idx| idx[0] as f64);
        let source = MemorySource::new().with_variable(
            Variable::with_positional_coords("temp", &["time", "lat", "lon"], cube).unwrap(),
        );
        App::with_source(Box::new(source), "mem", ColorPalette::Viridis, Theme::GruvboxDark)
            .unwrap()
    }

    #[test]
    fn controls_register_their_own_actions() {
        let mut app = app();
        app.select_variable("temp");
        let colors = ThemeColors::from_theme(&app.theme);
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|f| draw_dimension_controls(f, f.area(), &mut app, &colors))
            .unwrap();

        let actions: Vec<Action> = app.hit_regions.iter().map(|r| r.action.clone()).collect();
        assert_eq!(
            actions,
            vec![
                Action::RotateAxis(AxisSlot::Row),
                Action::RotateAxis(AxisSlot::Col),
                Action::StepIndex(0),
            ]
        );

        // Clicking the recorded step button advances time.
        let step = app.hit_regions[2].area;
        app.click(step.x, step.y);
        assert_eq!(app.viewer.navigation.as_ref().unwrap().fixed_index(0), Some(1));
    }

    #[test]
    fn scalar_variable_is_named_in_panel() {
        let source = MemorySource::new().with_variable(
            Variable::with_positional_coords("offset", &[], ArrayD::from_elem(IxDyn(&[]), 2.5))
                .unwrap(),
        );
        let mut app =
            App::with_source(Box::new(source), "mem", ColorPalette::Viridis, Theme::GruvboxDark)
                .unwrap();
        app.select_variable("offset");
        let colors = ThemeColors::from_theme(&app.theme);
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        terminal
            .draw(|f| draw_dimension_controls(f, f.area(), &mut app, &colors))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("offset is a scalar"));
        assert!(!text.contains("No variable selected"));
        assert!(app.hit_regions.is_empty());
    }

    #[test]
    fn menu_lists_group_variables() {
        let mut app = app();
        app.open_group(0);
        let colors = ThemeColors::from_theme(&app.theme);
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|f| {
                let bar = Rect::new(0, 0, f.area().width, 1);
                draw_group_bar(f, bar, &mut app, &colors);
                draw_group_menu(f, bar, &mut app, &colors);
            })
            .unwrap();

        let item = app
            .hit_regions
            .iter()
            .find(|r| r.action == Action::SelectVariable("temp".into()))
            .map(|r| r.area)
            .unwrap();
        app.click(item.x, item.y);
        assert_eq!(app.viewer.variable.as_ref().unwrap().name, "temp");
        assert!(app.menu.is_none());
    }
}
