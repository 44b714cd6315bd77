//! Info pane formatting for the displayed variable.

use crate::data::Variable;
use crate::ui::formatters::{format_number, format_stat_value};
use crate::ui::ThemeColors;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

/// Format variable details for the info pane.
pub fn format_variable_details(var: &Variable, colors: &ThemeColors) -> Vec<Line<'static>> {
    let mut title = vec![Span::styled(
        var.name.clone(),
        Style::default()
            .fg(colors.aqua)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(units) = var.units() {
        title.push(Span::styled(
            format!(" [{}]", units),
            Style::default().fg(colors.aqua),
        ));
    }

    let mut lines = vec![
        Line::from(title),
        Line::from(Span::styled("─".repeat(40), Style::default().fg(colors.bg2))),
    ];

    if let Some(long_name) = var.long_name() {
        lines.push(Line::from(Span::styled(
            long_name.to_string(),
            Style::default().fg(colors.fg0),
        )));
    }
    lines.push(Line::from(""));

    lines.push(section("Array Info", colors.aqua));
    if var.dims.is_empty() {
        lines.push(field("  Dimensions: ", "scalar".to_string(), colors));
    } else {
        let mut dim_spans = vec![Span::styled("  Dimensions: ", Style::default().fg(colors.fg1))];
        for (i, (name, size)) in var.dims.iter().zip(&var.shape).enumerate() {
            if i > 0 {
                dim_spans.push(Span::styled(" x ", Style::default().fg(colors.fg1)));
            }
            dim_spans.push(Span::styled(
                format!("{}={}", name, size),
                Style::default().fg(colors.aqua),
            ));
        }
        lines.push(Line::from(dim_spans));
    }
    lines.push(field("  Data type: ", var.dtype.clone(), colors));
    lines.push(field(
        "  Size: ",
        format!("{} elements", format_number(var.total_elements())),
        colors,
    ));
    lines.push(Line::from(""));

    if !var.coordinates.is_empty() {
        lines.push(section("Coordinates", colors.aqua));
        for coord in &var.coordinates {
            let range = if coord.is_empty() {
                "(empty)".to_string()
            } else {
                format!("{} → {}", coord.first_label(), coord.last_label())
            };
            let mut spans = vec![
                Span::styled(format!("  {}: ", coord.name), Style::default().fg(colors.aqua)),
                Span::styled(range, Style::default().fg(colors.fg0)),
            ];
            if let Some(units) = &coord.units {
                spans.push(Span::styled(
                    format!(" [{}]", units),
                    Style::default().fg(colors.fg1),
                ));
            }
            if coord.positional {
                spans.push(Span::styled(" (index)", Style::default().fg(colors.gray)));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
    }

    lines.push(section("Statistics", colors.green));
    match var.min_max() {
        Some((min_val, max_val)) => {
            lines.push(stat("  Min: ", min_val, colors));
            lines.push(stat("  Max: ", max_val, colors));
        },
        None => lines.push(Line::from(Span::styled(
            "  (no finite values)",
            Style::default().fg(colors.gray),
        ))),
    }
    lines.push(Line::from(""));

    if !var.attributes.is_empty() {
        lines.push(section("Attributes", colors.orange));
        for (key, value) in &var.attributes {
            lines.push(Line::from(vec![
                Span::styled(format!("  :{}", key), Style::default().fg(colors.orange)),
                Span::styled(" = ", Style::default().fg(colors.fg1)),
                Span::styled(value.clone(), Style::default().fg(colors.fg0)),
            ]));
        }
    }

    lines
}

fn section(title: &'static str, color: ratatui::style::Color) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn field(label: &'static str, value: String, colors: &ThemeColors) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(colors.fg1)),
        Span::styled(value, Style::default().fg(colors.fg0)),
    ])
}

fn stat(label: &'static str, value: f64, colors: &ThemeColors) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(colors.fg1)),
        Span::styled(format_stat_value(value), Style::default().fg(colors.green)),
    ])
}
