//! Keymap help bar UI component.

use crate::app::Focus;
use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the keymap help bar.
pub fn draw_keymap(
    f: &mut Frame<'_>,
    area: Rect,
    focus: Focus,
    menu_open: bool,
    colors: &ThemeColors,
) {
    let keymap_text = if menu_open {
        "jk/↑↓:nav | Enter:select | Esc:close | q:quit"
    } else {
        match focus {
            Focus::Groups => "Tab:focus | hl/←→:group | Enter:open | y/x:rotate | []:step | c:palette | T:theme | q:quit",
            Focus::DisplayButtons => "Tab:focus | hl/←→:slot | Enter:rotate | y/x:rotate | c:palette | T:theme | q:quit",
            Focus::Controls => "Tab:focus | jk/↑↓:dim | Enter/]:next | [:prev | y/x:rotate | c:palette | q:quit",
            Focus::Info => "Tab:focus | jk/↑↓:scroll | ^d/^u:page | c:palette | T:theme | q:quit",
        }
    };

    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.fg1).bg(colors.bg0));

    f.render_widget(paragraph, area);
}
