//! Application state and logic.

use std::fmt;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Position, Rect};

use crate::catalog::VariableCatalog;
use crate::data::{DataSource, NetcdfSource};
use crate::error::Result;
use crate::navigation::AxisSlot;
use crate::viewer::{ColorPalette, ViewerState};

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Theme {
    /// Gruvbox dark theme.
    #[default]
    #[value(name = "dark")]
    GruvboxDark,
    /// Gruvbox light theme.
    #[value(name = "light")]
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// Panel receiving keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Dimensionality group buttons (and their dropdown).
    Groups,
    /// Row/column display-axis buttons.
    DisplayButtons,
    /// Per-dimension control rows.
    Controls,
    /// Variable info pane.
    Info,
}

/// Open dropdown listing the variables of one rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    /// Rank whose variables are listed.
    pub ndims: usize,
    /// Highlighted entry.
    pub cursor: usize,
}

/// What a clickable control does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open the dropdown of the n-th group button.
    OpenGroup(usize),
    /// Load and display a variable.
    SelectVariable(String),
    /// Rotate the dimension shown in a slot.
    RotateAxis(AxisSlot),
    /// Step a fixed dimension forward.
    StepIndex(usize),
}

/// Screen area of a control, recorded while drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRegion {
    /// Area covered by the control.
    pub area: Rect,
    /// Action bound to the control.
    pub action: Action,
}

impl HitRegion {
    fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains(Position::new(column, row))
    }
}

/// Application state.
pub struct App {
    /// Label of the opened dataset, shown in the header.
    pub file_label: String,
    source: Box<dyn DataSource>,
    /// Variables grouped by rank.
    pub catalog: VariableCatalog,
    /// Displayed variable and its navigation.
    pub viewer: ViewerState,
    /// Focused panel.
    pub focus: Focus,
    /// Highlighted group button.
    pub group_cursor: usize,
    /// Open dropdown, if any.
    pub menu: Option<MenuState>,
    /// Highlighted display-axis button.
    pub slot_cursor: AxisSlot,
    /// Highlighted control row (a dimension index).
    pub control_cursor: usize,
    /// Status message.
    pub status: String,
    /// Current theme.
    pub theme: Theme,
    /// Clickable controls from the last frame, topmost last.
    pub hit_regions: Vec<HitRegion>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("file_label", &self.file_label)
            .field("catalog", &self.catalog)
            .field("focus", &self.focus)
            .field("menu", &self.menu)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Open a netCDF file and build the catalog.
    pub fn open(path: &Path, palette: ColorPalette, theme: Theme) -> Result<Self> {
        let source = NetcdfSource::open(path)?;
        Self::with_source(Box::new(source), path.display().to_string(), palette, theme)
    }

    /// Build the application around any data source.
    pub fn with_source(
        source: Box<dyn DataSource>,
        file_label: impl Into<String>,
        palette: ColorPalette,
        theme: Theme,
    ) -> Result<Self> {
        let catalog = VariableCatalog::from_source(source.as_ref())?;
        let status = if catalog.is_empty() {
            "Dataset has no variables".to_string()
        } else {
            format!(
                "{} variables in {} groups",
                catalog.len(),
                catalog.dimensionalities().len()
            )
        };
        tracing::info!(variables = catalog.len(), "Catalog built");

        Ok(Self {
            file_label: file_label.into(),
            source,
            catalog,
            viewer: ViewerState::new(palette),
            focus: Focus::Groups,
            group_cursor: 0,
            menu: None,
            slot_cursor: AxisSlot::Row,
            control_cursor: 0,
            status,
            theme,
            hit_regions: Vec::new(),
        })
    }

    /// Load `name` and make it the displayed variable.
    pub fn select_variable(&mut self, name: &str) {
        self.menu = None;
        match self.source.load(name) {
            Ok(var) => {
                self.viewer.load_variable(var);
                self.slot_cursor = AxisSlot::Row;
                self.control_cursor = self.first_fixed_dim().unwrap_or(0);
                self.status = format!("Loaded {}", name);
            },
            Err(e) => {
                self.status = format!("Failed to load {}", name);
                self.viewer.set_error(e.to_string());
            },
        }
    }

    /// Run the action bound to a control.
    pub fn activate(&mut self, action: Action) {
        match action {
            Action::OpenGroup(index) => self.open_group(index),
            Action::SelectVariable(name) => self.select_variable(&name),
            Action::RotateAxis(slot) => self.rotate(slot),
            Action::StepIndex(dim) => self.step(dim),
        }
    }

    /// Handle a mouse click at a screen cell.
    pub fn click(&mut self, column: u16, row: u16) {
        let hit = self
            .hit_regions
            .iter()
            .rev()
            .find(|r| r.contains(column, row))
            .map(|r| r.action.clone());

        match hit {
            Some(action) => self.activate(action),
            None => self.menu = None,
        }
    }

    /// Handle pointer movement for the hover readout.
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        self.viewer.pointer_moved(column, row);
    }

    /// Open the dropdown for the n-th group button.
    pub fn open_group(&mut self, index: usize) {
        let Some(&ndims) = self.catalog.dimensionalities().get(index) else {
            return;
        };
        self.group_cursor = index;
        self.focus = Focus::Groups;
        self.menu = Some(MenuState { ndims, cursor: 0 });
    }

    /// Rotate the display axis in `slot` when the variable has one.
    pub fn rotate(&mut self, slot: AxisSlot) {
        if !self.viewer.is_multidim() {
            self.status = "Variable has no display axes".to_string();
            return;
        }
        self.viewer.rotate(slot);
        self.slot_cursor = slot;
        self.control_cursor = self.first_fixed_dim().unwrap_or(0);
        if let Some(buttons) = self.viewer.display_buttons() {
            self.status = format!("Y: {}  X: {}", buttons[0], buttons[1]);
        }
    }

    /// Step a fixed dimension forward.
    pub fn step(&mut self, dim: usize) {
        if self.is_fixed(dim) {
            self.viewer.step(dim);
            self.control_cursor = dim;
        }
    }

    /// Step a fixed dimension backward.
    pub fn step_back(&mut self, dim: usize) {
        if self.is_fixed(dim) {
            self.viewer.step_back(dim);
            self.control_cursor = dim;
        }
    }

    /// Move focus to the next panel that has something to interact with.
    pub fn next_focus(&mut self) {
        self.menu = None;
        let order = [
            Focus::Groups,
            Focus::DisplayButtons,
            Focus::Controls,
            Focus::Info,
        ];
        let start = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        for offset in 1..=order.len() {
            let candidate = order[(start + offset) % order.len()];
            if self.can_focus(candidate) {
                self.focus = candidate;
                return;
            }
        }
    }

    /// Cycle the heatmap palette.
    pub fn cycle_color_palette(&mut self) {
        self.viewer.cycle_color_palette();
        self.status = format!("Palette: {}", self.viewer.color_palette.name());
    }

    /// Cycle the UI theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }

    /// Handle a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.menu.is_some() {
            match key.code {
                KeyCode::Esc => self.menu = None,
                KeyCode::Up | KeyCode::Char('k') => self.menu_move(-1),
                KeyCode::Down | KeyCode::Char('j') => self.menu_move(1),
                KeyCode::Enter => self.menu_select(),
                KeyCode::Char('q') => return true,
                _ => {},
            }
            return false;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return true,
            (KeyModifiers::NONE, KeyCode::Tab) => self.next_focus(),

            (KeyModifiers::NONE, KeyCode::Left) | (KeyModifiers::NONE, KeyCode::Char('h')) => {
                self.cursor_horizontal(-1)
            },
            (KeyModifiers::NONE, KeyCode::Right) | (KeyModifiers::NONE, KeyCode::Char('l')) => {
                self.cursor_horizontal(1)
            },
            (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
                self.cursor_vertical(-1)
            },
            (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
                self.cursor_vertical(1)
            },

            (KeyModifiers::NONE, KeyCode::Enter) => match self.focus {
                Focus::Groups => self.open_group(self.group_cursor),
                Focus::DisplayButtons => self.rotate(self.slot_cursor),
                Focus::Controls => self.step(self.control_cursor),
                Focus::Info => {},
            },
            (KeyModifiers::NONE, KeyCode::Char(']')) => self.step(self.control_cursor),
            (KeyModifiers::NONE, KeyCode::Char('[')) => self.step_back(self.control_cursor),

            (KeyModifiers::NONE, KeyCode::Char('y')) => self.rotate(AxisSlot::Row),
            (KeyModifiers::NONE, KeyCode::Char('x')) => self.rotate(AxisSlot::Col),

            (KeyModifiers::NONE, KeyCode::Char('c')) => self.cycle_color_palette(),
            (KeyModifiers::SHIFT, KeyCode::Char('T')) | (KeyModifiers::NONE, KeyCode::Char('T')) => {
                self.cycle_theme()
            },

            (KeyModifiers::CONTROL, KeyCode::Char('d')) => self.viewer.scroll_info_down(10),
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => self.viewer.scroll_info_up(10),

            _ => {},
        }
        false
    }

    fn can_focus(&self, focus: Focus) -> bool {
        match focus {
            Focus::Groups => !self.catalog.is_empty(),
            Focus::DisplayButtons => self.viewer.is_multidim(),
            Focus::Controls => self.first_fixed_dim().is_some(),
            Focus::Info => self.viewer.variable.is_some(),
        }
    }

    fn is_fixed(&self, dim: usize) -> bool {
        self.viewer
            .navigation
            .as_ref()
            .is_some_and(|nav| dim < nav.ndims() && nav.is_fixed(dim))
    }

    fn fixed_dims(&self) -> Vec<usize> {
        self.viewer
            .navigation
            .as_ref()
            .map(|nav| nav.fixed_dims().map(|(d, _)| d).collect())
            .unwrap_or_default()
    }

    fn first_fixed_dim(&self) -> Option<usize> {
        self.fixed_dims().first().copied()
    }

    fn cursor_horizontal(&mut self, delta: isize) {
        match self.focus {
            Focus::Groups => {
                let n = self.catalog.dimensionalities().len();
                if n > 0 {
                    self.group_cursor = wrap(self.group_cursor, delta, n);
                }
            },
            Focus::DisplayButtons => self.slot_cursor = self.slot_cursor.other(),
            Focus::Controls | Focus::Info => {},
        }
    }

    fn cursor_vertical(&mut self, delta: isize) {
        match self.focus {
            Focus::Controls => {
                let fixed = self.fixed_dims();
                if fixed.is_empty() {
                    return;
                }
                let pos = fixed
                    .iter()
                    .position(|&d| d == self.control_cursor)
                    .unwrap_or(0);
                self.control_cursor = fixed[wrap(pos, delta, fixed.len())];
            },
            Focus::Info if delta < 0 => self.viewer.scroll_info_up(1),
            Focus::Info => self.viewer.scroll_info_down(1),
            Focus::Groups | Focus::DisplayButtons => {},
        }
    }

    fn menu_move(&mut self, delta: isize) {
        let Some(menu) = self.menu.as_mut() else {
            return;
        };
        let n = self.catalog.variables(menu.ndims).len();
        if n > 0 {
            menu.cursor = wrap(menu.cursor, delta, n);
        }
    }

    fn menu_select(&mut self) {
        let name = self
            .menu
            .as_ref()
            .and_then(|m| self.catalog.variables(m.ndims).get(m.cursor).cloned());
        match name {
            Some(name) => self.select_variable(&name),
            None => self.menu = None,
        }
    }
}

fn wrap(index: usize, delta: isize, len: usize) -> usize {
    (index as isize + delta).rem_euclid(len as isize) as usize
}
