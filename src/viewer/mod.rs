//! Viewer feature - the displayed variable and its navigation.
//!
//! [`ViewerState`] owns the active variable and its [`NavigationState`],
//! forwards rotate/step commands to it, and answers the renderer's questions
//! (current slice, control rows, hover readout) from the latest state.

pub mod color_scale;
pub mod details;
pub mod layout;
pub mod ui;

use crate::data::Variable;
use crate::navigation::{
    hover_readout, AxisSlot, ControlRow, HoverReadout, NavigationState, RenderableSlice,
};
use layout::PlotLayout;

pub use crate::util::ColorPalette;

/// State for the viewer panel.
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    /// Currently displayed variable.
    pub variable: Option<Variable>,
    /// Navigation state of `variable`.
    pub navigation: Option<NavigationState>,
    /// Color palette for heatmaps.
    pub color_palette: ColorPalette,
    /// Readout for the last pointer position over the plot.
    pub hover: Option<HoverReadout>,
    /// Geometry of the last drawn plot.
    pub layout: Option<PlotLayout>,
    /// Error message if loading failed.
    pub error: Option<String>,
    /// Scroll offset of the info pane.
    pub info_scroll: u16,
}

impl ViewerState {
    /// Create an empty viewer.
    pub fn new(color_palette: ColorPalette) -> Self {
        Self {
            color_palette,
            ..Self::default()
        }
    }

    /// Replace the displayed variable; the previous navigation is discarded.
    pub fn load_variable(&mut self, var: Variable) {
        tracing::info!(name = %var.name, shape = ?var.shape, "Displaying variable");
        self.navigation = Some(NavigationState::for_variable(&var));
        self.variable = Some(var);
        self.hover = None;
        self.layout = None;
        self.error = None;
        self.info_scroll = 0;
    }

    /// Show a load error instead of a variable.
    pub fn set_error(&mut self, error: String) {
        tracing::warn!(%error, "Variable load failed");
        self.error = Some(error);
        self.variable = None;
        self.navigation = None;
        self.hover = None;
        self.layout = None;
    }

    /// Variable and navigation together, when a variable is shown.
    pub fn active(&self) -> Option<(&Variable, &NavigationState)> {
        self.variable.as_ref().zip(self.navigation.as_ref())
    }

    /// Whether the shown variable has display axes to rotate.
    pub fn is_multidim(&self) -> bool {
        self.navigation
            .as_ref()
            .is_some_and(NavigationState::is_multidim)
    }

    /// Slice for the current selection, computed fresh.
    pub fn slice(&self) -> Option<RenderableSlice> {
        self.active().map(|(var, nav)| nav.current_slice(var))
    }

    /// Control rows for the current selection.
    pub fn control_rows(&self) -> Vec<ControlRow> {
        self.active()
            .map(|(var, nav)| nav.control_rows(var))
            .unwrap_or_default()
    }

    /// Display-axis button labels, row first.
    pub fn display_buttons(&self) -> Option<[String; 2]> {
        self.active().and_then(|(var, nav)| nav.display_buttons(var))
    }

    /// Rotate the dimension shown in `slot`.
    pub fn rotate(&mut self, slot: AxisSlot) {
        if let Some(nav) = self.navigation.as_mut() {
            nav.rotate_display_axis(slot);
            self.hover = None;
        }
    }

    /// Step a fixed dimension forward.
    pub fn step(&mut self, dim: usize) {
        if let Some(nav) = self.navigation.as_mut() {
            nav.step_fixed_index(dim);
            self.hover = None;
        }
    }

    /// Step a fixed dimension backward.
    pub fn step_back(&mut self, dim: usize) {
        if let Some(nav) = self.navigation.as_mut() {
            nav.step_fixed_index_back(dim);
            self.hover = None;
        }
    }

    /// Update the readout for a pointer at a screen cell.
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        match self.layout.and_then(|l| l.to_data(column, row)) {
            Some((x, y)) => self.hover_at(x, y),
            None => self.hover = None,
        }
    }

    /// Update the readout for a pointer at data coordinates.
    pub fn hover_at(&mut self, data_x: f64, data_y: f64) {
        self.hover = self
            .active()
            .and_then(|(var, nav)| hover_readout(&nav.current_slice(var), &var.name, data_x, data_y));
    }

    /// Cycle to next color palette.
    pub fn cycle_color_palette(&mut self) {
        self.color_palette = self.color_palette.next();
    }

    /// Scroll the info pane up.
    pub fn scroll_info_up(&mut self, amount: u16) {
        self.info_scroll = self.info_scroll.saturating_sub(amount);
    }

    /// Scroll the info pane down.
    pub fn scroll_info_down(&mut self, amount: u16) {
        self.info_scroll = self.info_scroll.saturating_add(amount);
    }
}
