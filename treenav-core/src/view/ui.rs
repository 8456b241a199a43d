//! src/view/ui.rs
//! ============================================================================
//! # View: TUI Render Orchestrator
//!
//! Each draw cycle refreshes the tree list, status bar, and overlays. The
//! render also records the tree area and syncs the list selection so mouse
//! hit-testing and scrolling stay consistent with what is on screen.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::model::app_state::AppState;
use crate::model::ui_state::UIOverlay;
use crate::view::components::help_overlay::HelpOverlay;
use crate::view::components::status_bar::StatusBar;
use crate::view::components::tree_list::TreeList;

pub struct View;

impl View {
    /// Draws the full UI for one frame; to be called in the
    /// `terminal.draw(|frame| ...)` callback.
    pub fn redraw(frame: &mut Frame<'_>, app: &mut AppState) {
        let full: Rect = frame.area();
        let chunks: Vec<Rect> = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(2), Constraint::Length(1)])
            .split(full)
            .to_vec();

        let AppState { nav, ui, .. } = app;

        ui.tree_area = Some(chunks[0]);
        if nav.rows().is_empty() {
            ui.list_state.select(None);
        } else {
            ui.list_state.select(Some(nav.cursor_index()));
        }

        let title = nav.root_path().display().to_string();
        TreeList::render(frame, nav.rows(), &mut ui.list_state, &title, chunks[0]);

        StatusBar::render(frame, nav, ui, chunks[1]);

        if ui.overlay == UIOverlay::Help {
            HelpOverlay::render(frame, full);
        }
    }
}
