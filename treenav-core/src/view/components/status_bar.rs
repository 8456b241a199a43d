//! src/view/components/status_bar.rs
//! ============================================================================
//! # StatusBar: Persistent Status/Info/Error Display
//!
//! - Renders the current notification or a ready hint at the bottom of the UI
//! - Shows position plus metadata of the selected entry on the right

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::fs::entry::EntryKind;
use crate::fs::store::HierarchyStore;
use crate::model::navigator::Navigator;
use crate::model::ui_state::{NotificationLevel, UIState};
use crate::view::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render<S: HierarchyStore>(
        frame: &mut Frame<'_>,
        nav: &Navigator<S>,
        ui: &UIState,
        area: Rect,
    ) {
        let (msg, style) = match &ui.notification {
            Some(n) => match n.level {
                NotificationLevel::Error => (
                    format!("Error: {}", n.message),
                    Style::default().fg(theme::RED).bold(),
                ),
                NotificationLevel::Success => {
                    (n.message.clone(), Style::default().fg(theme::GREEN))
                }
                NotificationLevel::Info => (n.message.clone(), Style::default().fg(theme::GREEN)),
            },
            None => ("Ready".to_string(), Style::default().fg(theme::COMMENT)),
        };

        let right_text = match nav.selected() {
            Some(node) => {
                let position = format!("{}/{}", nav.cursor_index() + 1, nav.rows().len());
                match node.entry.kind {
                    EntryKind::File => format!(
                        "{position}  {}  {} ",
                        node.entry.size_human(),
                        node.entry.modified.format("%Y-%m-%d %H:%M")
                    ),
                    EntryKind::Folder => format!("{position} "),
                }
            }
            None => "0 entries ".to_string(),
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let left_para = Paragraph::new(Line::from(Span::styled(format!(" {msg}"), style)))
            .alignment(Alignment::Left);

        let right_para = Paragraph::new(Line::from(Span::styled(
            right_text,
            Style::default().fg(theme::PURPLE),
        )))
        .alignment(Alignment::Right);

        frame.render_widget(left_para, chunks[0]);
        frame.render_widget(right_para, chunks[1]);
    }
}
