//! src/view/components/tree_list.rs
//! ============================================================================
//! # TreeList: Indentation-Rendered Flattened Hierarchy
//!
//! Renders the projected display sequence as a selectable list. Depth becomes
//! indentation, folders get an expand marker, and the stateful list widget
//! keeps the selection scrolled into view. Takes plain data instead of the
//! whole app state so the modal prompt backdrop can reuse it.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::fs::entry::EntryKind;
use crate::model::projector::DisplayNode;
use crate::view::theme;

pub struct TreeList;

impl TreeList {
    pub fn render(
        frame: &mut Frame<'_>,
        rows: &[DisplayNode],
        list_state: &mut ListState,
        title: &str,
        area: Rect,
    ) {
        let items: Vec<ListItem<'_>> = rows
            .iter()
            .map(|node| {
                let indent = "  ".repeat(node.depth);
                let (marker, style) = match node.entry.kind {
                    EntryKind::Folder => (
                        if node.expanded { "▾ " } else { "▸ " },
                        Style::default()
                            .fg(theme::CYAN)
                            .add_modifier(Modifier::BOLD),
                    ),
                    EntryKind::File => ("  ", Style::default().fg(theme::FOREGROUND)),
                };
                ListItem::new(Line::from(Span::styled(
                    format!("{indent}{marker}{}", node.entry.name),
                    style,
                )))
            })
            .collect();

        // Keymap hint, always visible for keyboard-first use
        let hints = Line::from(Span::styled(
            " [a] New  [r] Rename  [d] Delete  [?] Help  [q] Quit ",
            Style::default()
                .fg(theme::COMMENT)
                .add_modifier(Modifier::ITALIC),
        ));

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::COMMENT))
                    .title(format!(" {title} — {} entries ", rows.len()))
                    .title_bottom(hints),
            )
            .highlight_style(
                Style::default()
                    .bg(theme::SELECTION)
                    .fg(theme::FOREGROUND)
                    .add_modifier(Modifier::BOLD),
            );

        frame.render_stateful_widget(list, area, list_state);
    }
}
