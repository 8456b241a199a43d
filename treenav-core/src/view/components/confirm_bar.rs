//! src/view/components/confirm_bar.rs
//! ============================================================================
//! # ConfirmBar: Modal Yes/No Question
//!
//! Used for destructive operations. Accepts y/Enter and n/Esc; the driving
//! loop lives in the prompt host.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::view::theme;

pub struct ConfirmBar;

impl ConfirmBar {
    pub fn render(frame: &mut Frame<'_>, message: &str, area: Rect) {
        let overlay_area = Self::centered_rect(40, 16, area);
        frame.render_widget(Clear, overlay_area);

        let lines = vec![
            Line::from(Span::raw(message.to_string())),
            Line::from(""),
            Line::from(Span::styled(
                "[y]es    [n]o",
                Style::default()
                    .fg(theme::COMMENT)
                    .add_modifier(Modifier::ITALIC),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title("Confirm")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::YELLOW)),
            )
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, overlay_area);
    }

    /// Centers a rectangle of given width/height percentages within the area.
    fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(vertical[1]);

        horizontal[1]
    }
}
