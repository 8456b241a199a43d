//! src/view/components/prompt_bar.rs
//! ============================================================================
//! # PromptBar: Modal Single-Line Text Input
//!
//! - Centered, visually distinct input box for create/rename names
//! - Caret position is rendered with the real terminal cursor

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::view::theme;

pub struct PromptBar;

impl PromptBar {
    /// Renders the prompt as a modal overlay, centered on the screen.
    /// `caret` is a character offset into `input`.
    pub fn render(frame: &mut Frame<'_>, title: &str, input: &str, caret: usize, area: Rect) {
        let overlay_area = Self::centered_rect(40, 12, area);
        frame.render_widget(Clear, overlay_area);

        let paragraph = Paragraph::new(Text::from(Span::raw(input)))
            .block(
                Block::default()
                    .title(title)
                    .title_alignment(Alignment::Left)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::CYAN)),
            )
            .alignment(Alignment::Left);

        frame.render_widget(paragraph, overlay_area);

        // keep the caret inside the box
        let max_x = overlay_area.width.saturating_sub(2);
        let caret_x = (caret as u16).min(max_x.saturating_sub(1));
        frame.set_cursor_position((overlay_area.x + 1 + caret_x, overlay_area.y + 1));
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
