use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::view::theme;

pub struct HelpOverlay;

/// Renders the help overlay centered in the given area.
impl HelpOverlay {
    pub fn render(frame: &mut Frame<'_>, area: Rect) {
        let help_text = vec![
            Line::from(Span::styled(
                "Tree Navigator — Help",
                Style::default()
                    .fg(theme::YELLOW)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Navigation:"),
            Line::from("  Down/j        Move selection down"),
            Line::from("  Up/k          Move selection up"),
            Line::from("  PgUp/PgDn     Move selection by a page"),
            Line::from("  Home/End      Jump to first/last entry"),
            Line::from("  Enter/l/o     Expand folder or open file"),
            Line::from("  h             Collapse folder"),
            Line::from(""),
            Line::from("Entries:"),
            Line::from("  a             New entry (trailing / makes a folder)"),
            Line::from("  r             Rename selected"),
            Line::from("  d             Delete selected"),
            Line::from("  R             Refresh"),
            Line::from(""),
            Line::from("UI/General:"),
            Line::from("  ? or F1       Show/hide help"),
            Line::from("  q             Quit"),
            Line::from(""),
            Line::from("Press Esc or ? to close this help."),
        ];

        let overlay_area = Self::centered_rect(70, 80, area);

        // Clear area before drawing modal
        frame.render_widget(Clear, overlay_area);

        let help_paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title("Help")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::CYAN)),
            )
            .alignment(Alignment::Left)
            .wrap(ratatui::widgets::Wrap { trim: true });

        frame.render_widget(help_paragraph, overlay_area);
    }

    /// Returns a centered rectangle of given width/height percentages inside area.
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
