//! src/view/prompts.rs
//! ============================================================================
//! # TuiPrompts: Modal Prompt Host Over the Terminal
//!
//! Implements the engine's prompt collaborators as centered modals. While a
//! prompt is open this host owns the terminal and the event source: the
//! suspended action resumes only when the user submits or dismisses, which is
//! exactly the one-request-at-a-time contract the engine relies on.
//!
//! The tree behind the modal is drawn from a snapshot taken when the prompt
//! opened; the projection cannot change underneath it.

use crossterm::event::{Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::ListState,
};
use tracing::warn;

use crate::controller::event_loop::next_terminal_event;
use crate::model::app_state::AppState;
use crate::model::navigator::PromptHost;
use crate::model::projector::DisplayNode;
use crate::view::components::confirm_bar::ConfirmBar;
use crate::view::components::prompt_bar::PromptBar;
use crate::view::components::tree_list::TreeList;

enum Modal<'m> {
    Text {
        title: &'m str,
        input: &'m str,
        caret: usize,
    },
    Confirm {
        message: &'m str,
    },
}

pub struct TuiPrompts<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    rows: Vec<DisplayNode>,
    cursor: usize,
    title: String,
}

impl<'a, B: Backend> TuiPrompts<'a, B> {
    /// Snapshot the current projection as the modal backdrop.
    pub fn new(terminal: &'a mut Terminal<B>, state: &AppState) -> Self {
        Self {
            terminal,
            rows: state.nav.rows().to_vec(),
            cursor: state.nav.cursor_index(),
            title: state.nav.root_path().display().to_string(),
        }
    }

    fn draw(&mut self, modal: Modal<'_>) -> bool {
        let rows = &self.rows;
        let cursor = self.cursor;
        let title = &self.title;

        let result = self.terminal.draw(|frame| {
            let full: Rect = frame.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(2), Constraint::Length(1)])
                .split(full);

            let mut list_state = ListState::default();
            if !rows.is_empty() {
                list_state.select(Some(cursor));
            }
            TreeList::render(frame, rows, &mut list_state, title, chunks[0]);

            match modal {
                Modal::Text {
                    title,
                    input,
                    caret,
                } => PromptBar::render(frame, title, input, caret, full),
                Modal::Confirm { message } => ConfirmBar::render(frame, message, full),
            }
        });

        match result {
            Ok(_) => true,
            Err(e) => {
                warn!("Prompt render failed: {e}");
                false
            }
        }
    }
}

/// Byte offset of the `char_pos`-th character.
fn byte_index(s: &str, char_pos: usize) -> usize {
    s.char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

impl<B: Backend> PromptHost for TuiPrompts<'_, B> {
    async fn text_prompt(&mut self, title: &str, initial: &str) -> Option<String> {
        let mut input = String::from(initial);
        let mut caret = input.chars().count();

        loop {
            if !self.draw(Modal::Text {
                title,
                input: &input,
                caret,
            }) {
                return None;
            }

            let Some(TermEvent::Key(key)) = next_terminal_event().await else {
                continue;
            };
            if key.kind == KeyEventKind::Release {
                continue;
            }

            match (key.code, key.modifiers) {
                (KeyCode::Enter, _) => return Some(input),
                (KeyCode::Esc, _) => return None,
                (KeyCode::Backspace, _) => {
                    if caret > 0 {
                        caret -= 1;
                        input.remove(byte_index(&input, caret));
                    }
                }
                (KeyCode::Delete, _) => {
                    if caret < input.chars().count() {
                        input.remove(byte_index(&input, caret));
                    }
                }
                (KeyCode::Left, _) => caret = caret.saturating_sub(1),
                (KeyCode::Right, _) => caret = (caret + 1).min(input.chars().count()),
                (KeyCode::Home, _) => caret = 0,
                (KeyCode::End, _) => caret = input.chars().count(),
                (KeyCode::Char(c), m)
                    if !m.contains(KeyModifiers::CONTROL) && !m.contains(KeyModifiers::ALT) =>
                {
                    input.insert(byte_index(&input, caret), c);
                    caret += 1;
                }
                _ => {}
            }
        }
    }

    async fn confirm(&mut self, message: &str) -> bool {
        loop {
            if !self.draw(Modal::Confirm { message }) {
                return false;
            }

            let Some(TermEvent::Key(key)) = next_terminal_event().await else {
                continue;
            };
            if key.kind == KeyEventKind::Release {
                continue;
            }

            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return true,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return false,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_index_handles_multibyte() {
        let s = "löwe";
        assert_eq!(byte_index(s, 0), 0);
        assert_eq!(byte_index(s, 1), 1);
        assert_eq!(byte_index(s, 2), 3); // ö is two bytes
        assert_eq!(byte_index(s, 4), s.len());
        assert_eq!(byte_index(s, 99), s.len());
    }
}
