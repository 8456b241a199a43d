//! src/controller/event_loop.rs
//! ============================================================================
//! # Controller: Terminal Events → Actions
//!
//! The controller turns raw crossterm events into `Action`s for the run loop.
//! Polling happens on a blocking thread via `spawn_blocking` so the async
//! loop stays responsive; a poll timeout doubles as the idle tick that drives
//! notification expiry.
//!
//! One event is read and fully dispatched before the next is polled, so
//! input is never reordered and a suspended action (an open prompt, a store
//! call in flight) sees no competing events.

use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::trace;

use crate::controller::actions::Action;

pub struct Controller;

impl Controller {
    pub fn new() -> Self {
        Self
    }

    /// Waits for the next actionable input. Poll timeouts surface as `Tick`.
    pub async fn next_action(&mut self) -> Option<Action> {
        loop {
            match next_terminal_event().await {
                Some(TermEvent::Key(key)) => {
                    if let Some(action) = map_key(key) {
                        return Some(action);
                    }
                }
                Some(TermEvent::Mouse(mouse)) => return Some(Action::Mouse(mouse)),
                Some(TermEvent::Resize(w, h)) => return Some(Action::Resize(w, h)),
                Some(_) => {}
                None => return Some(Action::Tick),
            }
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

/// Waits asynchronously for the next terminal event (keyboard, mouse, resize).
/// Uses crossterm's nonblocking poll and integrates with Tokio via
/// spawn_blocking; returns `None` when the poll times out.
pub async fn next_terminal_event() -> Option<TermEvent> {
    tokio::task::spawn_blocking(|| {
        // Wait up to 100ms for a new event; poll blocks for that duration.
        if event::poll(std::time::Duration::from_millis(100)).unwrap_or(false) {
            event::read().ok()
        } else {
            None
        }
    })
    .await
    .ok()
    .flatten()
}

/// Pure keymap: vim keys and arrows side by side, matching the classic tree
/// navigator bindings. Returns `None` for anything the navigator does not
/// consume, including the reserved Alt-n view toggle owned by the host.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),

        // reserved for the hosting shell; deliberately not consumed
        (KeyCode::Char('n'), KeyModifiers::ALT) => {
            trace!("Ignoring reserved toggle-view key");
            None
        }

        (KeyCode::Char('q'), KeyModifiers::NONE) => Some(Action::Quit),

        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => {
            Some(Action::MoveSelectionUp)
        }
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => {
            Some(Action::MoveSelectionDown)
        }
        (KeyCode::PageUp, _) => Some(Action::PageUp),
        (KeyCode::PageDown, _) => Some(Action::PageDown),
        (KeyCode::Home, _) => Some(Action::SelectFirst),
        (KeyCode::End, _) => Some(Action::SelectLast),

        (KeyCode::Enter, _)
        | (KeyCode::Char('l'), KeyModifiers::NONE)
        | (KeyCode::Char('o'), KeyModifiers::NONE) => Some(Action::ActivateSelected),
        (KeyCode::Char('h'), KeyModifiers::NONE) => Some(Action::CollapseSelected),

        (KeyCode::Char('a'), KeyModifiers::NONE) => Some(Action::CreateEntry),
        (KeyCode::Char('d'), KeyModifiers::NONE) => Some(Action::DeleteEntry),
        (KeyCode::Char('r'), KeyModifiers::NONE) => Some(Action::RenameEntry),
        (KeyCode::Char('R'), _) => Some(Action::Refresh),

        (KeyCode::Char('?'), _) | (KeyCode::F(1), _) => Some(Action::ToggleHelp),
        (KeyCode::Esc, _) => Some(Action::CloseOverlay),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_arrows_and_vim_keys_move() {
        assert_eq!(map_key(press(KeyCode::Down)), Some(Action::MoveSelectionDown));
        assert_eq!(map_key(press(KeyCode::Char('j'))), Some(Action::MoveSelectionDown));
        assert_eq!(map_key(press(KeyCode::Up)), Some(Action::MoveSelectionUp));
        assert_eq!(map_key(press(KeyCode::Char('k'))), Some(Action::MoveSelectionUp));
    }

    #[test]
    fn test_activate_and_collapse_keys() {
        assert_eq!(map_key(press(KeyCode::Enter)), Some(Action::ActivateSelected));
        assert_eq!(map_key(press(KeyCode::Char('l'))), Some(Action::ActivateSelected));
        assert_eq!(map_key(press(KeyCode::Char('o'))), Some(Action::ActivateSelected));
        assert_eq!(map_key(press(KeyCode::Char('h'))), Some(Action::CollapseSelected));
    }

    #[test]
    fn test_crud_and_refresh_keys() {
        assert_eq!(map_key(press(KeyCode::Char('a'))), Some(Action::CreateEntry));
        assert_eq!(map_key(press(KeyCode::Char('d'))), Some(Action::DeleteEntry));
        assert_eq!(map_key(press(KeyCode::Char('r'))), Some(Action::RenameEntry));
        assert_eq!(
            map_key(press_with(KeyCode::Char('R'), KeyModifiers::SHIFT)),
            Some(Action::Refresh)
        );
    }

    #[test]
    fn test_reserved_toggle_view_key_not_consumed() {
        assert_eq!(
            map_key(press_with(KeyCode::Char('n'), KeyModifiers::ALT)),
            None
        );
    }

    #[test]
    fn test_unmapped_keys_not_consumed() {
        assert_eq!(map_key(press(KeyCode::Char('z'))), None);
        assert_eq!(map_key(press(KeyCode::Tab)), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut key = press(KeyCode::Char('j'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            map_key(press_with(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }
}
