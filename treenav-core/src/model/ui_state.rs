//! src/model/ui_state.rs
//! ============================================================================
//! # UIState: Ephemeral Interaction State
//!
//! Tracks the overlay, the status-bar notification and the list widget state
//! for the tree view. Prompt and confirmation input is modal and lives in the
//! presentation layer, not here.

use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::widgets::ListState;

/// Overlays are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UIOverlay {
    None,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub timestamp: Instant,
    /// `None` keeps the message until replaced (errors stay visible).
    pub auto_dismiss: Option<Duration>,
}

#[derive(Debug)]
pub struct UIState {
    /// Currently active overlay/modal.
    pub overlay: UIOverlay,
    /// Current notification (if any).
    pub notification: Option<Notification>,
    /// List widget state for the tree view (selection, scroll offset).
    pub list_state: ListState,
    /// Tree view area of the last frame, for mouse hit testing.
    pub tree_area: Option<Rect>,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            overlay: UIOverlay::None,
            notification: None,
            list_state: ListState::default(),
            tree_area: None,
        }
    }

    pub fn toggle_help_overlay(&mut self) {
        self.overlay = match self.overlay {
            UIOverlay::Help => UIOverlay::None,
            _ => UIOverlay::Help,
        };
    }

    pub fn close_overlay(&mut self) {
        self.overlay = UIOverlay::None;
    }

    fn show_notification(
        &mut self,
        message: String,
        level: NotificationLevel,
        auto_dismiss: Option<Duration>,
    ) {
        self.notification = Some(Notification {
            message,
            level,
            timestamp: Instant::now(),
            auto_dismiss,
        });
    }

    pub fn show_info(&mut self, message: String, timeout: Duration) {
        self.show_notification(message, NotificationLevel::Info, Some(timeout));
    }

    pub fn show_success(&mut self, message: String, timeout: Duration) {
        self.show_notification(message, NotificationLevel::Success, Some(timeout));
    }

    pub fn show_error(&mut self, message: String) {
        // no auto-dismiss for errors
        self.show_notification(message, NotificationLevel::Error, None);
    }

    /// Drop the notification once its timeout elapses. Returns whether it was
    /// dismissed, so the caller can request a redraw.
    pub fn update_notification(&mut self) -> bool {
        if let Some(notification) = &self.notification {
            if let Some(auto_dismiss) = notification.auto_dismiss {
                if notification.timestamp.elapsed() >= auto_dismiss {
                    self.notification = None;
                    return true;
                }
            }
        }
        false
    }
}

impl Default for UIState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_overlay_toggles() {
        let mut ui = UIState::new();
        assert_eq!(ui.overlay, UIOverlay::None);

        ui.toggle_help_overlay();
        assert_eq!(ui.overlay, UIOverlay::Help);

        ui.toggle_help_overlay();
        assert_eq!(ui.overlay, UIOverlay::None);
    }

    #[test]
    fn test_error_notification_has_no_timeout() {
        let mut ui = UIState::new();
        ui.show_error("boom".to_string());

        let n = ui.notification.as_ref().unwrap();
        assert_eq!(n.level, NotificationLevel::Error);
        assert!(n.auto_dismiss.is_none());
        assert!(!ui.update_notification());
        assert!(ui.notification.is_some());
    }

    #[test]
    fn test_info_notification_dismisses_after_timeout() {
        let mut ui = UIState::new();
        ui.show_info("done".to_string(), Duration::from_millis(0));

        assert!(ui.update_notification());
        assert!(ui.notification.is_none());
    }
}
