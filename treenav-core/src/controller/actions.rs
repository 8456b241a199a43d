//! src/controller/actions.rs
//! ============================================================================
//! # Actions: Centralized Application Commands
//!
//! Defines the `Action` enum, which represents all user inputs and internal
//! events the application responds to. Raw terminal events are mapped into
//! these by the controller; unmapped keys produce no action at all, leaving
//! the event unconsumed.

use crossterm::event::MouseEvent;

/// Represents a high-level action that the application can perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Move selection up.
    MoveSelectionUp,
    /// Move selection down.
    MoveSelectionDown,
    /// Move selection up by one viewport.
    PageUp,
    /// Move selection down by one viewport.
    PageDown,
    /// Jump to the first visible entry.
    SelectFirst,
    /// Jump to the last visible entry.
    SelectLast,
    /// Toggle the selected folder or open the selected file.
    ActivateSelected,
    /// Collapse the selected folder (no-op on files).
    CollapseSelected,
    /// Prompt for a name and create a file or folder.
    CreateEntry,
    /// Confirm and delete the selected entry.
    DeleteEntry,
    /// Prompt for a new name for the selected entry.
    RenameEntry,
    /// Rebuild the projection with no other state change.
    Refresh,
    /// Toggle the help overlay visibility.
    ToggleHelp,
    /// Close whatever overlay is open.
    CloseOverlay,
    /// An unmapped mouse event, resolved against the rendered layout.
    Mouse(MouseEvent),
    /// A terminal resize event.
    Resize(u16, u16),
    /// An internal tick event for periodic updates.
    Tick,
    /// Quit the application.
    Quit,
}
