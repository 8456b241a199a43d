//! src/model/app_state.rs
//! ============================================================================
//! # AppState: Application State for the Tree Navigator
//!
//! Unifies the long-lived pieces the run loop works against: configuration,
//! the navigation engine and the ephemeral UI state, plus the redraw flag the
//! renderer polls. Action handlers here translate engine results into status
//! and error notifications; the engine itself never talks to the UI.

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

use crate::config::config::Config;
use crate::fs::store::VaultStore;
use crate::model::navigator::{Mutation, Navigator, PromptHost};
use crate::model::ui_state::UIState;

pub struct AppState {
    pub config: Arc<Config>,
    pub nav: Navigator<VaultStore>,
    pub ui: UIState,
    pub redraw: bool,
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl AppState {
    pub fn new(config: Arc<Config>, nav: Navigator<VaultStore>) -> Self {
        Self {
            config,
            nav,
            ui: UIState::new(),
            redraw: true,
        }
    }

    /// Set the latest error message (display in UI).
    pub fn set_error(&mut self, msg: impl Into<String>) {
        let msg_str = msg.into();
        error!("Setting error: {}", msg_str);
        self.ui.show_error(msg_str);
        self.redraw = true;
    }

    /// Set the latest info/status message (display in UI).
    pub fn set_status(&mut self, msg: impl Into<String>) {
        let msg_str = msg.into();
        info!("Setting status: {}", msg_str);
        self.ui.show_info(msg_str, self.config.status_timeout);
        self.redraw = true;
    }

    /// Periodic housekeeping driven by the event loop's idle tick.
    pub fn tick(&mut self) {
        if self.ui.update_notification() {
            self.redraw = true;
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.nav.move_cursor(delta);
        self.redraw = true;
    }

    pub fn select_at(&mut self, index: usize) {
        self.nav.select_at(index);
        self.redraw = true;
    }

    pub async fn activate_selected(&mut self) {
        self.redraw = true;
        if let Err(e) = self.nav.activate().await {
            self.set_error(e.to_string());
        }
    }

    pub async fn collapse_selected(&mut self) {
        self.redraw = true;
        if let Err(e) = self.nav.collapse().await {
            self.set_error(e.to_string());
        }
    }

    pub async fn refresh(&mut self) {
        self.redraw = true;
        match self.nav.refresh().await {
            Ok(()) => self.set_status("Refreshed"),
            Err(e) => self.set_error(e.to_string()),
        }
    }

    pub async fn create_entry(&mut self, prompts: &mut impl PromptHost) {
        self.redraw = true;
        match self.nav.create(prompts).await {
            Ok(Some(Mutation::Created(path))) => {
                self.set_status(format!("Created \"{}\"", display_name(&path)));
            }
            Ok(_) => {}
            Err(e) => self.set_error(e.to_string()),
        }
    }

    pub async fn delete_entry(&mut self, prompts: &mut impl PromptHost) {
        self.redraw = true;
        match self.nav.delete(prompts).await {
            Ok(Some(Mutation::Deleted(path))) => {
                self.set_status(format!("Deleted \"{}\"", display_name(&path)));
            }
            Ok(_) => {}
            Err(e) => self.set_error(e.to_string()),
        }
    }

    pub async fn rename_entry(&mut self, prompts: &mut impl PromptHost) {
        self.redraw = true;
        match self.nav.rename(prompts).await {
            Ok(Some(Mutation::Renamed { from, to })) => {
                self.set_status(format!(
                    "Renamed \"{}\" to \"{}\"",
                    display_name(&from),
                    display_name(&to)
                ));
            }
            Ok(_) => {}
            Err(e) => self.set_error(e.to_string()),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("rows", &self.nav.rows().len())
            .field("cursor", &self.nav.cursor_index())
            .field("ui", &self.ui)
            .field("redraw", &self.redraw)
            .finish()
    }
}
