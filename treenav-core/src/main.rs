//! src/main.rs
//! ============================================================================
//! # Tree Navigator TUI Application Entry Point
//!
//! A keyboard-driven tree navigator over the working directory, built with
//! ratatui and tokio. Presents the hierarchy as a flattened, indented list
//! with expand/collapse state, a movable selection cursor, and inline
//! create/rename/delete operations.

use std::{
    io::{self, Stdout},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, MouseButton, MouseEvent, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend as Backend};
use tokio::{signal, sync::Notify};
use tracing::{error, info, warn};

use treenav_core::{
    Logger,
    config::config::Config,
    controller::{actions::Action, event_loop::Controller},
    fs::store::VaultStore,
    model::{app_state::AppState, navigator::Navigator, ui_state::UIOverlay},
    view::{prompts::TuiPrompts, ui::View},
};

type AppTerminal = Terminal<Backend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup panic handler early
    setup_panic_handler();

    // Initialize and run the application
    let app: App = App::new()
        .await
        .context("Failed to initialize application")?;

    app.run().await.context("Application runtime error")?;

    info!("Application exited cleanly");
    Ok(())
}

/// Application runtime configuration and state
struct App {
    terminal: AppTerminal,
    controller: Controller,
    state: AppState,
    shutdown: Arc<Notify>,
}

impl App {
    /// Initialize the application with all necessary components
    async fn new() -> Result<Self> {
        // Initialize logging first
        Logger::init_tracing();
        info!("Starting Tree Navigator TUI");

        // Setup terminal
        let terminal: AppTerminal = setup_terminal().context("Failed to initialize terminal")?;

        // Load configuration
        let config: Arc<Config> = Arc::new(Config::load().await.unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }));

        // Open the vault at the current working directory
        let root: PathBuf = tokio::fs::canonicalize(".")
            .await
            .context("Failed to get current directory")?;
        let store = Arc::new(
            VaultStore::open(root, &config)
                .await
                .context("Failed to open vault root")?,
        );

        // Initial projection
        let mut nav = Navigator::new(store, config.default_extension.clone());
        if let Err(e) = nav.rebuild().await {
            warn!("Initial scan failed: {}", e);
        }

        let state = AppState::new(config, nav);

        info!("Application initialization complete");

        Ok(Self {
            terminal,
            controller: Controller::new(),
            state,
            shutdown: Arc::new(Notify::new()),
        })
    }

    /// Run the main application event loop
    async fn run(mut self) -> Result<()> {
        // Setup graceful shutdown handler
        self.setup_shutdown_handler();

        info!("Starting main event loop");

        loop {
            // Render UI if needed
            self.render()?;

            // Wait for next event
            let action: Action = tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("Shutdown signal received");
                    break;
                }

                maybe_action = self.controller.next_action() => {
                    match maybe_action {
                        Some(action) => action,
                        None => {
                            info!("Controller stream ended");
                            break;
                        }
                    }
                }
            };

            // Handle quit action
            if matches!(action, Action::Quit) {
                info!("Quit action received");
                break;
            }

            self.dispatch(action).await;
        }

        info!("Main event loop ended");
        Ok(())
    }

    /// Render the UI if a redraw is needed
    fn render(&mut self) -> Result<()> {
        if self.state.redraw {
            self.terminal
                .draw(|frame: &mut Frame<'_>| {
                    View::redraw(frame, &mut self.state);
                })
                .context("Failed to draw terminal")?;

            self.state.redraw = false;
        }

        Ok(())
    }

    /// Route one action into the state. The help overlay swallows navigation
    /// until it is closed.
    async fn dispatch(&mut self, action: Action) {
        if self.state.ui.overlay == UIOverlay::Help {
            match action {
                Action::ToggleHelp | Action::CloseOverlay => {
                    self.state.ui.close_overlay();
                    self.state.redraw = true;
                }
                Action::Tick => self.state.tick(),
                Action::Resize(_, _) => self.state.redraw = true,
                _ => {}
            }
            return;
        }

        match action {
            Action::MoveSelectionUp => self.state.move_selection(-1),
            Action::MoveSelectionDown => self.state.move_selection(1),
            Action::PageUp => self.state.move_selection(-self.page_size()),
            Action::PageDown => self.state.move_selection(self.page_size()),
            Action::SelectFirst => self.state.select_at(0),
            Action::SelectLast => {
                let last = self.state.nav.rows().len().saturating_sub(1);
                self.state.select_at(last);
            }

            Action::ActivateSelected => self.state.activate_selected().await,
            Action::CollapseSelected => self.state.collapse_selected().await,
            Action::Refresh => self.state.refresh().await,

            Action::CreateEntry => {
                let mut prompts = TuiPrompts::new(&mut self.terminal, &self.state);
                self.state.create_entry(&mut prompts).await;
            }
            Action::DeleteEntry => {
                let mut prompts = TuiPrompts::new(&mut self.terminal, &self.state);
                self.state.delete_entry(&mut prompts).await;
            }
            Action::RenameEntry => {
                let mut prompts = TuiPrompts::new(&mut self.terminal, &self.state);
                self.state.rename_entry(&mut prompts).await;
            }

            Action::ToggleHelp => {
                self.state.ui.toggle_help_overlay();
                self.state.redraw = true;
            }
            Action::CloseOverlay => {}

            Action::Mouse(mouse) => self.handle_mouse(mouse),
            Action::Resize(_, _) => self.state.redraw = true,
            Action::Tick => self.state.tick(),

            // handled before dispatch
            Action::Quit => {}
        }
    }

    /// Click on a visible row selects it.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }
        let Some(area) = self.state.ui.tree_area else {
            return;
        };

        // inside the list body, excluding the border
        let inside = mouse.column > area.x
            && mouse.column < area.x.saturating_add(area.width).saturating_sub(1)
            && mouse.row > area.y
            && mouse.row < area.y.saturating_add(area.height).saturating_sub(1);
        if !inside {
            return;
        }

        let offset = self.state.ui.list_state.offset();
        let index = offset + (mouse.row - area.y - 1) as usize;
        if index < self.state.nav.rows().len() {
            self.state.select_at(index);
        }
    }

    fn page_size(&self) -> isize {
        self.state
            .ui
            .tree_area
            .map(|a| a.height.saturating_sub(2).max(1) as isize)
            .unwrap_or(10)
    }

    /// Setup signal handlers for graceful shutdown
    fn setup_shutdown_handler(&self) {
        let shutdown: Arc<Notify> = self.shutdown.clone();

        tokio::spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C signal");
                    shutdown.notify_one();
                }
                Err(e) => {
                    error!("Failed to listen for Ctrl+C: {}", e);
                }
            }
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(e) = cleanup_terminal(&mut self.terminal) {
            error!("Failed to cleanup terminal: {}", e);
        }
    }
}

/// Initialize terminal in raw mode with alternate screen and mouse capture
fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;

    let backend: Backend<Stdout> = Backend::new(stdout);
    let terminal: Terminal<Backend<Stdout>> =
        Terminal::new(backend).context("Failed to create terminal")?;

    info!("Terminal setup complete");
    Ok(terminal)
}

/// Restore terminal to normal mode
fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Terminal cleanup complete");
    Ok(())
}

/// Setup panic handler for graceful terminal restoration
fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        // Try to restore terminal on panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture);

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
