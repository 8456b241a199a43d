//! src/model/navigator.rs
//! ============================================================================
//! # Navigator: Key-Action Engine Over the Flattened Projection
//!
//! Owns the expansion map, the cursor and the cached display sequence; every
//! mutation of any of them flows through here. Each action that touches the
//! expansion state or the store is followed synchronously by a rebuild and a
//! cursor re-clamp. Store failures leave all navigator state untouched so the
//! displayed tree stays consistent with the last known-good snapshot.
//!
//! Prompts are awaitable collaborators: an action handler suspends on them
//! and nothing else runs against this navigator until it resolves.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::AppError;
use crate::fs::entry::{Entry, EntryKind};
use crate::fs::store::HierarchyStore;
use crate::model::cursor::Cursor;
use crate::model::expansion::ExpansionState;
use crate::model::projector::{self, DisplayNode};

/// Modal collaborators for user input.
///
/// `text_prompt` resolves to `None` when dismissed; `confirm` resolves to a
/// plain yes/no. A dismissed or empty reply is the documented no-op path for
/// every flow that prompts, never an error.
#[allow(async_fn_in_trait)]
pub trait PromptHost {
    async fn text_prompt(&mut self, title: &str, initial: &str) -> Option<String>;
    async fn confirm(&mut self, message: &str) -> bool;
}

/// A hierarchy change the navigator performed, for status reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Created(PathBuf),
    Deleted(PathBuf),
    Renamed { from: PathBuf, to: PathBuf },
}

/// Navigation engine: selection state machine over one hierarchy store.
pub struct Navigator<S: HierarchyStore> {
    store: Arc<S>,
    expansion: ExpansionState,
    cursor: Cursor,
    nodes: Vec<DisplayNode>,
    default_extension: String,
}

impl<S: HierarchyStore> Navigator<S> {
    pub fn new(store: Arc<S>, default_extension: impl Into<String>) -> Self {
        Self {
            store,
            expansion: ExpansionState::new(),
            cursor: Cursor::default(),
            nodes: Vec::new(),
            default_extension: default_extension.into(),
        }
    }

    /// Current flattened sequence, in display order.
    pub fn rows(&self) -> &[DisplayNode] {
        &self.nodes
    }

    pub fn cursor_index(&self) -> usize {
        self.cursor.index()
    }

    pub fn selected(&self) -> Option<&DisplayNode> {
        self.nodes.get(self.cursor.index())
    }

    pub fn root_path(&self) -> PathBuf {
        self.store.root().path
    }

    /// Re-project the hierarchy and re-clamp the cursor.
    ///
    /// On failure the sequence is emptied and the cursor reset to 0; the
    /// error is returned for display but never propagated further.
    pub async fn rebuild(&mut self) -> Result<(), AppError> {
        match projector::project(self.store.as_ref(), &self.expansion).await {
            Ok(nodes) => {
                self.nodes = nodes;
                self.cursor.reclamp(self.nodes.len());
                Ok(())
            }
            Err(e) => {
                warn!("Projection failed: {e}");
                self.nodes.clear();
                self.cursor.reclamp(0);
                Err(e)
            }
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        self.cursor.move_by(delta, self.nodes.len());
    }

    pub fn select_at(&mut self, index: usize) {
        self.cursor.select(index, self.nodes.len());
    }

    /// Open the selected entry: toggle a folder, or hand a file to the store.
    ///
    /// Expanding touches only the folder itself; collapsing forgets the
    /// expansion of the entire subtree beneath it. File activation changes no
    /// navigator state and triggers no rebuild.
    pub async fn activate(&mut self) -> Result<(), AppError> {
        let Some(node) = self.selected() else {
            return Ok(());
        };
        let entry = node.entry.clone();
        let depth = node.depth;

        match entry.kind {
            EntryKind::Folder => self.toggle_folder(&entry, depth).await,
            EntryKind::File => {
                debug!("Opening file {:?}", entry.path);
                self.store.open_file(&entry.path);
                Ok(())
            }
        }
    }

    /// Collapse key: same folder toggle as `activate`, no-op on files.
    pub async fn collapse(&mut self) -> Result<(), AppError> {
        let Some(node) = self.selected() else {
            return Ok(());
        };
        let entry = node.entry.clone();
        let depth = node.depth;

        match entry.kind {
            EntryKind::Folder => self.toggle_folder(&entry, depth).await,
            EntryKind::File => Ok(()),
        }
    }

    async fn toggle_folder(&mut self, entry: &Entry, depth: usize) -> Result<(), AppError> {
        if self.expansion.is_expanded(&entry.path, depth) {
            self.expansion
                .collapse_subtree(self.store.as_ref(), entry)
                .await;
        } else {
            self.expansion.set_expanded(entry.path.clone(), true);
        }
        self.rebuild().await
    }

    /// Prompt for a name and create a file or folder under the target parent:
    /// the selected folder itself, or the selected file's parent, or the root
    /// when the sequence is empty. A trailing `/` makes a folder; a file name
    /// without a `.` gets the configured default extension.
    ///
    /// Returns `Ok(None)` when the prompt was dismissed or empty.
    pub async fn create(
        &mut self,
        prompts: &mut impl PromptHost,
    ) -> Result<Option<Mutation>, AppError> {
        let parent = self.create_parent();

        let Some(input) = prompts.text_prompt("New file/folder name", "").await else {
            return Ok(None);
        };
        if input.is_empty() {
            return Ok(None);
        }

        let path = if let Some(folder_name) = input.strip_suffix('/') {
            let path = parent.join(folder_name);
            self.store.create(&path, EntryKind::Folder).await?;
            path
        } else {
            let file_name = if input.contains('.') {
                input
            } else {
                format!("{input}.{}", self.default_extension)
            };
            let path = parent.join(&file_name);
            self.store.create(&path, EntryKind::File).await?;
            path
        };

        self.rebuild().await?;
        Ok(Some(Mutation::Created(path)))
    }

    /// Confirm, then delete the selected entry. The cursor is biased one step
    /// upward before the rebuild's clamp, and stale expansion keys beneath a
    /// deleted folder are pruned.
    pub async fn delete(
        &mut self,
        prompts: &mut impl PromptHost,
    ) -> Result<Option<Mutation>, AppError> {
        let Some(node) = self.selected() else {
            return Ok(None);
        };
        let entry = node.entry.clone();

        if !prompts
            .confirm(&format!("Delete \"{}\"?", entry.name))
            .await
        {
            return Ok(None);
        }

        self.store.remove(&entry).await?;

        if entry.is_folder() {
            self.expansion.prune_under(&entry.path);
        }
        self.cursor.retreat();
        self.rebuild().await?;
        Ok(Some(Mutation::Deleted(entry.path)))
    }

    /// Prompt for a new name, pre-filled with the current one, and rename the
    /// selected entry within its parent. Empty or unchanged input is a no-op.
    pub async fn rename(
        &mut self,
        prompts: &mut impl PromptHost,
    ) -> Result<Option<Mutation>, AppError> {
        let Some(node) = self.selected() else {
            return Ok(None);
        };
        let entry = node.entry.clone();

        let Some(new_name) = prompts.text_prompt("Rename to:", entry.name.as_str()).await else {
            return Ok(None);
        };
        if new_name.is_empty() || new_name.as_str() == entry.name.as_str() {
            return Ok(None);
        }

        let Some(parent) = entry.path.parent() else {
            return Ok(None);
        };
        let new_path = parent.join(&new_name);

        self.store.rename(&entry, &new_path).await?;

        if entry.is_folder() {
            // the renamed subtree starts over under default policy
            self.expansion.prune_under(&entry.path);
        }
        self.rebuild().await?;
        Ok(Some(Mutation::Renamed {
            from: entry.path,
            to: new_path,
        }))
    }

    /// Rebuild with no other state change.
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        self.rebuild().await
    }

    fn create_parent(&self) -> PathBuf {
        match self.selected() {
            Some(node) if node.entry.is_folder() => node.entry.path.clone(),
            Some(node) => node
                .entry
                .path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| self.store.root().path),
            None => self.store.root().path,
        }
    }
}
