//! src/model/expansion.rs
//! ============================================================================
//! # ExpansionState: Which Folders Are Open
//!
//! Session-lifetime mapping from folder path to an expanded flag. Absence of a
//! key means "default policy": root-level folders (depth 0) start open, every
//! deeper folder starts closed. Keys are only written by explicit expand and
//! collapse actions, and pruned when the underlying folder is deleted.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tracing::warn;

use crate::fs::entry::Entry;
use crate::fs::store::HierarchyStore;

#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    open: HashMap<PathBuf, bool>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored flag if present, otherwise the default policy for `depth`.
    pub fn is_expanded(&self, path: &Path, depth: usize) -> bool {
        self.open.get(path).copied().unwrap_or(depth == 0)
    }

    /// Unconditional overwrite.
    pub fn set_expanded(&mut self, path: impl Into<PathBuf>, expanded: bool) {
        self.open.insert(path.into(), expanded);
    }

    /// Collapse `folder` and every folder-typed descendant, regardless of the
    /// descendants' current expansion. Re-expanding the folder later starts
    /// from a fully collapsed subtree instead of restoring prior nesting.
    ///
    /// Descendants are discovered through the store; enumeration failures are
    /// logged and the affected branch is skipped.
    pub fn collapse_subtree<'a, S: HierarchyStore>(
        &'a mut self,
        store: &'a S,
        folder: &'a Entry,
    ) -> Pin<Box<dyn Future<Output = ()> + 'a>> {
        Box::pin(async move {
            self.set_expanded(folder.path.clone(), false);

            match store.children(folder).await {
                Ok(children) => {
                    for child in children.iter().filter(|c| c.is_folder()) {
                        self.collapse_subtree(store, child).await;
                    }
                }
                Err(e) => {
                    warn!("Skipping collapse below {:?}: {}", folder.path, e);
                }
            }
        })
    }

    /// Drop every key at or below `path`. Called after a folder is deleted or
    /// renamed away so the map does not grow without bound.
    pub fn prune_under(&mut self, path: &Path) {
        self.open.retain(|p, _| !p.starts_with(path));
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::Config;
    use crate::fs::store::VaultStore;
    use tempfile::TempDir;

    #[test]
    fn test_default_policy_by_depth() {
        let state = ExpansionState::new();
        assert!(state.is_expanded(Path::new("/v/top"), 0));
        assert!(!state.is_expanded(Path::new("/v/top/nested"), 1));
        assert!(!state.is_expanded(Path::new("/v/top/nested/deep"), 2));
    }

    #[test]
    fn test_explicit_flag_beats_default() {
        let mut state = ExpansionState::new();
        state.set_expanded("/v/top", false);
        state.set_expanded("/v/top/nested", true);

        assert!(!state.is_expanded(Path::new("/v/top"), 0));
        assert!(state.is_expanded(Path::new("/v/top/nested"), 1));
    }

    #[test]
    fn test_set_expanded_overwrites() {
        let mut state = ExpansionState::new();
        state.set_expanded("/v/a", true);
        state.set_expanded("/v/a", false);
        assert!(!state.is_expanded(Path::new("/v/a"), 0));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_prune_under_drops_subtree_keys() {
        let mut state = ExpansionState::new();
        state.set_expanded("/v/a", true);
        state.set_expanded("/v/a/b", true);
        state.set_expanded("/v/ab", true);

        state.prune_under(Path::new("/v/a"));

        // component-wise prefix match: "/v/ab" is not under "/v/a"
        assert_eq!(state.len(), 1);
        assert!(state.is_expanded(Path::new("/v/ab"), 0));
    }

    #[tokio::test]
    async fn test_collapse_subtree_marks_all_descendants() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("a/b/c")).unwrap();
        std::fs::write(tmp.path().join("a/file.md"), "").unwrap();

        let store = VaultStore::open(tmp.path().to_path_buf(), &Config::default())
            .await
            .unwrap();
        let a = Entry::from_path(&store.root().path.join("a")).await.unwrap();

        let mut state = ExpansionState::new();
        state.set_expanded(a.path.clone(), true);
        state.set_expanded(a.path.join("b"), true);

        state.collapse_subtree(&store, &a).await;

        assert!(!state.is_expanded(&a.path, 0));
        assert!(!state.is_expanded(&a.path.join("b"), 1));
        // the never-expanded grandchild got an explicit false as well
        assert_eq!(state.len(), 3);
        assert!(!state.is_expanded(&a.path.join("b/c"), 2));
    }
}
