//! src/model/projector.rs
//! ============================================================================
//! # TreeProjector: Hierarchy → Flattened Display Sequence
//!
//! Depth-first pre-order walk over the store, honoring `ExpansionState`.
//! The root itself is never emitted; its children start at depth 0. Siblings
//! are ordered folders-first, then case-insensitively by name. A collapsed
//! folder contributes exactly one node and its subtree is never enumerated,
//! so hidden subtrees cost O(1) regardless of size.
//!
//! The produced `DisplayNode` sequence is transient: it is invalidated and
//! fully replaced on every rebuild, and nothing may hold a node across one.

use std::cmp::Ordering;

use crate::error::AppError;
use crate::fs::entry::{Entry, EntryKind};
use crate::fs::store::HierarchyStore;
use crate::model::expansion::ExpansionState;

/// One line of the flattened projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNode {
    pub entry: Entry,
    pub depth: usize,
    /// Only meaningful for folders; true iff the walk descended here.
    pub expanded: bool,
}

/// Folders before files; within each kind, case-insensitive by name.
fn sort_siblings(entries: &mut [Entry]) {
    entries.sort_by(|a, b| match (a.is_folder(), b.is_folder()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });
}

/// Flatten the hierarchy into display order.
///
/// Any enumeration failure fails the whole projection; the caller decides how
/// to degrade (the navigator falls back to an empty sequence).
pub async fn project<S: HierarchyStore>(
    store: &S,
    expansion: &ExpansionState,
) -> Result<Vec<DisplayNode>, AppError> {
    let root = store.root();

    let mut nodes: Vec<DisplayNode> = Vec::new();
    // explicit stack; children are pushed reversed so pop order is pre-order
    let mut stack: Vec<(Entry, usize)> = Vec::new();

    let mut top = store.children(&root).await?;
    sort_siblings(&mut top);
    for entry in top.into_iter().rev() {
        stack.push((entry, 0));
    }

    while let Some((entry, depth)) = stack.pop() {
        match entry.kind {
            EntryKind::File => nodes.push(DisplayNode {
                entry,
                depth,
                expanded: false,
            }),
            EntryKind::Folder => {
                let expanded = expansion.is_expanded(&entry.path, depth);
                if expanded {
                    let mut children = store.children(&entry).await?;
                    sort_siblings(&mut children);
                    for child in children.into_iter().rev() {
                        stack.push((child, depth + 1));
                    }
                }
                nodes.push(DisplayNode {
                    entry,
                    depth,
                    expanded,
                });
            }
        }
    }

    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::Config;
    use crate::fs::store::VaultStore;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;
    use tempfile::TempDir;

    async fn open_vault(tmp: &TempDir) -> VaultStore {
        VaultStore::open(tmp.path().to_path_buf(), &Config::default())
            .await
            .unwrap()
    }

    fn names(nodes: &[DisplayNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.entry.name.as_str()).collect()
    }

    /// Store wrapper recording which folders get enumerated.
    struct CountingStore {
        inner: VaultStore,
        enumerated: Mutex<Vec<PathBuf>>,
    }

    impl HierarchyStore for CountingStore {
        fn root(&self) -> Entry {
            self.inner.root()
        }

        async fn children(&self, folder: &Entry) -> Result<Vec<Entry>, AppError> {
            self.enumerated.lock().unwrap().push(folder.path.clone());
            self.inner.children(folder).await
        }

        async fn create(&self, path: &Path, kind: EntryKind) -> Result<Entry, AppError> {
            self.inner.create(path, kind).await
        }

        async fn remove(&self, entry: &Entry) -> Result<(), AppError> {
            self.inner.remove(entry).await
        }

        async fn rename(&self, entry: &Entry, new_path: &Path) -> Result<(), AppError> {
            self.inner.rename(entry, new_path).await
        }

        fn open_file(&self, path: &Path) {
            self.inner.open_file(path);
        }
    }

    #[tokio::test]
    async fn test_folders_first_then_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("b.md"), "").unwrap();
        std::fs::create_dir(tmp.path().join("A")).unwrap();
        std::fs::write(tmp.path().join("a.md"), "").unwrap();

        let store = open_vault(&tmp).await;
        let nodes = project(&store, &ExpansionState::new()).await.unwrap();
        assert_eq!(names(&nodes), vec!["A", "a.md", "b.md"]);
    }

    #[tokio::test]
    async fn test_default_expansion_only_at_depth_zero() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("FolderX/Sub")).unwrap();
        std::fs::write(tmp.path().join("FolderX/Sub/inner.md"), "").unwrap();
        std::fs::write(tmp.path().join("FolderX/f.md"), "").unwrap();

        let store = open_vault(&tmp).await;
        let nodes = project(&store, &ExpansionState::new()).await.unwrap();

        // FolderX is open by default, Sub is shown but closed
        assert_eq!(names(&nodes), vec!["FolderX", "Sub", "f.md"]);
        assert!(nodes[0].expanded);
        assert!(!nodes[1].expanded);
    }

    #[tokio::test]
    async fn test_depth_tags_follow_nesting() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        std::fs::write(tmp.path().join("a/b/leaf.md"), "").unwrap();

        let store = open_vault(&tmp).await;
        let mut expansion = ExpansionState::new();
        expansion.set_expanded(store.root().path.join("a/b"), true);

        let nodes = project(&store, &expansion).await.unwrap();
        assert_eq!(names(&nodes), vec!["a", "b", "leaf.md"]);
        assert_eq!(nodes[0].depth, 0);
        assert_eq!(nodes[1].depth, 1);
        assert_eq!(nodes[2].depth, 2);
    }

    #[tokio::test]
    async fn test_collapsed_folder_costs_one_node() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("big/nested")).unwrap();
        for i in 0..40 {
            std::fs::write(tmp.path().join(format!("big/f{i}.md")), "").unwrap();
        }

        let store = CountingStore {
            inner: open_vault(&tmp).await,
            enumerated: Mutex::new(Vec::new()),
        };
        let mut expansion = ExpansionState::new();
        expansion.set_expanded(store.root().path.join("big"), false);

        let nodes = project(&store, &expansion).await.unwrap();

        let big_nodes: Vec<_> = nodes.iter().filter(|n| n.entry.name == "big").collect();
        assert_eq!(big_nodes.len(), 1);
        assert_eq!(nodes.len(), 1);

        // the collapsed subtree was never enumerated
        let enumerated = store.enumerated.lock().unwrap();
        assert_eq!(enumerated.len(), 1);
        assert_eq!(enumerated[0], store.inner.root().path);
    }

    #[tokio::test]
    async fn test_unreadable_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let store = open_vault(&tmp).await;
        drop(std::fs::remove_dir_all(tmp.path()));

        let result = project(&store, &ExpansionState::new()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_empty_root_projects_empty() {
        let tmp = TempDir::new().unwrap();
        let store = open_vault(&tmp).await;
        let nodes = project(&store, &ExpansionState::new()).await.unwrap();
        assert!(nodes.is_empty());
    }
}
