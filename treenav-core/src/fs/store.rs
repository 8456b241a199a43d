//! src/fs/store.rs
//! ============================================================================
//! # HierarchyStore: Mutable Tree of Entries
//!
//! The store is the single collaborator allowed to touch the filesystem. It is
//! a trait so the navigation core stays testable against in-memory or wrapped
//! stores; `VaultStore` is the production implementation over `tokio::fs`.
//!
//! Enumeration returns children unsorted; ordering is a projection concern.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

use crate::config::config::Config;
use crate::error::AppError;
use crate::fs::entry::{Entry, EntryKind};

/// Contract between the navigation core and the underlying hierarchy.
///
/// All mutation methods leave the store untouched on failure; errors are
/// surfaced to the caller unchanged so the UI can report them.
#[allow(async_fn_in_trait)]
pub trait HierarchyStore: Send + Sync {
    /// Root folder entry of the hierarchy.
    fn root(&self) -> Entry;

    /// Direct children of a folder, unsorted.
    async fn children(&self, folder: &Entry) -> Result<Vec<Entry>, AppError>;

    /// Create a file or folder at `path`. Fails with `AlreadyExists` when the
    /// target is taken and `InvalidName` when the final component is rejected.
    async fn create(&self, path: &Path, kind: EntryKind) -> Result<Entry, AppError>;

    /// Delete an entry. Folders are removed with their whole subtree.
    async fn remove(&self, entry: &Entry) -> Result<(), AppError>;

    /// Move an entry to `new_path`. Refuses to overwrite an existing target.
    async fn rename(&self, entry: &Entry, new_path: &Path) -> Result<(), AppError>;

    /// Fire-and-forget file activation; the outcome is not observed.
    fn open_file(&self, path: &Path);
}

/// Reject names the filesystem would accept but the navigator should not.
pub(crate) fn validate_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(AppError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Production store rooted at one directory ("vault") on the local filesystem.
#[derive(Debug)]
pub struct VaultStore {
    root: Entry,
    show_hidden: bool,
    open_cmd: Option<String>,
}

impl VaultStore {
    /// Open a vault rooted at `root`, which must be an existing directory.
    pub async fn open(root: PathBuf, config: &Config) -> Result<Self, AppError> {
        let root = fs::canonicalize(&root)
            .await
            .map_err(|e| AppError::from_io(&root, e))?;

        let root_entry = Entry::from_path(&root)
            .await
            .map_err(|source| AppError::Metadata {
                path: root.clone(),
                source,
            })?;

        if !root_entry.is_folder() {
            return Err(AppError::Other(format!(
                "vault root is not a folder: {}",
                root.display()
            )));
        }

        Ok(Self {
            root: root_entry,
            show_hidden: config.show_hidden,
            open_cmd: config.open_cmd.clone(),
        })
    }
}

impl HierarchyStore for VaultStore {
    fn root(&self) -> Entry {
        self.root.clone()
    }

    async fn children(&self, folder: &Entry) -> Result<Vec<Entry>, AppError> {
        let mut entries: Vec<Entry> = Vec::new();
        let mut read_dir: fs::ReadDir = fs::read_dir(&folder.path)
            .await
            .map_err(|e| AppError::from_io(&folder.path, e))?;

        while let Some(dir_entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| AppError::from_io(&folder.path, e))?
        {
            let entry_path: PathBuf = dir_entry.path();
            let file_name: &str = entry_path
                .file_name()
                .and_then(|s: &std::ffi::OsStr| s.to_str())
                .unwrap_or("");

            if !self.show_hidden && file_name.starts_with('.') {
                continue;
            }

            match Entry::from_path(&entry_path).await {
                Ok(info) => entries.push(info),
                Err(e) => {
                    // Log the error but continue processing other entries
                    warn!("Failed to read entry metadata for {:?}: {}", entry_path, e);
                }
            }
        }

        Ok(entries)
    }

    async fn create(&self, path: &Path, kind: EntryKind) -> Result<Entry, AppError> {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| AppError::InvalidName(path.display().to_string()))?;
        validate_name(name)?;

        match kind {
            EntryKind::Folder => {
                fs::create_dir(path)
                    .await
                    .map_err(|e| AppError::from_io(path, e))?;
            }
            EntryKind::File => {
                // create_new refuses existing targets atomically
                fs::OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(path)
                    .await
                    .map_err(|e| AppError::from_io(path, e))?;
            }
        }

        Entry::from_path(path)
            .await
            .map_err(|source| AppError::Metadata {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn remove(&self, entry: &Entry) -> Result<(), AppError> {
        match entry.kind {
            EntryKind::Folder => fs::remove_dir_all(&entry.path)
                .await
                .map_err(|e| AppError::from_io(&entry.path, e)),
            EntryKind::File => fs::remove_file(&entry.path)
                .await
                .map_err(|e| AppError::from_io(&entry.path, e)),
        }
    }

    async fn rename(&self, entry: &Entry, new_path: &Path) -> Result<(), AppError> {
        let name = new_path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| AppError::InvalidName(new_path.display().to_string()))?;
        validate_name(name)?;

        // fs::rename silently replaces files on unix; refuse instead
        if fs::try_exists(new_path)
            .await
            .map_err(|e| AppError::from_io(new_path, e))?
        {
            return Err(AppError::AlreadyExists(new_path.to_path_buf()));
        }

        fs::rename(&entry.path, new_path)
            .await
            .map_err(|e| AppError::from_io(&entry.path, e))
    }

    fn open_file(&self, path: &Path) {
        let path = path.to_path_buf();
        if let Some(cmd) = &self.open_cmd {
            let cmd = cmd.clone();
            tokio::spawn(async move {
                match tokio::process::Command::new(&cmd).arg(&path).spawn() {
                    Ok(_) => {}
                    Err(e) => warn!("Failed to launch {cmd:?} for {:?}: {e}", path),
                }
            });
        } else if let Err(e) = open::that_detached(&path) {
            warn!("Failed to open {:?}: {e}", path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open_vault(tmp: &TempDir) -> VaultStore {
        VaultStore::open(tmp.path().to_path_buf(), &Config::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_open_rejects_file_root() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();

        let result = VaultStore::open(file, &Config::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_children_skips_hidden_by_default() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("visible.md"), "").unwrap();
        std::fs::write(tmp.path().join(".hidden"), "").unwrap();

        let store = open_vault(&tmp).await;
        let children = store.children(&store.root()).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "visible.md");
    }

    #[tokio::test]
    async fn test_children_includes_hidden_when_configured() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("visible.md"), "").unwrap();
        std::fs::write(tmp.path().join(".hidden"), "").unwrap();

        let config = Config {
            show_hidden: true,
            ..Config::default()
        };
        let store = VaultStore::open(tmp.path().to_path_buf(), &config)
            .await
            .unwrap();
        let children = store.children(&store.root()).await.unwrap();
        assert_eq!(children.len(), 2);
    }

    #[tokio::test]
    async fn test_create_file_and_folder() {
        let tmp = TempDir::new().unwrap();
        let store = open_vault(&tmp).await;

        let file = store
            .create(&tmp.path().join("notes.md"), EntryKind::File)
            .await
            .unwrap();
        assert!(file.is_file());
        assert!(tmp.path().join("notes.md").is_file());

        let folder = store
            .create(&tmp.path().join("sub"), EntryKind::Folder)
            .await
            .unwrap();
        assert!(folder.is_folder());
        assert!(tmp.path().join("sub").is_dir());
    }

    #[tokio::test]
    async fn test_create_duplicate_fails() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("taken.md"), "").unwrap();

        let store = open_vault(&tmp).await;
        let result = store
            .create(&tmp.path().join("taken.md"), EntryKind::File)
            .await;
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_create_invalid_name_fails() {
        let tmp = TempDir::new().unwrap();
        let store = open_vault(&tmp).await;

        let result = store.create(&tmp.path().join(".."), EntryKind::File).await;
        assert!(matches!(result, Err(AppError::InvalidName(_))));
    }

    #[tokio::test]
    async fn test_remove_folder_recursively() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("sub/deep")).unwrap();
        std::fs::write(tmp.path().join("sub/deep/file.md"), "").unwrap();

        let store = open_vault(&tmp).await;
        let entry = Entry::from_path(&tmp.path().join("sub")).await.unwrap();
        store.remove(&entry).await.unwrap();
        assert!(!tmp.path().join("sub").exists());
    }

    #[tokio::test]
    async fn test_rename_refuses_existing_target() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.md"), "").unwrap();
        std::fs::write(tmp.path().join("b.md"), "").unwrap();

        let store = open_vault(&tmp).await;
        let entry = Entry::from_path(&tmp.path().join("a.md")).await.unwrap();
        let result = store.rename(&entry, &tmp.path().join("b.md")).await;
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
        // source untouched on failure
        assert!(tmp.path().join("a.md").exists());
    }

    #[tokio::test]
    async fn test_rename_moves_entry() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.md"), "body").unwrap();

        let store = open_vault(&tmp).await;
        let entry = Entry::from_path(&tmp.path().join("a.md")).await.unwrap();
        store
            .rename(&entry, &tmp.path().join("renamed.md"))
            .await
            .unwrap();
        assert!(!tmp.path().join("a.md").exists());
        assert!(tmp.path().join("renamed.md").exists());
    }
}
