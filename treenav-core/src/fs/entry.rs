//! src/fs/entry.rs
//! ============================================================================
//! # Entry: Hierarchy Entry Metadata
//!
//! Cross-platform, async-friendly abstraction for one node of the navigated
//! hierarchy. The kind is a closed two-variant enum so every consumer matches
//! exhaustively; adding a third kind is a compile-checked change.

use bytesize::ByteSize;
use chrono::{DateTime, TimeZone, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// What an entry is. Folders have children, files are leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Folder,
    File,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Folder => write!(f, "Folder"),
            EntryKind::File => write!(f, "File"),
        }
    }
}

/// Core metadata struct for a file or folder.
///
/// Identity is the `path`; `size` and `modified` are carried for display
/// only and never influence ordering or projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub path: PathBuf,
    pub name: CompactString,
    pub kind: EntryKind,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

impl Entry {
    /// Build from a path by reading its metadata.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = tokio::fs::metadata(path).await?;

        let kind: EntryKind = if metadata.is_dir() {
            EntryKind::Folder
        } else {
            EntryKind::File
        };

        let name: CompactString = path
            .file_name()
            .map(|n: &OsStr| CompactString::from(n.to_string_lossy().as_ref()))
            .unwrap_or_default();

        // Folder sizes are not aggregated; only file byte counts are shown.
        let size: u64 = match kind {
            EntryKind::Folder => 0,
            EntryKind::File => metadata.len(),
        };

        // Modification time, fall back to epoch on error
        let modified: DateTime<Utc> = metadata
            .modified()
            .ok()
            .and_then(|t: SystemTime| t.duration_since(UNIX_EPOCH).ok())
            .and_then(|d| Utc.timestamp_opt(d.as_secs() as i64, 0).single())
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        Ok(Self {
            path: path.to_path_buf(),
            name,
            kind,
            size,
            modified,
        })
    }

    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Human-friendly file size.
    pub fn size_human(&self) -> String {
        ByteSize::b(self.size).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_entry_from_file_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("note.md");
        std::fs::write(&path, "hello").unwrap();

        let entry = Entry::from_path(&path).await.unwrap();
        assert_eq!(entry.kind, EntryKind::File);
        assert_eq!(entry.name, "note.md");
        assert_eq!(entry.size, 5);
        assert!(entry.is_file());
        assert!(!entry.is_folder());
    }

    #[tokio::test]
    async fn test_entry_from_folder_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sub");
        std::fs::create_dir(&path).unwrap();

        let entry = Entry::from_path(&path).await.unwrap();
        assert_eq!(entry.kind, EntryKind::Folder);
        assert_eq!(entry.name, "sub");
        assert_eq!(entry.size, 0);
        assert!(entry.is_folder());
    }

    #[tokio::test]
    async fn test_entry_missing_path() {
        let tmp = TempDir::new().unwrap();
        let result = Entry::from_path(&tmp.path().join("gone")).await;
        assert!(result.is_err());
    }
}
