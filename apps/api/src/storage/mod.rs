//! Storage collaborator: persists rendered résumé bytes under a base directory.
//!
//! Writes are atomic: bytes go to a unique temp sibling, are synced, then
//! renamed over the target. A failed write never leaves a partial file under
//! the final name, and the temp file is cleaned up on the way out.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create storage directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to move {} into place: {source}", .path.display())]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),
}

/// Writes arbitrary bytes under a file name and reports where they landed.
#[async_trait]
pub trait ResumeStorage: Send + Sync {
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, StorageError>;
}

/// Local-filesystem storage rooted at `base_dir`.
#[derive(Debug, Clone)]
pub struct LocalResumeStorage {
    base_dir: PathBuf,
    tmp_counter: Arc<AtomicU64>,
}

impl LocalResumeStorage {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        LocalResumeStorage {
            base_dir: base_dir.into(),
            tmp_counter: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn temp_path(&self, filename: &str) -> PathBuf {
        let counter = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        self.base_dir
            .join(format!(".{filename}.tmp.{}.{counter}", std::process::id()))
    }
}

#[async_trait]
impl ResumeStorage for LocalResumeStorage {
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        validate_file_name(filename)?;

        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: self.base_dir.clone(),
                source,
            })?;

        let target = self.base_dir.join(filename);
        let temp = self.temp_path(filename);

        if let Err(err) = write_synced(&temp, bytes).await {
            remove_temp(&temp).await;
            return Err(StorageError::Write {
                path: target,
                source: err,
            });
        }

        if let Err(source) = fs::rename(&temp, &target).await {
            remove_temp(&temp).await;
            return Err(StorageError::Persist {
                path: target,
                source,
            });
        }

        debug!(path = %target.display(), bytes = bytes.len(), "File saved atomically");
        Ok(target)
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(path)
        .await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

async fn remove_temp(path: &Path) {
    if let Err(err) = fs::remove_file(path).await {
        if err.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %err, "Failed to remove temp file");
        }
    }
}

/// A storage name must be a single plain path component.
fn validate_file_name(filename: &str) -> Result<(), StorageError> {
    let plain = !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\', '\0']);
    if plain {
        Ok(())
    } else {
        Err(StorageError::InvalidFileName(filename.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalResumeStorage::new(tmp.path().join("nested").join("resumes"));

        let path = storage.save("resume_a.pdf", b"%PDF-1.5 data").await.unwrap();

        assert_eq!(path, storage.base_dir().join("resume_a.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.5 data");
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_file_and_leaves_no_temp() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalResumeStorage::new(tmp.path());

        storage.save("resume_a.pdf", b"first").await.unwrap();
        let path = storage.save("resume_a.pdf", b"second").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        let names: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["resume_a.pdf"]);
    }

    #[tokio::test]
    async fn test_save_fails_when_base_dir_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let storage = LocalResumeStorage::new(blocker.join("resumes"));

        let err = storage.save("resume_a.pdf", b"data").await.unwrap_err();

        assert!(matches!(err, StorageError::CreateDir { .. }), "got {err:?}");
        assert!(err.to_string().starts_with("Failed to create storage directory"));
    }

    #[tokio::test]
    async fn test_save_rejects_path_components() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalResumeStorage::new(tmp.path());

        for name in ["", "..", "../escape.pdf", "a/b.pdf", "a\\b.pdf"] {
            let err = storage.save(name, b"data").await.unwrap_err();
            assert!(matches!(err, StorageError::InvalidFileName(_)), "{name:?}");
        }
    }
}
