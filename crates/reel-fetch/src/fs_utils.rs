//! Filesystem helpers for transient reel files.
//!
//! Downloads land in a `.part` file first and are promoted to their final
//! name once complete. The promotion must also work when the transient
//! directory sits on another filesystem than the staging file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use crate::error::FetchResult;

/// Move a file from `src` to `dst`, handling cross-device moves.
///
/// Tries a plain rename first and falls back to copy-and-delete on EXDEV.
pub async fn move_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> FetchResult<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    if let Some(parent) = dst.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    match fs::rename(src, dst).await {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device_error(&e) => {
            debug!(
                "Cross-device rename, copying instead: {} -> {}",
                src.display(),
                dst.display()
            );
            fs::copy(src, dst).await?;
            remove_if_exists(src).await;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Remove a file, treating "already gone" as success.
///
/// Returns `true` when a file was actually deleted. Other failures are
/// logged and swallowed: cleanup never turns a finished request into an error.
pub async fn remove_if_exists(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    match fs::remove_file(path).await {
        Ok(()) => {
            debug!(path = %path.display(), "Removed transient file");
            true
        }
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to remove transient file");
            false
        }
    }
}

/// File owned by one request, deleted when the owner is done with it.
///
/// `cleanup` removes it asynchronously. If the guard is dropped first (the
/// request future was cancelled or a collaborator panicked) the file is
/// removed synchronously in `Drop`. `keep` releases ownership instead.
#[derive(Debug)]
pub struct TransientFile {
    path: PathBuf,
    armed: bool,
}

impl TransientFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            armed: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the file now.
    pub async fn cleanup(mut self) {
        self.armed = false;
        remove_if_exists(&self.path).await;
    }

    /// Leave the file in place and hand back its path.
    pub fn keep(mut self) -> PathBuf {
        self.armed = false;
        std::mem::take(&mut self.path)
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed abandoned transient file"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to remove transient file")
            }
        }
    }
}

/// Check if an IO error is EXDEV (cross-device link).
fn is_cross_device_error(e: &std::io::Error) -> bool {
    // EXDEV is error code 18 on Linux/macOS
    e.raw_os_error() == Some(18)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_move_file_promotes_partial_download() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("ABC.mp4.part");
        let dst = dir.path().join("ABC.mp4");

        fs::write(&src, b"video bytes").await.unwrap();
        move_file(&src, &dst).await.unwrap();

        assert!(!src.exists(), "staging file should be gone");
        assert_eq!(fs::read(&dst).await.unwrap(), b"video bytes");
    }

    #[tokio::test]
    async fn test_move_file_creates_parent() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.part");
        let dst = dir.path().join("nested").join("a.mp4");

        fs::write(&src, b"x").await.unwrap();
        move_file(&src, &dst).await.unwrap();

        assert!(dst.exists());
    }

    #[tokio::test]
    async fn test_remove_if_exists() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("gone.mp4");
        fs::write(&file, b"x").await.unwrap();

        assert!(remove_if_exists(&file).await);
        assert!(!file.exists());
        assert!(!remove_if_exists(&file).await);
    }

    #[test]
    fn test_is_cross_device_error() {
        assert!(is_cross_device_error(&std::io::Error::from_raw_os_error(18)));
        assert!(!is_cross_device_error(&std::io::Error::from_raw_os_error(2)));
    }

    #[test]
    fn test_transient_file_removed_on_drop() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("ABC.mp4.part");
        std::fs::write(&file, b"half").unwrap();

        drop(TransientFile::new(&file));
        assert!(!file.exists());
    }

    #[test]
    fn test_transient_file_keep() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("ABC.mp4");
        std::fs::write(&file, b"x").unwrap();

        let kept = TransientFile::new(&file).keep();
        assert_eq!(kept, file);
        assert!(file.exists());
    }

    #[tokio::test]
    async fn test_transient_file_cleanup() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("ABC.mp4");
        fs::write(&file, b"x").await.unwrap();

        let guard = TransientFile::new(&file);
        assert_eq!(guard.path(), file.as_path());
        guard.cleanup().await;
        assert!(!file.exists());
    }
}
