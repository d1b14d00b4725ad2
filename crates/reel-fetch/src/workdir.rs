//! Transient storage directory for downloaded reels.
//!
//! Files are named `<shortcode>-<request id>.mp4`, so two concurrent requests
//! for the same reel never share a path.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::info;
use uuid::Uuid;

use reel_models::{RequestId, Shortcode};

use crate::error::FetchResult;
use crate::fs_utils::remove_if_exists;

const VIDEO_EXTENSION: &str = "mp4";
const PARTIAL_SUFFIX: &str = ".part";

/// Request-scoped file area for downloaded videos.
#[derive(Debug, Clone)]
pub struct TransientDir {
    root: PathBuf,
}

impl TransientDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory if it does not exist.
    pub async fn ensure(&self) -> FetchResult<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Final path of the video for one request.
    pub fn video_path(&self, shortcode: &Shortcode, request_id: &RequestId) -> PathBuf {
        self.root.join(format!(
            "{}-{}.{}",
            shortcode.file_stem(),
            request_id,
            VIDEO_EXTENSION
        ))
    }

    /// Staging path a download is written to before it is complete.
    pub fn partial_path(video_path: &Path) -> PathBuf {
        let mut name = OsString::from(video_path.as_os_str());
        name.push(PARTIAL_SUFFIX);
        PathBuf::from(name)
    }

    /// Remove videos and partial downloads left behind by a previous run.
    ///
    /// Only called at startup, before any request can be in flight.
    pub async fn sweep(&self) -> FetchResult<usize> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if is_transient_artifact(&path) && remove_if_exists(&path).await {
                removed += 1;
            }
        }

        if removed > 0 {
            info!(
                dir = %self.root.display(),
                removed = removed,
                "Swept stale transient files"
            );
        }
        Ok(removed)
    }
}

/// Whether `path` was produced by `video_path` or `partial_path`.
///
/// Only `<stem>-<uuid>.mp4` and its `.part` staging file match, so unrelated
/// videos sharing the directory are never touched.
fn is_transient_artifact(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let name = name.strip_suffix(PARTIAL_SUFFIX).unwrap_or(name);
    let Some(stem) = name
        .strip_suffix(VIDEO_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
    else {
        return false;
    };

    // The request ID is a hyphenated UUID, so split at a fixed width
    const UUID_LEN: usize = 36;
    if stem.len() <= UUID_LEN + 1 || !stem.is_char_boundary(stem.len() - UUID_LEN) {
        return false;
    }
    let (prefix, request_id) = stem.split_at(stem.len() - UUID_LEN);
    prefix.len() > 1 && prefix.ends_with('-') && Uuid::parse_str(request_id).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_video_paths_are_request_scoped() {
        let dir = TransientDir::new("downloads");
        let shortcode = Shortcode::new("ABC123").unwrap();

        let a = dir.video_path(&shortcode, &RequestId::from_string("one"));
        let b = dir.video_path(&shortcode, &RequestId::from_string("two"));

        assert_ne!(a, b);
        assert_eq!(a, PathBuf::from("downloads/ABC123-one.mp4"));
    }

    #[test]
    fn test_partial_path_appends_suffix() {
        let partial = TransientDir::partial_path(Path::new("downloads/ABC-1.mp4"));
        assert_eq!(partial, PathBuf::from("downloads/ABC-1.mp4.part"));
    }

    #[tokio::test]
    async fn test_ensure_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = TransientDir::new(tmp.path().join("downloads"));

        dir.ensure().await.unwrap();
        assert!(dir.root().is_dir());
    }

    #[tokio::test]
    async fn test_sweep_removes_only_artifacts() {
        let tmp = TempDir::new().unwrap();
        let dir = TransientDir::new(tmp.path());
        let shortcode = Shortcode::new("ABC123").unwrap();

        let video = dir.video_path(&shortcode, &RequestId::new());
        let partial = TransientDir::partial_path(&dir.video_path(&shortcode, &RequestId::new()));
        fs::write(&video, b"x").await.unwrap();
        fs::write(&partial, b"x").await.unwrap();
        fs::write(tmp.path().join("notes.txt"), b"keep").await.unwrap();

        assert_eq!(dir.sweep().await.unwrap(), 2);
        assert!(tmp.path().join("notes.txt").exists());
        assert!(!video.exists());
        assert!(!partial.exists());
    }

    #[tokio::test]
    async fn test_sweep_keeps_foreign_videos() {
        let tmp = TempDir::new().unwrap();
        let dir = TransientDir::new(tmp.path());

        for name in [
            "holiday.mp4",
            "holiday.mp4.part",
            "clip-2024-01-01.mp4",
            "-0b5b6a2e-8d3c-4f4e-9a59-3c1a1f0e7d21.mp4",
            "ABC123-not-a-uuid-at-all-but-long-enough.mp4",
        ] {
            fs::write(tmp.path().join(name), b"mine").await.unwrap();
        }

        assert_eq!(dir.sweep().await.unwrap(), 0);
        assert!(tmp.path().join("holiday.mp4").exists());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 5);
    }

    #[test]
    fn test_artifact_matching_follows_naming_scheme() {
        let dir = TransientDir::new("downloads");
        let video = dir.video_path(&Shortcode::new("Cx-9_z").unwrap(), &RequestId::new());

        assert!(is_transient_artifact(&video));
        assert!(is_transient_artifact(&TransientDir::partial_path(&video)));
        assert!(!is_transient_artifact(Path::new("downloads/holiday.mp4")));
        assert!(!is_transient_artifact(Path::new("downloads/notes.txt")));
    }

    #[tokio::test]
    async fn test_sweep_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = TransientDir::new(tmp.path().join("absent"));
        assert_eq!(dir.sweep().await.unwrap(), 0);
    }
}
