//! Reel metadata and downloaded reel records.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::Shortcode;

/// Metadata of an Instagram post, as resolved from its shortcode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelPost {
    /// Shortcode the post was resolved from
    pub shortcode: Shortcode,

    /// Whether the post carries a video
    pub is_video: bool,

    /// Direct URL of the video resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    /// Caption text (absent when the post has none)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    /// Username of the owning account
    pub owner_handle: String,

    /// Publish time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl ReelPost {
    /// Caption text, empty when the post has none.
    pub fn caption_or_default(&self) -> &str {
        self.caption.as_deref().unwrap_or_default()
    }
}

/// A reel whose video has been written to transient storage.
///
/// Owned by the message handler for the duration of one request. The file at
/// `local_path` must be removed once the upload attempt finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadedReel {
    /// URL the request was made with
    pub source_url: String,

    /// Shortcode derived from `source_url`
    pub shortcode: Shortcode,

    /// Location of the downloaded `.mp4`
    pub local_path: PathBuf,

    /// Original caption, possibly empty
    #[serde(default)]
    pub caption: String,

    /// Username of the owning account
    pub owner_handle: String,

    /// Publish time of the post
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl DownloadedReel {
    /// Build a downloaded reel from resolved metadata and the written file.
    pub fn from_post(source_url: impl Into<String>, post: ReelPost, local_path: PathBuf) -> Self {
        let caption = post.caption_or_default().to_string();
        Self {
            source_url: source_url.into(),
            shortcode: post.shortcode,
            local_path,
            caption,
            owner_handle: post.owner_handle,
            published_at: post.published_at,
        }
    }
}
