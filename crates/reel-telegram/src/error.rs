//! Upload error types.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub type UploadResult<T> = Result<T, UploadError>;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Telegram rejected upload ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Video file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Upload timed out after {0:?}")]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    /// Wrap a transport error.
    ///
    /// The request URL embeds the bot token, so it is stripped before the
    /// error can reach logs or chat replies.
    pub fn network(e: reqwest::Error) -> Self {
        Self::Network(e.without_url())
    }
}
