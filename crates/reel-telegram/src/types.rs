//! Bot API request/response types.

use std::io::ErrorKind;
use std::path::PathBuf;

use reqwest::multipart::{Form, Part};
use reqwest::Body;
use serde::Deserialize;

use crate::error::{UploadError, UploadResult};

/// One `sendVideo` call: a local video plus its caption for a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoUploadRequest {
    /// Destination chat (`-100…` id or `@channel`)
    pub chat_id: String,
    /// Caption text
    pub caption: String,
    /// Local video file
    pub file: PathBuf,
}

impl VideoUploadRequest {
    pub fn new(chat_id: impl Into<String>, caption: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            chat_id: chat_id.into(),
            caption: caption.into(),
            file: file.into(),
        }
    }

    /// Encode as a multipart form.
    ///
    /// The video is opened here and streamed, never buffered in memory.
    pub async fn into_form(self) -> UploadResult<Form> {
        let file = match tokio::fs::File::open(&self.file).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(UploadError::FileNotFound(self.file))
            }
            Err(e) => return Err(e.into()),
        };
        let length = file.metadata().await?.len();

        let file_name = self
            .file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("video.mp4")
            .to_string();

        let video = Part::stream_with_length(Body::from(file), length)
            .file_name(file_name)
            .mime_str("video/mp4")
            .map_err(UploadError::network)?;

        Ok(Form::new()
            .text("chat_id", self.chat_id)
            .text("caption", self.caption)
            .part("video", video))
    }
}

/// Envelope of every Bot API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<u16>,
}
