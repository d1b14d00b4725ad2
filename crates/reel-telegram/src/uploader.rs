//! `sendVideo` upload client.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::config::TelegramConfig;
use crate::error::{UploadError, UploadResult};
use crate::types::{ApiResponse, VideoUploadRequest};

/// Posts a local video with its caption to a chat.
///
/// A single attempt is made; any non-2xx response is a failure.
#[async_trait]
pub trait VideoUploader: Send + Sync {
    async fn upload(&self, request: VideoUploadRequest) -> UploadResult<()>;
}

/// Uploader backed by the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramUploader {
    http: Client,
    config: TelegramConfig,
}

impl TelegramUploader {
    /// Create a new uploader.
    pub fn new(config: TelegramConfig) -> UploadResult<Self> {
        let http = Client::builder()
            .timeout(config.upload_timeout)
            .build()
            .map_err(UploadError::network)?;

        Ok(Self { http, config })
    }

    fn classify(&self, e: reqwest::Error) -> UploadError {
        if e.is_timeout() {
            UploadError::Timeout(self.config.upload_timeout)
        } else {
            UploadError::network(e)
        }
    }
}

#[async_trait]
impl VideoUploader for TelegramUploader {
    async fn upload(&self, request: VideoUploadRequest) -> UploadResult<()> {
        let chat_id = request.chat_id.clone();
        let file = request.file.clone();
        let form = request.into_form().await?;

        debug!(chat_id = %chat_id, file = %file.display(), "Sending video to Telegram");

        let response = self
            .http
            .post(self.config.method_url("sendVideo"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // Telegram reports failures with non-2xx codes, but guard the envelope too
        if let Ok(envelope) = serde_json::from_str::<ApiResponse>(&body) {
            if !envelope.ok {
                return Err(UploadError::Rejected {
                    status: envelope.error_code.unwrap_or(status.as_u16()),
                    body,
                });
            }
        }

        info!(chat_id = %chat_id, file = %file.display(), "Video uploaded to Telegram");
        Ok(())
    }
}
