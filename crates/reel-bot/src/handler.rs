//! Per-message relay handler.
//!
//! One inbound text runs `validate → fetch → compose → upload → cleanup`.
//! Every failure is converted into a chat reply here; nothing propagates to
//! the dispatcher.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::Instrument;

use reel_fetch::fs_utils::TransientFile;
use reel_fetch::ReelFetcher;
use reel_models::{compose_caption, extract_instagram_url, RequestId};
use reel_telegram::{VideoUploadRequest, VideoUploader};

use crate::error::{RelayError, RelayResult};
use crate::logging::RequestLogger;
use crate::messages::{error_reply, ACK_REPLY, GUIDANCE_REPLY, SUCCESS_REPLY};
use crate::metrics;

const OPERATION: &str = "relay_reel";

/// Sends status text back to the chat a message came from.
#[async_trait]
pub trait Replier: Send + Sync {
    async fn reply(&self, text: &str) -> RelayResult<()>;
}

/// How a single message was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// No Instagram URL in the text
    Rejected,
    /// Video uploaded to the destination chat
    Relayed,
    FetchFailed,
    UploadFailed,
}

impl RelayOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayOutcome::Rejected => "rejected",
            RelayOutcome::Relayed => "relayed",
            RelayOutcome::FetchFailed => "fetch_failed",
            RelayOutcome::UploadFailed => "upload_failed",
        }
    }
}

impl std::fmt::Display for RelayOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relays Instagram reels to a fixed destination chat.
pub struct RelayHandler {
    fetcher: Arc<dyn ReelFetcher>,
    uploader: Arc<dyn VideoUploader>,
    destination_chat: String,
}

impl RelayHandler {
    pub fn new(
        fetcher: Arc<dyn ReelFetcher>,
        uploader: Arc<dyn VideoUploader>,
        destination_chat: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            uploader,
            destination_chat: destination_chat.into(),
        }
    }

    /// Pick the Instagram URL out of a message.
    pub fn validate(text: &str) -> RelayResult<&str> {
        extract_instagram_url(text).ok_or(RelayError::Validation)
    }

    /// Handle one inbound message with a fresh request ID.
    pub async fn handle(&self, text: &str, replier: &dyn Replier) -> RelayOutcome {
        self.handle_request(&RequestId::new(), text, replier).await
    }

    pub async fn handle_request(
        &self,
        request_id: &RequestId,
        text: &str,
        replier: &dyn Replier,
    ) -> RelayOutcome {
        let logger = RequestLogger::new(request_id, OPERATION);
        let span = logger.create_span();

        let outcome = self
            .relay(request_id, text, replier, &logger)
            .instrument(span)
            .await;

        metrics::record_request(outcome);
        outcome
    }

    async fn relay(
        &self,
        request_id: &RequestId,
        text: &str,
        replier: &dyn Replier,
        logger: &RequestLogger,
    ) -> RelayOutcome {
        let source_url = match Self::validate(text) {
            Ok(url) => url,
            Err(e) => {
                logger.log_warning(&e.to_string());
                send_reply(replier, GUIDANCE_REPLY, logger).await;
                return RelayOutcome::Rejected;
            }
        };

        logger.log_start(source_url);
        send_reply(replier, ACK_REPLY, logger).await;

        let started = Instant::now();
        let reel = match self.fetcher.fetch(source_url, request_id).await {
            Ok(reel) => reel,
            Err(e) => {
                let e = RelayError::from(e);
                logger.log_error(&format!("fetch failed: {}", e));
                send_reply(replier, &error_reply(&e), logger).await;
                return RelayOutcome::FetchFailed;
            }
        };
        metrics::record_fetch_duration(started.elapsed());

        let transient = TransientFile::new(reel.local_path.clone());
        logger.log_progress(&format!(
            "downloaded {} by @{} to {}",
            reel.shortcode,
            reel.owner_handle,
            transient.path().display()
        ));

        let caption = compose_caption(&reel.caption, &reel.owner_handle);
        let request = VideoUploadRequest::new(
            self.destination_chat.clone(),
            caption,
            transient.path().to_path_buf(),
        );

        let started = Instant::now();
        let outcome = match self.uploader.upload(request).await {
            Ok(()) => {
                metrics::record_upload_duration(started.elapsed());
                logger.log_completion(&format!(
                    "relayed {} to {}",
                    reel.shortcode, self.destination_chat
                ));
                send_reply(replier, SUCCESS_REPLY, logger).await;
                RelayOutcome::Relayed
            }
            Err(e) => {
                let e = RelayError::from(e);
                logger.log_error(&format!("upload failed: {}", e));
                send_reply(replier, &error_reply(&e), logger).await;
                RelayOutcome::UploadFailed
            }
        };

        transient.cleanup().await;
        outcome
    }
}

async fn send_reply(replier: &dyn Replier, text: &str, logger: &RequestLogger) {
    if let Err(e) = replier.reply(text).await {
        logger.log_warning(&format!("reply failed: {}", e));
    }
}
