//! Reel fetching: shortcode → metadata → local video file.

use async_trait::async_trait;
use tracing::info;

use reel_models::{extract_shortcode, DownloadedReel, RequestId};

use crate::client::InstagramClient;
use crate::error::{FetchError, FetchResult};
use crate::workdir::TransientDir;

/// Resolves a source URL into a reel stored on local disk.
///
/// Implementations write exactly one file per successful call and leave
/// nothing behind when they fail. The returned path always points to a
/// playable `.mp4`.
#[async_trait]
pub trait ReelFetcher: Send + Sync {
    async fn fetch(&self, source_url: &str, request_id: &RequestId) -> FetchResult<DownloadedReel>;
}

/// Fetcher backed by the Instagram web API.
#[derive(Clone)]
pub struct InstagramFetcher {
    client: InstagramClient,
    workdir: TransientDir,
}

impl InstagramFetcher {
    pub fn new(client: InstagramClient, workdir: TransientDir) -> Self {
        Self { client, workdir }
    }
}

#[async_trait]
impl ReelFetcher for InstagramFetcher {
    async fn fetch(&self, source_url: &str, request_id: &RequestId) -> FetchResult<DownloadedReel> {
        let shortcode = extract_shortcode(source_url)?;
        let post = self.client.resolve_post(&shortcode).await?;

        let video_url = match post.video_url.clone() {
            Some(url) => url,
            None => return Err(FetchError::NotAVideo(shortcode.to_string())),
        };

        let local_path = self.workdir.video_path(&shortcode, request_id);
        self.client.download_video(&video_url, &local_path).await?;

        info!(
            request_id = %request_id,
            shortcode = %shortcode,
            owner = %post.owner_handle,
            "Fetched reel"
        );

        Ok(DownloadedReel::from_post(source_url, post, local_path))
    }
}
