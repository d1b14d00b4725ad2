//! Instagram HTTP client.

use std::path::Path;

use futures_util::StreamExt;
use reqwest::{header, Client};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use reel_models::{ReelPost, Shortcode};

use crate::config::InstagramConfig;
use crate::error::{FetchError, FetchResult};
use crate::fs_utils::{move_file, TransientFile};
use crate::types::{GraphqlResponse, ShortcodeQueryForm};
use crate::workdir::TransientDir;

/// Client for Instagram post metadata and media.
///
/// No request timeout is configured: large reels on slow CDNs can take a
/// while, and the fetch path is not time-bounded.
#[derive(Clone)]
pub struct InstagramClient {
    http: Client,
    config: InstagramConfig,
}

impl InstagramClient {
    /// Create a new Instagram client.
    pub fn new(config: InstagramConfig) -> FetchResult<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self { http, config })
    }

    /// Resolve a post's metadata by shortcode.
    pub async fn resolve_post(&self, shortcode: &Shortcode) -> FetchResult<ReelPost> {
        let url = format!("{}/graphql/query", self.config.base_url);

        debug!(shortcode = %shortcode, "Resolving Instagram post via {}", url);

        let mut request = self
            .http
            .post(&url)
            .header("X-IG-App-ID", &self.config.app_id)
            .header(header::ACCEPT, "*/*")
            .header(
                header::REFERER,
                format!("{}/reel/{}/", self.config.base_url, shortcode),
            )
            .form(&ShortcodeQueryForm::new(shortcode, &self.config.doc_id));

        if let Some(session_id) = &self.config.session_id {
            request = request.header(header::COOKIE, format!("sessionid={}", session_id));
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::from_http_status(
                status.as_u16(),
                shortcode.as_str(),
                body,
            ));
        }

        let body = response.text().await?;
        let parsed: GraphqlResponse = serde_json::from_str(&body).map_err(|e| {
            FetchError::invalid_response(format!("undecodable GraphQL response: {}", e))
        })?;

        match parsed.data {
            Some(data) => data
                .xdt_shortcode_media
                .map(|media| media.into_post(shortcode.clone()))
                .ok_or_else(|| FetchError::not_found(shortcode.as_str())),
            None => Err(FetchError::invalid_response(
                parsed
                    .message
                    .or(parsed.status)
                    .unwrap_or_else(|| "response has no data".to_string()),
            )),
        }
    }

    /// Download a video resource to `dest`.
    ///
    /// The body is streamed into a `.part` file next to `dest` and moved into
    /// place once complete. On failure, or if the returned future is dropped
    /// mid-download, nothing is left on disk.
    pub async fn download_video(&self, video_url: &str, dest: &Path) -> FetchResult<u64> {
        let partial = TransientFile::new(TransientDir::partial_path(dest));

        let written = match self.stream_to_file(video_url, partial.path()).await {
            Ok(written) => written,
            Err(e) => {
                partial.cleanup().await;
                return Err(e);
            }
        };

        if let Err(e) = move_file(partial.path(), dest).await {
            partial.cleanup().await;
            return Err(e);
        }
        partial.keep();

        info!(
            output = %dest.display(),
            size_mb = written as f64 / (1024.0 * 1024.0),
            "Downloaded reel video"
        );

        Ok(written)
    }

    async fn stream_to_file(&self, video_url: &str, path: &Path) -> FetchResult<u64> {
        let response = self.http.get(video_url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let is_image = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("image/"))
            .unwrap_or(false);
        if is_image {
            return Err(FetchError::NotAVideo(video_url.to_string()));
        }

        let mut file = fs::File::create(path).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        if written == 0 {
            return Err(FetchError::invalid_response("video body was empty"));
        }

        Ok(written)
    }
}
