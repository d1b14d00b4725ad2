//! Error types for reel fetching.

use reel_models::ShortcodeError;
use thiserror::Error;

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Errors that can occur while resolving or downloading a reel.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid Instagram URL: {0}")]
    InvalidUrl(#[from] ShortcodeError),

    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Not a video: {0}")]
    NotAVideo(String),

    #[error("Instagram returned {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    pub fn not_found(shortcode: impl Into<String>) -> Self {
        Self::NotFound(shortcode.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Map a non-success HTTP status to an error.
    pub fn from_http_status(status: u16, shortcode: &str, body: impl Into<String>) -> Self {
        match status {
            404 => Self::not_found(shortcode),
            _ => Self::RequestFailed {
                status,
                body: body.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status_404() {
        let err = FetchError::from_http_status(404, "ABC", "nope");
        assert!(matches!(err, FetchError::NotFound(ref s) if s == "ABC"));
    }

    #[test]
    fn test_from_http_status_keeps_body() {
        let err = FetchError::from_http_status(429, "ABC", "Please wait a few minutes");
        assert!(matches!(err, FetchError::RequestFailed { status: 429, .. }));
        assert!(err.to_string().contains("Please wait a few minutes"));
    }

    #[test]
    fn test_shortcode_error_converts_to_invalid_url() {
        let err: FetchError = ShortcodeError::EmptyUrl.into();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }
}
