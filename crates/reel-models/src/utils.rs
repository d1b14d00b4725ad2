//! Utility functions for Instagram URL parsing and validation.
//!
//! Inbound chat text is untrusted. Validation is a plain host substring
//! check; shortcode extraction takes the last non-empty path segment.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Host substring that marks a message as an Instagram link.
pub const INSTAGRAM_HOST: &str = "instagram.com";

/// Errors that can occur during shortcode extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortcodeError {
    /// Input was empty or whitespace
    #[error("URL is empty")]
    EmptyUrl,
    /// URL has no path segment to use as a shortcode
    #[error("no shortcode found in URL: {0}")]
    MissingShortcode(String),
}

/// Result type for shortcode extraction.
pub type ShortcodeResult<T> = Result<T, ShortcodeError>;

/// Identifier of an Instagram post, taken from its URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shortcode(String);

impl Shortcode {
    /// Create a shortcode, rejecting empty values.
    pub fn new(s: impl Into<String>) -> ShortcodeResult<Self> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ShortcodeError::MissingShortcode(s));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filesystem-safe form of the shortcode.
    ///
    /// Keeps ASCII alphanumerics, `-` and `_`; everything else is dropped.
    pub fn file_stem(&self) -> String {
        let stem: String = self
            .0
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        if stem.is_empty() {
            "reel".to_string()
        } else {
            stem
        }
    }
}

impl fmt::Display for Shortcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check if the text mentions an Instagram URL.
pub fn is_instagram_url(text: &str) -> bool {
    text.to_ascii_lowercase().contains(INSTAGRAM_HOST)
}

/// Return the first whitespace-delimited token that contains the Instagram host.
///
/// Lets users paste a link together with other words.
pub fn extract_instagram_url(text: &str) -> Option<&str> {
    text.split_whitespace().find(|token| is_instagram_url(token))
}

/// Extract the post shortcode from an Instagram URL.
///
/// Supports `/reel/`, `/reels/`, `/p/` and `/tv/` links, with or without a
/// trailing slash, query string or fragment:
/// - https://www.instagram.com/reel/SHORTCODE/
/// - https://instagram.com/p/SHORTCODE?igsh=abc
/// - instagram.com/reel/SHORTCODE
pub fn extract_shortcode(source_url: &str) -> ShortcodeResult<Shortcode> {
    let source_url = source_url.trim();
    if source_url.is_empty() {
        return Err(ShortcodeError::EmptyUrl);
    }

    let segment = match Url::parse(source_url) {
        Ok(url) => url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string),
        // Scheme-less links are not absolute URLs; fall back to plain splitting
        Err(_) => last_path_segment(source_url),
    };

    match segment {
        Some(segment) => Shortcode::new(segment),
        None => Err(ShortcodeError::MissingShortcode(source_url.to_string())),
    }
}

/// Last non-empty `/`-delimited segment, ignoring query string and fragment.
fn last_path_segment(raw: &str) -> Option<String> {
    let end = raw.find(|c| c == '?' || c == '#').unwrap_or(raw.len());
    let path = raw[..end].trim_end_matches('/');

    // A bare host has no path to take a shortcode from
    if !path.contains('/') {
        return None;
    }

    path.rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
