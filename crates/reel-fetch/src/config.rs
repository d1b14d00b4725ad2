//! Instagram client configuration.

use std::fmt;

/// Default GraphQL document id for the shortcode media query.
pub const DEFAULT_DOC_ID: &str = "8845758582119845";

/// Default web app id sent as `X-IG-App-ID`.
pub const DEFAULT_APP_ID: &str = "936619743392459";

/// Default desktop browser user agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the Instagram client.
#[derive(Clone)]
pub struct InstagramConfig {
    /// Base URL of the Instagram web endpoints
    pub base_url: String,
    /// GraphQL document id used to resolve posts
    pub doc_id: String,
    /// Value of the `X-IG-App-ID` header
    pub app_id: String,
    /// User agent for metadata and media requests
    pub user_agent: String,
    /// Optional `sessionid` cookie for logged-in access
    pub session_id: Option<String>,
}

impl Default for InstagramConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.instagram.com".to_string(),
            doc_id: DEFAULT_DOC_ID.to_string(),
            app_id: DEFAULT_APP_ID.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            session_id: None,
        }
    }
}

impl fmt::Debug for InstagramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstagramConfig")
            .field("base_url", &self.base_url)
            .field("doc_id", &self.doc_id)
            .field("app_id", &self.app_id)
            .field("user_agent", &self.user_agent)
            .field("session_id", &self.session_id.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl InstagramConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("INSTAGRAM_BASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            doc_id: std::env::var("INSTAGRAM_DOC_ID").unwrap_or(defaults.doc_id),
            app_id: std::env::var("INSTAGRAM_APP_ID").unwrap_or(defaults.app_id),
            user_agent: std::env::var("INSTAGRAM_USER_AGENT").unwrap_or(defaults.user_agent),
            session_id: std::env::var("INSTAGRAM_SESSIONID")
                .ok()
                .filter(|s| !s.trim().is_empty()),
        }
    }

    /// Point the client at another base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_defaults() {
        let config = InstagramConfig::default();
        assert_eq!(config.base_url, "https://www.instagram.com");
        assert_eq!(config.doc_id, DEFAULT_DOC_ID);
        assert!(config.session_id.is_none());
    }

    #[test]
    fn test_debug_redacts_session() {
        let config = InstagramConfig {
            session_id: Some("secret-session".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-session"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        std::env::set_var("INSTAGRAM_BASE_URL", "http://localhost:9999/");
        std::env::set_var("INSTAGRAM_SESSIONID", "   ");
        let config = InstagramConfig::from_env();
        std::env::remove_var("INSTAGRAM_BASE_URL");
        std::env::remove_var("INSTAGRAM_SESSIONID");

        assert_eq!(config.base_url, "http://localhost:9999");
        assert!(config.session_id.is_none());
    }
}
