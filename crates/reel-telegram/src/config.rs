//! Telegram uploader configuration.

use std::fmt;
use std::time::Duration;

/// Default Bot API base URL.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Default upload timeout in seconds.
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 120;

/// Configuration for the Telegram uploader.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot API base URL
    pub api_url: String,
    /// Bot authentication token
    pub bot_token: String,
    /// Timeout for a single upload
    pub upload_timeout: Duration,
}

impl TelegramConfig {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            bot_token: bot_token.into(),
            upload_timeout: Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    /// Full URL of a Bot API method.
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.bot_token, method)
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_url", &self.api_url)
            .field("bot_token", &"<redacted>")
            .field("upload_timeout", &self.upload_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = TelegramConfig::new("123:abc");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.upload_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_method_url() {
        let config = TelegramConfig::new("123:abc").with_api_url("http://localhost:8081/");
        assert_eq!(
            config.method_url("sendVideo"),
            "http://localhost:8081/bot123:abc/sendVideo"
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", TelegramConfig::new("123:secret"));
        assert!(!debug.contains("secret"));
    }
}
