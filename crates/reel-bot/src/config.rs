//! Bot configuration.

use std::path::PathBuf;
use std::time::Duration;

use reel_fetch::InstagramConfig;
use reel_telegram::config::{DEFAULT_API_URL, DEFAULT_UPLOAD_TIMEOUT_SECS};
use reel_telegram::TelegramConfig;

use crate::error::ConfigError;

const DEFAULT_DOWNLOAD_DIR: &str = "downloads";

/// Bot configuration loaded from the environment.
#[derive(Clone)]
pub struct BotConfig {
    /// Telegram bot token
    pub bot_token: String,
    /// Destination chat for relayed reels (`-100…` or `@channel`)
    pub chat_id: String,
    /// Transient storage for downloaded videos
    pub download_dir: PathBuf,
    /// Upper bound for a single `sendVideo` call
    pub upload_timeout: Duration,
    /// Bot API base URL
    pub telegram_api_url: url::Url,
    /// Instagram endpoints and request identity
    pub instagram: InstagramConfig,
    /// Port for the Prometheus exporter; disabled when unset
    pub metrics_port: Option<u16>,
}

impl BotConfig {
    /// Create config from environment variables.
    ///
    /// `BOT_TOKEN` and `CHAT_ID` are required. Optional values fall back to
    /// their defaults when unset but are rejected when present and malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = required("BOT_TOKEN")?;
        let chat_id = required("CHAT_ID")?;

        let download_dir = optional("DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIR));

        let upload_timeout = match optional("UPLOAD_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                Ok(_) => {
                    return Err(ConfigError::invalid(
                        "UPLOAD_TIMEOUT_SECS",
                        raw,
                        "must be greater than zero",
                    ))
                }
                Err(e) => return Err(ConfigError::invalid("UPLOAD_TIMEOUT_SECS", raw, e)),
            },
            None => Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS),
        };

        let raw_api_url = optional("TELEGRAM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let telegram_api_url = url::Url::parse(&raw_api_url)
            .map_err(|e| ConfigError::invalid("TELEGRAM_API_URL", raw_api_url.clone(), e))?;

        let metrics_port = match optional("METRICS_PORT") {
            Some(raw) => Some(
                raw.parse::<u16>()
                    .map_err(|e| ConfigError::invalid("METRICS_PORT", raw.clone(), e))?,
            ),
            None => None,
        };

        Ok(Self {
            bot_token,
            chat_id,
            download_dir,
            upload_timeout,
            telegram_api_url,
            instagram: InstagramConfig::from_env(),
            metrics_port,
        })
    }

    /// Uploader settings derived from this config.
    pub fn telegram_config(&self) -> TelegramConfig {
        TelegramConfig::new(self.bot_token.clone())
            .with_api_url(self.telegram_api_url.as_str().trim_end_matches('/'))
            .with_upload_timeout(self.upload_timeout)
    }
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("download_dir", &self.download_dir)
            .field("upload_timeout", &self.upload_timeout)
            .field("telegram_api_url", &self.telegram_api_url.as_str())
            .field("instagram", &self.instagram)
            .field("metrics_port", &self.metrics_port)
            .finish()
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    optional(var).ok_or(ConfigError::Missing(var))
}

/// Read a variable, treating blank values as unset.
fn optional(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
