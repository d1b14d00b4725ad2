//! Bot error types.

use thiserror::Error;

use reel_fetch::FetchError;
use reel_telegram::UploadError;

pub type RelayResult<T> = Result<T, RelayError>;

/// Invalid or missing startup configuration. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{var} has an invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(var: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        Self::Invalid {
            var,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Message does not contain an Instagram URL")]
    Validation,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Reply failed: {0}")]
    Reply(String),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

impl RelayError {
    pub fn reply(msg: impl Into<String>) -> Self {
        Self::Reply(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_is_transparent() {
        let err: RelayError = FetchError::RequestFailed {
            status: 500,
            body: "upstream exploded".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Instagram returned 500: upstream exploded");
    }

    #[test]
    fn test_upload_error_keeps_body() {
        let err: RelayError = UploadError::Rejected {
            status: 400,
            body: "Bad Request: wrong file".to_string(),
        }
        .into();
        assert!(err.to_string().contains("Bad Request: wrong file"));
    }

    #[test]
    fn test_config_error_messages() {
        assert_eq!(ConfigError::Missing("BOT_TOKEN").to_string(), "BOT_TOKEN is not set");

        let err = ConfigError::invalid("UPLOAD_TIMEOUT_SECS", "soon", "not a number");
        assert!(err.to_string().contains("UPLOAD_TIMEOUT_SECS"));
        assert!(err.to_string().contains("\"soon\""));
    }
}
