//! Instagram reel relay bot.
//!
//! This crate provides:
//! - Environment configuration with fail-fast validation
//! - The per-message relay handler (validate → fetch → upload → cleanup)
//! - Telegram polling bootstrap and chat replies
//! - Structured request logging and metrics

pub mod bot;
pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod messages;
pub mod metrics;


pub use config::BotConfig;
pub use error::{ConfigError, RelayError, RelayResult};
pub use handler::{RelayHandler, RelayOutcome, Replier};
pub use logging::{LogFormat, RequestLogger};
