//! Shared data models for the reel relay bot.
//!
//! This crate provides:
//! - Request identifiers used for logging and transient file names
//! - Instagram shortcode parsing and URL helpers
//! - Resolved post metadata and downloaded reel records
//! - Caption composition with the attribution footer

pub mod caption;
pub mod reel;
pub mod request;
pub mod utils;

// Re-export common types
pub use caption::{compose_caption, CAPTION_LIMIT};
pub use reel::{DownloadedReel, ReelPost};
pub use request::RequestId;
pub use utils::{
    extract_instagram_url, extract_shortcode, is_instagram_url, Shortcode, ShortcodeError,
    ShortcodeResult, INSTAGRAM_HOST,
};
