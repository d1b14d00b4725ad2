//! Telegram Bot API upload client.
//!
//! This crate provides:
//! - `VideoUploadRequest`, encoded as a multipart form at the HTTP boundary
//! - `TelegramUploader`, a `sendVideo` client with a bounded timeout
//! - The `VideoUploader` seam used by the message handler

pub mod config;
pub mod error;
pub mod types;
pub mod uploader;


pub use config::TelegramConfig;
pub use error::{UploadError, UploadResult};
pub use types::{ApiResponse, VideoUploadRequest};
pub use uploader::{TelegramUploader, VideoUploader};
