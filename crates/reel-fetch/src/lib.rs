//! Instagram reel fetching.
//!
//! This crate provides:
//! - An Instagram GraphQL client that resolves a post by shortcode
//! - Streaming video download into a request-scoped transient file
//! - The `ReelFetcher` seam used by the message handler

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod fs_utils;
pub mod types;
pub mod workdir;


pub use client::InstagramClient;
pub use config::InstagramConfig;
pub use error::{FetchError, FetchResult};
pub use fetcher::{InstagramFetcher, ReelFetcher};
pub use workdir::TransientDir;
