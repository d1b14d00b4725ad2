//! Chat reply texts.

use std::fmt::Display;

pub const GUIDANCE_REPLY: &str = "❌ Instagram Reel URL bhejo";
pub const ACK_REPLY: &str = "⏬ Reel download ho rahi hai...";
pub const SUCCESS_REPLY: &str = "✅ Reel yahin upload kar di gayi";

/// Reply sent when a fetch or upload fails.
pub fn error_reply(detail: impl Display) -> String {
    format!("❌ Error:\n{}", detail)
}
