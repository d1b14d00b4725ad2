//! Caption composition for relayed reels.
//!
//! The outbound caption is the original caption followed by a fixed
//! attribution block crediting the owning account.

/// Maximum caption length accepted by Telegram, in UTF-16 code units.
pub const CAPTION_LIMIT: usize = 1024;

const DIVIDER: &str = "──────────────";
const ELLIPSIS: char = '…';

/// Compose the outbound caption for a relayed reel.
///
/// ```text
/// <original caption>
///
/// ──────────────
/// 🎥 Credit: @<owner_handle>
/// 🔁 Reposted via Telegram Bot
/// ──────────────
/// ```
///
/// An empty caption still produces the blank line before the divider. When
/// the result would exceed [`CAPTION_LIMIT`], only the original caption is
/// shortened, so the attribution block is always kept whole.
pub fn compose_caption(caption: &str, owner_handle: &str) -> String {
    let footer = attribution_footer(owner_handle);

    let footer_len = utf16_len(&footer);
    if utf16_len(caption) + footer_len <= CAPTION_LIMIT {
        return format!("{}{}", caption, footer);
    }

    let budget = CAPTION_LIMIT
        .saturating_sub(footer_len)
        .saturating_sub(ELLIPSIS.len_utf16());
    let kept = truncate_utf16(caption, budget);

    format!("{}{}{}", kept.trim_end(), ELLIPSIS, footer)
}

fn attribution_footer(owner_handle: &str) -> String {
    format!(
        "\n\n{divider}\n🎥 Credit: @{handle}\n🔁 Reposted via Telegram Bot\n{divider}\n",
        divider = DIVIDER,
        handle = owner_handle
    )
}

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Longest prefix of `text` that fits in `budget` UTF-16 code units.
fn truncate_utf16(text: &str, budget: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        used += ch.len_utf16();
        if used > budget {
            return &text[..idx];
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK_X: &str =
        "\n\n──────────────\n🎥 Credit: @x\n🔁 Reposted via Telegram Bot\n──────────────\n";

    #[test]
    fn test_empty_caption_starts_with_blank_line() {
        assert_eq!(compose_caption("", "x"), BLOCK_X);
    }

    #[test]
    fn test_caption_followed_by_block() {
        assert_eq!(compose_caption("hi", "x"), format!("hi{}", BLOCK_X));
    }

    #[test]
    fn test_credits_owner() {
        assert_eq!(
            compose_caption("nice", "alice"),
            "nice\n\n──────────────\n🎥 Credit: @alice\n🔁 Reposted via Telegram Bot\n──────────────\n"
        );
    }

    #[test]
    fn test_overlong_caption_keeps_footer() {
        let caption = "a".repeat(2000);
        let composed = compose_caption(&caption, "alice");

        assert_eq!(composed.encode_utf16().count(), CAPTION_LIMIT);
        assert!(composed.ends_with(&attribution_footer("alice")));
        assert!(composed.contains('…'));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let caption = "🎬".repeat(1000);
        let composed = compose_caption(&caption, "bob");

        assert!(composed.encode_utf16().count() <= CAPTION_LIMIT);
        assert!(composed.ends_with("@bob\n🔁 Reposted via Telegram Bot\n──────────────\n"));
    }

    #[test]
    fn test_caption_at_limit_is_untouched() {
        let footer_len = attribution_footer("x").encode_utf16().count();
        let caption = "b".repeat(CAPTION_LIMIT - footer_len);
        assert_eq!(compose_caption(&caption, "x"), format!("{}{}", caption, BLOCK_X));
    }
}
