//! Telegram polling bootstrap.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::prelude::*;
use tracing::{debug, info};

use crate::error::{RelayError, RelayResult};
use crate::handler::{RelayHandler, Replier};

/// Replies to the chat an inbound message came from.
pub struct ChatReplier {
    bot: Bot,
    chat_id: ChatId,
}

impl ChatReplier {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl Replier for ChatReplier {
    async fn reply(&self, text: &str) -> RelayResult<()> {
        self.bot
            .send_message(self.chat_id, text)
            .await
            .map_err(|e| RelayError::reply(e.to_string()))?;
        Ok(())
    }
}

/// Build a bot client against the configured Bot API base URL.
pub fn build_bot(token: &str, api_url: url::Url) -> Bot {
    Bot::new(token).set_api_url(api_url)
}

/// Verify the token and switch the bot to polling mode.
///
/// Returns the bot's username. Any registered webhook is removed and updates
/// queued while the bot was offline are dropped.
pub async fn prepare_polling(bot: &Bot) -> RelayResult<String> {
    let me = bot.get_me().await?;
    let username = me.username().to_string();

    bot.delete_webhook().drop_pending_updates(true).await?;
    info!(username = %username, "Webhook cleared, pending updates dropped");

    Ok(username)
}

/// Whether a message should be handed to the relay handler.
///
/// Bot commands such as `/start` are ignored.
pub fn is_relay_candidate(text: &str) -> bool {
    !text.trim_start().starts_with('/')
}

/// Run the long-polling dispatcher until Ctrl-C.
pub async fn run_polling(bot: Bot, handler: Arc<RelayHandler>) {
    let tree = Update::filter_message().branch(
        dptree::filter(|msg: Message| msg.text().map(is_relay_candidate).unwrap_or(false))
            .endpoint(on_text_message),
    );

    Dispatcher::builder(bot, tree)
        .dependencies(dptree::deps![handler])
        .default_handler(|update| async move {
            debug!(update_id = ?update.id, "Ignoring update");
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn on_text_message(bot: Bot, msg: Message, handler: Arc<RelayHandler>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let replier = ChatReplier::new(bot, msg.chat.id);
    let outcome = handler.handle(text, &replier).await;
    debug!(chat_id = %msg.chat.id, outcome = %outcome, "Message handled");

    Ok(())
}
