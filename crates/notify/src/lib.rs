use async_trait::async_trait;
use teloxide::prelude::*;
use tracing::{info, warn};

use common::Channel;

/// Outbound alert sink.
///
/// Delivery is fire-and-forget from the screening core's perspective:
/// implementations log and swallow their own failures.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, channel: Channel, message: &str);
}

/// Sink that writes alerts to the process log. Used when no Telegram
/// token is configured.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, channel: Channel, message: &str) {
        info!(channel = %channel, "{message}");
    }
}

/// Sink that fans alerts out to a fixed list of Telegram chats.
pub struct TelegramNotifier {
    bot: Bot,
    chat_ids: Vec<ChatId>,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>, chat_ids: &[i64]) -> Self {
        Self {
            bot: Bot::new(token.into()),
            chat_ids: chat_ids.iter().map(|&id| ChatId(id)).collect(),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, _channel: Channel, message: &str) {
        for &chat_id in &self.chat_ids {
            if let Err(e) = self.bot.send_message(chat_id, message).await {
                warn!(chat_id = ?chat_id, error = %e, "Failed to send Telegram alert");
            }
        }
    }
}
