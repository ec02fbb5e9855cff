//! Unsolicited messages to the monitored text channel.
//!
//! Command replies go through the interaction response. Only events the bot raises on
//! its own, like the inactivity disconnect, need to post a plain channel message.

use serenity::all::{ChannelId, CreateMessage};
use serenity::async_trait;
use serenity::http::Http;
use std::sync::Arc;

use crate::error::AppError;

/// Posts text messages to a channel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_message(&self, channel_id: ChannelId, content: String) -> Result<(), AppError>;
}

/// `Notifier` that posts through the Discord HTTP API.
pub struct DiscordNotifier {
    /// Discord HTTP client for sending messages
    http: Arc<Http>,
}

impl DiscordNotifier {
    /// Creates a new DiscordNotifier.
    ///
    /// # Arguments
    /// - `http` - Arc-wrapped Discord HTTP client, shared with the gateway client
    ///
    /// # Returns
    /// - `DiscordNotifier` - Notifier posting as the bot user
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send_message(&self, channel_id: ChannelId, content: String) -> Result<(), AppError> {
        let message = CreateMessage::new().content(content);

        channel_id.send_message(&*self.http, message).await?;

        Ok(())
    }
}
