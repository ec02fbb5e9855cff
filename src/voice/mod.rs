//! Discord voice gateway.
//!
//! Joining a voice channel is a gateway handshake: the bot sends a voice state update
//! and Discord answers with the bot's voice session id and the voice server's token
//! and endpoint. The bot never opens the voice socket itself, the audio node does,
//! so the only thing taken from the handshake is `VoiceConnectionInfo`.

pub mod songbird;

use serenity::all::{ChannelId, GuildId};
use serenity::async_trait;

use crate::{error::voice::VoiceError, model::voice::VoiceConnectionInfo};

/// Joins and leaves voice channels on the bot's behalf.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoiceGateway: Send + Sync {
    /// Moves the bot into `channel_id` and waits for the handshake to finish.
    async fn join(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<VoiceConnectionInfo, VoiceError>;

    /// Leaves voice in the guild. Leaving while not connected succeeds.
    async fn leave(&self, guild_id: GuildId) -> Result<(), VoiceError>;
}
