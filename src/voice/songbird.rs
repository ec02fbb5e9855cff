use serenity::all::{ChannelId, GuildId};
use serenity::async_trait;
use songbird::{error::JoinError, Songbird};
use std::sync::Arc;

use crate::{error::voice::VoiceError, model::voice::VoiceConnectionInfo, voice::VoiceGateway};

/// `VoiceGateway` backed by songbird's gateway-only mode.
///
/// Songbird tracks the pending handshake per guild and resolves it once both the
/// voice state and voice server updates arrived on the serenity shard.
pub struct SongbirdGateway {
    songbird: Arc<Songbird>,
}

impl SongbirdGateway {
    pub fn new(songbird: Arc<Songbird>) -> Self {
        Self { songbird }
    }
}

#[async_trait]
impl VoiceGateway for SongbirdGateway {
    async fn join(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<VoiceConnectionInfo, VoiceError> {
        let (info, call) = self.songbird.join_gateway(guild_id, channel_id).await?;

        // The bot only relays audio through the node, it never listens.
        if let Err(e) = call.lock().await.deafen(true).await {
            tracing::warn!("Failed to self-deafen in guild {}: {}", guild_id, e);
        }

        Ok(VoiceConnectionInfo {
            session_id: info.session_id,
            endpoint: info.endpoint,
            token: info.token,
        })
    }

    async fn leave(&self, guild_id: GuildId) -> Result<(), VoiceError> {
        match self.songbird.remove(guild_id).await {
            Ok(()) | Err(JoinError::NoCall) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
