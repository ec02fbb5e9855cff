//! Audio node integration.
//!
//! The bot never decodes audio itself. A Lavalink v4 node resolves search queries to
//! tracks and streams them into the voice channel; this module is the client side of
//! that protocol.
//!
//! - `AudioNode` is the seam the service layer talks to, so sessions can be tested
//!   against a mock node.
//! - `lavalink::LavalinkNode` implements it over the node's REST API.
//! - `events::NodeEventListener` keeps the node websocket open, records the node
//!   session id and feeds track/voice events back into the music service.

pub mod backoff;
pub mod events;
pub mod lavalink;
pub mod protocol;

use serenity::all::GuildId;
use serenity::async_trait;

use crate::{
    error::node::NodeError,
    model::{track::Track, voice::VoiceConnectionInfo},
};

/// Operations the music service needs from the audio node.
///
/// One player exists per guild on the node side; every call except `load_tracks`
/// addresses that player.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AudioNode: Send + Sync {
    /// Resolves a search query or link to playable tracks.
    ///
    /// An empty result is `Ok(vec![])`; a node-side load error is
    /// `Err(NodeError::LoadFailed)`.
    async fn load_tracks(&self, query: &str) -> Result<Vec<Track>, NodeError>;

    /// Starts `track` on the guild's player, replacing whatever is playing.
    ///
    /// `entry` is attached to the track and comes back in its end event.
    async fn play(&self, guild_id: GuildId, track: &Track, entry: u64) -> Result<(), NodeError>;

    /// Pauses or resumes the guild's player.
    async fn set_paused(&self, guild_id: GuildId, paused: bool) -> Result<(), NodeError>;

    /// Stops the current track without destroying the player.
    async fn stop(&self, guild_id: GuildId) -> Result<(), NodeError>;

    /// Hands the Discord voice connection details to the guild's player.
    async fn update_voice(
        &self,
        guild_id: GuildId,
        voice: &VoiceConnectionInfo,
    ) -> Result<(), NodeError>;

    /// Destroys the guild's player and its voice socket.
    async fn destroy(&self, guild_id: GuildId) -> Result<(), NodeError>;
}
