//! Lavalink v4 wire types.
//!
//! Only the parts of the protocol the bot consumes are modelled. Unknown ops and
//! event types deserialize into catch-all variants instead of failing.

use serde::{Deserialize, Serialize};
use serenity::all::GuildId;

/// A track as returned by the node.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTrack {
    /// Base64-encoded track data.
    pub encoded: String,
    pub info: NodeTrackInfo,
    /// Whatever the bot attached when it started the track.
    #[serde(default)]
    pub user_data: Option<TrackUserData>,
}

/// Data the bot attaches to a track it plays; the node echoes it back in events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackUserData {
    /// Queue entry the track was played for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTrackInfo {
    #[serde(default)]
    pub author: String,
    /// Duration in milliseconds. 0 for streams.
    #[serde(default)]
    pub length: u64,
    pub title: String,
    pub uri: Option<String>,
}

/// Result of `GET /v4/loadtracks`.
#[derive(Debug, Deserialize)]
#[serde(tag = "loadType", content = "data", rename_all = "camelCase")]
pub enum LoadResult {
    /// A single track was loaded.
    Track(NodeTrack),
    /// A playlist was loaded.
    Playlist(PlaylistData),
    /// A search returned results.
    Search(Vec<NodeTrack>),
    /// No matches found.
    Empty {},
    /// An error occurred during loading.
    Error(LoadError),
}

impl LoadResult {
    /// Flattens the result into the tracks it carries.
    pub fn into_tracks(self) -> Result<Vec<NodeTrack>, LoadError> {
        match self {
            Self::Track(track) => Ok(vec![track]),
            Self::Playlist(playlist) => Ok(playlist.tracks),
            Self::Search(tracks) => Ok(tracks),
            Self::Empty {} => Ok(Vec::new()),
            Self::Error(err) => Err(err),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistData {
    pub info: PlaylistInfo,
    pub tracks: Vec<NodeTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistInfo {
    pub name: String,
}

/// Error from a failed track load.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadError {
    pub message: Option<String>,
    pub severity: String,
    pub cause: String,
}

/// Body of `PATCH /v4/sessions/{session}/players/{guild}`.
///
/// Absent fields leave the player untouched.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<PlayerUpdateTrack>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<PlayerUpdateVoice>,
}

/// Track selection for a player update. `encoded: None` serializes as `null`, which
/// stops the player.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpdateTrack {
    pub encoded: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<TrackUserData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpdateVoice {
    pub token: String,
    pub endpoint: String,
    pub session_id: String,
}

/// Messages sent by the node over the websocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum NodeMessage {
    Ready {
        resumed: bool,
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    Event(NodeEvent),
    /// `playerUpdate`, `stats` and anything newer.
    #[serde(other)]
    Unhandled,
}

/// Player events, discriminated by `type`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum NodeEvent {
    #[serde(rename = "TrackStartEvent")]
    TrackStart {
        #[serde(rename = "guildId")]
        guild_id: String,
    },

    #[serde(rename = "TrackEndEvent")]
    TrackEnd {
        #[serde(rename = "guildId")]
        guild_id: String,
        track: NodeTrack,
        reason: TrackEndReason,
    },

    #[serde(rename = "TrackExceptionEvent")]
    TrackException {
        #[serde(rename = "guildId")]
        guild_id: String,
        exception: TrackException,
    },

    #[serde(rename = "TrackStuckEvent")]
    TrackStuck {
        #[serde(rename = "guildId")]
        guild_id: String,
        #[serde(rename = "thresholdMs")]
        threshold_ms: u64,
    },

    #[serde(rename = "WebSocketClosedEvent")]
    WebSocketClosed {
        #[serde(rename = "guildId")]
        guild_id: String,
        code: u16,
        reason: String,
        #[serde(rename = "byRemote")]
        by_remote: bool,
    },

    #[serde(other)]
    Unhandled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackEndReason {
    Finished,
    LoadFailed,
    Stopped,
    Replaced,
    Cleanup,
}

impl TrackEndReason {
    /// Whether the next queued track should start.
    ///
    /// `stopped` and `replaced` come from the bot's own skip/clear calls and
    /// `cleanup` from player teardown, so only natural ends advance the queue.
    pub fn may_start_next(self) -> bool {
        matches!(self, Self::Finished | Self::LoadFailed)
    }
}

#[derive(Debug, Deserialize)]
pub struct TrackException {
    pub message: Option<String>,
    pub severity: String,
    pub cause: String,
}

/// Parses the string guild id Lavalink uses into a serenity id.
pub fn parse_guild_id(raw: &str) -> Option<GuildId> {
    raw.parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(GuildId::new)
}
