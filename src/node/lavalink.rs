use reqwest::header::AUTHORIZATION;
use serenity::all::GuildId;
use serenity::async_trait;
use tokio::sync::RwLock;

use crate::{
    config::Config,
    error::node::NodeError,
    model::{track::Track, voice::VoiceConnectionInfo},
    node::{
        protocol::{LoadResult, PlayerUpdate, PlayerUpdateTrack, PlayerUpdateVoice, TrackUserData},
        AudioNode,
    },
};

/// Prefix that makes the node run a YouTube search for free-text queries.
const SEARCH_PREFIX: &str = "ytsearch:";

/// Address and credentials of the Lavalink node.
#[derive(Debug, Clone)]
pub struct NodeSettings {
    pub host: String,
    pub port: u16,
    pub password: String,
    /// Use `https`/`wss` instead of `http`/`ws`.
    pub secure: bool,
}

impl NodeSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            host: config.lavalink_host.clone(),
            port: config.lavalink_port,
            password: config.lavalink_password.clone(),
            secure: config.lavalink_secure,
        }
    }

    /// Base URL for REST calls, e.g. `http://localhost:2333`.
    pub fn rest_base(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }

    /// URL of the event websocket, e.g. `ws://localhost:2333/v4/websocket`.
    pub fn websocket_url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{}://{}:{}/v4/websocket", scheme, self.host, self.port)
    }
}

/// REST client for a single Lavalink v4 node.
///
/// Player endpoints are scoped to the websocket session id the node hands out in its
/// `ready` op. Until the event listener records one, every player call fails with
/// `NodeError::NotReady`; track searches work regardless.
pub struct LavalinkNode {
    http: reqwest::Client,
    settings: NodeSettings,
    session_id: RwLock<Option<String>>,
}

impl LavalinkNode {
    pub fn new(settings: NodeSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
            session_id: RwLock::new(None),
        }
    }

    pub fn settings(&self) -> &NodeSettings {
        &self.settings
    }

    /// Records the node session id, or clears it when the websocket drops.
    pub async fn set_session_id(&self, session_id: Option<String>) {
        *self.session_id.write().await = session_id;
    }

    pub async fn session_id(&self) -> Option<String> {
        self.session_id.read().await.clone()
    }

    async fn player_url(&self, guild_id: GuildId) -> Result<String, NodeError> {
        let session_id = self.session_id().await.ok_or(NodeError::NotReady)?;

        Ok(format!(
            "{}/v4/sessions/{}/players/{}",
            self.settings.rest_base(),
            session_id,
            guild_id
        ))
    }

    async fn update_player(
        &self,
        guild_id: GuildId,
        update: &PlayerUpdate,
    ) -> Result<(), NodeError> {
        let url = self.player_url(guild_id).await?;

        let response = self
            .http
            .patch(url)
            .query(&[("noReplace", "false")])
            .header(AUTHORIZATION, self.settings.password.as_str())
            .json(update)
            .send()
            .await?;

        ensure_success(response).await?;

        Ok(())
    }
}

#[async_trait]
impl AudioNode for LavalinkNode {
    async fn load_tracks(&self, query: &str) -> Result<Vec<Track>, NodeError> {
        let identifier = search_identifier(query);

        let response = self
            .http
            .get(format!("{}/v4/loadtracks", self.settings.rest_base()))
            .query(&[("identifier", identifier.as_str())])
            .header(AUTHORIZATION, self.settings.password.as_str())
            .send()
            .await?;

        let result: LoadResult = ensure_success(response).await?.json().await?;

        if let LoadResult::Playlist(playlist) = &result {
            tracing::debug!(
                "Loaded playlist {} with {} tracks",
                playlist.info.name,
                playlist.tracks.len()
            );
        }

        let tracks = result.into_tracks().map_err(|err| {
            tracing::debug!(
                "Node failed to load {}: {} ({}, {})",
                identifier,
                err.message.as_deref().unwrap_or("no message"),
                err.severity,
                err.cause
            );
            NodeError::LoadFailed(err.message.unwrap_or(err.cause))
        })?;

        Ok(tracks.into_iter().map(Track::from).collect())
    }

    async fn play(&self, guild_id: GuildId, track: &Track, entry: u64) -> Result<(), NodeError> {
        let update = PlayerUpdate {
            track: Some(PlayerUpdateTrack {
                encoded: Some(track.encoded.clone()),
                user_data: Some(TrackUserData { entry: Some(entry) }),
            }),
            paused: Some(false),
            ..Default::default()
        };

        self.update_player(guild_id, &update).await
    }

    async fn set_paused(&self, guild_id: GuildId, paused: bool) -> Result<(), NodeError> {
        let update = PlayerUpdate {
            paused: Some(paused),
            ..Default::default()
        };

        self.update_player(guild_id, &update).await
    }

    async fn stop(&self, guild_id: GuildId) -> Result<(), NodeError> {
        let update = PlayerUpdate {
            track: Some(PlayerUpdateTrack {
                encoded: None,
                user_data: None,
            }),
            ..Default::default()
        };

        self.update_player(guild_id, &update).await
    }

    async fn update_voice(
        &self,
        guild_id: GuildId,
        voice: &VoiceConnectionInfo,
    ) -> Result<(), NodeError> {
        let update = PlayerUpdate {
            voice: Some(PlayerUpdateVoice {
                token: voice.token.clone(),
                endpoint: voice.endpoint.clone(),
                session_id: voice.session_id.clone(),
            }),
            ..Default::default()
        };

        self.update_player(guild_id, &update).await
    }

    async fn destroy(&self, guild_id: GuildId) -> Result<(), NodeError> {
        let url = self.player_url(guild_id).await?;

        let response = self
            .http
            .delete(url)
            .header(AUTHORIZATION, self.settings.password.as_str())
            .send()
            .await?;

        ensure_success(response).await?;

        Ok(())
    }
}

/// Turns non-2xx responses into `NodeError::Status` carrying the response body.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, NodeError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();

    Err(NodeError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Identifier sent to `/v4/loadtracks`: links pass through, anything else is searched.
pub fn search_identifier(query: &str) -> String {
    let query = query.trim();

    let is_link = url::Url::parse(query)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false);

    if is_link {
        query.to_string()
    } else {
        format!("{}{}", SEARCH_PREFIX, query)
    }
}
