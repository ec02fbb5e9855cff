//! Voice session orchestration.
//!
//! `MusicService` ties the session registry to the two external systems a session
//! depends on: the Discord voice gateway (joining and leaving the channel) and the
//! audio node (the guild's player). Every way a session can end, whether an explicit
//! disconnect, idle expiry, the bot being left alone, a node failure or shutdown,
//! goes through the same teardown so the registry, the voice connection and the node
//! player never disagree.

use serenity::all::{ChannelId, GuildId};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    data::registry::{Registration, SessionRegistry},
    error::{music::MusicError, node::NodeError},
    model::{
        session::{EnqueueOutcome, SkipOutcome},
        track::Track,
    },
    node::AudioNode,
    service::{idle::IdleTimeoutController, notifier::Notifier, session::VoiceSession},
    voice::VoiceGateway,
};

/// Channel restrictions and timeouts the service enforces.
#[derive(Debug, Clone, Copy)]
pub struct MusicSettings {
    /// Text channel unsolicited messages are posted to.
    pub text_channel_id: ChannelId,
    /// The only voice channel the bot may join.
    pub voice_channel_id: ChannelId,
    pub idle: IdleTimeoutController,
}

impl MusicSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            text_channel_id: config.text_channel_id,
            voice_channel_id: config.voice_channel_id,
            idle: IdleTimeoutController::new(config.idle_timeout_secs),
        }
    }
}

/// Service owning the lifecycle of every voice session.
///
/// Cloning is cheap; clones share the registry and collaborators.
#[derive(Clone)]
pub struct MusicService {
    registry: SessionRegistry,
    node: Arc<dyn AudioNode>,
    voice: Arc<dyn VoiceGateway>,
    notifier: Arc<dyn Notifier>,
    settings: MusicSettings,
    /// Parent of every session's cancellation token.
    shutdown: CancellationToken,
}

impl MusicService {
    /// Creates a new MusicService with an empty registry.
    ///
    /// # Arguments
    /// - `node` - Audio node hosting the guild players
    /// - `voice` - Voice gateway used to join and leave the channel
    /// - `notifier` - Posts the inactivity message to the text channel
    /// - `settings` - Monitored channels and idle timeout
    ///
    /// # Returns
    /// - `MusicService` - Service without any sessions
    pub fn new(
        node: Arc<dyn AudioNode>,
        voice: Arc<dyn VoiceGateway>,
        notifier: Arc<dyn Notifier>,
        settings: MusicSettings,
    ) -> Self {
        Self {
            registry: SessionRegistry::new(),
            node,
            voice,
            notifier,
            settings,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn settings(&self) -> &MusicSettings {
        &self.settings
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Joins the monitored voice channel and registers a session for the guild.
    ///
    /// The session is registered before the voice handshake starts, so a second join
    /// racing this one observes it and fails with `AlreadyConnected` instead of
    /// opening a second connection. If the handshake or the node hand-off fails the
    /// registration is rolled back. On success exactly one idle timeout controller is
    /// started for the session.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to join in
    /// - `channel_id` - Voice channel the invoking user is in
    ///
    /// # Returns
    /// - `Ok(Arc<VoiceSession>)` - The new session
    /// - `Err(MusicError::WrongChannel)` - `channel_id` is not the monitored channel
    /// - `Err(MusicError::AlreadyConnected)` - The guild already has a session
    /// - `Err(MusicError::Voice)` - Voice handshake failed
    /// - `Err(MusicError::Node)` - Node rejected the voice connection details
    /// - `Err(MusicError::NoSession)` - Session was torn down while joining
    pub async fn join(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<Arc<VoiceSession>, MusicError> {
        if channel_id != self.settings.voice_channel_id {
            return Err(MusicError::WrongChannel {
                expected: self.settings.voice_channel_id,
            });
        }

        let session = match self.registry.create_if_absent(guild_id, || {
            VoiceSession::new(guild_id, channel_id, self.shutdown.child_token())
        }) {
            Registration::Created(session) => session,
            Registration::Existing => return Err(MusicError::AlreadyConnected),
        };

        let info = match self.voice.join(guild_id, channel_id).await {
            Ok(info) => info,
            Err(e) => {
                tracing::error!("Failed to join voice in guild {}: {}", guild_id, e);
                self.destroy_session(&session).await;
                return Err(e.into());
            }
        };

        if session.is_cancelled() {
            tracing::warn!(
                "Session in guild {} was torn down while joining voice",
                guild_id
            );
            if let Err(e) = self.voice.leave(guild_id).await {
                tracing::warn!("Failed to leave voice in guild {}: {}", guild_id, e);
            }
            return Err(MusicError::NoSession);
        }

        if let Err(e) = self.node.update_voice(guild_id, &info).await {
            tracing::error!(
                "Node rejected voice connection for guild {}: {}",
                guild_id,
                e
            );
            self.destroy_session(&session).await;
            return Err(e.into());
        }
        session.set_voice(info).await;

        self.settings.idle.spawn(self.clone(), Arc::clone(&session));

        tracing::info!(
            "Joined voice channel {} in guild {} ({} active sessions)",
            channel_id,
            guild_id,
            self.registry.len()
        );

        Ok(session)
    }

    /// Returns the guild's session or `NoSession`.
    pub fn session(&self, guild_id: GuildId) -> Result<Arc<VoiceSession>, MusicError> {
        self.registry.get(guild_id).ok_or(MusicError::NoSession)
    }

    /// Resolves a query to the track `play` should enqueue.
    ///
    /// # Returns
    /// - `Ok(Track)` - First track the node found
    /// - `Err(MusicError::EmptyQuery)` - Query is blank
    /// - `Err(MusicError::TrackLoadFailed)` - Nothing found, or the node failed to load it
    /// - `Err(MusicError::Node)` - Node could not be reached
    pub async fn search(&self, query: &str) -> Result<Track, MusicError> {
        if query.trim().is_empty() {
            return Err(MusicError::EmptyQuery);
        }

        let tracks = match self.node.load_tracks(query).await {
            Ok(tracks) => tracks,
            Err(NodeError::LoadFailed(reason)) => {
                tracing::info!("Failed to load {}: {}", query, reason);
                return Err(MusicError::TrackLoadFailed);
            }
            Err(e) => return Err(e.into()),
        };

        tracks
            .into_iter()
            .next()
            .ok_or(MusicError::TrackLoadFailed)
    }

    pub async fn play(
        &self,
        guild_id: GuildId,
        track: Track,
    ) -> Result<EnqueueOutcome, MusicError> {
        self.session(guild_id)?
            .enqueue_and_maybe_play(self.node.as_ref(), track)
            .await
    }

    pub async fn pause(&self, guild_id: GuildId) -> Result<Track, MusicError> {
        self.session(guild_id)?.pause(self.node.as_ref()).await
    }

    pub async fn resume(&self, guild_id: GuildId) -> Result<Track, MusicError> {
        self.session(guild_id)?.resume(self.node.as_ref()).await
    }

    pub async fn skip(&self, guild_id: GuildId) -> Result<SkipOutcome, MusicError> {
        self.session(guild_id)?.skip(self.node.as_ref()).await
    }

    pub async fn remove(&self, guild_id: GuildId, index: i64) -> Result<Track, MusicError> {
        self.session(guild_id)?.remove_at(index).await
    }

    pub async fn clear(&self, guild_id: GuildId) -> Result<usize, MusicError> {
        self.session(guild_id)?.clear(self.node.as_ref()).await
    }

    pub async fn current(&self, guild_id: GuildId) -> Result<Track, MusicError> {
        self.session(guild_id)?
            .current()
            .await
            .ok_or(MusicError::NoCurrentTrack)
    }

    pub async fn queue(&self, guild_id: GuildId) -> Result<Vec<Track>, MusicError> {
        Ok(self.session(guild_id)?.queue().await)
    }

    /// Starts the next track after the node reported that `ended` finished.
    ///
    /// `entry` is the queue entry the node echoed back with the track, if any.
    pub async fn advance(
        &self,
        guild_id: GuildId,
        ended: &str,
        entry: Option<u64>,
    ) -> Option<Track> {
        let session = self.registry.get(guild_id)?;
        let next = session.advance(self.node.as_ref(), ended, entry).await;

        if let Some(track) = &next {
            tracing::debug!("Advanced to {} in guild {}", track.title, guild_id);
        }

        next
    }

    /// Tears down the guild's session, if any.
    ///
    /// # Returns
    /// - `true` - A session existed and was torn down by this call
    /// - `false` - No session, nothing to do
    pub async fn destroy(&self, guild_id: GuildId) -> bool {
        match self.registry.get(guild_id) {
            Some(session) => self.destroy_session(&session).await,
            None => false,
        }
    }

    /// Tears down `session` if it is still registered.
    ///
    /// Concurrent teardowns of the same session race on the registry removal; only the
    /// winner leaves the channel and destroys the node player.
    pub async fn destroy_session(&self, session: &Arc<VoiceSession>) -> bool {
        if !self.registry.remove_session(session) {
            return false;
        }

        self.teardown(session).await;

        true
    }

    /// Tears down an idle session and tells the text channel why the bot left.
    pub async fn expire(&self, session: &Arc<VoiceSession>) {
        if !self.destroy_session(session).await {
            return;
        }

        let content = format!(
            "Disconnected from <#{}> due to inactivity",
            session.voice_channel_id()
        );

        if let Err(e) = self
            .notifier
            .send_message(self.settings.text_channel_id, content)
            .await
        {
            tracing::error!("Failed to post inactivity message: {}", e);
        }
    }

    /// Tears down every session.
    ///
    /// # Returns
    /// - `usize` - Number of sessions torn down
    pub async fn destroy_all(&self) -> usize {
        if self.registry.is_empty() {
            return 0;
        }

        let sessions = self.registry.drain();

        for session in &sessions {
            self.teardown(session).await;
        }

        sessions.len()
    }

    /// Cancels all session tasks and tears every session down.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();

        let destroyed = self.destroy_all().await;
        if destroyed > 0 {
            tracing::info!("Closed {} voice sessions on shutdown", destroyed);
        }
    }

    /// Forwards a new voice session id for the bot to the node.
    pub async fn forward_voice_state(&self, guild_id: GuildId, session_id: &str) {
        let Some(session) = self.registry.get(guild_id) else {
            return;
        };

        if let Some(info) = session.update_voice_session(session_id).await {
            if let Err(e) = self.node.update_voice(guild_id, &info).await {
                tracing::warn!(
                    "Failed to forward voice state for guild {}: {}",
                    guild_id,
                    e
                );
            }
        }
    }

    /// Forwards a voice server change (token or endpoint) to the node.
    pub async fn forward_voice_server(&self, guild_id: GuildId, token: &str, endpoint: &str) {
        let Some(session) = self.registry.get(guild_id) else {
            return;
        };

        if let Some(info) = session.update_voice_server(token, endpoint).await {
            if let Err(e) = self.node.update_voice(guild_id, &info).await {
                tracing::warn!(
                    "Failed to forward voice server for guild {}: {}",
                    guild_id,
                    e
                );
            }
        }
    }

    async fn teardown(&self, session: &Arc<VoiceSession>) {
        let guild_id = session.guild_id();

        session.cancel();

        if let Err(e) = self.voice.leave(guild_id).await {
            tracing::warn!("Failed to leave voice in guild {}: {}", guild_id, e);
        }

        match self.node.destroy(guild_id).await {
            Ok(()) => {}
            Err(NodeError::NotReady) => {
                tracing::debug!("Node not connected, skipping player destroy for {}", guild_id)
            }
            Err(e) => tracing::warn!("Failed to destroy player in guild {}: {}", guild_id, e),
        }

        tracing::info!("Closed voice session in guild {}", guild_id);
    }
}
