//! Per-guild voice session.
//!
//! A `VoiceSession` owns the playback queue of one guild and drives the guild's player
//! on the audio node. All queue mutations and the node calls that go with them happen
//! while holding the session's state lock, so a command handler, a node event and an
//! idle tick for the same guild never interleave a read-modify-write.
//!
//! The front of the queue is the track that is playing (or paused). It leaves the
//! queue when it is skipped or when the node reports it ended on its own.
//!
//! Every enqueued track gets an entry id, counting up from 1 within the session, that
//! is handed to the node with the track. Track-end events echo it back, which tells
//! two queued copies of the same song apart.

use serenity::all::{ChannelId, GuildId};
use std::collections::VecDeque;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::{
    error::music::MusicError,
    model::{
        session::{EnqueueOutcome, SkipOutcome},
        track::Track,
        voice::VoiceConnectionInfo,
    },
    node::AudioNode,
};

#[derive(Debug)]
struct QueueEntry {
    id: u64,
    track: Track,
}

#[derive(Debug, Default)]
struct SessionState {
    queue: VecDeque<QueueEntry>,
    /// Id of the most recently enqueued entry.
    last_entry: u64,
    /// Audio is being rendered: a track is loaded and not paused.
    playing: bool,
    /// Consecutive idle ticks observed by the idle timeout controller.
    idle_seconds: u32,
}

impl SessionState {
    fn mark_playing(&mut self) {
        self.playing = true;
        self.idle_seconds = 0;
    }

    fn current(&self) -> Option<Track> {
        self.queue.front().map(|entry| entry.track.clone())
    }
}

/// Voice session of a single guild.
pub struct VoiceSession {
    guild_id: GuildId,
    voice_channel_id: ChannelId,
    state: Mutex<SessionState>,
    voice: Mutex<Option<VoiceConnectionInfo>>,
    cancel: CancellationToken,
}

impl VoiceSession {
    /// Creates a session with an empty queue.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the session belongs to
    /// - `voice_channel_id` - Voice channel the bot is connected to
    /// - `cancel` - Token cancelled when the session is torn down; stops its background tasks
    ///
    /// # Returns
    /// - `VoiceSession` - Idle session without voice connection details
    pub fn new(guild_id: GuildId, voice_channel_id: ChannelId, cancel: CancellationToken) -> Self {
        Self {
            guild_id,
            voice_channel_id,
            state: Mutex::new(SessionState::default()),
            voice: Mutex::new(None),
            cancel,
        }
    }

    pub fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    pub fn voice_channel_id(&self) -> ChannelId {
        self.voice_channel_id
    }

    /// Appends a track and starts it if nothing else is queued.
    ///
    /// When the node refuses to play the track it is taken off the queue again, so
    /// a failed `play` leaves the session exactly as it was.
    ///
    /// # Arguments
    /// - `node` - Audio node hosting the guild's player
    /// - `track` - Track to append
    ///
    /// # Returns
    /// - `Ok(EnqueueOutcome::Playing)` - Queue was empty, track started
    /// - `Ok(EnqueueOutcome::Queued)` - Track waits at the returned one-based position
    /// - `Err(MusicError::Node)` - Node failed to start the track
    pub async fn enqueue_and_maybe_play(
        &self,
        node: &dyn AudioNode,
        track: Track,
    ) -> Result<EnqueueOutcome, MusicError> {
        let mut state = self.state.lock().await;

        state.last_entry += 1;
        let id = state.last_entry;
        state.queue.push_back(QueueEntry {
            id,
            track: track.clone(),
        });
        if state.queue.len() > 1 {
            return Ok(EnqueueOutcome::Queued {
                position: state.queue.len(),
            });
        }

        if let Err(err) = node.play(self.guild_id, &track, id).await {
            state.queue.pop_back();
            return Err(err.into());
        }
        state.mark_playing();

        Ok(EnqueueOutcome::Playing)
    }

    /// Pauses the current track and returns it.
    pub async fn pause(&self, node: &dyn AudioNode) -> Result<Track, MusicError> {
        let mut state = self.state.lock().await;
        let current = state.current().ok_or(MusicError::NoCurrentTrack)?;

        node.set_paused(self.guild_id, true).await?;
        state.playing = false;

        Ok(current)
    }

    /// Resumes the current track and returns it.
    pub async fn resume(&self, node: &dyn AudioNode) -> Result<Track, MusicError> {
        let mut state = self.state.lock().await;
        let current = state.current().ok_or(MusicError::NoCurrentTrack)?;

        node.set_paused(self.guild_id, false).await?;
        state.mark_playing();

        Ok(current)
    }

    /// Drops the current track and starts the next one.
    ///
    /// Queued tracks the node refuses to play are dropped too, so the outcome's
    /// `next` is the track that actually started. When nothing is left the player is
    /// stopped and the session goes idle.
    ///
    /// # Returns
    /// - `Ok(SkipOutcome)` - The skipped track and the one now playing, if any
    /// - `Err(MusicError::NoCurrentTrack)` - Queue was already empty
    pub async fn skip(&self, node: &dyn AudioNode) -> Result<SkipOutcome, MusicError> {
        let mut state = self.state.lock().await;
        let skipped = state
            .queue
            .pop_front()
            .ok_or(MusicError::NoCurrentTrack)?
            .track;

        let next = self.start_front(node, &mut state).await;
        if next.is_none() {
            if let Err(e) = node.stop(self.guild_id).await {
                tracing::warn!(
                    "Failed to stop player in guild {} after skip: {}",
                    self.guild_id,
                    e
                );
            }
        }

        Ok(SkipOutcome { skipped, next })
    }

    /// Removes the track at a one-based queue position.
    ///
    /// Position 1 is the playing track and can only be skipped, so the valid range
    /// is `2..=queue length`.
    ///
    /// # Returns
    /// - `Ok(Track)` - The removed track
    /// - `Err(MusicError::InvalidIndex)` - Position outside the valid range
    pub async fn remove_at(&self, index: i64) -> Result<Track, MusicError> {
        let mut state = self.state.lock().await;

        let position = usize::try_from(index)
            .ok()
            .filter(|position| (2..=state.queue.len()).contains(position))
            .ok_or(MusicError::InvalidIndex)?;

        state
            .queue
            .remove(position - 1)
            .map(|entry| entry.track)
            .ok_or(MusicError::InvalidIndex)
    }

    /// Empties the queue and stops the playing track.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of tracks removed, including the one that was playing
    /// - `Err(MusicError::Node)` - Player could not be stopped; the queue is left intact
    pub async fn clear(&self, node: &dyn AudioNode) -> Result<usize, MusicError> {
        let mut state = self.state.lock().await;
        let cleared = state.queue.len();

        if cleared > 0 {
            node.stop(self.guild_id).await?;
        }
        state.queue.clear();
        state.playing = false;

        Ok(cleared)
    }

    /// Moves on after the node reported that the playing track ended by itself.
    ///
    /// The event is ignored unless it is about the front of the queue; a skip or
    /// clear that raced the event has already moved the queue on. When the node
    /// echoed the entry id it decides, otherwise the encoded handle has to match.
    ///
    /// # Arguments
    /// - `node` - Audio node hosting the guild's player
    /// - `ended` - Encoded handle of the track that ended
    /// - `entry` - Entry id the track was played with, if the node sent it back
    ///
    /// # Returns
    /// - `Some(Track)` - The track that started next
    /// - `None` - Event was stale or the queue ran out
    pub async fn advance(
        &self,
        node: &dyn AudioNode,
        ended: &str,
        entry: Option<u64>,
    ) -> Option<Track> {
        let mut state = self.state.lock().await;

        let is_current = state.queue.front().is_some_and(|front| {
            front.track.encoded == ended && entry.map_or(true, |id| id == front.id)
        });
        if !is_current {
            tracing::debug!(
                "Ignoring end of track that is no longer current in guild {}",
                self.guild_id
            );
            return None;
        }

        state.queue.pop_front();
        self.start_front(node, &mut state).await
    }

    /// Starts the front of the queue, dropping tracks the node refuses to play.
    async fn start_front(&self, node: &dyn AudioNode, state: &mut SessionState) -> Option<Track> {
        while let Some((id, track)) = state
            .queue
            .front()
            .map(|entry| (entry.id, entry.track.clone()))
        {
            match node.play(self.guild_id, &track, id).await {
                Ok(()) => {
                    state.mark_playing();
                    return Some(track);
                }
                Err(e) => {
                    tracing::warn!(
                        "Dropping track {} in guild {}, node failed to play it: {}",
                        track.title,
                        self.guild_id,
                        e
                    );
                    state.queue.pop_front();
                }
            }
        }

        state.playing = false;
        None
    }

    /// Records one idle-controller tick.
    ///
    /// Resets the idle counter while playing, otherwise increments it.
    ///
    /// # Arguments
    /// - `threshold` - Idle ticks after which the session should be torn down
    ///
    /// # Returns
    /// - `true` - The idle counter reached `threshold`
    pub async fn tick(&self, threshold: u32) -> bool {
        let mut state = self.state.lock().await;

        if state.playing {
            state.idle_seconds = 0;
        } else {
            state.idle_seconds = state.idle_seconds.saturating_add(1);
        }

        state.idle_seconds >= threshold
    }

    #[cfg(test)]
    pub async fn idle_seconds(&self) -> u32 {
        self.state.lock().await.idle_seconds
    }

    #[cfg(test)]
    pub async fn is_playing(&self) -> bool {
        self.state.lock().await.playing
    }

    /// The playing (or paused) track.
    pub async fn current(&self) -> Option<Track> {
        self.state.lock().await.current()
    }

    /// Snapshot of the queue, playing track first.
    pub async fn queue(&self) -> Vec<Track> {
        self.state
            .lock()
            .await
            .queue
            .iter()
            .map(|entry| entry.track.clone())
            .collect()
    }

    /// Stores the voice connection details the node was handed at join time.
    pub async fn set_voice(&self, info: VoiceConnectionInfo) {
        *self.voice.lock().await = Some(info);
    }

    /// Applies a new Discord voice session id.
    ///
    /// # Returns
    /// - `Some(VoiceConnectionInfo)` - Updated details that must be forwarded to the node
    /// - `None` - Unchanged, or the join handshake has not finished yet
    pub async fn update_voice_session(&self, session_id: &str) -> Option<VoiceConnectionInfo> {
        let mut voice = self.voice.lock().await;
        let info = voice.as_mut()?;

        if info.session_id == session_id {
            return None;
        }
        info.session_id = session_id.to_string();

        Some(info.clone())
    }

    /// Applies a new voice server token and endpoint.
    ///
    /// Same contract as `update_voice_session`.
    pub async fn update_voice_server(
        &self,
        token: &str,
        endpoint: &str,
    ) -> Option<VoiceConnectionInfo> {
        let mut voice = self.voice.lock().await;
        let info = voice.as_mut()?;

        if info.token == token && info.endpoint == endpoint {
            return None;
        }
        info.token = token.to_string();
        info.endpoint = endpoint.to_string();

        Some(info.clone())
    }

    /// Stops every task bound to this session.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
