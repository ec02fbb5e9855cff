//! Presence watcher.
//!
//! Reacts to voice state and voice server updates in the guild. Updates about the bot
//! itself are forwarded to the node so its voice socket follows Discord's, unless the
//! bot was disconnected or moved out of the monitored channel, which ends the session.
//! After every
//! voice state update the watcher checks whether the bot has been left alone in the
//! monitored channel and, if so, tears the session down without posting anything.

use serenity::all::{ChannelId, GuildId, UserId, VoiceState};

use crate::service::music::MusicService;

/// Occupancy of the bot's voice channel after an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelSnapshot {
    /// Channel the bot is in, `None` if it is not in voice.
    pub bot_channel_id: Option<ChannelId>,
    /// Members in that channel, the bot included.
    pub occupants: usize,
}

/// The bot's own voice state, when the update is about the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotVoiceUpdate {
    pub channel_id: Option<ChannelId>,
    pub session_id: String,
}

/// What the watcher did with an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceOutcome {
    /// Session kept.
    Unchanged,
    /// The guild has no session; nothing to check.
    NoSession,
    /// The bot was disconnected from voice by someone else; session torn down.
    Disconnected,
    /// The bot was moved out of the monitored channel; session torn down.
    Moved,
    /// Everyone else left the monitored channel; session torn down.
    LeftAlone,
}

#[derive(Clone)]
pub struct PresenceWatcher {
    music: MusicService,
    voice_channel_id: ChannelId,
}

impl PresenceWatcher {
    pub fn new(music: MusicService) -> Self {
        let voice_channel_id = music.settings().voice_channel_id;

        Self {
            music,
            voice_channel_id,
        }
    }

    /// Handles a voice state update in the guild.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the update belongs to
    /// - `bot_update` - The bot's new voice state if the update is about the bot
    /// - `snapshot` - Occupancy of the bot's channel with the update applied
    ///
    /// # Returns
    /// - `PresenceOutcome` - Whether the session survived the update
    pub async fn on_voice_state_update(
        &self,
        guild_id: GuildId,
        bot_update: Option<BotVoiceUpdate>,
        snapshot: ChannelSnapshot,
    ) -> PresenceOutcome {
        if let Some(update) = bot_update {
            match update.channel_id {
                None => {
                    return if self.music.destroy(guild_id).await {
                        tracing::info!("Bot was disconnected from voice in guild {}", guild_id);
                        PresenceOutcome::Disconnected
                    } else {
                        PresenceOutcome::NoSession
                    };
                }
                Some(channel_id) if channel_id != self.voice_channel_id => {
                    return if self.music.destroy(guild_id).await {
                        tracing::info!(
                            "Bot was moved to {} in guild {}, disconnecting",
                            channel_id,
                            guild_id
                        );
                        PresenceOutcome::Moved
                    } else {
                        PresenceOutcome::NoSession
                    };
                }
                Some(_) => {}
            }

            self.music
                .forward_voice_state(guild_id, &update.session_id)
                .await;
        }

        if self.music.registry().get(guild_id).is_none() {
            tracing::debug!(
                "Voice state update in guild {} without a voice session",
                guild_id
            );
            return PresenceOutcome::NoSession;
        }

        let alone =
            snapshot.bot_channel_id == Some(self.voice_channel_id) && snapshot.occupants == 1;
        if alone && self.music.destroy(guild_id).await {
            tracing::info!(
                "Left alone in {} in guild {}, disconnecting",
                self.voice_channel_id,
                guild_id
            );
            return PresenceOutcome::LeftAlone;
        }

        PresenceOutcome::Unchanged
    }

    /// Handles a voice server update for the guild.
    ///
    /// A missing endpoint means Discord is moving the voice server; the follow-up
    /// update carries the new one.
    pub async fn on_voice_server_update(
        &self,
        guild_id: GuildId,
        token: &str,
        endpoint: Option<&str>,
    ) {
        let Some(endpoint) = endpoint else {
            tracing::debug!("Voice server for guild {} is being reallocated", guild_id);
            return;
        };

        self.music
            .forward_voice_server(guild_id, token, endpoint)
            .await;
    }
}

/// Builds the bot's channel occupancy from the guild's voice states.
pub fn channel_snapshot<'a, I>(states: I, bot_id: UserId) -> ChannelSnapshot
where
    I: IntoIterator<Item = &'a VoiceState>,
{
    let states: Vec<&VoiceState> = states.into_iter().collect();

    let bot_channel_id = states
        .iter()
        .find(|state| state.user_id == bot_id)
        .and_then(|state| state.channel_id);

    let occupants = match bot_channel_id {
        Some(channel_id) => states
            .iter()
            .filter(|state| state.channel_id == Some(channel_id))
            .count(),
        None => 0,
    };

    ChannelSnapshot {
        bot_channel_id,
        occupants,
    }
}

/// Extracts the bot's own update from a voice state, `None` for other members.
pub fn bot_voice_update(state: &VoiceState, bot_id: UserId) -> Option<BotVoiceUpdate> {
    (state.user_id == bot_id).then(|| BotVoiceUpdate {
        channel_id: state.channel_id,
        session_id: state.session_id.clone(),
    })
}
