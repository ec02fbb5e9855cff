//! Command execution.
//!
//! `CommandService` runs an admitted command against the music service and phrases
//! the single reply the user gets. Failures never escape as errors: every
//! `MusicError` is turned into its user message here.

use serenity::all::ChannelId;

use crate::{
    error::music::MusicError,
    model::{
        command::{MusicCommand, COMMAND_DESCRIPTIONS},
        session::EnqueueOutcome,
        track::Track,
    },
    service::{gate::Admitted, music::MusicService},
};

/// Discord's message length limit.
const MAX_MESSAGE_LEN: usize = 2000;
/// Room kept free for the "...and N more" line.
const OVERFLOW_RESERVE: usize = 32;

#[derive(Clone)]
pub struct CommandService {
    music: MusicService,
}

impl CommandService {
    pub fn new(music: MusicService) -> Self {
        Self { music }
    }

    /// Executes a command and returns the reply text.
    ///
    /// # Arguments
    /// - `admitted` - Gate result carrying the guild and the user's voice channel
    /// - `command` - Command to execute
    ///
    /// # Returns
    /// - `String` - Reply for the user, success or failure
    pub async fn execute(&self, admitted: Admitted, command: MusicCommand) -> String {
        let name = command.name();

        let result = match command {
            MusicCommand::Play { query } => return self.play(admitted, &query).await,
            MusicCommand::Disconnect => self.disconnect(admitted).await,
            MusicCommand::Pause => self
                .music
                .pause(admitted.guild_id)
                .await
                .map(|track| format!("Paused {}", track.title)),
            MusicCommand::Resume => self
                .music
                .resume(admitted.guild_id)
                .await
                .map(|track| format!("Resumed {}", track.title)),
            MusicCommand::Skip => self.music.skip(admitted.guild_id).await.map(|outcome| {
                match &outcome.next {
                    Some(next) => tracing::debug!("Skipped to {}", next.title),
                    None => tracing::debug!("Skipped the last track"),
                }
                format!("Skipped {}", outcome.skipped.title)
            }),
            MusicCommand::Queue => self
                .music
                .queue(admitted.guild_id)
                .await
                .map(|tracks| format_queue(&tracks)),
            MusicCommand::Clear => self
                .music
                .clear(admitted.guild_id)
                .await
                .map(|_| "Cleared the queue".to_string()),
            MusicCommand::Remove { index } => self
                .music
                .remove(admitted.guild_id, index)
                .await
                .map(|track| format!("Removed {}", track.title)),
            MusicCommand::Current => self
                .music
                .current(admitted.guild_id)
                .await
                .map(|track| format!("Current song is {}", track.title)),
            MusicCommand::Help => Ok(help_text()),
        };

        result.unwrap_or_else(|e| reply_for_error(name, e))
    }

    /// Joins if needed, then resolves and enqueues the query.
    ///
    /// Joining comes first so a user in the wrong channel is told so before any
    /// search runs. A failed search after a fresh join still reports the join.
    async fn play(&self, admitted: Admitted, query: &str) -> String {
        if query.trim().is_empty() {
            return MusicError::EmptyQuery.user_message();
        }

        let Some(voice_channel_id) = admitted.voice_channel_id else {
            return MusicError::NotInVoice.user_message();
        };

        let connected = match self.music.join(admitted.guild_id, voice_channel_id).await {
            Ok(_) => true,
            Err(MusicError::AlreadyConnected) => false,
            Err(e) => return reply_for_error("play", e),
        };

        let body = match self.enqueue(admitted, query).await {
            Ok((track, EnqueueOutcome::Playing)) => format!("Playing {}", track.title),
            Ok((track, EnqueueOutcome::Queued { position })) => {
                tracing::debug!("Queued {} at position {}", track.title, position);
                format!("Added {} to the queue", track.title)
            }
            Err(e) => reply_for_error("play", e),
        };

        if connected {
            format!("{}\n{}", connected_message(voice_channel_id), body)
        } else {
            body
        }
    }

    async fn enqueue(
        &self,
        admitted: Admitted,
        query: &str,
    ) -> Result<(Track, EnqueueOutcome), MusicError> {
        let track = self.music.search(query).await?;
        let outcome = self.music.play(admitted.guild_id, track.clone()).await?;

        Ok((track, outcome))
    }

    async fn disconnect(&self, admitted: Admitted) -> Result<String, MusicError> {
        if !self.music.destroy(admitted.guild_id).await {
            return Err(MusicError::NoSession);
        }

        Ok(format!(
            "Disconnected from <#{}>",
            self.music.settings().voice_channel_id
        ))
    }
}

fn connected_message(channel_id: ChannelId) -> String {
    format!("Connected to <#{}>", channel_id)
}

fn reply_for_error(command: &str, err: MusicError) -> String {
    match &err {
        MusicError::Node(_) | MusicError::Voice(_) => {
            tracing::error!("Command {} failed: {}", command, err)
        }
        _ => tracing::debug!("Command {} rejected: {}", command, err),
    }

    err.user_message()
}

/// Numbered queue listing that fits in one Discord message.
///
/// Lines are added until the next one would leave no room for the overflow line,
/// which then reports how many tracks were left out. A first line that is too long
/// on its own is cut short.
pub fn format_queue(tracks: &[Track]) -> String {
    if tracks.is_empty() {
        return "The queue is empty".to_string();
    }

    let budget = MAX_MESSAGE_LEN - OVERFLOW_RESERVE;
    let mut message = String::new();

    for (index, track) in tracks.iter().enumerate() {
        let mut line = format!("{}. {}", index + 1, track.title);
        if index == 0 {
            truncate_line(&mut line, budget);
        }
        let separator = usize::from(!message.is_empty());

        if message.len() + separator + line.len() > budget {
            message.push_str(&format!("\n...and {} more", tracks.len() - index));
            return message;
        }

        if separator == 1 {
            message.push('\n');
        }
        message.push_str(&line);
    }

    message
}

/// Cuts `line` to at most `max` bytes on a char boundary, marking the cut with "...".
fn truncate_line(line: &mut String, max: usize) {
    if line.len() <= max {
        return;
    }

    let mut end = max.saturating_sub(3);
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    line.truncate(end);
    line.push_str("...");
}

/// Command list for `help`.
pub fn help_text() -> String {
    COMMAND_DESCRIPTIONS
        .iter()
        .map(|(name, description)| format!("/{} - {}", name, description))
        .collect::<Vec<_>>()
        .join("\n")
}
