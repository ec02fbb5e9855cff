use serenity::all::ChannelId;
use thiserror::Error;

use crate::error::{node::NodeError, voice::VoiceError};

/// Everything a music command can fail with.
///
/// Each variant maps to exactly one user-facing reply through `user_message`, so the
/// command layer never has to match on errors itself. Infrastructure variants carry
/// their source error for logging while the reply stays generic.
#[derive(Error, Debug)]
pub enum MusicError {
    /// The invoker is in a voice channel other than the monitored one.
    #[error("Voice channel is not the monitored channel {expected}")]
    WrongChannel {
        /// The configured voice channel the bot may join
        expected: ChannelId,
    },

    /// A session already exists for the guild. `play` treats this as success.
    #[error("Already connected to a voice channel")]
    AlreadyConnected,

    /// The invoking user is not in any voice channel.
    #[error("User is not in a voice channel")]
    NotInVoice,

    /// The command needs a voice session and the guild has none.
    #[error("No voice session for guild")]
    NoSession,

    /// The queue is empty.
    #[error("Nothing is playing")]
    NoCurrentTrack,

    /// `remove` was given a position outside `2..=queue length`.
    #[error("Invalid queue index")]
    InvalidIndex,

    /// The node returned no playable tracks for the query.
    #[error("No tracks could be loaded")]
    TrackLoadFailed,

    /// `play` was invoked with a blank query.
    #[error("Empty query")]
    EmptyQuery,

    /// Audio node failure.
    #[error(transparent)]
    Node(#[from] NodeError),

    /// Voice gateway failure.
    #[error(transparent)]
    Voice(#[from] VoiceError),
}

impl MusicError {
    /// Text sent back to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::WrongChannel { expected } => {
                format!("I am only allowed to join <#{}>", expected)
            }
            Self::AlreadyConnected => "I am already connected to a voice channel".to_string(),
            Self::NotInVoice => "You are not in a voice channel".to_string(),
            Self::NoSession => "I am not connected to a voice channel".to_string(),
            Self::NoCurrentTrack => "Nothing is playing right now".to_string(),
            Self::InvalidIndex => "Invalid index".to_string(),
            Self::TrackLoadFailed => "Failed to load the track".to_string(),
            Self::EmptyQuery => "Please provide a track to play".to_string(),
            Self::Node(_) => "The audio node could not handle that request".to_string(),
            Self::Voice(_) => "I could not connect to the voice channel".to_string(),
        }
    }
}
