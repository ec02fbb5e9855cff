use thiserror::Error;

/// Failures while joining or leaving a voice channel through the gateway.
#[derive(Error, Debug)]
pub enum VoiceError {
    /// Songbird could not complete the voice-state/voice-server handshake.
    #[error("Failed to join voice channel: {0}")]
    Join(#[from] songbird::error::JoinError),
}
