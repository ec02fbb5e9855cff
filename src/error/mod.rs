//! Error types for the bot.
//!
//! `AppError` is the top-level error returned from startup and from the gateway
//! client. Domain errors live in their own modules: `MusicError` is what a command
//! can fail with and knows how to phrase itself for users, `NodeError` covers the
//! Lavalink node, and `VoiceError` covers the voice gateway handshake.

pub mod config;
pub mod music;
pub mod node;
pub mod voice;

use thiserror::Error;

use crate::error::{config::ConfigError, node::NodeError, voice::VoiceError};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Audio node error.
    #[error(transparent)]
    NodeErr(#[from] NodeError),

    /// Voice gateway error.
    #[error(transparent)]
    VoiceErr(#[from] VoiceError),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
