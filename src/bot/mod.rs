//! Discord bot integration.
//!
//! - `start` builds the serenity client with songbird registered for voice
//! - `commands` declares the slash commands and extracts their options
//! - `handler` routes gateway events to the service layer

pub mod commands;
pub mod handler;
pub mod start;
