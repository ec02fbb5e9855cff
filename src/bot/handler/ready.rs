//! Ready event handler for bot initialization.
//!
//! This module handles the `ready` event which is fired when the bot successfully
//! connects to Discord's gateway. It fires again after every reconnect that could not
//! resume, so everything done here must tolerate running more than once.
//!
//! The ready handler is used to:
//! - Log connection information
//! - Register the slash commands in the configured guild
//! - Start the audio node listener, once, now that the bot's user id is known

use serenity::all::{Context, Ready};
use std::sync::{atomic::Ordering, Arc};

use crate::{bot::commands::register_commands, node::events::NodeEventListener, state::AppState};

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `state` - Shared application state
/// - `ctx` - Discord context for registering commands
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(state: &AppState, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    let guild_id = state.config.guild_id;
    match register_commands(&ctx, guild_id).await {
        Ok(count) => tracing::info!("Registered {} commands in guild {}", count, guild_id),
        Err(e) => tracing::error!("Failed to register commands in guild {}: {}", guild_id, e),
    }

    if !state.node_started.swap(true, Ordering::SeqCst) {
        NodeEventListener::new(
            Arc::clone(&state.node),
            state.music.clone(),
            ready.user.id,
            state.shutdown.clone(),
        )
        .spawn();
    }
}
