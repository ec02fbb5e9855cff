use serenity::all::{Client, GatewayIntents};
use songbird::{SerenityInit, Songbird};
use std::sync::Arc;

use crate::{bot::handler::Handler, error::AppError, state::AppState};

/// Builds the Discord bot client.
///
/// The client is returned unstarted so the caller can keep a handle on its shard
/// manager for shutdown.
///
/// # Arguments
/// - `state` - Shared application state handed to the event handler
/// - `songbird` - Voice manager; it must be the same instance the voice gateway uses
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError)` - The client could not be built (e.g. malformed token)
pub async fn init_bot(state: AppState, songbird: Arc<Songbird>) -> Result<Client, AppError> {
    // GUILD_VOICE_STATES keeps the cache's voice states current, which both the
    // command gate and the presence watcher read.
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_VOICE_STATES;

    let token = state.config.discord_bot_token.clone();
    let handler = Handler::new(state);

    let client = Client::builder(&token, intents)
        .event_handler(handler)
        .register_songbird_with(songbird)
        .await?;

    Ok(client)
}
