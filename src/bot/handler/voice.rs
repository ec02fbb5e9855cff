//! Voice event handlers.
//!
//! Serenity updates its cache before dispatching, so the guild's voice states read
//! here already include the update being handled.

use serenity::all::{Context, VoiceServerUpdateEvent, VoiceState};

use crate::{
    service::presence::{bot_voice_update, channel_snapshot, ChannelSnapshot},
    state::AppState,
};

pub async fn handle_voice_state_update(state: &AppState, ctx: Context, new: VoiceState) {
    let Some(guild_id) = new.guild_id else {
        return;
    };

    let bot_id = ctx.cache.current_user().id;
    let bot_update = bot_voice_update(&new, bot_id);

    // The cache guard is not Send and must be gone before the next await.
    let snapshot = match ctx.cache.guild(guild_id) {
        Some(guild) => channel_snapshot(guild.voice_states.values(), bot_id),
        None => ChannelSnapshot::default(),
    };

    state
        .presence
        .on_voice_state_update(guild_id, bot_update, snapshot)
        .await;
}

pub async fn handle_voice_server_update(state: &AppState, event: VoiceServerUpdateEvent) {
    let Some(guild_id) = event.guild_id else {
        return;
    };

    state
        .presence
        .on_voice_server_update(guild_id, &event.token, event.endpoint.as_deref())
        .await;
}
