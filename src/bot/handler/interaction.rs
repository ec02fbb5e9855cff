//! Slash command handling.
//!
//! Commands are gated before anything is sent back, so invocations from other
//! channels get no response at all. Admitted commands are deferred first because
//! joining voice and searching the node can take longer than Discord's three second
//! response window.

use serenity::all::{
    ChannelId, CommandInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditInteractionResponse, GuildId, Interaction, UserId,
};

use crate::{
    bot::commands::command_args,
    model::command::MusicCommand,
    service::gate::Invocation,
    state::AppState,
};

/// Handles an interaction, ignoring everything but slash commands.
pub async fn handle_interaction_create(state: &AppState, ctx: Context, interaction: Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    let args = command_args(&command);
    let Some(music_command) = MusicCommand::parse(&command.data.name, &args) else {
        tracing::warn!("Ignoring unknown command {}", command.data.name);
        return;
    };

    let invocation = Invocation {
        guild_id: command.guild_id,
        channel_id: command.channel_id,
        voice_channel_id: user_voice_channel(&ctx, command.guild_id, command.user.id),
    };

    let admitted = match state.gate.admit(&invocation, &music_command) {
        Ok(admitted) => admitted,
        Err(rejection) => {
            tracing::debug!(
                "Rejected {} from {} in {}: {:?}",
                music_command.name(),
                command.user.id,
                command.channel_id,
                rejection
            );
            if let Some(reply) = rejection.reply() {
                respond(&ctx, &command, reply).await;
            }
            return;
        }
    };

    if let Err(e) = command.defer(&ctx).await {
        tracing::error!("Failed to defer {}: {}", music_command.name(), e);
        return;
    }

    let reply = state.commands.execute(admitted, music_command).await;

    if let Err(e) = command
        .edit_response(&ctx.http, EditInteractionResponse::new().content(reply))
        .await
    {
        tracing::error!("Failed to send command response: {}", e);
    }
}

/// Voice channel the user is in according to the cache.
fn user_voice_channel(
    ctx: &Context,
    guild_id: Option<GuildId>,
    user_id: UserId,
) -> Option<ChannelId> {
    let guild = ctx.cache.guild(guild_id?)?;

    guild
        .voice_states
        .get(&user_id)
        .and_then(|state| state.channel_id)
}

async fn respond(ctx: &Context, command: &CommandInteraction, content: String) {
    let message = CreateInteractionResponseMessage::new().content(content);
    let response = CreateInteractionResponse::Message(message);

    if let Err(e) = command.create_response(&ctx, response).await {
        tracing::error!("Failed to send command response: {}", e);
    }
}
