use serenity::all::{
    Context, EventHandler, Interaction, Ready, VoiceServerUpdateEvent, VoiceState,
};
use serenity::async_trait;

use crate::state::AppState;

pub mod interaction;
pub mod ready;
pub mod voice;

/// Discord bot event handler
pub struct Handler {
    pub state: AppState,
}

impl Handler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.state, ctx, ready).await;
    }

    /// Called when a slash command (or any other interaction) is invoked
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(&self.state, ctx, interaction).await;
    }

    /// Called when a member joins, leaves or moves between voice channels
    async fn voice_state_update(&self, ctx: Context, _old: Option<VoiceState>, new: VoiceState) {
        voice::handle_voice_state_update(&self.state, ctx, new).await;
    }

    /// Called when the voice server for a guild the bot is connected in changes
    async fn voice_server_update(&self, _ctx: Context, event: VoiceServerUpdateEvent) {
        voice::handle_voice_server_update(&self.state, event).await;
    }
}
