mod bot;
mod config;
mod data;
mod error;
mod model;
mod node;
mod service;
mod startup;
mod state;
mod voice;

use serenity::http::Http;
use songbird::Songbird;
use std::sync::Arc;

use crate::{
    config::Config,
    error::AppError,
    node::lavalink::{LavalinkNode, NodeSettings},
    service::{
        music::{MusicService, MusicSettings},
        notifier::DiscordNotifier,
    },
    state::AppState,
    voice::songbird::SongbirdGateway,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let node = Arc::new(LavalinkNode::new(NodeSettings::from_config(&config)));
    let songbird = Songbird::serenity();
    let discord_http = Arc::new(Http::new(&config.discord_bot_token));

    let music = MusicService::new(
        node.clone(),
        Arc::new(SongbirdGateway::new(songbird.clone())),
        Arc::new(DiscordNotifier::new(discord_http)),
        MusicSettings::from_config(&config),
    );

    let state = AppState::new(config, node, music.clone());
    let shutdown = state.shutdown.clone();

    let mut client = bot::start::init_bot(state, songbird).await?;
    let shard_manager = client.shard_manager.clone();

    tracing::info!("Starting Discord bot");

    tokio::select! {
        result = client.start() => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Shutdown signal received"),
    }

    // Sessions are closed while the shards are still up so songbird can leave voice.
    shutdown.cancel();
    music.shutdown().await;
    shard_manager.shutdown_all().await;

    Ok(())
}
