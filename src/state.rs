//! Application state shared by all event handlers.
//!
//! This module defines the `AppState` struct which holds the services and clients the
//! gateway event handlers need. The state is constructed once in `main` before the
//! gateway connects and handed to the serenity event handler.

use std::sync::{atomic::AtomicBool, Arc};
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    node::lavalink::LavalinkNode,
    service::{
        command::CommandService, gate::CommandGate, music::MusicService,
        presence::PresenceWatcher,
    },
};

/// Application state containing shared services and clients.
///
/// All fields are cheap to clone: services share their internals through `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded at startup.
    pub config: Arc<Config>,

    /// Owner of every voice session.
    pub music: MusicService,

    /// Executes admitted slash commands.
    pub commands: CommandService,

    /// Filters slash commands by guild, channel and voice presence.
    pub gate: CommandGate,

    /// Reacts to voice state changes in the guild.
    pub presence: PresenceWatcher,

    /// REST client of the audio node; the node listener records its session id here.
    pub node: Arc<LavalinkNode>,

    /// Set once the node listener has been spawned, so later `ready` events do not
    /// spawn another.
    pub node_started: Arc<AtomicBool>,

    /// Cancelled on shutdown; stops the node listener.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Creates the application state.
    ///
    /// # Arguments
    /// - `config` - Application configuration
    /// - `node` - Audio node REST client shared with the music service
    /// - `music` - Music service built on the same node
    ///
    /// # Returns
    /// - `AppState` - Initialized state with the command and presence services
    pub fn new(config: Config, node: Arc<LavalinkNode>, music: MusicService) -> Self {
        Self {
            gate: CommandGate::from_config(&config),
            commands: CommandService::new(music.clone()),
            presence: PresenceWatcher::new(music.clone()),
            config: Arc::new(config),
            music,
            node,
            node_started: Arc::new(AtomicBool::new(false)),
            shutdown: CancellationToken::new(),
        }
    }
}
