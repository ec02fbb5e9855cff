//! Node websocket listener.
//!
//! Lavalink pushes everything that happens on a player over one websocket per
//! client: the session id in `ready`, track ends, playback failures and closures of
//! its own voice socket. The listener keeps that websocket open, reconnecting with
//! backoff, and turns the events into music service calls.
//!
//! Players live in the node's session, so when the websocket drops every voice
//! session is torn down and the session id cleared until the next `ready`. The
//! listener keeps reconnecting for as long as the bot runs; only shutdown stops it.

use futures_util::StreamExt;
use serenity::all::UserId;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{
        client::IntoClientRequest,
        http::{HeaderName, HeaderValue},
        protocol::Message,
    },
    MaybeTlsStream, WebSocketStream,
};
use tokio_util::sync::CancellationToken;

use crate::{
    error::node::NodeError,
    node::{
        backoff::Backoff,
        lavalink::LavalinkNode,
        protocol::{parse_guild_id, NodeEvent, NodeMessage},
    },
    service::music::MusicService,
};

type NodeStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

const CLIENT_NAME: &str = concat!("musabotti/", env!("CARGO_PKG_VERSION"));

/// Voice websocket close codes after which the node cannot resume the connection:
/// 4006 (session no longer valid) and 4014 (disconnected from the channel).
const FATAL_VOICE_CLOSE_CODES: [u16; 2] = [4006, 4014];

pub struct NodeEventListener {
    node: Arc<LavalinkNode>,
    music: MusicService,
    user_id: UserId,
    shutdown: CancellationToken,
}

impl NodeEventListener {
    /// Creates a listener for the node.
    ///
    /// # Arguments
    /// - `node` - REST client whose session id the listener maintains
    /// - `music` - Service receiving track and voice events
    /// - `user_id` - The bot's user id, required by the node handshake
    /// - `shutdown` - Stops the listener and suppresses reconnects
    ///
    /// # Returns
    /// - `NodeEventListener` - Listener ready to be spawned
    pub fn new(
        node: Arc<LavalinkNode>,
        music: MusicService,
        user_id: UserId,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            node,
            music,
            user_id,
            shutdown,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    async fn run(self) {
        let url = self.node.settings().websocket_url();
        let mut backoff = Backoff::new();

        loop {
            let connected = tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => break,
                connected = self.connect() => connected,
            };

            match connected {
                Ok(stream) => {
                    tracing::info!("Connected to audio node at {}", url);
                    backoff.reset();

                    self.read(stream).await;
                    if self.shutdown.is_cancelled() {
                        break;
                    }

                    self.node.set_session_id(None).await;
                    let closed = self.music.destroy_all().await;
                    tracing::warn!(
                        "Lost connection to audio node, closed {} voice sessions",
                        closed
                    );
                }
                Err(e) => tracing::error!("Failed to connect to audio node at {}: {}", url, e),
            }

            let delay = backoff.next();
            tracing::info!(
                "Reconnecting to audio node in {:?} (attempt {})",
                delay,
                backoff.attempt()
            );

            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        tracing::debug!("Audio node listener stopped");
    }

    async fn connect(&self) -> Result<NodeStream, NodeError> {
        let settings = self.node.settings();
        let mut request = settings.websocket_url().into_client_request()?;

        let headers = request.headers_mut();
        headers.insert(
            HeaderName::from_static("authorization"),
            HeaderValue::from_str(&settings.password)
                .map_err(|_| NodeError::InvalidHeader("Authorization"))?,
        );
        headers.insert(
            HeaderName::from_static("user-id"),
            HeaderValue::from_str(&self.user_id.to_string())
                .map_err(|_| NodeError::InvalidHeader("User-Id"))?,
        );
        headers.insert(
            HeaderName::from_static("client-name"),
            HeaderValue::from_static(CLIENT_NAME),
        );

        let (stream, _response) = connect_async(request).await?;

        Ok(stream)
    }

    /// Reads until the node closes the socket, an error occurs or shutdown.
    async fn read(&self, mut stream: NodeStream) {
        loop {
            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => {
                    if let Err(e) = stream.close(None).await {
                        tracing::debug!("Failed to close audio node websocket: {}", e);
                    }
                    return;
                }
                message = stream.next() => match message {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<NodeMessage>(&text) {
                            Ok(message) => self.handle_message(message).await,
                            Err(e) => tracing::warn!("Undecodable audio node message: {}", e),
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        tracing::info!("Audio node closed the websocket: {:?}", frame);
                        return;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!("Audio node websocket error: {}", e);
                        return;
                    }
                    None => return,
                },
            }
        }
    }

    /// Applies one node message.
    pub async fn handle_message(&self, message: NodeMessage) {
        match message {
            NodeMessage::Ready {
                resumed,
                session_id,
            } => {
                tracing::info!(
                    "Audio node session {} ready (resumed: {})",
                    session_id,
                    resumed
                );
                self.node.set_session_id(Some(session_id)).await;
            }
            NodeMessage::Event(event) => self.handle_event(event).await,
            NodeMessage::Unhandled => {}
        }
    }

    async fn handle_event(&self, event: NodeEvent) {
        match event {
            NodeEvent::TrackStart { guild_id } => {
                tracing::debug!("Track started in guild {}", guild_id);
            }
            NodeEvent::TrackEnd {
                guild_id,
                track,
                reason,
            } => {
                tracing::debug!(
                    "Track {} ended in guild {}: {:?}",
                    track.info.title,
                    guild_id,
                    reason
                );

                if !reason.may_start_next() {
                    return;
                }
                let Some(guild_id) = parse_guild_id(&guild_id) else {
                    tracing::warn!("Track end for invalid guild id {}", guild_id);
                    return;
                };

                let entry = track.user_data.and_then(|data| data.entry);
                self.music.advance(guild_id, &track.encoded, entry).await;
            }
            NodeEvent::TrackException {
                guild_id,
                exception,
            } => {
                tracing::warn!(
                    "Track failed in guild {}: {} ({}, {})",
                    guild_id,
                    exception.message.as_deref().unwrap_or("no message"),
                    exception.severity,
                    exception.cause
                );
            }
            NodeEvent::TrackStuck {
                guild_id,
                threshold_ms,
            } => {
                tracing::warn!(
                    "Track stuck in guild {} for over {}ms",
                    guild_id,
                    threshold_ms
                );
            }
            NodeEvent::WebSocketClosed {
                guild_id,
                code,
                reason,
                by_remote,
            } => {
                tracing::warn!(
                    "Node voice socket closed in guild {} with {} {} (by remote: {})",
                    guild_id,
                    code,
                    reason,
                    by_remote
                );

                if !FATAL_VOICE_CLOSE_CODES.contains(&code) {
                    return;
                }
                if let Some(guild_id) = parse_guild_id(&guild_id) {
                    self.music.destroy(guild_id).await;
                }
            }
            NodeEvent::Unhandled => {}
        }
    }
}
