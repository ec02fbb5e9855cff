use thiserror::Error;

/// Errors talking to the Lavalink node over REST or websocket.
#[derive(Error, Debug)]
pub enum NodeError {
    /// The node has not sent its `ready` op yet, so there is no session to address
    /// players under.
    #[error("Audio node is not connected")]
    NotReady,

    /// HTTP transport error from reqwest.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The node answered with a non-success status code.
    #[error("Audio node responded with {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, usually a Lavalink error object
        message: String,
    },

    /// The node could not load the requested identifier.
    #[error("Audio node failed to load track: {0}")]
    LoadFailed(String),

    /// A node payload could not be decoded.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    /// Websocket transport error.
    #[error(transparent)]
    WebSocket(#[from] Box<tokio_tungstenite::tungstenite::Error>),

    /// A websocket handshake header could not be built from configuration.
    #[error("Invalid header value for {0}")]
    InvalidHeader(&'static str),
}

impl From<tokio_tungstenite::tungstenite::Error> for NodeError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        NodeError::WebSocket(Box::new(err))
    }
}
