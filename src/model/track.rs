use crate::node::protocol::NodeTrack;

/// A playable track as resolved by the audio node.
///
/// `encoded` is the node's opaque handle; everything else is display metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub encoded: String,
    pub title: String,
    pub author: String,
    pub uri: Option<String>,
    /// Duration in milliseconds, 0 for streams.
    pub length_ms: u64,
}

impl From<NodeTrack> for Track {
    fn from(track: NodeTrack) -> Self {
        Self {
            encoded: track.encoded,
            title: track.info.title,
            author: track.info.author,
            uri: track.info.uri,
            length_ms: track.info.length,
        }
    }
}
