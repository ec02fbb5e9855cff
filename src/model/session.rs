use crate::model::track::Track;

/// Outcome of appending a track to a session's queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// The queue was empty and the track started right away.
    Playing,
    /// The track was queued behind others at this one-based position.
    Queued { position: usize },
}

/// Outcome of skipping the current track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipOutcome {
    /// The track that was playing.
    pub skipped: Track,
    /// The track now playing, `None` when the queue ran out.
    pub next: Option<Track>,
}
