use std::time::Duration;

const BACKOFF_BASE_MS: u64 = 1000;
/// Delays stop doubling after this many attempts.
const BACKOFF_MAX_EXPONENT: u32 = 3;

/// Reconnect delay for the node websocket: 1s, 2s, 4s, then 8s for every further
/// attempt until `reset`.
pub(super) struct Backoff {
    attempt: u32,
}

impl Backoff {
    pub(super) fn new() -> Self {
        Self { attempt: 0 }
    }

    pub(super) fn next(&mut self) -> Duration {
        let exponent = self.attempt.min(BACKOFF_MAX_EXPONENT);
        self.attempt = self.attempt.saturating_add(1);

        Duration::from_millis(BACKOFF_BASE_MS * 2u64.pow(exponent))
    }

    pub(super) fn attempt(&self) -> u32 {
        self.attempt
    }

    pub(super) fn reset(&mut self) {
        self.attempt = 0;
    }
}
