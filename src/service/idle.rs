//! Idle timeout controller.
//!
//! One controller task runs per voice session, spawned when the session joins. It
//! ticks once per second; every tick the session resets its idle counter if audio is
//! playing and increments it otherwise. Once the counter reaches the threshold the
//! session is torn down and the text channel is told the bot left due to inactivity.
//!
//! The task selects on the session's cancellation token, so any other teardown path
//! stops it before it can observe another tick.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::service::{music::MusicService, session::VoiceSession};

/// Period between idle checks.
pub const IDLE_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy)]
pub struct IdleTimeoutController {
    /// Consecutive idle ticks before the session expires.
    threshold: u32,
    period: Duration,
}

impl IdleTimeoutController {
    /// Creates a controller expiring sessions after `threshold` idle seconds.
    ///
    /// A zero threshold is raised to one tick so a fresh session is never torn down
    /// before it had a chance to start playing.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            period: IDLE_TICK,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Spawns the controller task for a session.
    ///
    /// # Arguments
    /// - `music` - Service used to expire the session
    /// - `session` - Session to watch; its cancellation token stops the task
    ///
    /// # Returns
    /// - `JoinHandle<()>` - Handle of the detached task
    pub fn spawn(self, music: MusicService, session: Arc<VoiceSession>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(music, session).await })
    }

    async fn run(self, music: MusicService, session: Arc<VoiceSession>) {
        let cancel = session.cancellation();
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if session.tick(self.threshold).await {
                        tracing::info!(
                            "Voice session in guild {} idle for {}s, disconnecting",
                            session.guild_id(),
                            self.threshold()
                        );
                        music.expire(&session).await;
                        break;
                    }
                }
            }
        }

        tracing::debug!(
            "Idle timeout controller for guild {} stopped",
            session.guild_id()
        );
    }
}
