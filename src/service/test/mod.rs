//! Service layer tests.
//!
//! Sessions and the music service are exercised against mockall mocks of the audio
//! node, the voice gateway and the notifier. Track payloads come from the shared
//! Lavalink fixtures so the tests decode the same JSON the node sends.

use serenity::all::{ChannelId, GuildId};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

use crate::{
    model::{track::Track, voice::VoiceConnectionInfo},
    node::{protocol::NodeTrack, MockAudioNode},
    service::{
        idle::IdleTimeoutController,
        music::{MusicService, MusicSettings},
        notifier::MockNotifier,
        session::VoiceSession,
    },
    voice::MockVoiceGateway,
};

mod session;

pub const GUILD: u64 = 100;
pub const TEXT: u64 = 200;
pub const VOICE: u64 = 300;

pub fn guild() -> GuildId {
    GuildId::new(GUILD)
}

pub fn voice_channel() -> ChannelId {
    ChannelId::new(VOICE)
}

/// Decodes a fixture track the way `load_tracks` would.
pub fn track(title: &str) -> Track {
    let node_track: NodeTrack =
        serde_json::from_value(test_utils::lavalink::track::track_json(title)).unwrap();

    Track::from(node_track)
}

pub fn voice_info() -> VoiceConnectionInfo {
    VoiceConnectionInfo {
        session_id: "voice-session".to_string(),
        endpoint: "eu-west.discord.media:443".to_string(),
        token: "voice-token".to_string(),
    }
}

/// Session for the test guild, detached from any service.
pub fn session() -> VoiceSession {
    VoiceSession::new(guild(), voice_channel(), CancellationToken::new())
}

/// Records the title of every track the mock node is asked to play.
pub fn record_plays(node: &mut MockAudioNode) -> Arc<Mutex<Vec<String>>> {
    let played = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&played);

    node.expect_play().returning(move |_, track, _| {
        log.lock().unwrap().push(track.title.clone());
        Ok(())
    });

    played
}

/// Mock collaborators of a `MusicService`.
///
/// Expectations are set on the public fields, then `build` moves the mocks into the
/// service.
pub struct Mocks {
    pub node: MockAudioNode,
    pub voice: MockVoiceGateway,
    pub notifier: MockNotifier,
}

impl Mocks {
    pub fn new() -> Self {
        Self {
            node: MockAudioNode::new(),
            voice: MockVoiceGateway::new(),
            notifier: MockNotifier::new(),
        }
    }

    /// Lets any number of joins succeed.
    pub fn allow_join(&mut self) {
        self.voice.expect_join().returning(|_, _| Ok(voice_info()));
        self.node.expect_update_voice().returning(|_, _| Ok(()));
    }

    /// Lets any number of teardowns succeed.
    pub fn allow_teardown(&mut self) {
        self.voice.expect_leave().returning(|_| Ok(()));
        self.node.expect_destroy().returning(|_| Ok(()));
    }

    pub fn build(self) -> MusicService {
        self.build_with_idle(600)
    }

    pub fn build_with_idle(self, idle_timeout_secs: u32) -> MusicService {
        let settings = MusicSettings {
            text_channel_id: ChannelId::new(TEXT),
            voice_channel_id: voice_channel(),
            idle: IdleTimeoutController::new(idle_timeout_secs),
        };

        MusicService::new(
            Arc::new(self.node),
            Arc::new(self.voice),
            Arc::new(self.notifier),
            settings,
        )
    }
}
