/// Voice connection details the audio node needs to open its own voice socket.
///
/// Discord delivers the session id in the bot's voice-state update and the token and
/// endpoint in the voice-server update; the node needs all three.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceConnectionInfo {
    pub session_id: String,
    pub endpoint: String,
    pub token: String,
}
