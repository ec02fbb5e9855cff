//! Test factory for creating Serenity VoiceState objects.
//!
//! Voice states are what Discord sends whenever a member joins, moves between, or
//! leaves a voice channel. The bot's presence handling reads the user, the channel
//! and the voice session id from them.

use serenity::all::VoiceState;

/// Creates a test Serenity VoiceState.
///
/// Builds a VoiceState by deserializing JSON with the provided values. Mute, deafen
/// and video flags are all off.
///
/// # Arguments
/// - `guild_id` - Discord guild ID (snowflake)
/// - `user_id` - ID of the member the state belongs to
/// - `channel_id` - Voice channel the member is in, `None` when they left voice
/// - `session_id` - Voice session id Discord assigned to the member
///
/// # Returns
/// - `VoiceState` - A valid Serenity VoiceState struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a VoiceState (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::voice_state::create_test_voice_state;
///
/// let joined = create_test_voice_state(1, 42, Some(300), "abc");
/// assert_eq!(joined.channel_id.map(|c| c.get()), Some(300));
///
/// let left = create_test_voice_state(1, 42, None, "abc");
/// assert!(left.channel_id.is_none());
/// ```
pub fn create_test_voice_state(
    guild_id: u64,
    user_id: u64,
    channel_id: Option<u64>,
    session_id: &str,
) -> VoiceState {
    serde_json::from_value(serde_json::json!({
        "guild_id": guild_id.to_string(),
        "channel_id": channel_id.map(|id| id.to_string()),
        "user_id": user_id.to_string(),
        "session_id": session_id,
        "deaf": false,
        "mute": false,
        "self_deaf": false,
        "self_mute": false,
        "self_video": false,
        "suppress": false,
        "request_to_speak_timestamp": null,
    }))
    .expect("Failed to create test voice state - invalid JSON structure")
}
