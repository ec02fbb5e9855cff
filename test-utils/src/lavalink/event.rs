//! Websocket message fixtures.

use serde_json::Value;

use super::track::track_json;

/// `ready` op sent right after the websocket handshake.
pub fn ready(session_id: &str) -> Value {
    serde_json::json!({
        "op": "ready",
        "resumed": false,
        "sessionId": session_id
    })
}

/// `TrackEndEvent` for a guild.
///
/// # Arguments
/// - `guild_id` - Guild the player belongs to
/// - `title` - Title of the track that ended
/// - `reason` - Lavalink end reason (`finished`, `loadFailed`, `stopped`, `replaced`, `cleanup`)
pub fn track_end(guild_id: u64, title: &str, reason: &str) -> Value {
    serde_json::json!({
        "op": "event",
        "type": "TrackEndEvent",
        "guildId": guild_id.to_string(),
        "track": track_json(title),
        "reason": reason
    })
}

/// `TrackEndEvent` for a track the bot played with queue entry `entry` attached.
pub fn track_end_for_entry(guild_id: u64, title: &str, reason: &str, entry: u64) -> Value {
    let mut event = track_end(guild_id, title, reason);
    event["track"]["userData"] = serde_json::json!({ "entry": entry });

    event
}

/// `TrackExceptionEvent` for a guild.
pub fn track_exception(guild_id: u64, title: &str, message: &str) -> Value {
    serde_json::json!({
        "op": "event",
        "type": "TrackExceptionEvent",
        "guildId": guild_id.to_string(),
        "track": track_json(title),
        "exception": {
            "message": message,
            "severity": "common",
            "cause": "java.io.IOException"
        }
    })
}

/// `WebSocketClosedEvent` emitted when the node's voice socket to Discord closes.
pub fn websocket_closed(guild_id: u64, code: u16) -> Value {
    serde_json::json!({
        "op": "event",
        "type": "WebSocketClosedEvent",
        "guildId": guild_id.to_string(),
        "code": code,
        "reason": "Disconnected.",
        "byRemote": true
    })
}

/// Periodic `stats` op, which the bot ignores.
pub fn stats() -> Value {
    serde_json::json!({
        "op": "stats",
        "players": 1,
        "playingPlayers": 1,
        "uptime": 123456,
        "memory": { "free": 1, "used": 2, "allocated": 3, "reservable": 4 },
        "cpu": { "cores": 4, "systemLoad": 0.5, "lavalinkLoad": 0.1 },
        "frameStats": null
    })
}
