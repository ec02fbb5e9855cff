//! `/v4/loadtracks` response fixtures.

use serde_json::Value;

use super::track::track_json;

/// Search result containing one track per title, in order.
pub fn search(titles: &[&str]) -> Value {
    let tracks: Vec<Value> = titles.iter().map(|title| track_json(title)).collect();

    serde_json::json!({
        "loadType": "search",
        "data": tracks
    })
}

/// Result of loading a direct link to a single track.
pub fn single_track(title: &str) -> Value {
    serde_json::json!({
        "loadType": "track",
        "data": track_json(title)
    })
}

/// Result of loading a playlist link.
pub fn playlist(name: &str, titles: &[&str]) -> Value {
    let tracks: Vec<Value> = titles.iter().map(|title| track_json(title)).collect();

    serde_json::json!({
        "loadType": "playlist",
        "data": {
            "info": {
                "name": name,
                "selectedTrack": -1
            },
            "pluginInfo": {},
            "tracks": tracks
        }
    })
}

/// Result when nothing matched the query.
pub fn empty() -> Value {
    serde_json::json!({
        "loadType": "empty",
        "data": {}
    })
}

/// Result when the node failed to load the identifier.
pub fn error(message: &str) -> Value {
    serde_json::json!({
        "loadType": "error",
        "data": {
            "message": message,
            "severity": "common",
            "cause": "java.lang.RuntimeException"
        }
    })
}
