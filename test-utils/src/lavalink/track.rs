//! Track fixtures.

use serde_json::Value;

/// Creates a Lavalink track object for the given title.
///
/// The encoded handle is derived from the title so two fixtures with different
/// titles never share a handle, which lets tests assert which track the node was
/// asked to play by comparing `encoded` values.
///
/// # Arguments
/// - `title` - Track title shown to users
///
/// # Returns
/// - `Value` - Track JSON with `encoded`, `info`, `pluginInfo` and `userData`
pub fn track_json(title: &str) -> Value {
    serde_json::json!({
        "encoded": encoded_for(title),
        "info": {
            "identifier": title.to_lowercase().replace(' ', "-"),
            "isSeekable": true,
            "author": "Test Artist",
            "length": 212000,
            "isStream": false,
            "position": 0,
            "title": title,
            "uri": format!("https://www.youtube.com/watch?v={}", title.len()),
            "artworkUrl": null,
            "isrc": null,
            "sourceName": "youtube"
        },
        "pluginInfo": {},
        "userData": {}
    })
}

/// Encoded handle used by `track_json` for a title.
pub fn encoded_for(title: &str) -> String {
    format!("QAAA{}", title.replace(' ', "_"))
}
