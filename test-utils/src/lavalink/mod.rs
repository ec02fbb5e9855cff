//! JSON fixtures for the Lavalink v4 protocol.
//!
//! These helpers produce `serde_json::Value`s shaped exactly like the payloads a
//! Lavalink node returns from its REST API and pushes over its websocket. Tests
//! deserialize them into the bot's protocol types, so a fixture drifting from the
//! real wire format shows up as a failing test.
//!
//! # Available Fixtures
//!
//! - `track::track_json` - A single encoded track with metadata
//! - `load_result::*` - `/v4/loadtracks` responses (search, single track, playlist,
//!   empty, error)
//! - `event::*` - Websocket messages (`ready`, track events, voice socket closure)

pub mod event;
pub mod load_result;
pub mod track;
