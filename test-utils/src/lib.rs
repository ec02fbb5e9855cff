//! Musabotti Test Utils
//!
//! Provides shared testing utilities for the musabotti bot. The bot talks to two
//! external systems, Discord (through Serenity) and a Lavalink audio node, and tests
//! need realistic payloads from both without opening any connection.
//!
//! # Overview
//!
//! - **serenity**: Factories that build Serenity model objects (voice states) by
//!   deserializing JSON, the same way the gateway would deliver them
//! - **lavalink**: JSON fixtures for Lavalink v4 REST responses and websocket
//!   messages (tracks, load results, node events)
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{lavalink, serenity::create_test_voice_state};
//!
//! #[tokio::test]
//! async fn test_presence() {
//!     let state = create_test_voice_state(1, 2, Some(3), "session");
//!     let track = lavalink::track::track_json("Never Gonna Give You Up");
//!     // ...
//! }
//! ```

pub mod lavalink;
pub mod serenity;
