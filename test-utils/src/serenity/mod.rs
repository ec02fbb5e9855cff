//! Test factories for creating Serenity API objects.
//!
//! This module provides factory functions for creating Serenity structs for testing
//! purposes. These factories create valid Serenity objects by deserializing JSON,
//! simulating what Discord's gateway would deliver.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::voice_state::create_test_voice_state;
//!
//! let bot_state = create_test_voice_state(1, 900, Some(300), "bot-session");
//! let left_state = create_test_voice_state(1, 42, None, "user-session");
//! ```
//!
//! # Available Factories
//!
//! - `voice_state::create_test_voice_state` - Create Serenity VoiceState objects

pub mod voice_state;

pub use voice_state::create_test_voice_state;
