//! In-memory state layer.
//!
//! Nothing is persisted across restarts; the only state the bot keeps is which guilds
//! currently hold a voice session.

pub mod registry;
