//! Service layer.
//!
//! - `gate` decides whether a slash command may run at all
//! - `command` executes admitted commands and phrases the reply
//! - `music` owns voice session lifecycle on top of the registry, the voice gateway
//!   and the audio node
//! - `session` is the per-guild queue and playback state
//! - `idle` is the per-session idle timeout task
//! - `presence` reacts to voice state changes
//! - `notifier` posts unsolicited messages to the text channel

pub mod command;
pub mod gate;
pub mod idle;
pub mod music;
pub mod notifier;
pub mod presence;
pub mod session;

#[cfg(test)]
pub(crate) mod test;
