//! Guild to voice session registry.
//!
//! This module provides the `SessionRegistry`, the single source of truth for which
//! guilds currently have a voice session. A session is inserted only after the bot
//! decided to join and removed on every teardown path, so presence in the registry
//! tracks whether the bot holds a voice connection in that guild.

use dashmap::{mapref::entry::Entry, DashMap};
use serenity::all::GuildId;
use std::sync::Arc;

use crate::service::session::VoiceSession;

/// Result of `SessionRegistry::create_if_absent`.
#[derive(Clone)]
pub enum Registration {
    /// No session existed; the new one was inserted.
    Created(Arc<VoiceSession>),
    /// Another caller got there first; their session was left in place.
    Existing,
}

/// Registry of live voice sessions keyed by guild.
///
/// Cloning the registry shares the underlying map.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<DashMap<GuildId, Arc<VoiceSession>>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    ///
    /// # Returns
    /// - `SessionRegistry` - Registry without any sessions
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session for a guild, if any.
    pub fn get(&self, guild_id: GuildId) -> Option<Arc<VoiceSession>> {
        self.sessions
            .get(&guild_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Inserts a session for the guild unless one already exists.
    ///
    /// The check and the insert happen under the same shard lock, so two concurrent
    /// callers for the same guild can never both see `Created`. `make` only runs for
    /// the caller that wins.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the session belongs to
    /// - `make` - Builds the session when none exists
    ///
    /// # Returns
    /// - `Registration::Created` - `make` ran and its session is now registered
    /// - `Registration::Existing` - A session was already registered, `make` was not called
    pub fn create_if_absent<F>(&self, guild_id: GuildId, make: F) -> Registration
    where
        F: FnOnce() -> VoiceSession,
    {
        match self.sessions.entry(guild_id) {
            Entry::Occupied(_) => Registration::Existing,
            Entry::Vacant(entry) => {
                let session = Arc::new(make());
                entry.insert(Arc::clone(&session));
                Registration::Created(session)
            }
        }
    }

    /// Removes whatever session the guild has. Removing an absent guild is a no-op.
    pub fn remove(&self, guild_id: GuildId) -> Option<Arc<VoiceSession>> {
        self.sessions.remove(&guild_id).map(|(_, session)| session)
    }

    /// Removes `session` only if it is still the registered session for its guild.
    ///
    /// Teardown paths hold on to the session they are tearing down. Comparing by
    /// pointer keeps a late teardown from removing a newer session that was created
    /// for the same guild in the meantime.
    ///
    /// # Returns
    /// - `true` - The session was registered and has been removed
    /// - `false` - It was already gone or replaced
    pub fn remove_session(&self, session: &Arc<VoiceSession>) -> bool {
        self.sessions
            .remove_if(&session.guild_id(), |_, registered| {
                Arc::ptr_eq(registered, session)
            })
            .is_some()
    }

    /// Removes and returns every session.
    pub fn drain(&self) -> Vec<Arc<VoiceSession>> {
        let guild_ids: Vec<GuildId> = self.sessions.iter().map(|entry| *entry.key()).collect();

        guild_ids
            .into_iter()
            .filter_map(|guild_id| self.remove(guild_id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
