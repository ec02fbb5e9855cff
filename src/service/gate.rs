//! Command gate.
//!
//! Every slash command passes through `CommandGate::admit` before it reaches the
//! music service. Invocations from outside the configured guild or text channel are
//! dropped without a reply. Commands that act on voice additionally require the
//! invoking user to be in some voice channel; whether it is the monitored one is
//! checked later by `MusicService::join`, which can name the right channel.

use serenity::all::{ChannelId, GuildId};

use crate::{config::Config, error::music::MusicError, model::command::MusicCommand};

/// Where a command was invoked from and where its user is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    /// `None` for direct messages.
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    /// Voice channel the invoking user is in, per the gateway cache.
    pub voice_channel_id: Option<ChannelId>,
}

/// An invocation that passed the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admitted {
    pub guild_id: GuildId,
    /// Always `Some` for commands that require voice.
    pub voice_channel_id: Option<ChannelId>,
}

/// Why an invocation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    /// Not invoked in the configured guild.
    OutsideGuild,
    /// Invoked in a text channel other than the monitored one.
    WrongTextChannel,
    /// The user is in no voice channel.
    NotInVoice,
}

impl GateRejection {
    /// Reply for the user, `None` when the rejection is silent.
    pub fn reply(&self) -> Option<String> {
        match self {
            Self::OutsideGuild | Self::WrongTextChannel => None,
            Self::NotInVoice => Some(MusicError::NotInVoice.user_message()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CommandGate {
    guild_id: GuildId,
    text_channel_id: ChannelId,
}

impl CommandGate {
    pub fn new(guild_id: GuildId, text_channel_id: ChannelId) -> Self {
        Self {
            guild_id,
            text_channel_id,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.guild_id, config.text_channel_id)
    }

    /// Decides whether a command may run.
    ///
    /// # Arguments
    /// - `invocation` - Origin of the command and the user's voice channel
    /// - `command` - The parsed command
    ///
    /// # Returns
    /// - `Ok(Admitted)` - Command may be dispatched
    /// - `Err(GateRejection)` - Command must not run; see `GateRejection::reply`
    pub fn admit(
        &self,
        invocation: &Invocation,
        command: &MusicCommand,
    ) -> Result<Admitted, GateRejection> {
        let guild_id = invocation
            .guild_id
            .filter(|guild_id| *guild_id == self.guild_id)
            .ok_or(GateRejection::OutsideGuild)?;

        if invocation.channel_id != self.text_channel_id {
            return Err(GateRejection::WrongTextChannel);
        }

        if command.requires_voice() && invocation.voice_channel_id.is_none() {
            return Err(GateRejection::NotInVoice);
        }

        Ok(Admitted {
            guild_id,
            voice_channel_id: invocation.voice_channel_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUILD: u64 = 100;
    const TEXT: u64 = 200;
    const VOICE: u64 = 300;

    fn gate() -> CommandGate {
        CommandGate::new(GuildId::new(GUILD), ChannelId::new(TEXT))
    }

    fn invocation(channel_id: u64, voice_channel_id: Option<u64>) -> Invocation {
        Invocation {
            guild_id: Some(GuildId::new(GUILD)),
            channel_id: ChannelId::new(channel_id),
            voice_channel_id: voice_channel_id.map(ChannelId::new),
        }
    }

    /// Tests a command from the monitored channel by a user in voice is admitted.
    ///
    /// Expected: Ok with the guild and the user's voice channel
    #[test]
    fn admits_valid_invocation() {
        let admitted = gate().admit(&invocation(TEXT, Some(VOICE)), &MusicCommand::Pause);

        assert_eq!(
            admitted,
            Ok(Admitted {
                guild_id: GuildId::new(GUILD),
                voice_channel_id: Some(ChannelId::new(VOICE)),
            })
        );
    }

    /// Tests commands from other text channels are dropped silently.
    ///
    /// Expected: Err(WrongTextChannel) without a reply
    #[test]
    fn silently_rejects_other_text_channels() {
        let rejection = gate()
            .admit(&invocation(999, Some(VOICE)), &MusicCommand::Skip)
            .unwrap_err();

        assert_eq!(rejection, GateRejection::WrongTextChannel);
        assert_eq!(rejection.reply(), None);
    }

    /// Tests channel filtering wins over the voice check.
    ///
    /// Expected: Err(WrongTextChannel) even though the user is not in voice
    #[test]
    fn channel_check_precedes_voice_check() {
        let rejection = gate()
            .admit(&invocation(999, None), &MusicCommand::Skip)
            .unwrap_err();

        assert_eq!(rejection, GateRejection::WrongTextChannel);
    }

    /// Tests direct messages and other guilds are dropped silently.
    ///
    /// Expected: Err(OutsideGuild) without a reply
    #[test]
    fn silently_rejects_outside_guild() {
        let mut dm = invocation(TEXT, Some(VOICE));
        dm.guild_id = None;
        let mut other = invocation(TEXT, Some(VOICE));
        other.guild_id = Some(GuildId::new(1));

        for invocation in [dm, other] {
            let rejection = gate()
                .admit(&invocation, &MusicCommand::Queue)
                .unwrap_err();
            assert_eq!(rejection, GateRejection::OutsideGuild);
            assert_eq!(rejection.reply(), None);
        }
    }

    /// Tests users outside voice get told so.
    ///
    /// Expected: Err(NotInVoice) with the "not in a voice channel" reply
    #[test]
    fn rejects_user_not_in_voice_with_reply() {
        let rejection = gate()
            .admit(
                &invocation(TEXT, None),
                &MusicCommand::Play {
                    query: "song".to_string(),
                },
            )
            .unwrap_err();

        assert_eq!(rejection, GateRejection::NotInVoice);
        assert_eq!(
            rejection.reply().as_deref(),
            Some("You are not in a voice channel")
        );
    }

    /// Tests the gate does not check which voice channel the user is in.
    ///
    /// Expected: Ok for a voice channel other than the monitored one
    #[test]
    fn admits_any_voice_channel() {
        let admitted = gate().admit(&invocation(TEXT, Some(12345)), &MusicCommand::Current);

        assert!(admitted.is_ok());
    }

    /// Tests help works without being in voice.
    ///
    /// Expected: Ok with no voice channel
    #[test]
    fn help_does_not_require_voice() {
        let admitted = gate()
            .admit(&invocation(TEXT, None), &MusicCommand::Help)
            .unwrap();

        assert_eq!(admitted.voice_channel_id, None);
    }
}
