//! The user-facing command surface.
//!
//! Slash commands arrive as a name plus resolved options. `MusicCommand::parse` turns
//! that into a typed command so nothing past the bot handler deals with option
//! lookups. Command registration (names, descriptions, option types) lives in
//! `bot::commands` and uses the same `NAME_*` constants.

pub const NAME_DISCONNECT: &str = "disconnect";
pub const NAME_PLAY: &str = "play";
pub const NAME_PAUSE: &str = "pause";
pub const NAME_RESUME: &str = "resume";
pub const NAME_SKIP: &str = "skip";
pub const NAME_QUEUE: &str = "queue";
pub const NAME_CLEAR: &str = "clear";
pub const NAME_REMOVE: &str = "remove";
pub const NAME_CURRENT: &str = "current";
pub const NAME_HELP: &str = "help";

/// Option name carrying the search query or link for `play`.
pub const OPTION_QUERY: &str = "query";
/// Option name carrying the one-based queue position for `remove`.
pub const OPTION_INDEX: &str = "index";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicCommand {
    Disconnect,
    Play { query: String },
    Pause,
    Resume,
    Skip,
    Queue,
    Clear,
    Remove { index: i64 },
    Current,
    Help,
}

/// Option value extracted from an interaction, detached from serenity's borrowed types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandArg {
    Text(String),
    Integer(i64),
}

impl MusicCommand {
    /// Parses a command name and its options.
    ///
    /// # Arguments
    /// - `name` - Slash command name
    /// - `args` - `(option name, value)` pairs
    ///
    /// # Returns
    /// - `Some(MusicCommand)` - Known command with its required options present
    /// - `None` - Unknown command or missing/mistyped option
    pub fn parse(name: &str, args: &[(String, CommandArg)]) -> Option<Self> {
        let arg = |wanted: &str| {
            args.iter()
                .find(|(name, _)| name == wanted)
                .map(|(_, value)| value)
        };

        let command = match name {
            NAME_DISCONNECT => Self::Disconnect,
            NAME_PLAY => match arg(OPTION_QUERY)? {
                CommandArg::Text(query) => Self::Play {
                    query: query.clone(),
                },
                CommandArg::Integer(_) => return None,
            },
            NAME_PAUSE => Self::Pause,
            NAME_RESUME => Self::Resume,
            NAME_SKIP => Self::Skip,
            NAME_QUEUE => Self::Queue,
            NAME_CLEAR => Self::Clear,
            NAME_REMOVE => match arg(OPTION_INDEX)? {
                CommandArg::Integer(index) => Self::Remove { index: *index },
                CommandArg::Text(text) => Self::Remove {
                    index: text.trim().parse().ok()?,
                },
            },
            NAME_CURRENT => Self::Current,
            NAME_HELP => Self::Help,
            _ => return None,
        };

        Some(command)
    }

    /// Whether the invoking user has to be in a voice channel.
    pub fn requires_voice(&self) -> bool {
        !matches!(self, Self::Help)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Disconnect => NAME_DISCONNECT,
            Self::Play { .. } => NAME_PLAY,
            Self::Pause => NAME_PAUSE,
            Self::Resume => NAME_RESUME,
            Self::Skip => NAME_SKIP,
            Self::Queue => NAME_QUEUE,
            Self::Clear => NAME_CLEAR,
            Self::Remove { .. } => NAME_REMOVE,
            Self::Current => NAME_CURRENT,
            Self::Help => NAME_HELP,
        }
    }
}

/// `(name, description)` for every command, in the order `help` lists them.
pub const COMMAND_DESCRIPTIONS: &[(&str, &str)] = &[
    (NAME_PLAY, "Play a song from a YouTube link or search query"),
    (NAME_PAUSE, "Pause the current song"),
    (NAME_RESUME, "Resume the current song"),
    (NAME_SKIP, "Skip the current song"),
    (NAME_CURRENT, "Show the current song"),
    (NAME_QUEUE, "Show the current queue"),
    (NAME_REMOVE, "Remove a song from the queue"),
    (NAME_CLEAR, "Clear the current queue"),
    (NAME_DISCONNECT, "Leave the voice channel"),
    (NAME_HELP, "List the available commands"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn text(name: &str, value: &str) -> (String, CommandArg) {
        (name.to_string(), CommandArg::Text(value.to_string()))
    }

    /// Tests every option-less command parses by name.
    ///
    /// Expected: Some(command) whose `name()` round-trips
    #[test]
    fn parses_plain_commands() {
        for name in [
            NAME_DISCONNECT,
            NAME_PAUSE,
            NAME_RESUME,
            NAME_SKIP,
            NAME_QUEUE,
            NAME_CLEAR,
            NAME_CURRENT,
            NAME_HELP,
        ] {
            let command = MusicCommand::parse(name, &[]).unwrap();
            assert_eq!(command.name(), name);
        }
    }

    /// Tests `play` takes its query from the query option.
    ///
    /// Expected: Some(Play) with the raw query
    #[test]
    fn parses_play_query() {
        let command = MusicCommand::parse(NAME_PLAY, &[text(OPTION_QUERY, "daft punk")]);

        assert_eq!(
            command,
            Some(MusicCommand::Play {
                query: "daft punk".to_string()
            })
        );
    }

    /// Tests `play` without its query option is rejected.
    ///
    /// Expected: None
    #[test]
    fn rejects_play_without_query() {
        assert_eq!(MusicCommand::parse(NAME_PLAY, &[]), None);
    }

    /// Tests `remove` accepts integer and numeric text options.
    ///
    /// Expected: Some(Remove) with the parsed index, None for non-numeric text
    #[test]
    fn parses_remove_index() {
        let from_int = MusicCommand::parse(
            NAME_REMOVE,
            &[(OPTION_INDEX.to_string(), CommandArg::Integer(3))],
        );
        let from_text = MusicCommand::parse(NAME_REMOVE, &[text(OPTION_INDEX, " 4 ")]);
        let garbage = MusicCommand::parse(NAME_REMOVE, &[text(OPTION_INDEX, "two")]);

        assert_eq!(from_int, Some(MusicCommand::Remove { index: 3 }));
        assert_eq!(from_text, Some(MusicCommand::Remove { index: 4 }));
        assert_eq!(garbage, None);
    }

    /// Tests only help may be used outside voice.
    ///
    /// Expected: false for Help, true for voice commands
    #[test]
    fn only_help_skips_voice_requirement() {
        assert!(!MusicCommand::Help.requires_voice());
        assert!(MusicCommand::Queue.requires_voice());
        assert!(MusicCommand::Disconnect.requires_voice());
    }

    /// Tests unknown command names are ignored.
    ///
    /// Expected: None
    #[test]
    fn rejects_unknown_command() {
        assert_eq!(MusicCommand::parse("dance", &[]), None);
    }

    /// Tests every command has a description for registration.
    ///
    /// Expected: non-empty description for all ten commands
    #[test]
    fn every_command_is_described() {
        assert_eq!(COMMAND_DESCRIPTIONS.len(), 10);
        for (name, description) in COMMAND_DESCRIPTIONS {
            assert!(!description.is_empty(), "{} has no description", name);
        }
    }
}
