//! Slash command declarations.
//!
//! Commands are registered per guild on every `ready`, which replaces the whole set
//! and makes changes show up immediately instead of after global propagation.

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption, GuildId,
    ResolvedValue,
};

use crate::{
    error::AppError,
    model::command::{
        CommandArg, COMMAND_DESCRIPTIONS, NAME_PLAY, NAME_REMOVE, OPTION_INDEX, OPTION_QUERY,
    },
};

/// Builds the registration payload for every command.
pub fn build_commands() -> Vec<CreateCommand> {
    COMMAND_DESCRIPTIONS
        .iter()
        .map(|(name, description)| {
            let command = CreateCommand::new(*name).description(*description);

            match *name {
                NAME_PLAY => command.add_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        OPTION_QUERY,
                        "YouTube link or search query",
                    )
                    .required(true),
                ),
                NAME_REMOVE => command.add_option(
                    CreateCommandOption::new(
                        CommandOptionType::Integer,
                        OPTION_INDEX,
                        "Position in the queue, as shown by /queue",
                    )
                    .required(true),
                ),
                _ => command,
            }
        })
        .collect()
}

/// Replaces the guild's slash commands with `build_commands`.
///
/// # Returns
/// - `Ok(usize)` - Number of commands registered
/// - `Err(AppError)` - Discord rejected the registration
pub async fn register_commands(ctx: &Context, guild_id: GuildId) -> Result<usize, AppError> {
    let registered = guild_id.set_commands(&ctx.http, build_commands()).await?;

    Ok(registered.len())
}

/// Extracts the string and integer options of an invocation.
pub fn command_args(command: &CommandInteraction) -> Vec<(String, CommandArg)> {
    command
        .data
        .options()
        .into_iter()
        .filter_map(|option| {
            let value = match option.value {
                ResolvedValue::String(text) => CommandArg::Text(text.to_string()),
                ResolvedValue::Integer(number) => CommandArg::Integer(number),
                _ => return None,
            };

            Some((option.name.to_string(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests every command is declared once.
    ///
    /// Expected: ten commands with the registered names
    #[test]
    fn declares_all_commands() {
        let names: Vec<String> = build_commands()
            .iter()
            .map(|command| {
                serde_json::to_value(command).unwrap()["name"]
                    .as_str()
                    .unwrap()
                    .to_string()
            })
            .collect();

        assert_eq!(names.len(), COMMAND_DESCRIPTIONS.len());
        for (name, _) in COMMAND_DESCRIPTIONS {
            assert!(names.iter().any(|registered| registered == name));
        }
    }

    /// Tests play and remove declare their required options.
    ///
    /// Expected: required string `query` for play, required integer `index` for remove
    #[test]
    fn declares_required_options() {
        let commands: Vec<serde_json::Value> = build_commands()
            .iter()
            .map(|command| serde_json::to_value(command).unwrap())
            .collect();
        let find = |name: &str| {
            commands
                .iter()
                .find(|command| command["name"] == name)
                .unwrap()
                .clone()
        };

        let play = find(NAME_PLAY);
        assert_eq!(play["options"][0]["name"], OPTION_QUERY);
        assert_eq!(play["options"][0]["required"], true);
        assert_eq!(play["options"][0]["type"], 3);

        let remove = find(NAME_REMOVE);
        assert_eq!(remove["options"][0]["name"], OPTION_INDEX);
        assert_eq!(remove["options"][0]["type"], 4);

        assert!(find("pause").get("options").map_or(true, |options| options
            .as_array()
            .map_or(true, |options| options.is_empty())));
    }
}
