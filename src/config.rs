use serenity::all::{ChannelId, GuildId};

use crate::error::{config::ConfigError, AppError};

const DEFAULT_LAVALINK_HOST: &str = "localhost";
const DEFAULT_LAVALINK_PORT: u16 = 2333;
const DEFAULT_IDLE_TIMEOUT_SECS: u32 = 600;

pub struct Config {
    pub discord_bot_token: String,

    /// Guild the slash commands are registered in.
    pub guild_id: GuildId,
    /// Only text channel commands are accepted from.
    pub text_channel_id: ChannelId,
    /// Only voice channel the bot may join.
    pub voice_channel_id: ChannelId,

    pub lavalink_host: String,
    pub lavalink_port: u16,
    pub lavalink_password: String,
    pub lavalink_secure: bool,

    /// Consecutive idle seconds before a voice session is torn down.
    pub idle_timeout_secs: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::from_vars(|name| std::env::var(name).ok())?)
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// `from_env` passes `std::env::var`; tests pass a map so they never touch the
    /// process environment.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        Ok(Self {
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            guild_id: GuildId::new(parse_snowflake(
                "DISCORD_GUILD_ID",
                &required("DISCORD_GUILD_ID")?,
            )?),
            text_channel_id: ChannelId::new(parse_snowflake(
                "TEXT_CHANNEL_ID",
                &required("TEXT_CHANNEL_ID")?,
            )?),
            voice_channel_id: ChannelId::new(parse_snowflake(
                "VOICE_CHANNEL_ID",
                &required("VOICE_CHANNEL_ID")?,
            )?),
            lavalink_host: lookup("LAVALINK_HOST")
                .unwrap_or_else(|| DEFAULT_LAVALINK_HOST.to_string()),
            lavalink_port: match lookup("LAVALINK_PORT") {
                Some(value) => parse_value("LAVALINK_PORT", &value)?,
                None => DEFAULT_LAVALINK_PORT,
            },
            lavalink_password: required("LAVALINK_PASSWORD")?,
            lavalink_secure: match lookup("LAVALINK_SECURE") {
                Some(value) => parse_value("LAVALINK_SECURE", &value)?,
                None => false,
            },
            idle_timeout_secs: match lookup("IDLE_TIMEOUT_SECS") {
                Some(value) => parse_value("IDLE_TIMEOUT_SECS", &value)?,
                None => DEFAULT_IDLE_TIMEOUT_SECS,
            },
        })
    }
}

/// Parses a Discord snowflake, rejecting zero since serenity ids are non-zero.
fn parse_snowflake(name: &str, value: &str) -> Result<u64, ConfigError> {
    let id: u64 = parse_value(name, value)?;

    if id == 0 {
        return Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: "id must not be zero".to_string(),
        });
    }

    Ok(id)
}

fn parse_value<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
        })
}
