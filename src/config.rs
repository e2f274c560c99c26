//! # Configuration Module
//!
//! Startup configuration read from the process environment (and `.env`),
//! plus the single command-line switch the binary understands.

use std::path::PathBuf;

use teloxide::types::{ChatId, Recipient};

use crate::errors::ConfigError;

// Environment keys
pub const BOT_TOKEN_KEY: &str = "BOT_TOKEN";
pub const BOT_NAME_KEY: &str = "BOT_NAME";
pub const REMBG_MODEL_KEY: &str = "REMBG_AI_MODEL";
pub const CHANNEL_ID_KEY: &str = "CHANNEL_ID";
pub const REMBG_URL_KEY: &str = "REMBG_URL";
pub const LOG_FILE_KEY: &str = "STICKER_BOT_LOG";

pub const DEFAULT_REMBG_URL: &str = "http://127.0.0.1:7000/api/remove";
pub const DEFAULT_LOG_FILE: &str = "sticker_bot.log";
pub const PERFORMANCE_MODE_FLAG: &str = "--performance-mode";

/// The channel users must be subscribed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelTarget {
    /// Numeric chat id (preferred, stable)
    Id(ChatId),
    /// Public handle without the leading `@`
    Username(String),
    /// Could not be interpreted; every gate check fails closed
    Malformed(String),
}

impl ChannelTarget {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(id) = trimmed.parse::<i64>() {
            return ChannelTarget::Id(ChatId(id));
        }

        let handle = trimmed.strip_prefix('@').unwrap_or(trimmed);
        let valid_handle = !handle.is_empty()
            && handle
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');

        if valid_handle {
            ChannelTarget::Username(handle.to_string())
        } else {
            ChannelTarget::Malformed(raw.to_string())
        }
    }

    /// Platform address for queries, `None` when malformed
    pub fn recipient(&self) -> Option<Recipient> {
        match self {
            ChannelTarget::Id(id) => Some(Recipient::Id(*id)),
            ChannelTarget::Username(name) => Some(Recipient::ChannelUsername(format!("@{name}"))),
            ChannelTarget::Malformed(_) => None,
        }
    }

    /// The identifier as the operator configured it
    pub fn raw(&self) -> String {
        match self {
            ChannelTarget::Id(id) => id.0.to_string(),
            ChannelTarget::Username(name) => format!("@{name}"),
            ChannelTarget::Malformed(raw) => raw.clone(),
        }
    }
}

/// Whether the cutout session is loaded once at startup or per request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Standard,
    Performance,
}

impl RunMode {
    /// Interpret the arguments following the program name.
    ///
    /// Returns the mode and, when the arguments were not understood, the
    /// ignored arguments so the caller can warn about them.
    pub fn from_args<I, S>(args: I) -> (Self, Option<Vec<String>>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        match args.as_slice() {
            [] => (RunMode::Standard, None),
            [flag] if flag == PERFORMANCE_MODE_FLAG => (RunMode::Performance, None),
            _ => (RunMode::Standard, Some(args)),
        }
    }
}

/// Everything the bot needs to know at startup
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    /// Bot username without `@`, used in sticker set names and titles
    pub bot_name: String,
    pub rembg_model: String,
    pub rembg_url: String,
    pub channel: ChannelTarget,
    pub log_file: PathBuf,
}

impl BotConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let optional = |key: &str, default: &str| -> String {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let bot_token = required(BOT_TOKEN_KEY)?;
        let bot_name = required(BOT_NAME_KEY)?;
        let bot_name = bot_name
            .strip_prefix('@')
            .map(str::to_string)
            .unwrap_or(bot_name);
        if bot_name.is_empty() {
            return Err(ConfigError::Missing(BOT_NAME_KEY));
        }
        let rembg_model = required(REMBG_MODEL_KEY)?;
        let channel = ChannelTarget::parse(&required(CHANNEL_ID_KEY)?);

        Ok(Self {
            bot_token,
            bot_name,
            rembg_model,
            rembg_url: optional(REMBG_URL_KEY, DEFAULT_REMBG_URL),
            channel,
            log_file: PathBuf::from(optional(LOG_FILE_KEY, DEFAULT_LOG_FILE)),
        })
    }
}
