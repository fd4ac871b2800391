use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use teloxide::types::LinkPreviewOptions;

use crate::error::{TelegramError, TelegramResult};
use crate::messenger::{EditOptions, SendOptions};

/// Environment variable consulted when no token is configured.
pub const BOT_TOKEN_ENV: &str = "TELEGUM_BOT_TOKEN";

/// Messaging configuration, usually loaded from a YAML file:
///
/// ```yaml
/// bot_token: "123456:ABC-DEF"
/// silent: true
/// disable_link_preview: true
/// ignore_not_modified_error: true
/// ```
///
/// The flags become the defaults of a [`Messenger`](crate::Messenger) created
/// with [`Messenger::with_config`](crate::Messenger::with_config).
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    pub bot_token: Option<String>,
    /// Send without notification sound.
    pub silent: bool,
    /// Forbid forwarding and saving of sent messages.
    pub protect_content: bool,
    pub disable_link_preview: bool,
    /// Treat "message is not modified" as success when editing.
    pub ignore_not_modified_error: bool,
}

impl MessagesConfig {
    pub fn load(path: &Path) -> TelegramResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(yaml: &str) -> TelegramResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Resolves the bot token from config or the `TELEGUM_BOT_TOKEN` env var.
    ///
    /// Empty values count as unset in both places.
    pub fn resolve_bot_token(&self) -> TelegramResult<String> {
        self.token_or(std::env::var(BOT_TOKEN_ENV).ok())
    }

    fn token_or(&self, env_token: Option<String>) -> TelegramResult<String> {
        self.bot_token
            .clone()
            .filter(|token| !token.is_empty())
            .or_else(|| env_token.filter(|token| !token.is_empty()))
            .ok_or(TelegramError::MissingBotToken)
    }

    /// Get the bot token masked for logging.
    pub fn bot_token_masked(&self) -> String {
        match &self.bot_token {
            Some(token) if token.len() > 8 && token.is_ascii() => {
                format!("{}...{}", &token[..4], &token[token.len() - 4..])
            }
            Some(_) => "****".to_string(),
            None => "<unset>".to_string(),
        }
    }

    pub fn send_options(&self) -> SendOptions {
        SendOptions {
            silent: self.silent,
            protect_content: self.protect_content,
            link_preview_options: self.link_preview_options(),
        }
    }

    pub fn edit_options(&self) -> EditOptions {
        EditOptions {
            link_preview_options: self.link_preview_options(),
            ignore_not_modified_error: self.ignore_not_modified_error,
        }
    }

    fn link_preview_options(&self) -> Option<LinkPreviewOptions> {
        self.disable_link_preview.then(|| LinkPreviewOptions {
            is_disabled: true,
            url: None,
            prefer_small_media: false,
            prefer_large_media: false,
            show_above_text: false,
        })
    }
}

impl fmt::Debug for MessagesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessagesConfig")
            .field("bot_token", &self.bot_token_masked())
            .field("silent", &self.silent)
            .field("protect_content", &self.protect_content)
            .field("disable_link_preview", &self.disable_link_preview)
            .field("ignore_not_modified_error", &self.ignore_not_modified_error)
            .finish()
    }
}
