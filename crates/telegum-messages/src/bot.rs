use async_trait::async_trait;
use teloxide::types::{
    InlineKeyboardMarkup, InputFile, LinkPreviewOptions, MessageId, Recipient, ReplyMarkup,
    ThreadId,
};
use url::Url;

use telegum_tgx::FileSource;

use crate::config::MessagesConfig;
use crate::error::{TelegramError, TelegramResult};

/// A text message to send. The body is HTML.
#[derive(Debug, Clone, PartialEq)]
pub struct SendText {
    pub chat: Recipient,
    pub thread_id: Option<ThreadId>,
    pub text: String,
    pub reply_markup: Option<ReplyMarkup>,
    pub disable_notification: bool,
    pub protect_content: bool,
    pub link_preview_options: Option<LinkPreviewOptions>,
}

/// A photo message to send. The caption is HTML.
#[derive(Debug, Clone, PartialEq)]
pub struct SendPhoto {
    pub chat: Recipient,
    pub thread_id: Option<ThreadId>,
    pub file: FileSource,
    pub caption: Option<String>,
    pub has_spoiler: bool,
    pub reply_markup: Option<ReplyMarkup>,
    pub disable_notification: bool,
    pub protect_content: bool,
}

/// New HTML text for an existing text message.
#[derive(Debug, Clone, PartialEq)]
pub struct EditText {
    pub chat: Recipient,
    pub message_id: MessageId,
    pub text: String,
    pub link_preview_options: Option<LinkPreviewOptions>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// New HTML caption for an existing media message.
#[derive(Debug, Clone, PartialEq)]
pub struct EditCaption {
    pub chat: Recipient,
    pub message_id: MessageId,
    pub caption: Option<String>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// Trait abstracting Telegram bot operations for testability.
///
/// Production code uses [`TelegramBot`]; tests can provide a mock implementation.
/// Every call is a single Bot API request with HTML parse mode.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// Send a text message. Returns the Telegram message ID of the sent message.
    async fn send_text(&self, request: SendText) -> TelegramResult<MessageId>;

    /// Send a photo. Returns the Telegram message ID of the sent message.
    async fn send_photo(&self, request: SendPhoto) -> TelegramResult<MessageId>;

    /// Replace the text of a message. Returns the ID of the edited message.
    async fn edit_text(&self, request: EditText) -> TelegramResult<MessageId>;

    /// Replace the caption of a message. Returns the ID of the edited message.
    async fn edit_caption(&self, request: EditCaption) -> TelegramResult<MessageId>;
}

/// Wraps a `teloxide::Bot` and implements [`BotApi`] on top of it.
#[derive(Clone)]
pub struct TelegramBot {
    bot: teloxide::Bot,
}

impl TelegramBot {
    /// Create a new TelegramBot from a bot token.
    pub fn new(token: &str) -> Self {
        Self {
            bot: teloxide::Bot::new(token),
        }
    }

    /// Reuse an existing bot, e.g. the one handed to dispatcher endpoints.
    pub fn from_bot(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Create a bot using the token from config or `TELEGUM_BOT_TOKEN`.
    pub fn from_config(config: &MessagesConfig) -> TelegramResult<Self> {
        let token = config.resolve_bot_token()?;
        Ok(Self::new(&token))
    }

    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

impl std::fmt::Debug for TelegramBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramBot").finish_non_exhaustive()
    }
}

/// Map a file reference onto the framework's upload type.
pub fn input_file(file: &FileSource) -> TelegramResult<InputFile> {
    match file {
        FileSource::FileId(id) => Ok(InputFile::file_id(id.clone())),
        FileSource::Url(url) => {
            let parsed = Url::parse(url).map_err(|e| TelegramError::InvalidFileUrl {
                url: url.clone(),
                reason: e.to_string(),
            })?;
            Ok(InputFile::url(parsed))
        }
        FileSource::Path(path) => Ok(InputFile::file(path.clone())),
    }
}

#[async_trait]
impl BotApi for TelegramBot {
    async fn send_text(&self, request: SendText) -> TelegramResult<MessageId> {
        use teloxide::payloads::SendMessageSetters;
        use teloxide::prelude::*;
        use teloxide::types::ParseMode;

        let mut call = self
            .bot
            .send_message(request.chat, request.text)
            .parse_mode(ParseMode::Html);

        if let Some(thread_id) = request.thread_id {
            call = call.message_thread_id(thread_id);
        }
        if request.disable_notification {
            call = call.disable_notification(true);
        }
        if request.protect_content {
            call = call.protect_content(true);
        }
        if let Some(options) = request.link_preview_options {
            call = call.link_preview_options(options);
        }
        if let Some(markup) = request.reply_markup {
            call = call.reply_markup(markup);
        }

        let message = call.await?;
        Ok(message.id)
    }

    async fn send_photo(&self, request: SendPhoto) -> TelegramResult<MessageId> {
        use teloxide::payloads::SendPhotoSetters;
        use teloxide::prelude::*;
        use teloxide::types::ParseMode;

        let file = input_file(&request.file)?;
        let mut call = self
            .bot
            .send_photo(request.chat, file)
            .parse_mode(ParseMode::Html);

        if let Some(caption) = request.caption {
            call = call.caption(caption);
        }
        if let Some(thread_id) = request.thread_id {
            call = call.message_thread_id(thread_id);
        }
        if request.has_spoiler {
            call = call.has_spoiler(true);
        }
        if request.disable_notification {
            call = call.disable_notification(true);
        }
        if request.protect_content {
            call = call.protect_content(true);
        }
        if let Some(markup) = request.reply_markup {
            call = call.reply_markup(markup);
        }

        let message = call.await?;
        Ok(message.id)
    }

    async fn edit_text(&self, request: EditText) -> TelegramResult<MessageId> {
        use teloxide::payloads::EditMessageTextSetters;
        use teloxide::prelude::*;
        use teloxide::types::ParseMode;

        let mut call = self
            .bot
            .edit_message_text(request.chat, request.message_id, request.text)
            .parse_mode(ParseMode::Html);

        if let Some(options) = request.link_preview_options {
            call = call.link_preview_options(options);
        }
        if let Some(markup) = request.reply_markup {
            call = call.reply_markup(markup);
        }

        let message = call.await?;
        Ok(message.id)
    }

    async fn edit_caption(&self, request: EditCaption) -> TelegramResult<MessageId> {
        use teloxide::payloads::EditMessageCaptionSetters;
        use teloxide::prelude::*;
        use teloxide::types::ParseMode;

        let mut call = self
            .bot
            .edit_message_caption(request.chat, request.message_id)
            .parse_mode(ParseMode::Html);

        if let Some(caption) = request.caption {
            call = call.caption(caption);
        }
        if let Some(markup) = request.reply_markup {
            call = call.reply_markup(markup);
        }

        let message = call.await?;
        Ok(message.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sources_map_to_input_files() {
        assert!(input_file(&FileSource::FileId("AgACAgIAAxkB".into())).is_ok());
        assert!(input_file(&FileSource::Url("https://example.com/cat.jpg".into())).is_ok());
        assert!(input_file(&FileSource::Path("cat.jpg".into())).is_ok());
    }

    #[test]
    fn relative_file_url_is_rejected() {
        let err = input_file(&FileSource::Url("cat.jpg".into())).unwrap_err();
        assert!(matches!(err, TelegramError::InvalidFileUrl { ref url, .. } if url == "cat.jpg"));
    }

    #[test]
    fn from_config_uses_configured_token() {
        let config = MessagesConfig {
            bot_token: Some("123456:test-token".to_string()),
            ..MessagesConfig::default()
        };
        assert!(TelegramBot::from_config(&config).is_ok());
    }

    #[test]
    fn debug_does_not_leak_token() {
        let bot = TelegramBot::new("123456:secret-token");
        assert!(!format!("{bot:?}").contains("secret-token"));
    }
}
