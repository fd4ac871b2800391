use teloxide::{ApiError, RequestError};
use thiserror::Error;

/// Result type alias for messaging operations.
pub type TelegramResult<T> = std::result::Result<T, TelegramError>;

/// Errors raised while turning an element tree into message content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// More than one `keyboard` node at the root of the tree.
    #[error("multiple keyboards are not allowed")]
    MultipleKeyboards,

    /// A `button` node outside of a keyboard.
    #[error("button elements can only be used inside a keyboard element")]
    ButtonOutsideKeyboard,

    #[error("only br and button elements are allowed inside a keyboard (found {kind})")]
    DisallowedKeyboardChild { kind: &'static str },

    #[error("only boolean and empty plain values are allowed inside a keyboard (found {value})")]
    DisallowedKeyboardValue { value: String },

    /// A button with both `data` and `url`, or with neither.
    #[error("ambiguous button {label:?}: exactly one of data and url must be set")]
    AmbiguousButton { label: String },

    #[error("button {label:?} has an invalid url {url:?}: {reason}")]
    InvalidButtonUrl {
        label: String,
        url: String,
        reason: String,
    },

    /// A node kind that cannot appear at the root after flattening.
    #[error("unsupported element: {kind}")]
    UnsupportedElement { kind: &'static str },

    #[error("unsupported element type within text: {kind}")]
    UnsupportedInText { kind: &'static str },

    #[error("media groups are not supported yet")]
    MediaGroupUnsupported,

    #[error("video messages are not supported yet")]
    VideoUnsupported,

    /// The tree renders to neither text nor media.
    #[error("empty message content")]
    EmptyContent,
}

/// Errors that can occur while sending or editing messages.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Bot token is missing from config and environment.
    #[error("telegram bot token not found: set TELEGUM_BOT_TOKEN or configure bot_token")]
    MissingBotToken,

    /// The element tree could not be converted.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// Editing only accepts inline keyboards as reply markup.
    #[error("only inline keyboards are supported when editing messages")]
    EditRequiresInlineKeyboard,

    #[error("invalid file url {url:?}: {reason}")]
    InvalidFileUrl { url: String, reason: String },

    /// The Bot API call failed.
    #[error("telegram request failed: {0}")]
    Request(#[from] RequestError),

    /// Failed to read the config file.
    #[error("config read error: {0}")]
    Config(#[from] std::io::Error),

    /// Failed to parse the config file.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

impl TelegramError {
    /// Returns true for Telegram's "message is not modified" rejection of an edit.
    pub fn is_message_not_modified(&self) -> bool {
        matches!(
            self,
            Self::Request(RequestError::Api(ApiError::MessageNotModified))
        )
    }
}
