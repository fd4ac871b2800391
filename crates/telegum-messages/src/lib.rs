//! # telegum-messages
//!
//! Sends Telegram messages described as element trees.
//!
//! An element tree ([`telegum_tgx::Node`]) is converted into a
//! [`MessageContent`]: text or a photo, HTML-formatted, with an optional
//! inline keyboard. The [`Messenger`] then issues exactly one Bot API call
//! per `.to(..)`.
//!
//! ## Key Components
//!
//! - [`sanitize_html`] / [`render_html`] — HTML escaping and entity tags
//! - [`flatten`] / [`to_message_content`] / [`build_keyboard`] — tree conversion
//! - [`BotApi`] — the Bot API seam; [`TelegramBot`] implements it over teloxide
//! - [`Messenger`] — `send(..).to(..)` and `edit(..).to(..)` entry points
//! - [`MessagesConfig`] — YAML configuration and token resolution
//! - [`error`] — Error types for conversion and delivery failures

mod bot;
mod config;
mod content;
pub mod error;
mod html;
mod messenger;
mod tgx;

pub use bot::{BotApi, EditCaption, EditText, SendPhoto, SendText, TelegramBot, input_file};
pub use config::{BOT_TOKEN_ENV, MessagesConfig};
pub use content::MessageContent;
pub use error::{ContentError, TelegramError, TelegramResult};
pub use html::{render_html, sanitize_html, wrap_with_entity};
pub use messenger::{
    EditOptions, EditRequest, Messenger, SendOptions, SendRequest, edit_content, send_content,
};
pub use tgx::{build_keyboard, flatten, to_message_content};
