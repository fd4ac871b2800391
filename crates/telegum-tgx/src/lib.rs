//! # telegum-tgx
//!
//! Element tree model for declarative Telegram messages.
//!
//! A message is described as a tree of [`Node`]s, much like a markup document:
//! styled text, line breaks, a photo, and an inline keyboard made of buttons.
//! The `telegum-messages` crate turns such a tree into concrete Bot API calls.
//!
//! ```
//! use telegum_tgx::{Node, bold, br, button_data, fragment, keyboard};
//!
//! let message: Node = fragment([
//!     bold("Hello"),
//!     Node::from(", world!"),
//!     br(),
//!     keyboard([button_data("Again", "#00000000:")]),
//! ]);
//! assert_eq!(message.kind(), "fragment");
//! ```

mod build;
mod entity;
mod node;

pub use build::{
    blockquote, bold, br, button_data, button_url, code, codeblock, custom_emoji, fragment,
    italic, keyboard, link, photo, plain, spoiler, strikethrough, text, underline, video,
};
pub use entity::TextEntity;
pub use node::{ButtonElement, FileSource, Node, PhotoElement, PlainValue};
