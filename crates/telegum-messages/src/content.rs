use teloxide::types::{InlineKeyboardMarkup, ReplyMarkup};

use telegum_tgx::FileSource;

use crate::error::{TelegramError, TelegramResult};

/// A message ready to be handed to the Bot API.
///
/// Produced from an element tree by [`to_message_content`](crate::to_message_content),
/// or built directly when a reply keyboard is needed.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text {
        /// HTML parse-mode body.
        text: String,
        reply_markup: Option<ReplyMarkup>,
    },
    Photo {
        file: FileSource,
        /// HTML parse-mode caption.
        caption: Option<String>,
        has_spoiler: bool,
        reply_markup: Option<ReplyMarkup>,
    },
}

impl MessageContent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Photo { .. } => "photo",
        }
    }

    pub fn reply_markup(&self) -> Option<&ReplyMarkup> {
        match self {
            Self::Text { reply_markup, .. } | Self::Photo { reply_markup, .. } => {
                reply_markup.as_ref()
            }
        }
    }

    /// The reply markup as an inline keyboard, for edits.
    ///
    /// Fails when the markup is a reply keyboard, keyboard removal or force reply.
    pub fn inline_keyboard(&self) -> TelegramResult<Option<InlineKeyboardMarkup>> {
        match self.reply_markup() {
            None => Ok(None),
            Some(ReplyMarkup::InlineKeyboard(keyboard)) => Ok(Some(keyboard.clone())),
            Some(_) => Err(TelegramError::EditRequiresInlineKeyboard),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::{InlineKeyboardButton, KeyboardButton, KeyboardMarkup};

    fn text_with(reply_markup: Option<ReplyMarkup>) -> MessageContent {
        MessageContent::Text {
            text: "hi".to_string(),
            reply_markup,
        }
    }

    #[test]
    fn inline_keyboard_is_returned_for_edits() {
        let keyboard =
            InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback("a", "b")]]);
        let content = text_with(Some(ReplyMarkup::InlineKeyboard(keyboard.clone())));
        assert_eq!(content.inline_keyboard().unwrap(), Some(keyboard));
    }

    #[test]
    fn missing_markup_is_fine() {
        assert_eq!(text_with(None).inline_keyboard().unwrap(), None);
    }

    #[test]
    fn reply_keyboard_is_rejected_for_edits() {
        let markup = KeyboardMarkup::new(vec![vec![KeyboardButton::new("yes")]]);
        let content = MessageContent::Photo {
            file: FileSource::FileId("f".into()),
            caption: None,
            has_spoiler: false,
            reply_markup: Some(ReplyMarkup::Keyboard(markup)),
        };
        assert!(matches!(
            content.inline_keyboard(),
            Err(TelegramError::EditRequiresInlineKeyboard)
        ));
        assert_eq!(content.kind(), "photo");
    }
}
