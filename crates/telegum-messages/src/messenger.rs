use serde::{Deserialize, Serialize};
use teloxide::types::{LinkPreviewOptions, MessageId, Recipient, ThreadId};
use tracing::debug;

use telegum_tgx::Node;

use crate::bot::{BotApi, EditCaption, EditText, SendPhoto, SendText};
use crate::config::MessagesConfig;
use crate::content::MessageContent;
use crate::error::TelegramResult;
use crate::tgx::to_message_content;

/// Options for sending a new message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SendOptions {
    /// Send without notification sound.
    pub silent: bool,
    pub protect_content: bool,
    /// Only applies to text messages.
    pub link_preview_options: Option<LinkPreviewOptions>,
}

/// Options for editing an existing message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditOptions {
    /// Only applies to text messages.
    pub link_preview_options: Option<LinkPreviewOptions>,
    /// Resolve with `None` instead of failing when Telegram reports that
    /// the new content equals the old one.
    pub ignore_not_modified_error: bool,
}

/// Sends and edits messages described by element trees.
///
/// ```no_run
/// # async fn demo() -> telegum_messages::TelegramResult<()> {
/// use teloxide::types::ChatId;
/// use telegum_messages::{Messenger, SendOptions, TelegramBot};
/// use telegum_tgx::bold;
///
/// let messenger = Messenger::new(TelegramBot::new("123456:token"));
/// let sent = messenger
///     .send(bold("Deploy finished"))
///     .with(SendOptions { silent: true, ..SendOptions::default() })
///     .to(ChatId(42), None)
///     .await?;
/// messenger.edit(ChatId(42), sent).to(bold("Deploy finished ✅")).await?;
/// # Ok(())
/// # }
/// ```
pub struct Messenger<B> {
    api: B,
    send_defaults: SendOptions,
    edit_defaults: EditOptions,
}

impl<B: BotApi> Messenger<B> {
    pub fn new(api: B) -> Self {
        Self {
            api,
            send_defaults: SendOptions::default(),
            edit_defaults: EditOptions::default(),
        }
    }

    /// Use the flags from `config` for calls made without explicit options.
    pub fn with_config(api: B, config: &MessagesConfig) -> Self {
        Self {
            api,
            send_defaults: config.send_options(),
            edit_defaults: config.edit_options(),
        }
    }

    pub fn api(&self) -> &B {
        &self.api
    }

    /// Options used by [`Messenger::send`] until replaced with [`SendRequest::with`].
    pub fn send_defaults(&self) -> &SendOptions {
        &self.send_defaults
    }

    /// Options used by [`Messenger::edit`] until replaced with [`EditRequest::with`].
    pub fn edit_defaults(&self) -> &EditOptions {
        &self.edit_defaults
    }

    /// Prepare sending `message`. Nothing happens until [`SendRequest::to`].
    pub fn send(&self, message: Node) -> SendRequest<'_, B> {
        SendRequest {
            messenger: self,
            message,
            options: self.send_defaults.clone(),
        }
    }

    /// Prepare editing message `message_id` in `chat`. Nothing happens until [`EditRequest::to`].
    pub fn edit(&self, chat: impl Into<Recipient>, message_id: MessageId) -> EditRequest<'_, B> {
        EditRequest {
            messenger: self,
            chat: chat.into(),
            message_id,
            options: self.edit_defaults.clone(),
        }
    }
}

impl<B> std::fmt::Debug for Messenger<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Messenger")
            .field("send_defaults", &self.send_defaults)
            .field("edit_defaults", &self.edit_defaults)
            .finish_non_exhaustive()
    }
}

/// A pending send of one element tree.
#[must_use = "nothing is sent until `.to(..)` is awaited"]
pub struct SendRequest<'a, B> {
    messenger: &'a Messenger<B>,
    message: Node,
    options: SendOptions,
}

impl<B: BotApi> SendRequest<'_, B> {
    /// Replace the messenger's default options for this call.
    ///
    /// Every field is replaced. To change a single flag, start from
    /// [`Messenger::send_defaults`] rather than `SendOptions::default()`.
    pub fn with(mut self, options: SendOptions) -> Self {
        self.options = options;
        self
    }

    /// Convert the tree and send it to `chat`, optionally into a forum topic.
    pub async fn to(
        self,
        chat: impl Into<Recipient>,
        thread_id: Option<ThreadId>,
    ) -> TelegramResult<MessageId> {
        let content = to_message_content(self.message)?;
        send_content(
            &self.messenger.api,
            content,
            chat.into(),
            thread_id,
            &self.options,
        )
        .await
    }
}

/// A pending edit of one existing message.
#[must_use = "nothing is edited until `.to(..)` is awaited"]
pub struct EditRequest<'a, B> {
    messenger: &'a Messenger<B>,
    chat: Recipient,
    message_id: MessageId,
    options: EditOptions,
}

impl<B: BotApi> EditRequest<'_, B> {
    /// Replace the messenger's default options for this call.
    ///
    /// Every field is replaced, including `ignore_not_modified_error`. To
    /// change a single flag, start from [`Messenger::edit_defaults`].
    pub fn with(mut self, options: EditOptions) -> Self {
        self.options = options;
        self
    }

    /// Convert `message` and replace the target message with it.
    ///
    /// Returns `None` only when a "not modified" error was ignored.
    pub async fn to(self, message: Node) -> TelegramResult<Option<MessageId>> {
        let content = to_message_content(message)?;
        edit_content(
            &self.messenger.api,
            content,
            self.chat,
            self.message_id,
            &self.options,
        )
        .await
    }
}

/// Issue the send call matching `content`. Exactly one API request is made.
pub async fn send_content<B: BotApi + ?Sized>(
    api: &B,
    content: MessageContent,
    chat: Recipient,
    thread_id: Option<ThreadId>,
    options: &SendOptions,
) -> TelegramResult<MessageId> {
    debug!(chat = ?chat, thread_id = ?thread_id, kind = content.kind(), "sending message");
    match content {
        MessageContent::Text { text, reply_markup } => {
            api.send_text(SendText {
                chat,
                thread_id,
                text,
                reply_markup,
                disable_notification: options.silent,
                protect_content: options.protect_content,
                link_preview_options: options.link_preview_options.clone(),
            })
            .await
        }
        MessageContent::Photo {
            file,
            caption,
            has_spoiler,
            reply_markup,
        } => {
            api.send_photo(SendPhoto {
                chat,
                thread_id,
                file,
                caption,
                has_spoiler,
                reply_markup,
                disable_notification: options.silent,
                protect_content: options.protect_content,
            })
            .await
        }
    }
}

/// Issue the edit call matching `content`.
///
/// Text content edits the message text, photo content edits the caption.
/// The reply markup must be an inline keyboard; this is checked before any
/// request is made.
pub async fn edit_content<B: BotApi + ?Sized>(
    api: &B,
    content: MessageContent,
    chat: Recipient,
    message_id: MessageId,
    options: &EditOptions,
) -> TelegramResult<Option<MessageId>> {
    let reply_markup = content.inline_keyboard()?;
    debug!(chat = ?chat, message_id = message_id.0, kind = content.kind(), "editing message");

    let result = match content {
        MessageContent::Text { text, .. } => {
            api.edit_text(EditText {
                chat,
                message_id,
                text,
                link_preview_options: options.link_preview_options.clone(),
                reply_markup,
            })
            .await
        }
        MessageContent::Photo { caption, .. } => {
            api.edit_caption(EditCaption {
                chat,
                message_id,
                caption,
                reply_markup,
            })
            .await
        }
    };

    match result {
        Ok(id) => Ok(Some(id)),
        Err(err) if options.ignore_not_modified_error && err.is_message_not_modified() => {
            debug!(message_id = message_id.0, "message not modified, ignoring");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
