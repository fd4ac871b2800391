use teloxide::types::CallbackQuery;
use tracing::{trace, warn};

use telegum_tgx::{ButtonElement, Node};

use crate::codec::{MAX_CALLBACK_DATA_BYTES, NoPayload, PayloadCodec, callback_prefix};

/// A reusable inline button kind.
///
/// The button renders keyboard nodes whose callback data carries an encoded
/// payload, and recognizes callback queries produced by tapping them. Instead
/// of attaching the payload to a handler context, [`Button::filter`] returns it.
///
/// ```
/// use telegum_buttons::{Button, JsonPayload};
///
/// let next_page = Button::with_codec("next-page", JsonPayload::<u32>::new());
/// let data = next_page.data(&2).unwrap();
/// assert_eq!(next_page.parse(&data).unwrap(), Some(2));
/// assert_eq!(next_page.parse("#00000000:2").unwrap(), None);
/// ```
#[derive(Debug, Clone)]
pub struct Button<C = NoPayload> {
    id: String,
    prefix: String,
    codec: C,
}

impl Button<NoPayload> {
    /// A button without a payload.
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_codec(id, NoPayload)
    }

    /// Render the payload-less button with `label`.
    pub fn label(&self, label: impl Into<String>) -> Node {
        let Ok(node) = self.render(label, &());
        node
    }
}

impl<C: PayloadCodec> Button<C> {
    pub fn with_codec(id: impl Into<String>, codec: C) -> Self {
        let id = id.into();
        let prefix = callback_prefix(&id);
        Self { id, prefix, codec }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The `#xxxxxxxx:` prefix shared by all callback data of this button.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Callback data for `payload`.
    ///
    /// Fails when the codec cannot encode `payload`; no data is produced then.
    pub fn data(&self, payload: &C::Payload) -> Result<String, C::Error> {
        let data = format!("{}{}", self.prefix, self.codec.encode(payload)?);
        if data.len() > MAX_CALLBACK_DATA_BYTES {
            warn!(
                button = %self.id,
                len = data.len(),
                "callback data exceeds Telegram's {MAX_CALLBACK_DATA_BYTES}-byte limit"
            );
        }
        Ok(data)
    }

    /// A keyboard button node showing `label` and carrying `payload`.
    pub fn render(
        &self,
        label: impl Into<String>,
        payload: &C::Payload,
    ) -> Result<Node, C::Error> {
        Ok(ButtonElement {
            text: label.into(),
            data: Some(self.data(payload)?),
            url: None,
        }
        .into())
    }

    /// Returns true if `data` was produced by this button.
    pub fn matches(&self, data: &str) -> bool {
        data.starts_with(&self.prefix)
    }

    /// Decode callback data. `Ok(None)` means the data belongs to another button.
    pub fn parse(&self, data: &str) -> Result<Option<C::Payload>, C::Error> {
        let Some(encoded) = data.strip_prefix(self.prefix.as_str()) else {
            return Ok(None);
        };
        let payload = self.codec.decode(encoded)?;
        trace!(button = %self.id, "callback data matched");
        Ok(Some(payload))
    }

    /// Match an incoming callback query.
    ///
    /// Queries without data (game queries) never match.
    pub fn filter(&self, query: &CallbackQuery) -> Result<Option<C::Payload>, C::Error> {
        match query.data.as_deref() {
            Some(data) => self.parse(data),
            None => Ok(None),
        }
    }
}
