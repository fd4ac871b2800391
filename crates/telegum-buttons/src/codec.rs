//! Callback-data encoding.
//!
//! Callback data has the shape `#` + 8 lowercase hex chars + `:` + payload.
//! The hex part is the head of the SHA-1 digest of the button id, so the same
//! id always yields the same prefix across restarts and deployments.

use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use sha1::{Digest, Sha1};

/// Number of hex characters taken from the id digest.
pub const PREFIX_LEN: usize = 8;

/// Telegram's limit for callback data. Not enforced here.
pub const MAX_CALLBACK_DATA_BYTES: usize = 64;

/// The 8 hex characters identifying a button id.
pub fn prefix_for(id: &str) -> String {
    let mut digest = hex::encode(Sha1::digest(id.as_bytes()));
    digest.truncate(PREFIX_LEN);
    digest
}

/// The full prefix every callback data of button `id` starts with, e.g. `#a9993e36:`.
pub fn callback_prefix(id: &str) -> String {
    format!("#{}:", prefix_for(id))
}

/// Build callback data for `payload`.
pub fn encode<P: ?Sized>(id: &str, payload: &P, encode: impl FnOnce(&P) -> String) -> String {
    format!("{}{}", callback_prefix(id), encode(payload))
}

/// Decode callback data produced for button `id`.
///
/// Returns `Ok(None)` when `data` belongs to another button. Errors from
/// `decode` are passed through untouched.
pub fn decode<P, E>(
    id: &str,
    data: &str,
    decode: impl FnOnce(&str) -> Result<P, E>,
) -> Result<Option<P>, E> {
    let prefix = callback_prefix(id);
    match data.strip_prefix(prefix.as_str()) {
        Some(rest) => decode(rest).map(Some),
        None => Ok(None),
    }
}

/// Converts a button payload to and from the text after the prefix.
pub trait PayloadCodec {
    type Payload;
    type Error;

    fn encode(&self, payload: &Self::Payload) -> Result<String, Self::Error>;

    fn decode(&self, data: &str) -> Result<Self::Payload, Self::Error>;
}

/// Codec for buttons without a payload. Encodes to the empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPayload;

impl PayloadCodec for NoPayload {
    type Payload = ();
    type Error = Infallible;

    fn encode(&self, _payload: &()) -> Result<String, Infallible> {
        Ok(String::new())
    }

    fn decode(&self, _data: &str) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Codec storing the payload as compact JSON.
pub struct JsonPayload<P>(PhantomData<fn() -> P>);

impl<P> JsonPayload<P> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<P> Default for JsonPayload<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for JsonPayload<P> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for JsonPayload<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JsonPayload")
    }
}

impl<P: Serialize + DeserializeOwned> PayloadCodec for JsonPayload<P> {
    type Payload = P;
    type Error = serde_json::Error;

    fn encode(&self, payload: &P) -> Result<String, serde_json::Error> {
        serde_json::to_string(payload)
    }

    fn decode(&self, data: &str) -> Result<P, serde_json::Error> {
        serde_json::from_str(data)
    }
}

/// Codec built from a pair of closures. Encoding through it cannot fail.
pub struct FnCodec<P, E, Enc, Dec> {
    encode: Enc,
    decode: Dec,
    _marker: PhantomData<fn() -> (P, E)>,
}

impl<P, E, Enc, Dec> FnCodec<P, E, Enc, Dec>
where
    Enc: Fn(&P) -> String,
    Dec: Fn(&str) -> Result<P, E>,
{
    pub fn new(encode: Enc, decode: Dec) -> Self {
        Self {
            encode,
            decode,
            _marker: PhantomData,
        }
    }
}

impl<P, E, Enc: Clone, Dec: Clone> Clone for FnCodec<P, E, Enc, Dec> {
    fn clone(&self) -> Self {
        Self {
            encode: self.encode.clone(),
            decode: self.decode.clone(),
            _marker: PhantomData,
        }
    }
}

impl<P, E, Enc, Dec> PayloadCodec for FnCodec<P, E, Enc, Dec>
where
    Enc: Fn(&P) -> String,
    Dec: Fn(&str) -> Result<P, E>,
{
    type Payload = P;
    type Error = E;

    fn encode(&self, payload: &P) -> Result<String, E> {
        Ok((self.encode)(payload))
    }

    fn decode(&self, data: &str) -> Result<P, E> {
        (self.decode)(data)
    }
}
