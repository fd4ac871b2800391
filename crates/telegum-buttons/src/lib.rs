//! # telegum-buttons
//!
//! Inline keyboard buttons with typed callback-data payloads.
//!
//! A [`Button`] is identified by a string id. Its callback data is
//! `#` + 8 hex chars derived from the id + `:` + the encoded payload, so
//! handlers can tell buttons apart without a shared registry.
//!
//! - [`codec`] — prefix derivation and the free `encode`/`decode` functions
//! - [`PayloadCodec`] — how a payload becomes text: [`NoPayload`], [`JsonPayload`], [`FnCodec`]
//! - [`Button`] — renders keyboard nodes and matches callback queries

mod button;
pub mod codec;

pub use button::Button;
pub use codec::{
    FnCodec, JsonPayload, MAX_CALLBACK_DATA_BYTES, NoPayload, PayloadCodec, callback_prefix,
    decode, encode, prefix_for,
};
