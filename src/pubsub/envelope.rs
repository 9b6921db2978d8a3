//! Push envelope decoding.
//!
//! Pub/Sub push delivery wraps each published message in a JSON envelope:
//!
//! ```text
//! {
//!   "message": {
//!     "data": "<base64url>",
//!     "attributes": { "key": "value" },
//!     "messageId": "...",
//!     "publishTime": "...",
//!     "orderingKey": "..."
//!   },
//!   "subscription": "projects/.../subscriptions/..."
//! }
//! ```
//!
//! Every field is optional on the wire. Unknown fields are ignored.

use std::borrow::Cow;
use std::collections::BTreeMap;

use base64::{
    alphabet,
    engine::{general_purpose::URL_SAFE, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use serde::{Deserialize, Serialize};

use crate::pubsub::error::PayloadError;

/// URL-safe decoder that requires canonical padding but ignores non-zero
/// trailing bits in the final symbol.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Name substituted when the payload decodes to an empty string.
pub const DEFAULT_NAME: &str = "World";

/// Outer push envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Envelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<PubsubMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
}

/// The published message carried by an [`Envelope`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PubsubMessage {
    /// Base64url-encoded payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering_key: Option<String>,
}

impl PubsubMessage {
    /// Build a message whose `data` field is the base64url encoding of `payload`.
    pub fn from_payload(payload: &[u8]) -> Self {
        Self {
            data: Some(URL_SAFE.encode(payload)),
            ..Self::default()
        }
    }
}

impl Envelope {
    /// Wrap a message in an envelope.
    pub fn new(message: PubsubMessage) -> Self {
        Self {
            message: Some(message),
            subscription: None,
        }
    }

    /// Parse a request body as a push envelope.
    ///
    /// A literal JSON `null` yields an empty envelope; the missing message is
    /// reported later by [`Envelope::payload`].
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        let envelope: Option<Envelope> = serde_json::from_slice(body)?;
        Ok(envelope.unwrap_or_default())
    }

    /// The raw `message.data` string, if present.
    pub fn data(&self) -> Option<&str> {
        self.message.as_ref()?.data.as_deref()
    }

    /// Decode `message.data` into raw bytes.
    pub fn payload(&self) -> Result<Vec<u8>, PayloadError> {
        let data = self.data().ok_or(PayloadError::MissingData)?;
        Ok(decode_data(data)?)
    }

    /// The greeting target carried by this envelope.
    ///
    /// Invalid UTF-8 is replaced rather than rejected. An empty payload maps
    /// to [`DEFAULT_NAME`].
    pub fn name(&self) -> Result<String, PayloadError> {
        let payload = self.payload()?;
        if payload.is_empty() {
            return Ok(DEFAULT_NAME.to_string());
        }
        Ok(String::from_utf8_lossy(&payload).into_owned())
    }
}

/// Base64url decode with canonical padding. Line breaks are skipped.
pub fn decode_data(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let cleaned: Cow<'_, str> = if data.contains(['\r', '\n']) {
        Cow::Owned(data.chars().filter(|c| *c != '\r' && *c != '\n').collect())
    } else {
        Cow::Borrowed(data)
    };
    URL_SAFE_LENIENT.decode(cleaned.as_bytes())
}
