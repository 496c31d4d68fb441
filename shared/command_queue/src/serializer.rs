use serde::{de::DeserializeOwned, Serialize};

use crate::{error::QueueResult, message::Envelope};

/// Converts envelopes to and from their queue text representation
pub trait MessageSerializer: Send + Sync {
    /// Encodes an envelope, route included
    ///
    /// # Errors
    ///
    /// Returns `QueueError::MalformedPayload` if the envelope cannot be encoded
    fn serialize(&self, envelope: &Envelope) -> QueueResult<String>;

    /// Decodes an envelope
    ///
    /// # Errors
    ///
    /// Returns `QueueError::MalformedPayload` if the text is not valid or does not match
    /// any known command shape
    fn deserialize(&self, text: &str) -> QueueResult<Envelope>;
}

/// JSON serializer backed by `serde_json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMessageSerializer;

#[allow(clippy::unused_self)]
impl JsonMessageSerializer {
    /// Encodes any serializable value as JSON
    ///
    /// # Errors
    ///
    /// Returns `QueueError::MalformedPayload` if the value cannot be encoded
    pub fn serialize_value<T: Serialize + ?Sized>(&self, value: &T) -> QueueResult<String> {
        Ok(serde_json::to_string(value)?)
    }

    /// Decodes JSON into a concrete message type
    ///
    /// # Errors
    ///
    /// Returns `QueueError::MalformedPayload` if the text is not JSON or does not match `T`
    pub fn deserialize_value<T: DeserializeOwned>(&self, text: &str) -> QueueResult<T> {
        Ok(serde_json::from_str(text)?)
    }
}

impl MessageSerializer for JsonMessageSerializer {
    fn serialize(&self, envelope: &Envelope) -> QueueResult<String> {
        self.serialize_value(envelope)
    }

    fn deserialize(&self, text: &str) -> QueueResult<Envelope> {
        self.deserialize_value(text)
    }
}
