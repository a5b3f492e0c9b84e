//! Payload serialization for request and response bodies.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Error raised by a [`PayloadCodec`].
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CodecError {
    message: String,
}

impl CodecError {
    /// Create a codec error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body encoding used on the wire.
///
/// The client treats bodies as opaque bytes and delegates to the codec for
/// both directions.
pub trait PayloadCodec: Send + Sync {
    /// Media type sent as `Accept` and `Content-Type`.
    fn media_type(&self) -> &str;

    /// Serialize a value into a request body.
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Deserialize a response body.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

/// JSON codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl PayloadCodec for JsonCodec {
    fn media_type(&self) -> &str {
        "application/json"
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError::new(format!("JSON encode: {e}")))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::new(format!("JSON decode: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Video {
        id: u32,
        title: String,
    }

    #[test]
    fn test_json_round_trip() {
        let video = Video {
            id: 7,
            title: "Intro".to_owned(),
        };
        let bytes = JsonCodec.encode(&video).unwrap();
        let decoded: Video = JsonCodec.decode(&bytes).unwrap();
        assert_eq!(decoded, video);
    }

    #[test]
    fn test_json_decode_error() {
        let result: Result<Video, _> = JsonCodec.decode(b"a:1:{}");
        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("JSON decode"));
    }
}
