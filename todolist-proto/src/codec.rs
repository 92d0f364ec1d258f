//! JSON encode/decode for request bodies and response envelopes.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::envelope::ApiResponse;

/// Error type for codec encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization of a request body failed.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// The response body is not a valid envelope.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),
}

/// Encodes a request body as JSON.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the value cannot be serialized.
pub fn encode<T: Serialize>(value: &T) -> Result<String, CodecError> {
    serde_json::to_string(value).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes a response body into an [`ApiResponse`].
///
/// # Errors
///
/// Returns `CodecError::MalformedEnvelope` if the body is not JSON, lacks the
/// `success` flag, or carries a payload of the wrong shape.
pub fn decode_response<T: DeserializeOwned>(body: &str) -> Result<ApiResponse<T>, CodecError> {
    serde_json::from_str(body).map_err(|e| CodecError::MalformedEnvelope(e.to_string()))
}
