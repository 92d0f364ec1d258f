//! The response envelope wrapping every task-service reply.
//!
//! ```json
//! { "success": true, "data": { ... }, "message": "Task created" }
//! { "success": false, "message": "Task not found", "error": "..." }
//! ```
//!
//! A `false` success flag is a failure even when `data` is present.

use serde::{Deserialize, Serialize};

/// Error produced when an envelope reports failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("request rejected: {message}")]
pub struct EnvelopeError {
    /// Human-readable message from the service.
    pub message: String,
    /// Optional error detail from the service.
    pub detail: Option<String>,
}

/// Service response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Optional payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Optional error detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Builds a successful envelope.
    pub fn ok(data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
            error: None,
        }
    }

    /// Builds a failed envelope.
    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
            error,
        }
    }

    /// Unwraps the envelope into its payload.
    ///
    /// Returns `Ok(None)` for a successful envelope without payload.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError`] if the success flag is `false`, whatever
    /// the payload.
    pub fn into_result(self) -> Result<Option<T>, EnvelopeError> {
        if self.success {
            Ok(self.data)
        } else {
            let message = if self.message.is_empty() {
                "API request failed".to_string()
            } else {
                self.message
            };
            Err(EnvelopeError {
                message,
                detail: self.error,
            })
        }
    }
}
