//! Error taxonomy of the client layer.
//!
//! Any failure of the login exchange is [`ClientError::Authentication`].
//! Status-code failures of the file service are split by status: 404 becomes
//! [`ClientError::NotFound`], 400/422 become [`ClientError::Validation`] and
//! everything else is [`ClientError::Transport`]. Each carries the message the
//! server put in its error body.

use filedesk_core::ModelError;

/// Generic message when an error body is not JSON.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";
/// Generic message when an error body is JSON without a usable `message`.
pub const REQUEST_FAILED_MESSAGE: &str = "API request failed";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("API request failed with status {status}: {message}")]
    Transport { status: u16, message: String },

    #[error("Validation failed with status {status}: {message}")]
    Validation { status: u16, message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Failed to send request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse response as JSON: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of the login exchange. Cloneable so every caller waiting on the
/// same in-flight login receives it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct AuthError(pub String);

impl From<AuthError> for ClientError {
    fn from(err: AuthError) -> Self {
        ClientError::Authentication(err.0)
    }
}

impl From<ModelError> for ClientError {
    fn from(err: ModelError) -> Self {
        ClientError::InvalidInput(err.to_string())
    }
}

impl ClientError {
    /// Classify a non-success status from the file service.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            404 => ClientError::NotFound { message },
            400 | 422 => ClientError::Validation { status, message },
            _ => ClientError::Transport { status, message },
        }
    }

    /// HTTP status behind this error, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Transport { status, .. } | ClientError::Validation { status, .. } => {
                Some(*status)
            }
            ClientError::NotFound { .. } => Some(404),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message supplied by the server (or its generic fallback).
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Transport { message, .. }
            | ClientError::Validation { message, .. }
            | ClientError::NotFound { message } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, ClientError::Authentication(_))
    }
}

/// Pull the server message out of an error body.
pub fn message_from_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .unwrap_or(REQUEST_FAILED_MESSAGE)
            .to_string(),
        Err(_) => UNKNOWN_ERROR_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_from_json_body() {
        assert_eq!(message_from_body(r#"{"message":"quota exceeded"}"#), "quota exceeded");
    }

    #[test]
    fn message_fallbacks() {
        assert_eq!(message_from_body("<html>502</html>"), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(message_from_body(""), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(message_from_body(r#"{"error":"x"}"#), REQUEST_FAILED_MESSAGE);
        assert_eq!(message_from_body(r#"{"message":""}"#), REQUEST_FAILED_MESSAGE);
    }

    #[test]
    fn status_classification() {
        let err = ClientError::from_status(404, "File not found".into());
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));

        let err = ClientError::from_status(400, "category mismatch".into());
        assert!(matches!(err, ClientError::Validation { status: 400, .. }));

        let err = ClientError::from_status(503, "down".into());
        assert!(matches!(err, ClientError::Transport { status: 503, .. }));
        assert_eq!(err.server_message(), Some("down"));
    }

    #[test]
    fn auth_error_converts() {
        let err: ClientError = AuthError("Login failed".into()).into();
        assert!(err.is_authentication());
        assert_eq!(err.to_string(), "Authentication failed: Login failed");
    }
}
