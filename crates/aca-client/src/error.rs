//! Error types for remote calls.

use serde::Deserialize;
use thiserror::Error;

/// Failure of a remote call, classified at the gateway boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RpcError {
    /// The request never produced a server answer (connection, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server rejected the caller's credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The remote method returned an error payload.
    #[error("server error ({code}): {message}")]
    Server {
        /// HTTP status reported by the server.
        code: u16,
        /// Server-provided message, verbatim. May be empty.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The argument record could not be turned into a request.
    #[error("invalid request: {0}")]
    Request(String),

    /// The API client has not completed initialization.
    #[error("API client not initialized: {0}")]
    NotInitialized(String),
}

impl RpcError {
    /// Returns true when the failure should trigger re-authentication.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Message text supplied by the server, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { message, .. } | Self::Unauthorized(message) if !message.is_empty() => {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    /// Returns a user-friendly message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Transport(_) => "Could not reach the archive. Please check your connection.",
            Self::Unauthorized(_) => "Please sign in to continue.",
            Self::Server { .. } => "The archive rejected the request.",
            Self::Decode(_) | Self::Request(_) => "An unexpected error occurred.",
            Self::NotInitialized(_) => "The archive API is not available yet.",
        }
    }

    /// Builds the error for a non-success HTTP response body.
    ///
    /// The message comes from `error.message`, a string `error`, a
    /// top-level `message`, or failing those the body text itself.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorPayload>(body) {
            Ok(payload) => payload.into_message(),
            Err(_) if serde_json::from_str::<serde_json::Value>(body).is_ok() => String::new(),
            Err(_) => body.trim().to_string(),
        };
        if status == 401 {
            Self::Unauthorized(message)
        } else {
            Self::Server {
                code: status,
                message,
            }
        }
    }
}

/// Error bodies seen from the server and the proxies in front of it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorPayload {
    /// `{"error": {"code": 404, "message": "..."}}`
    Envelope { error: ErrorBody },
    /// `{"error": "..."}`
    Text { error: String },
    /// `{"message": "..."}`
    Flat { message: String },
}

impl ErrorPayload {
    fn into_message(self) -> String {
        match self {
            ErrorPayload::Envelope { error } => error.message.unwrap_or_default(),
            ErrorPayload::Text { error } => error,
            ErrorPayload::Flat { message } => message,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl From<reqwest::Error> for RpcError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for remote calls.
pub type Result<T> = std::result::Result<T, RpcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_payload_is_kept_verbatim() {
        let err = RpcError::from_response(
            409,
            r#"{"error": {"code": 409, "message": "quota exceeded", "errors": []}}"#,
        );
        assert_eq!(
            err,
            RpcError::Server {
                code: 409,
                message: "quota exceeded".to_string()
            }
        );
        assert_eq!(err.server_message(), Some("quota exceeded"));
    }

    #[test]
    fn unauthorized_status_is_classified() {
        let err = RpcError::from_response(401, "");
        assert!(err.is_unauthorized());
        assert_eq!(err.server_message(), None);
        assert!(err.user_message().contains("sign in"));
    }

    #[test]
    fn string_error_field_becomes_the_message() {
        let err = RpcError::from_response(400, r#"{"error": "title is required"}"#);
        assert_eq!(err.server_message(), Some("title is required"));
    }

    #[test]
    fn top_level_message_is_used() {
        let err = RpcError::from_response(403, r#"{"message": "curators only"}"#);
        assert_eq!(
            err,
            RpcError::Server {
                code: 403,
                message: "curators only".to_string()
            }
        );
    }

    #[test]
    fn plain_text_body_is_kept() {
        let err = RpcError::from_response(502, "Bad Gateway\n");
        assert_eq!(err.server_message(), Some("Bad Gateway"));

        let err = RpcError::from_response(401, "token expired");
        assert!(err.is_unauthorized());
        assert_eq!(err.server_message(), Some("token expired"));
    }

    #[test]
    fn json_without_a_message_is_blank() {
        let err = RpcError::from_response(500, r#"{"error": {"code": 500}}"#);
        assert_eq!(err.server_message(), None);
        let err = RpcError::from_response(500, r#"{"status": "down"}"#);
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn empty_server_message_is_absent() {
        let err = RpcError::Server {
            code: 500,
            message: String::new(),
        };
        assert_eq!(err.server_message(), None);
        assert!(!err.is_unauthorized());
    }
}
