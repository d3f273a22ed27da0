//! Error taxonomy for the HR API client.
//!
//! Every failure that can leave the HTTP layer is an [`ApiError`]. Status
//! based variants carry the decoded server message so callers can surface it
//! directly; validation failures additionally keep the per-field errors the
//! server returns for form submissions.

use std::collections::BTreeMap;

use reqwest::StatusCode;
use serde::Deserialize;

/// Per-field validation messages as returned by the server
/// (`{"errors": {"start_time": ["..."]}}`).
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("access denied: {message}")]
    Forbidden { message: String },

    #[error("resource not found: {message}")]
    NotFound { message: String },

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("validation failed ({status}): {message}")]
    Validation {
        status: u16,
        message: String,
        errors: FieldErrors,
    },

    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("session storage error: {0}")]
    Session(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid request: {0}")]
    Request(String),
}

/// Shape of a Laravel-style error body. Every field is optional because
/// servers are inconsistent about what they send back.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<FieldErrors>,
}

impl ApiError {
    /// Classifies a non-success response into the matching variant.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            });
        let code = status.as_u16();

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized { message },
            StatusCode::FORBIDDEN => ApiError::Forbidden { message },
            StatusCode::NOT_FOUND => ApiError::NotFound { message },
            s if s.is_server_error() => ApiError::Server {
                status: code,
                message,
            },
            _ => match parsed.errors {
                Some(errors) if !errors.is_empty() => ApiError::Validation {
                    status: code,
                    message,
                    errors,
                },
                _ => ApiError::Status {
                    status: code,
                    message,
                },
            },
        }
    }

    /// HTTP status carried by the error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Server { status, .. }
            | ApiError::Status { status, .. }
            | ApiError::Validation { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Server supplied message, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message }
            | ApiError::Forbidden { message }
            | ApiError::NotFound { message }
            | ApiError::Server { message, .. }
            | ApiError::Validation { message, .. }
            | ApiError::Status { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Picks the message a form should display: the first error of the first
    /// listed field that has one, then the server message, then `fallback`.
    pub fn form_message(&self, fields: &[&str], fallback: &str) -> String {
        if let ApiError::Validation { errors, .. } = self {
            for field in fields {
                if let Some(first) = errors.get(*field).and_then(|msgs| msgs.first()) {
                    return first.clone();
                }
            }
        }

        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_auth_statuses() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, r#"{"message":"Unauthenticated."}"#);
        assert!(matches!(err, ApiError::Unauthorized { ref message } if message == "Unauthenticated."));

        let err = ApiError::from_status(StatusCode::FORBIDDEN, "");
        assert!(matches!(err, ApiError::Forbidden { ref message } if message == "Forbidden"));
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn classifies_server_errors() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert!(matches!(err, ApiError::Server { status: 502, .. }));
    }

    #[test]
    fn validation_errors_keep_fields() {
        let body = r#"{
            "message": "The given data was invalid.",
            "errors": { "end_time": ["The end time field is required."] }
        }"#;
        let err = ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, body);

        assert_eq!(
            err.form_message(&["start_time", "end_time"], "fallback"),
            "The end time field is required."
        );
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn validation_keeps_the_real_status() {
        let body = r#"{"message": "Conflict", "errors": {"start_time": ["taken"]}}"#;

        let err = ApiError::from_status(StatusCode::CONFLICT, body);
        assert!(matches!(err, ApiError::Validation { status: 409, .. }));
        assert_eq!(err.status(), Some(409));

        let err = ApiError::from_status(StatusCode::BAD_REQUEST, body);
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn form_message_prefers_earlier_fields() {
        let body = r#"{
            "message": "invalid",
            "errors": {
                "end_time": ["end is wrong"],
                "start_time": ["start is wrong"]
            }
        }"#;
        let err = ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(err.form_message(&["start_time", "end_time"], "x"), "start is wrong");
    }

    #[test]
    fn form_message_falls_back() {
        let err = ApiError::from_status(StatusCode::CONFLICT, r#"{"message":"Shift exists"}"#);
        assert!(matches!(err, ApiError::Status { status: 409, .. }));
        assert_eq!(err.form_message(&["start_time"], "fallback"), "Shift exists");

        let err = ApiError::Config("missing".into());
        assert_eq!(err.form_message(&["start_time"], "fallback"), "fallback");
    }
}
