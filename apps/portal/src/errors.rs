use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::http::TransportError;

pub const NO_RESPONSE_MESSAGE: &str = "No response from server. Please check your connection.";
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Normalized failure of any API call.
///
/// `status` is 0 when no HTTP response was obtained (network failure or a
/// client-side exception), otherwise the response status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("API error (status {status}): {message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
    #[serde(skip)]
    from_server: bool,
}

/// Error body the API sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<Value>,
}

impl ApiError {
    /// The request went out but nothing came back.
    pub fn no_response() -> Self {
        Self {
            status: 0,
            message: NO_RESPONSE_MESSAGE.to_string(),
            errors: None,
            from_server: false,
        }
    }

    /// Something failed on our side before or after the exchange.
    pub fn client(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status: 0,
            message: if message.trim().is_empty() {
                UNKNOWN_ERROR_MESSAGE.to_string()
            } else {
                message
            },
            errors: None,
            from_server: false,
        }
    }

    /// Builds the error for a non-2xx response from its raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let payload = serde_json::from_str::<ErrorPayload>(body).ok();

        let server_message = payload
            .as_ref()
            .and_then(|p| p.message.as_deref())
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        let errors = payload
            .and_then(|p| p.errors)
            .and_then(|v| field_errors(&v))
            .filter(|m| !m.is_empty());

        Self {
            status,
            from_server: server_message.is_some(),
            message: server_message.unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
            errors,
        }
    }

    pub fn is_network(&self) -> bool {
        self.status == 0
    }

    /// The message the server supplied, if it supplied one.
    pub fn server_message(&self) -> Option<&str> {
        self.from_server.then_some(self.message.as_str())
    }

    /// Server message when present, else the caller's fallback.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.server_message().unwrap_or(fallback)
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::NoResponse { .. } => ApiError::no_response(),
            TransportError::Request(reason) => ApiError::client(reason),
        }
    }
}

/// Field-level errors arrive as an object; non-string values are kept in their JSON form.
fn field_errors(value: &Value) -> Option<BTreeMap<String, String>> {
    let object = value.as_object()?;
    Some(
        object
            .iter()
            .map(|(field, message)| {
                let message = match message {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (field.clone(), message)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_uses_server_message_and_errors() {
        let err = ApiError::from_response(
            400,
            r#"{"message":"Invalid job","errors":{"title":"must not be blank","maxSalary":3}}"#,
        );
        assert_eq!(err.status, 400);
        assert_eq!(err.message, "Invalid job");
        assert_eq!(err.server_message(), Some("Invalid job"));
        let errors = err.errors.expect("field errors");
        assert_eq!(errors["title"], "must not be blank");
        assert_eq!(errors["maxSalary"], "3");
    }

    #[test]
    fn test_from_response_defaults_message() {
        let err = ApiError::from_response(500, "");
        assert_eq!(err.status, 500);
        assert_eq!(err.message, DEFAULT_ERROR_MESSAGE);
        assert_eq!(err.server_message(), None);
        assert_eq!(err.message_or("fallback"), "fallback");
        assert!(err.errors.is_none());
    }

    #[test]
    fn test_only_empty_server_message_counts_as_absent() {
        let err = ApiError::from_response(404, r#"{"message":"","path":"/jobs/9"}"#);
        assert_eq!(err.message, DEFAULT_ERROR_MESSAGE);
        assert_eq!(err.message_or("Not there"), "Not there");

        let err = ApiError::from_response(404, r#"{"message":"  "}"#);
        assert_eq!(err.message, "  ");
        assert_eq!(err.server_message(), Some("  "));
    }

    #[test]
    fn test_transport_errors_have_status_zero() {
        let err: ApiError = TransportError::NoResponse {
            url: "http://localhost:8080/api/jobs".into(),
            reason: "connection refused".into(),
        }
        .into();
        assert!(err.is_network());
        assert_eq!(err.message, NO_RESPONSE_MESSAGE);

        let err: ApiError = TransportError::Request(String::new()).into();
        assert_eq!(err.status, 0);
        assert_eq!(err.message, UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn test_serializes_without_internal_flag() {
        let err = ApiError::from_response(409, r#"{"message":"Already reviewed"}"#);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": 409, "message": "Already reviewed"})
        );
    }
}
