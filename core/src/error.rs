//! Error types for the task API client.
//!
//! # Design
//! Every failure, whether the transport never reached the server, the server
//! answered with a non-2xx status, the envelope reported `success: false`, or
//! a draft was rejected before any I/O, surfaces as one `ApiError`. Callers
//! branch on `ErrorKind`; the message is ready to show to a user as-is. The
//! HTTP status and raw body are kept alongside for debugging.

use std::fmt;

/// Classification of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The server could not be reached at all (refused, DNS, timeout).
    Connection,
    /// HTTP 400.
    BadRequest,
    /// HTTP 401.
    Unauthorized,
    /// HTTP 403.
    Forbidden,
    /// HTTP 404.
    NotFound,
    /// HTTP 500.
    ServerFault,
    /// Any other non-2xx status; see `ApiError::status`.
    Http,
    /// 2xx response whose envelope carried `success: false`.
    Application,
    /// Rejected locally before a request was issued.
    Validation,
    /// A 2xx response body that is not the expected envelope.
    Decode,
    /// The request payload could not be serialized.
    Encode,
}

impl ErrorKind {
    /// Map a non-success HTTP status to its category.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::BadRequest,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            500 => ErrorKind::ServerFault,
            _ => ErrorKind::Http,
        }
    }

    /// True for every category produced by a non-2xx status.
    pub fn is_http(self) -> bool {
        matches!(
            self,
            ErrorKind::BadRequest
                | ErrorKind::Unauthorized
                | ErrorKind::Forbidden
                | ErrorKind::NotFound
                | ErrorKind::ServerFault
                | ErrorKind::Http
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Connection => "connection error",
            ErrorKind::BadRequest => "bad request",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not found",
            ErrorKind::ServerFault => "server fault",
            ErrorKind::Http => "http error",
            ErrorKind::Application => "application error",
            ErrorKind::Validation => "validation error",
            ErrorKind::Decode => "decode error",
            ErrorKind::Encode => "encode error",
        };
        f.write_str(name)
    }
}

/// Errors returned by every task API operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
    payload: Option<String>,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Raw response body, when one was received.
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// The server at `endpoint` (a `host:port` string) could not be reached.
    pub fn connection(endpoint: &str, detail: impl fmt::Display) -> Self {
        Self {
            kind: ErrorKind::Connection,
            message: format!(
                "cannot connect to the task server at {endpoint}; check that the server is running ({detail})"
            ),
            status: None,
            payload: None,
        }
    }

    /// Classify a non-2xx response. A JSON body carrying an `error` or
    /// `message` string is appended to the message as detail.
    pub fn from_status(status: u16, body: &str) -> Self {
        let kind = ErrorKind::from_status(status);
        let summary = match kind {
            ErrorKind::BadRequest => "the request data is invalid".to_string(),
            ErrorKind::Unauthorized => "authentication is required".to_string(),
            ErrorKind::Forbidden => "access to this resource is forbidden".to_string(),
            ErrorKind::NotFound => "the requested resource was not found".to_string(),
            ErrorKind::ServerFault => {
                "the server hit an internal error; check the server logs".to_string()
            }
            _ => format!("server error (HTTP {status})"),
        };
        let message = match body_detail(body) {
            Some(detail) => format!("{summary} (detail: {detail})"),
            None => summary,
        };
        Self {
            kind,
            message,
            status: Some(status),
            payload: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    /// A 2xx envelope with `success: false`.
    pub fn application(message: impl Into<String>, status: u16, body: &str) -> Self {
        Self {
            kind: ErrorKind::Application,
            message: message.into(),
            status: Some(status),
            payload: Some(body.to_string()),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
            status: None,
            payload: None,
        }
    }

    pub fn decode(detail: impl fmt::Display, status: u16, body: &str) -> Self {
        Self {
            kind: ErrorKind::Decode,
            message: format!("unexpected response from the task server: {detail}"),
            status: Some(status),
            payload: Some(body.to_string()),
        }
    }

    pub fn encode(detail: impl fmt::Display) -> Self {
        Self {
            kind: ErrorKind::Encode,
            message: format!("failed to encode request: {detail}"),
            status: None,
            payload: None,
        }
    }
}

/// Pull a human-readable `error` or `message` string out of a JSON body.
fn body_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .filter_map(|key| value.get(key)?.as_str())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_named_kinds() {
        assert_eq!(ErrorKind::from_status(400), ErrorKind::BadRequest);
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::Forbidden);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::ServerFault);
        assert_eq!(ErrorKind::from_status(502), ErrorKind::Http);
        assert_eq!(ErrorKind::from_status(422), ErrorKind::Http);
    }

    #[test]
    fn json_error_field_is_appended() {
        let err = ApiError::from_status(400, r#"{"success":false,"error":"title is required"}"#);
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.status(), Some(400));
        assert!(err.message().starts_with("the request data is invalid"));
        assert!(err.message().contains("title is required"));
        assert!(err.payload().unwrap().contains("title is required"));
    }

    #[test]
    fn message_field_used_when_error_missing() {
        let err = ApiError::from_status(503, r#"{"message":"maintenance"}"#);
        assert_eq!(err.kind(), ErrorKind::Http);
        assert!(err.message().contains("HTTP 503"));
        assert!(err.message().contains("maintenance"));
    }

    #[test]
    fn non_json_body_keeps_plain_summary() {
        let err = ApiError::from_status(500, "<html>oops</html>");
        assert_eq!(err.kind(), ErrorKind::ServerFault);
        assert!(!err.message().contains("detail"));
        assert_eq!(err.payload(), Some("<html>oops</html>"));

        let err = ApiError::from_status(404, "");
        assert_eq!(err.payload(), None);
    }

    #[test]
    fn connection_message_names_endpoint() {
        let err = ApiError::connection("localhost:5000", "connection refused");
        assert_eq!(err.kind(), ErrorKind::Connection);
        assert_eq!(err.status(), None);
        assert!(err.message().contains("localhost:5000"));
        assert!(err.message().contains("server is running"));
    }

    #[test]
    fn http_kinds_are_grouped() {
        assert!(ErrorKind::NotFound.is_http());
        assert!(ErrorKind::Http.is_http());
        assert!(!ErrorKind::Connection.is_http());
        assert!(!ErrorKind::Application.is_http());
    }
}
