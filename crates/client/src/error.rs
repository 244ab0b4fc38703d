//! Error type for backend API calls.

use thiserror::Error;

/// Errors that can occur when calling the marketplace backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed (connection refused, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected the request with a non-2xx status.
    ///
    /// `message` is extracted from the response body's `message` field when
    /// present, otherwise a status-coded generic message.
    #[error("{message}")]
    Backend {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Human-readable message safe to show to the user.
        message: String,
    },

    /// The stored bearer token was rejected (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// The requested resource does not exist (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Response body was not the JSON we expected.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Build the error for a non-2xx response, extracting the backend's
    /// `message` field when the body carries one.
    #[must_use]
    pub fn from_status(status: u16, path: &str, body: &str) -> Self {
        match status {
            401 => Self::Unauthorized,
            404 => Self::NotFound(path.to_owned()),
            _ => {
                let message = serde_json::from_str::<serde_json::Value>(body)
                    .ok()
                    .and_then(|v| v.get("message").and_then(|m| m.as_str().map(String::from)))
                    .unwrap_or_else(|| format!("API error: {status}"));
                Self::Backend { status, message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_extracted_from_body() {
        let err = ApiError::from_status(409, "/auth/register", r#"{"message":"Username taken"}"#);
        assert_eq!(err.to_string(), "Username taken");
        assert!(matches!(err, ApiError::Backend { status: 409, .. }));
    }

    #[test]
    fn test_generic_message_when_body_is_not_json() {
        let err = ApiError::from_status(500, "/cart", "<html>oops</html>");
        assert_eq!(err.to_string(), "API error: 500");
    }

    #[test]
    fn test_unauthorized_and_not_found_are_special_cased() {
        assert!(matches!(
            ApiError::from_status(401, "/cart", ""),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(404, "/products/99", ""),
            ApiError::NotFound(_)
        ));
    }
}
