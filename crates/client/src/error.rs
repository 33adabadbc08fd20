//! Errors returned by the REST client.

use thiserror::Error;

/// Errors that can occur when calling the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connect, timeout, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The base URL and path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// 401/403: missing, expired or insufficient token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 404.
    #[error("Not found: {0}")]
    NotFound(String),

    /// 400/422: the backend rejected the submitted data.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Any other non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An image could not be read or is not an accepted type.
    #[error("Upload error: {0}")]
    Upload(String),
}

impl ApiError {
    /// Build the error for a non-success status and its body text.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let message = backend_message(body);
        match status {
            401 | 403 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            400 | 422 => Self::Validation(message),
            _ => Self::Api { status, message },
        }
    }

    /// Whether the session token should be discarded.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

/// Extract a human-readable message from an error body.
///
/// The backend uses `{"message": ..}` or `{"error": ..}`; anything else is
/// returned as-is (or a placeholder when empty).
fn backend_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no response body".to_owned();
    }
    serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| {
            ["message", "error", "msg"]
                .iter()
                .find_map(|key| value.get(key).and_then(|m| m.as_str()).map(str::to_owned))
        })
        .unwrap_or_else(|| trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            ApiError::from_status(401, "{}"),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from_status(403, ""),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from_status(404, ""),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_status(422, ""),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from_status(502, ""),
            ApiError::Api { status: 502, .. }
        ));
    }

    #[test]
    fn test_message_extraction() {
        assert_eq!(backend_message(r#"{"message":"Slug taken"}"#), "Slug taken");
        assert_eq!(backend_message(r#"{"error":"Bad token"}"#), "Bad token");
        assert_eq!(backend_message("Gateway Timeout"), "Gateway Timeout");
        assert_eq!(backend_message("  "), "no response body");
    }
}
