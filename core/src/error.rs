//! Error types for the blog API client.
//!
//! # Design
//! Field-level problems inside a record never surface here: the normalizer
//! degrades them to defaults. These errors describe whole-operation
//! failures. Every non-2xx response lands in `Http` carrying the server's
//! message (or a generic one); a single-record fetch whose body is not a
//! record fails with `NotFoundOrInvalid`.

use thiserror::Error;

/// Message used when an error response carries no usable `message` field.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

/// Errors returned by `ArticleClient` parse methods and `ArticleService`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// A single-record response was absent or not a JSON object.
    #[error("invalid blog post data: {0}")]
    NotFoundOrInvalid(String),

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body was not valid JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// True for a 404 response and for a missing/invalid single record.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApiError::Http { status: 404, .. } | ApiError::NotFoundOrInvalid(_)
        )
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_and_message() {
        let err = ApiError::Http {
            status: 500,
            message: "database offline".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: database offline");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn not_found_covers_404_and_invalid_body() {
        let http_404 = ApiError::Http {
            status: 404,
            message: GENERIC_FAILURE_MESSAGE.to_string(),
        };
        assert!(http_404.is_not_found());
        assert!(ApiError::NotFoundOrInvalid("null".to_string()).is_not_found());
        assert!(!ApiError::Transport("refused".to_string()).is_not_found());
        assert!(!ApiError::Http {
            status: 500,
            message: String::new()
        }
        .is_not_found());
    }
}
