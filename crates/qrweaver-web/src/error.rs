//! Result and error types for the QR form front end.
//!
//! User-facing validation failures are not errors: they are reported as
//! [`Validation`](crate::core::validator::Validation) values. `WebError`
//! covers the infrastructure around the form (storage, sharing, markup).

use thiserror::Error;

/// Result type for front-end operations
pub type WebResult<T> = Result<T, WebError>;

/// Errors that can occur while driving the page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebError {
    /// An element the operation depends on is not in the page
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// CSS selector that matched nothing
        selector: String,
    },

    /// Persistent storage is disabled or not exposed by the browser
    #[error("Local storage is unavailable")]
    StorageUnavailable,

    /// Writing a persisted entry failed (quota exceeded, private mode, ...)
    #[error("Failed to persist {key}: {message}")]
    StorageWrite {
        /// Autosave key being written
        key: String,
        /// Error message
        message: String,
    },

    /// Reading a persisted entry failed
    #[error("Failed to read {key}: {message}")]
    StorageRead {
        /// Autosave key being read
        key: String,
        /// Error message
        message: String,
    },

    /// The Web Share API is not exposed by this browser
    #[error("Sharing is not supported by this browser")]
    ShareUnavailable,

    /// The Web Share API rejected the request
    #[error("Sharing failed: {message}")]
    ShareFailed {
        /// Error message
        message: String,
    },

    /// Configuration could not be parsed
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// A browser call threw a JavaScript exception
    #[error("Browser error: {message}")]
    Browser {
        /// Error message
        message: String,
    },
}

impl WebError {
    /// Shorthand for [`WebError::ElementNotFound`]
    #[must_use]
    pub fn not_found(selector: impl Into<String>) -> Self {
        Self::ElementNotFound {
            selector: selector.into(),
        }
    }
}

impl From<serde_json::Error> for WebError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig {
            message: err.to_string(),
        }
    }
}
