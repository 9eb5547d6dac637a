//! Field validation
//!
//! Two independent checks: whether required fields are filled in, and
//! whether a profile reference plausibly belongs to the page's platform.
//! Only the first one ever blocks a submit.

use super::Platform;
use crate::config::Messages;

/// Outcome of validating a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Whether the value passed
    pub valid: bool,
    /// Message to show under the field when it did not
    pub message: Option<String>,
}

impl Validation {
    /// A passing result
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    /// A failing result with its message
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }

    /// Message to render, empty for passing results
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

/// Validates profile references against the active platform
#[derive(Debug, Clone, Default)]
pub struct FieldValidator {
    messages: Messages,
}

impl FieldValidator {
    /// Creates a validator with the default (Bulgarian) messages
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with custom messages
    #[must_use]
    pub fn with_messages(messages: Messages) -> Self {
        Self { messages }
    }

    /// Checks a profile reference
    ///
    /// Empty values always pass; required-ness is checked separately.
    /// A value without any `.` also passes on every social platform, so bare
    /// usernames are accepted. That escape hatch lets dot-free garbage through
    /// as well and is kept as is.
    #[must_use]
    pub fn validate(&self, value: &str, platform: Platform) -> Validation {
        let value = value.trim();
        if value.is_empty() {
            return Validation::valid();
        }

        let bare_username = !value.contains('.');
        let (matches, message) = match platform {
            Platform::Facebook => (
                value.contains("facebook.com") || value.contains("fb.com"),
                &self.messages.facebook_invalid,
            ),
            Platform::Instagram => (
                value.contains("instagram.com") || value.contains('@'),
                &self.messages.instagram_invalid,
            ),
            Platform::LinkedIn => (
                value.contains("linkedin.com/in"),
                &self.messages.linkedin_invalid,
            ),
            Platform::Home => return Validation::valid(),
        };

        if matches || bare_username {
            Validation::valid()
        } else {
            Validation::invalid(message.clone())
        }
    }

    /// Checks a required field
    #[must_use]
    pub fn require(&self, value: &str) -> Validation {
        if is_blank(value) {
            Validation::invalid(self.messages.required_field.clone())
        } else {
            Validation::valid()
        }
    }
}

/// Validates a profile reference with the default messages
#[must_use]
pub fn validate_profile_url(value: &str, platform: Platform) -> Validation {
    FieldValidator::new().validate(value, platform)
}

/// Whether a value counts as "not filled in"
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
