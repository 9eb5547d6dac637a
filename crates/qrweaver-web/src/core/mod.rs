//! Page-independent form logic
//!
//! Nothing in here touches the DOM: every function takes plain strings and
//! returns plain values, so it is tested natively without a browser.

pub mod autofill;
pub mod autosave;
pub mod style;
pub mod validator;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Social platform a page generates QR codes for
///
/// Resolved once per page load from the URL path and never changes after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// `/social/facebook`
    Facebook,
    /// `/social/instagram`
    Instagram,
    /// `/social/linkedin`
    LinkedIn,
    /// Any other page (the plain-text QR generator)
    #[default]
    Home,
}

impl Platform {
    /// Every platform, in detection order
    pub const ALL: [Platform; 4] = [
        Platform::Facebook,
        Platform::Instagram,
        Platform::LinkedIn,
        Platform::Home,
    ];

    /// Detects the platform from a page path by substring match
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        if path.contains("facebook") {
            Self::Facebook
        } else if path.contains("instagram") {
            Self::Instagram
        } else if path.contains("linkedin") {
            Self::LinkedIn
        } else {
            Self::Home
        }
    }

    /// Lowercase identifier used in paths and class names
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::LinkedIn => "linkedin",
            Self::Home => "home",
        }
    }

    /// Whether the profile field gets rewritten while typing
    #[must_use]
    pub const fn has_autofill(self) -> bool {
        !matches!(self, Self::Home)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
