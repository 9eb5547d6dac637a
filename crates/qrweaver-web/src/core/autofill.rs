//! Profile-URL autofill
//!
//! Runs on every keystroke in the profile field. Each call looks only at the
//! current value and the display-name field, so there is no state to carry
//! between keystrokes.

use super::Platform;

/// What a keystroke should change on the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Autofill {
    /// New value for the profile field, if it must be rewritten
    pub profile_url: Option<String>,
    /// New value for the display-name field, if it must be filled in
    pub display_name: Option<String>,
}

impl Autofill {
    /// Whether the keystroke leaves the page untouched
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.profile_url.is_none() && self.display_name.is_none()
    }
}

/// Computes the autofill effects of the current profile value
///
/// `display_name` is the sibling field's current value, or `None` when the
/// form has no such field.
#[must_use]
pub fn autofill(platform: Platform, value: &str, display_name: Option<&str>) -> Autofill {
    let display_name = match (platform, display_name) {
        (Platform::Instagram, Some(current)) if current.is_empty() && !value.contains('@') => {
            let handle = instagram_handle(value);
            (!handle.is_empty()).then(|| format!("@{handle}"))
        }
        _ => None,
    };

    Autofill {
        profile_url: canonicalize(platform, value),
        display_name,
    }
}

/// Rewrites a bare reference into the platform's canonical profile URL
///
/// Returns `None` when the value is empty, already on the platform's domain,
/// or already carries an http(s) scheme.
#[must_use]
pub fn canonicalize(platform: Platform, value: &str) -> Option<String> {
    let (domain, base) = match platform {
        Platform::Facebook => ("facebook.com", "https://facebook.com/"),
        Platform::Instagram => ("instagram.com", "https://instagram.com/"),
        Platform::LinkedIn => ("linkedin.com", "https://linkedin.com/in/"),
        Platform::Home => return None,
    };

    if value.is_empty() || value.contains(domain) || has_http_scheme(value) {
        return None;
    }

    let path = match platform {
        Platform::LinkedIn => value,
        _ => value.strip_prefix('@').unwrap_or(value),
    };
    Some(format!("{base}{path}"))
}

/// Username part of an Instagram reference
#[must_use]
pub fn instagram_handle(value: &str) -> String {
    let stripped = value.replacen("instagram.com/", "", 1);
    stripped
        .strip_suffix('/')
        .unwrap_or(&stripped)
        .to_string()
}

fn has_http_scheme(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
