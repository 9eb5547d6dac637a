//! Front-end configuration
//!
//! Every hook into the server-rendered markup (ids, class names, field
//! names), the notification timing and all user-facing strings live here.
//! Defaults match the markup the QR app renders; a page can override any of
//! them with a JSON `<script>` block.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::WebResult;
use crate::page::Page;

/// Timing of transient notifications and flash messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationTiming {
    /// How long a notification stays fully visible
    pub visible_ms: u32,
    /// Length of the opacity fade before removal
    pub fade_ms: u32,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            visible_ms: 5000,
            fade_ms: 500,
        }
    }
}

impl NotificationTiming {
    /// Total lifetime of a notification node
    #[must_use]
    pub const fn total_ms(&self) -> u32 {
        self.visible_ms.saturating_add(self.fade_ms)
    }

    /// CSS transition applied when the fade starts
    #[must_use]
    pub fn transition(&self) -> String {
        format!("opacity {}s ease", f64::from(self.fade_ms) / 1000.0)
    }
}

/// User-facing strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Inline message under an empty required field
    pub required_field: String,
    /// Notification when a submit is blocked by empty required fields
    pub required_summary: String,
    /// Notification when the QR data textarea is empty
    pub qr_data_required: String,
    /// Inline message for a non-Facebook profile reference
    pub facebook_invalid: String,
    /// Inline message for a non-Instagram profile reference
    pub instagram_invalid: String,
    /// Inline message for a non-LinkedIn profile reference
    pub linkedin_invalid: String,
    /// Notification when there is no generated QR code to download
    pub download_missing: String,
    /// Notification when there is no shortlink to share
    pub share_missing: String,
    /// Notification when sharing is not possible; `{url}` is replaced
    pub share_fallback: String,
    /// Title passed to the share sheet
    pub share_title: String,
    /// Text passed to the share sheet
    pub share_text: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            required_field: "Това поле е задължително".into(),
            required_summary: "Моля, попълнете всички полета!".into(),
            qr_data_required: "Моля, въведете данни за QR кода!".into(),
            facebook_invalid: "Моля, въведете валиден Facebook профил или потребителско име"
                .into(),
            instagram_invalid: "Моля, въведете валиден Instagram профил или @потребителско име"
                .into(),
            linkedin_invalid: "Моля, въведете валиден LinkedIn профил (linkedin.com/in/...)"
                .into(),
            download_missing: "Няма генериран QR код за изтегляне".into(),
            share_missing: "Няма линк за споделяне".into(),
            share_fallback: "Споделянето не се поддържа. Копирайте линка: {url}".into(),
            share_title: "Моят QR код".into(),
            share_text: "Сканирайте QR кода или отворете линка".into(),
        }
    }
}

impl Messages {
    /// Share fallback text for a concrete link
    #[must_use]
    pub fn share_fallback_for(&self, url: &str) -> String {
        self.share_fallback.replace("{url}", url)
    }
}

/// Complete front-end configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Notification and flash-message timing
    pub notification: NotificationTiming,
    /// Autosave prefix for forms without an id
    pub default_form_id: String,
    /// Class of server-rendered flash messages
    pub flash_class: String,
    /// Name of the profile-URL field
    pub profile_field: String,
    /// Name of the display-name field
    pub display_name_field: String,
    /// Class of the element holding the generated shortlink
    pub shortlink_class: String,
    /// Id of the form that downloads the generated image
    pub download_form_id: String,
    /// Class of buttons that fill in example QR data
    pub example_button_class: String,
    /// Id and name of the QR data textarea (example buttons fill it)
    pub qr_data_field: String,
    /// Id of the style `<select>`
    pub style_select_id: String,
    /// Id of the `<script type="application/json">` carrying overrides
    pub config_script_id: String,
    /// User-facing strings
    pub messages: Messages,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification: NotificationTiming::default(),
            default_form_id: "default-form".into(),
            flash_class: "flash-message".into(),
            profile_field: "profile_url".into(),
            display_name_field: "display_name".into(),
            shortlink_class: "shortlink".into(),
            download_form_id: "download-form".into(),
            example_button_class: "example-btn".into(),
            qr_data_field: "qr_data".into(),
            style_select_id: "style".into(),
            config_script_id: "qrweaver-config".into(),
            messages: Messages::default(),
        }
    }
}

impl UiConfig {
    /// Parses a (possibly partial) JSON configuration
    ///
    /// # Errors
    ///
    /// Returns [`WebError::InvalidConfig`](crate::error::WebError::InvalidConfig)
    /// if the JSON is malformed or has wrongly typed fields.
    pub fn from_json(json: &str) -> WebResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads overrides from the page's config script, if any
    ///
    /// A missing script yields the defaults; a malformed one is logged and
    /// also yields the defaults, so a bad deploy never breaks the form.
    pub fn from_page<P: Page + ?Sized>(page: &mut P) -> Self {
        let script_id = Self::default().config_script_id;
        let Some(node) = page.element_by_id(&script_id) else {
            return Self::default();
        };
        let text = page.text(node).unwrap_or_default();
        match Self::from_json(&text) {
            Ok(config) => config,
            Err(err) => {
                warn!(%err, script = %script_id, "ignoring page configuration");
                Self::default()
            }
        }
    }
}
