//! Self-dismissing notification overlays
//!
//! A notification stays fully visible, fades out, then is detached. Both
//! steps are [`TimerTask`]s scheduled on the caller's [`Timers`].

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::config::NotificationTiming;
use crate::error::WebResult;
use crate::page::{NodeId, Page};
use crate::timers::{TimerTask, Timers};

/// Notification severity, rendered as a CSS class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Neutral information
    #[default]
    Info,
    /// Something worked
    Success,
    /// Something needs attention
    Warning,
    /// Something failed
    Error,
}

impl Severity {
    /// Parses a severity name; unknown names fall back to `Info`
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "success" => Self::Success,
            "warning" => Self::Warning,
            "error" | "danger" => Self::Error,
            _ => Self::Info,
        }
    }

    /// CSS class name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shows transient, self-dismissing notifications
///
/// Each notification owns its timers. There is no queue and no cap: two
/// calls produce two overlays that fade independently.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    timing: NotificationTiming,
    flash_class: String,
}

impl NotificationCenter {
    /// Creates a center with the given timing and overlay class
    #[must_use]
    pub fn new(timing: NotificationTiming, flash_class: &str) -> Self {
        Self {
            timing,
            flash_class: flash_class.to_string(),
        }
    }

    /// Appends a fixed top-right overlay and schedules its dismissal
    ///
    /// # Errors
    ///
    /// Fails only if the page cannot create the overlay element.
    pub fn notify<P, T>(
        &self,
        page: &mut P,
        timers: &mut T,
        message: &str,
        severity: Severity,
    ) -> WebResult<NodeId>
    where
        P: Page + ?Sized,
        T: Timers + ?Sized,
    {
        let node = page.create_element("div")?;
        page.set_class_name(node, &format!("{} {severity}", self.flash_class));
        page.set_text(node, message);
        page.set_style(node, "position", "fixed");
        page.set_style(node, "top", "20px");
        page.set_style(node, "right", "20px");
        page.set_style(node, "z-index", "1000");
        page.set_style(node, "max-width", "300px");

        let body = page.body();
        page.append_child(body, node);
        self.dismiss_later(timers, node);
        debug!(%severity, %node, "notification shown");
        Ok(node)
    }

    /// Schedules the fade-out of an existing node
    ///
    /// Used for flash messages rendered by the server.
    pub fn dismiss_later<T: Timers + ?Sized>(&self, timers: &mut T, node: NodeId) {
        timers.schedule(self.timing.visible_ms, TimerTask::FadeOut(node));
    }

    /// Runs a due timer task
    pub fn run<P, T>(&self, page: &mut P, timers: &mut T, task: TimerTask)
    where
        P: Page + ?Sized,
        T: Timers + ?Sized,
    {
        match task {
            TimerTask::FadeOut(node) => {
                page.set_style(node, "opacity", "0");
                page.set_style(node, "transition", &self.timing.transition());
                timers.schedule(self.timing.fade_ms, TimerTask::Detach(node));
            }
            TimerTask::Detach(node) => page.remove(node),
        }
    }
}
