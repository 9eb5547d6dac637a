//! Visual feedback: inline field errors and transient notifications

mod decorator;
mod notification;

pub use decorator::{decorate, error_message, FIELD_ERROR_CLASS};
pub use notification::{NotificationCenter, Severity};
