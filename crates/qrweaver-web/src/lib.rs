//! QR Weaver web front end
//!
//! Client-side glue for the QR generator's server-rendered forms:
//!
//! - **Field validation**: profile references are checked against the
//!   platform the page belongs to (`/social/facebook`, ...)
//! - **Field decoration**: invalid fields get a red border and one inline
//!   error message
//! - **Notifications**: fixed top-right overlays that fade out after five
//!   seconds, also applied to server flash messages
//! - **Autofill**: bare usernames become canonical profile URLs
//! - **Autosave**: every named field is persisted as it is edited and
//!   restored on the next visit
//! - **Bootstrapping**: one pass over the page registers every handler in
//!   an explicit [`HandlerTable`](bootstrap::HandlerTable)
//!
//! All of it runs natively against [`MockDom`](wasm::MockDom); the `wasm`
//! feature adds the browser backend and the `boot()` JS entry point.
//!
//! # Example
//!
//! ```rust
//! use qrweaver_web::prelude::*;
//!
//! let dom = MockDom::social_form(Platform::Facebook);
//! let mut app = App::boot(dom, SimulatedClock::new(), MemoryStore::new());
//!
//! let field = app.page_mut().element_by_id("profile_url").unwrap();
//! app.type_into(field, "@jane");
//! assert_eq!(app.page().value(field).as_deref(), Some("https://facebook.com/jane"));
//!
//! // Autosave picked the rewritten value up
//! assert_eq!(
//!     app.store().get("social-form-profile_url").unwrap().as_deref(),
//!     Some("https://facebook.com/jane")
//! );
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod bootstrap;
pub mod config;
pub mod core;
pub mod error;
pub mod page;
pub mod timers;
pub mod ui;

/// Page backends - the mock DOM is always available for testing
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::bootstrap::{App, EventOutcome, Handler, HandlerTable, ShareOutcome};
    pub use crate::config::{Messages, NotificationTiming, UiConfig};
    pub use crate::core::autofill::{autofill, canonicalize, Autofill};
    pub use crate::core::autosave::{autosave_key, KeyValueStore, MemoryStore};
    pub use crate::core::style::StylePreset;
    pub use crate::core::validator::{FieldValidator, Validation};
    pub use crate::core::Platform;
    pub use crate::error::{WebError, WebResult};
    pub use crate::page::{DomEvent, EventKind, NodeId, Page, ScrollBlock, Selector};
    pub use crate::timers::{SimulatedClock, TimerTask, Timers};
    pub use crate::ui::{decorate, NotificationCenter, Severity};
    pub use crate::wasm::{DomElement, MockDom, ShareSupport};
}
