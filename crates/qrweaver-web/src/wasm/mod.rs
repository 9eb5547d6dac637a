//! Page backends
//!
//! [`MockDom`] is always compiled so every handler can be tested natively.
//! The `wasm` feature adds the `web-sys` backend and the JS entry points.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
#[cfg_attr(not(feature = "wasm"), allow(dead_code))]
mod registry;
#[cfg(feature = "wasm")]
mod storage;

#[cfg(feature = "wasm")]
pub use browser::{boot, BrowserPage, BrowserTimers, QrWeaver};
pub use dom::{DomElement, MockDom, ShareSupport};
#[cfg(feature = "wasm")]
pub use storage::LocalStorage;
