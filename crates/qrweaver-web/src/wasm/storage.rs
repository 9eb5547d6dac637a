//! `localStorage` adapter for autosave

use web_sys::Storage;

use super::browser::js_message;
use crate::core::autosave::KeyValueStore;
use crate::error::{WebError, WebResult};

/// Autosave store backed by `window.localStorage`
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    /// Opens the window's local storage
    ///
    /// Private browsing modes may refuse access; the store then reports
    /// [`WebError::StorageUnavailable`] on every call instead of failing here.
    #[must_use]
    pub fn open(window: &web_sys::Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }

    /// Whether the browser granted access
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn storage(&self) -> WebResult<&Storage> {
        self.storage.as_ref().ok_or(WebError::StorageUnavailable)
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> WebResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|err| WebError::StorageRead {
                key: key.to_string(),
                message: js_message(&err),
            })
    }

    fn set(&mut self, key: &str, value: &str) -> WebResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| WebError::StorageWrite {
                key: key.to_string(),
                message: js_message(&err),
            })
    }
}
