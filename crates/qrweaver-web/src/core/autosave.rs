//! Autosave persistence
//!
//! Field values are stored under `<form-id>-<field-name>`. Forms without an
//! id share the configured default prefix, so two such forms with a field of
//! the same name read and write the same entry.

use std::collections::BTreeMap;

use crate::error::{WebError, WebResult};

/// Builds the persisted key for a field
///
/// An empty or missing form id falls back to `default_form_id`.
#[must_use]
pub fn autosave_key(form_id: Option<&str>, default_form_id: &str, field_name: &str) -> String {
    let form_id = form_id.filter(|id| !id.is_empty()).unwrap_or(default_form_id);
    format!("{form_id}-{field_name}")
}

/// Durable string key-value storage
pub trait KeyValueStore {
    /// Reads an entry
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be read.
    fn get(&self, key: &str) -> WebResult<Option<String>>;

    /// Writes an entry, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage rejects the write.
    fn set(&mut self, key: &str, value: &str) -> WebResult<()>;
}

/// In-memory store
///
/// Stands in for `localStorage` natively. A rejecting store models storage
/// that is disabled or full.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    reject_writes: bool,
}

impl MemoryStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose writes always fail
    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            entries: BTreeMap::new(),
            reject_writes: true,
        }
    }

    /// Seeds an entry, as if persisted by an earlier page load
    #[must_use]
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> WebResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> WebResult<()> {
        if self.reject_writes {
            return Err(WebError::StorageWrite {
                key: key.to_string(),
                message: "storage is full".to_string(),
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
