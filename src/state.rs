//! View-state persistence: what the user sees, preserved across renders.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Ascending,
    /// Descending order.
    Descending,
}

/// The user-visible state of a rendered table.
///
/// Created on first render when persistence is enabled, read back to seed
/// the next render, and written whenever the render engine reports a
/// state-affecting user action. Scoped to the browser session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableViewState {
    /// Zero-based current page.
    pub page_index: usize,
    /// Sorted column index, if any.
    pub sort_column: Option<usize>,
    /// Direction of the active sort.
    pub sort_direction: SortDirection,
    /// Current search filter text.
    pub search_text: String,
    /// Rows per page.
    pub page_size: usize,
}

/// Session-scoped key-value collaborator backing [`TableStateStore`].
///
/// Implementations hold raw string payloads; the store wraps this with
/// typed JSON serialization. The backing medium is expected to be local
/// and synchronous (browser session storage, an in-process map), so no
/// call here blocks.
pub trait StateBackend: Send + Sync {
    /// Get the payload for a key, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Set the payload for a key.
    fn set(&self, key: &str, value: &str);
}

/// In-memory backend.
///
/// The default for hosts without session storage, and what tests use.
/// Data lives for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    store: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of stored entries.
    pub fn len(&self) -> usize {
        self.store.read().map(|g| g.len()).unwrap_or(0)
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StateBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.store.read().ok().and_then(|g| g.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut guard) = self.store.write() {
            guard.insert(key.to_string(), value.to_string());
        }
    }
}

impl<T: StateBackend + ?Sized> StateBackend for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

const DEFAULT_KEY_PREFIX: &str = "steadytable_";

/// Saves and restores [`TableViewState`], keyed by a prefix plus a stable
/// table identity.
///
/// Degrades to a no-op when persistence is disabled or no backend is
/// attached, and treats missing or corrupt entries as absent. Nothing in
/// here ever propagates an error to the caller; at most it logs.
#[derive(Clone)]
pub struct TableStateStore {
    backend: Option<Arc<dyn StateBackend>>,
    prefix: String,
}

impl TableStateStore {
    /// Create a store over a backend.
    pub fn new(backend: impl StateBackend + 'static) -> Self {
        Self {
            backend: Some(Arc::new(backend)),
            prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    /// Create a store with no backend: every save is dropped and every
    /// load is absent. Used when the session store collaborator is
    /// unavailable.
    pub fn detached() -> Self {
        Self {
            backend: None,
            prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    /// Override the key prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Returns `true` if a backend is attached.
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    fn key(&self, table_id: &str) -> String {
        format!("{}{}", self.prefix, table_id)
    }

    /// Save the state for a table. No-op (logged at debug) when no
    /// backend is attached.
    pub fn save(&self, table_id: &str, state: &TableViewState) {
        let Some(backend) = &self.backend else {
            log::debug!("state store unavailable, dropping state for {table_id}");
            return;
        };
        match serde_json::to_string(state) {
            Ok(payload) => backend.set(&self.key(table_id), &payload),
            Err(err) => log::warn!("failed to serialize state for {table_id}: {err}"),
        }
    }

    /// Load the last saved state for a table.
    ///
    /// Absent when no backend is attached, nothing was saved, or the
    /// saved entry does not parse. Corrupt entries are logged and treated
    /// as absent, never surfaced as errors.
    pub fn load(&self, table_id: &str) -> Option<TableViewState> {
        let backend = self.backend.as_ref()?;
        let payload = backend.get(&self.key(table_id))?;
        match serde_json::from_str(&payload) {
            Ok(state) => Some(state),
            Err(err) => {
                log::warn!("corrupt saved state for {table_id}, ignoring: {err}");
                None
            }
        }
    }
}
