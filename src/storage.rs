//! Key-value persistence for the session token, current user, and drafts.
//!
//! DESIGN
//! ======
//! Screens never touch storage globally. They receive a [`Session`] that
//! wraps whatever [`KeyValueStore`] the host provides: a [`FileStore`] for
//! the CLI, a [`MemoryStore`] for tests. Values are opaque strings; the typed
//! accessors on `Session` own the JSON encoding.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::model::user::User;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const VENDOR_DRAFT_KEY: &str = "vendorFormDraft";

const STATE_FILE: &str = "state.json";

pub trait KeyValueStore: Send + Sync {
    /// Read the raw value for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process store. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// Store backed by one JSON object file, rewritten on every mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open (or lazily create) `state.json` inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        let path = dir.join(STATE_FILE);
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries: Mutex::new(entries) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

/// Typed view over a [`KeyValueStore`].
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Session over a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// The stored bearer token, ignoring blank values.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn token(&self) -> Result<Option<String>, StoreError> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|token| !token.trim().is_empty()))
    }

    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.store.set(TOKEN_KEY, token.trim())
    }

    /// The cached current-user profile. An unreadable profile reads as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn current_user(&self) -> Result<Option<User>, StoreError> {
        self.load_draft(USER_KEY)
    }

    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn set_current_user(&self, user: &User) -> Result<(), StoreError> {
        self.save_draft(USER_KEY, user)
    }

    /// Session teardown: drop the token and cached profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)
    }

    /// Load a JSON draft. Drafts that no longer match `T` are treated as
    /// absent, not as errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load_draft<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unreadable stored value");
                Ok(None)
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded or the store written.
    pub fn save_draft<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear_draft(&self, key: &str) -> Result<(), StoreError> {
        self.store.remove(key)
    }
}
