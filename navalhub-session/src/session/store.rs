//! Session Store - Durable key/value persistence for the session record
//!
//! The store is a flat string map with three fixed keys. Only the session manager
//! writes to it.

use super::types::{keys, PersistedSessionRecord};
use crate::{SessionError, SessionResult};
use navalhub_core::storage_error;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};
use tracing::{debug, info};

/// Key/value contract consumed by the session manager.
///
/// Each call is atomic per key; no cross-key transaction is assumed.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> SessionResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> SessionResult<()>;

    fn remove(&self, key: &str) -> SessionResult<()>;

    /// Read all three fields of the session record
    fn load_record(&self) -> SessionResult<PersistedSessionRecord> {
        Ok(PersistedSessionRecord {
            auth: self.get(keys::AUTH)?,
            role: self.get(keys::AUTH_ROLE)?,
            email: self.get(keys::AUTH_EMAIL)?,
        })
    }
}

/// Process-local store, lost when the process exits
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }
}

/// Durable store backed by one JSON document per origin
#[derive(Debug)]
pub struct FileSessionStore {
    /// Path of the JSON document
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    /// Open a store at an explicit file path
    pub fn new<P: AsRef<Path>>(path: P) -> SessionResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SessionError::storage("create_dir", parent, e))?;
            }
        }

        info!("Session store initialized at: {}", path.display());

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Open the store scoped to `origin` inside `storage_dir`
    pub fn for_origin<P: AsRef<Path>>(storage_dir: P, origin: &str) -> SessionResult<Self> {
        let file_stem = encode_origin(origin);
        if file_stem.is_empty() {
            return Err(SessionError::store("session origin must not be empty"));
        }

        Self::new(storage_dir.as_ref().join(format!("{}.json", file_stem)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> SessionResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let json_data = std::fs::read_to_string(&self.path)
            .map_err(|e| SessionError::storage("read", &self.path, e))?;
        if json_data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let entries: BTreeMap<String, String> = serde_json::from_str(&json_data)
            .map_err(|e| SessionError::storage("parse", &self.path, e))?;
        Ok(entries)
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> SessionResult<()> {
        let json_data = serde_json::to_string_pretty(entries)
            .map_err(|e| SessionError::storage("serialize", &self.path, e))?;
        let tmp_path = self.path.with_extension("json.tmp");

        std::fs::write(&tmp_path, json_data)
            .map_err(|e| SessionError::storage("write", &tmp_path, e))?;
        std::fs::rename(&tmp_path, &self.path)
            .map_err(|e| SessionError::storage("rename", &self.path, e))?;

        debug!(
            "Wrote {} session keys to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }

    fn update<F>(&self, f: F) -> SessionResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| {
                SessionError::Core(storage_error!("file store lock poisoned", "session_store"))
            })?;

        let mut entries = self.read_entries()?;
        if f(&mut entries) {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string()).as_deref() != Some(value)
        })
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        self.update(|entries| entries.remove(key).is_some())
    }
}

fn poisoned() -> SessionError {
    SessionError::Core(storage_error!("memory store lock poisoned", "session_store"))
}

/// Turn an origin such as `https://portal.example:8443` into a file stem.
///
/// `[A-Za-z0-9.-]` pass through and every other byte becomes `_XX` (uppercase hex),
/// so distinct origins never share a file.
fn encode_origin(origin: &str) -> String {
    let mut stem = String::with_capacity(origin.len());
    for byte in origin.trim().bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.') {
            stem.push(byte as char);
        } else {
            stem.push_str(&format!("_{:02X}", byte));
        }
    }
    stem
}
