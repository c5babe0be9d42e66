use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{error::SessionError, repositories::session_store::SessionStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum SessionValue {
    Bool(bool),
    Text(String),
}

type Entries = BTreeMap<String, SessionValue>;

fn get_bool(entries: &Entries, key: &str) -> bool {
    matches!(entries.get(key), Some(SessionValue::Bool(true)))
}

fn get_string(entries: &Entries, key: &str) -> Option<String> {
    match entries.get(key) {
        Some(SessionValue::Text(text)) => Some(text.clone()),
        _ => None,
    }
}

/// Session kept in memory only
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    entries: Arc<Mutex<Entries>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut Entries) -> T) -> Result<T, SessionError> {
        let mut entries = self.entries.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(f(&mut entries))
    }
}

impl SessionStore for InMemorySessionStore {
    fn put_bool(&self, key: &str, value: bool) -> Result<(), SessionError> {
        self.with_entries(|e| {
            e.insert(key.to_string(), SessionValue::Bool(value));
        })
    }

    fn put_string(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.with_entries(|e| {
            e.insert(key.to_string(), SessionValue::Text(value.to_string()));
        })
    }

    fn get_bool(&self, key: &str) -> Result<bool, SessionError> {
        self.with_entries(|e| get_bool(e, key))
    }

    fn get_string(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.with_entries(|e| get_string(e, key))
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.with_entries(|e| e.clear())
    }
}

/// Session persisted as a JSON object in a single file.
///
/// Every write rewrites the whole file.
#[derive(Clone)]
pub struct JsonSessionStore {
    path: PathBuf,
    entries: Arc<Mutex<Entries>>,
}

impl JsonSessionStore {
    /// Open the store at `path`, loading existing entries if the file exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Entries::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), keys = entries.len(), "opened session store");
        Ok(Self {
            path,
            entries: Arc::new(Mutex::new(entries)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `f` and persist. Memory only changes once the file is written.
    fn update(&self, f: impl FnOnce(&mut Entries)) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().map_err(|_| SessionError::Poisoned)?;
        let mut next = entries.clone();
        f(&mut next);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&next)?)?;
        *entries = next;
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&Entries) -> T) -> Result<T, SessionError> {
        let entries = self.entries.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(f(&entries))
    }
}

impl SessionStore for JsonSessionStore {
    fn put_bool(&self, key: &str, value: bool) -> Result<(), SessionError> {
        self.update(|e| {
            e.insert(key.to_string(), SessionValue::Bool(value));
        })
    }

    fn put_string(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.update(|e| {
            e.insert(key.to_string(), SessionValue::Text(value.to_string()));
        })
    }

    fn get_bool(&self, key: &str) -> Result<bool, SessionError> {
        self.read(|e| get_bool(e, key))
    }

    fn get_string(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.read(|e| get_string(e, key))
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.update(|e| e.clear())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::session_store::{KEY_IS_SIGNED_IN, KEY_NAME};

    #[test]
    fn test_in_memory_defaults() {
        let store = InMemorySessionStore::new();
        assert!(!store.get_bool(KEY_IS_SIGNED_IN).unwrap());
        assert_eq!(store.get_string(KEY_NAME).unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs").join("session.json");

        let store = JsonSessionStore::open(&path).unwrap();
        store.put_bool(KEY_IS_SIGNED_IN, true).unwrap();
        store.put_string(KEY_NAME, "Sam").unwrap();

        let reopened = JsonSessionStore::open(&path).unwrap();
        assert!(reopened.get_bool(KEY_IS_SIGNED_IN).unwrap());
        assert_eq!(reopened.get_string(KEY_NAME).unwrap().as_deref(), Some("Sam"));
    }

    #[test]
    fn test_clear_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = JsonSessionStore::open(&path).unwrap();
        store.put_string(KEY_NAME, "Sam").unwrap();
        store.clear().unwrap();

        let reopened = JsonSessionStore::open(&path).unwrap();
        assert_eq!(reopened.get_string(KEY_NAME).unwrap(), None);
    }

    #[test]
    fn test_type_mismatch_reads_as_absent() {
        let store = InMemorySessionStore::new();
        store.put_string(KEY_IS_SIGNED_IN, "true").unwrap();
        assert!(!store.get_bool(KEY_IS_SIGNED_IN).unwrap());
    }

    #[test]
    fn test_failed_write_keeps_previous_value_negative() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        let store = JsonSessionStore::open(blocker.join("session.json")).unwrap();
        store.put_string(KEY_NAME, "Sam").unwrap();

        // a regular file where the parent directory should be
        fs::remove_dir_all(&blocker).unwrap();
        fs::write(&blocker, b"").unwrap();

        assert!(store.put_bool(KEY_IS_SIGNED_IN, true).is_err());
        assert!(!store.get_bool(KEY_IS_SIGNED_IN).unwrap());

        assert!(store.clear().is_err());
        assert_eq!(store.get_string(KEY_NAME).unwrap().as_deref(), Some("Sam"));
    }

    #[test]
    fn test_corrupt_file_negative() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, b"{not json").unwrap();

        assert!(matches!(
            JsonSessionStore::open(&path),
            Err(SessionError::Corrupt(_))
        ));
    }
}
