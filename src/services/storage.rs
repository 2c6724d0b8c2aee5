// src/services/storage.rs
//
// Keyed-blob storage behind the session layer. The in-memory store is the
// development stub; the file store gives durable sessions across restarts.
// Which one runs is a config decision (STORE_PATH), not a call-site branch.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::Value;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value);
    fn remove(&self, key: &str) -> bool;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, Value>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.inner.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        if let Ok(mut guard) = self.inner.write() {
            guard.insert(key.to_string(), value);
        }
    }

    fn remove(&self, key: &str) -> bool {
        self.inner
            .write()
            .map(|mut guard| guard.remove(key).is_some())
            .unwrap_or(false)
    }
}

/// Whole-map-as-JSON persistence. Writes are best effort: a failed flush is
/// logged and the in-memory view stays authoritative.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: RwLock<HashMap<String, Value>>,
}

impl FileStore {
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let map = match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), error = %err, "store file unreadable, starting empty");
                HashMap::new()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err),
        };
        Ok(Self {
            path: path.to_path_buf(),
            inner: RwLock::new(map),
        })
    }

    fn flush(&self, map: &HashMap<String, Value>) {
        let serialized = match serde_json::to_string_pretty(map) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!(error = %err, "could not serialize store");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, serialized) {
            tracing::warn!(path = %self.path.display(), error = %err, "could not write store file");
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.inner.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        if let Ok(mut guard) = self.inner.write() {
            guard.insert(key.to_string(), value);
            self.flush(&guard);
        }
    }

    fn remove(&self, key: &str) -> bool {
        match self.inner.write() {
            Ok(mut guard) => {
                let removed = guard.remove(key).is_some();
                if removed {
                    self.flush(&guard);
                }
                removed
            }
            Err(_) => false,
        }
    }
}
