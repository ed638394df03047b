//! Key-value storage backends and change notifications.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::mpsc::{Receiver, Sender, channel};

use serde_json::Value;

/// Every critical section here is a single map operation; a poisoned lock
/// is taken over rather than propagated.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Storage areas of the host store. Only [`StorageArea::Local`] is honored
/// by the mirror; changes in other areas are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageArea {
    Local,
    Sync,
    Session,
}

/// The three independent configuration keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// `active` — global feature flag. Storage-layer default: `false`.
    Active,
    /// `bracketPairs` — the pair list. Default: the built-in table.
    BracketPairs,
    /// `columnSettings` — the global column toggles. Default: both on.
    ColumnSettings,
}

impl StorageKey {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::Active => "active",
            StorageKey::BracketPairs => "bracketPairs",
            StorageKey::ColumnSettings => "columnSettings",
        }
    }
}

/// One external update to a configuration key.
///
/// `new_value` of `None` means the key was removed; the mirror falls back
/// to the key's documented default.
#[derive(Clone, Debug)]
pub struct StorageChange {
    pub area: StorageArea,
    pub key: StorageKey,
    pub new_value: Option<Value>,
}

/// Persisted key-value store.
///
/// `store` is expected to complete from the caller's point of view when it
/// returns; durability is the backend's business. Failures are logged, not
/// surfaced — a missing value on the next load degrades to defaults.
pub trait StorageBackend: Send + Sync {
    fn load(&self, key: StorageKey) -> Option<Value>;
    fn store(&self, key: StorageKey, value: Value);
}

/// In-memory backend with change notifications.
///
/// Models the host's local storage area: every write is announced to all
/// subscribers, including the context that wrote it. External contexts
/// (e.g. a settings UI driving the same backend) show up to the mirror the
/// same way.
#[derive(Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<StorageKey, Value>>,
    subscribers: Mutex<Vec<Sender<StorageChange>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to change notifications for this backend.
    pub fn subscribe(&self) -> Receiver<StorageChange> {
        let (tx, rx) = channel();
        lock(&self.subscribers).push(tx);
        rx
    }

    /// Remove a key, announcing the removal.
    pub fn remove(&self, key: StorageKey) {
        lock(&self.values).remove(&key);
        self.announce(key, None);
    }

    fn announce(&self, key: StorageKey, new_value: Option<Value>) {
        let mut subscribers = lock(&self.subscribers);
        subscribers.retain(|tx| {
            tx.send(StorageChange {
                area: StorageArea::Local,
                key,
                new_value: new_value.clone(),
            })
            .is_ok()
        });
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: StorageKey) -> Option<Value> {
        lock(&self.values).get(&key).cloned()
    }

    fn store(&self, key: StorageKey, value: Value) {
        lock(&self.values).insert(key, value.clone());
        self.announce(key, Some(value));
    }
}

/// File-backed store: one JSON object holding the three keys.
///
/// Read-modify-write per store call; unreadable or malformed files count as
/// empty (the mirror then runs on defaults). No cross-process notification
/// channel exists here, matching the single-writer assumption of a local
/// settings file.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> serde_json::Map<String, Value> {
        let Ok(raw) = std::fs::read_to_string(&self.path) else {
            return serde_json::Map::new();
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                log::warn!(
                    target: "autopair.settings",
                    "settings file {} is not a JSON object; treating as empty",
                    self.path.display()
                );
                serde_json::Map::new()
            }
        }
    }
}

impl StorageBackend for JsonFileBackend {
    fn load(&self, key: StorageKey) -> Option<Value> {
        self.read_all().get(key.as_str()).cloned()
    }

    fn store(&self, key: StorageKey, value: Value) {
        let mut map = self.read_all();
        map.insert(key.as_str().to_string(), value);
        let payload = Value::Object(map).to_string();
        if let Err(err) = std::fs::write(&self.path, payload) {
            log::warn!(
                target: "autopair.settings",
                "failed to write settings file {}: {err}",
                self.path.display()
            );
        }
    }
}
