//! The settings store: mirror, decode fallbacks, and the write worker.

use std::sync::mpsc::{Receiver, RecvError, Sender, channel};
use std::sync::{Arc, Mutex};
use std::thread;

use pairs::{BracketPair, ColumnSettings, default_pairs};
use serde_json::Value;

use crate::backend::{StorageArea, StorageBackend, StorageChange, StorageKey};
use crate::snapshot::{ConfigProvider, Snapshot};

struct WriteOp {
    key: StorageKey,
    value: Value,
    ack: Sender<()>,
}

/// Completion signal for a fire-and-forget write.
///
/// The keystroke path drops this immediately; a settings UI that needs
/// confirmation can [`wait`](WriteAck::wait) on it.
pub struct WriteAck(Receiver<()>);

impl WriteAck {
    /// Block until the write has been handed to the backend.
    pub fn wait(self) -> Result<(), RecvError> {
        self.0.recv()
    }
}

/// The configuration store.
///
/// Cloning is cheap and every clone shares the same mirror and write
/// worker. Reads on the keystroke path touch only the mirror; storage is
/// consulted by the explicit `load_*` operations and the initial
/// [`init_load`](SettingsStore::init_load).
#[derive(Clone)]
pub struct SettingsStore {
    mirror: Arc<Mutex<Arc<Snapshot>>>,
    backend: Arc<dyn StorageBackend>,
    write_tx: Sender<WriteOp>,
}

impl SettingsStore {
    /// Create a store over a backend and start its write worker.
    ///
    /// The mirror starts at [`Snapshot::startup`]; call
    /// [`init_load`](SettingsStore::init_load) (typically right away) to
    /// populate it from storage.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let (write_tx, write_rx) = channel::<WriteOp>();
        let worker_backend = Arc::clone(&backend);
        thread::spawn(move || {
            while let Ok(op) = write_rx.recv() {
                worker_backend.store(op.key, op.value);
                let _ = op.ack.send(());
            }
        });
        Self {
            mirror: Arc::new(Mutex::new(Arc::new(Snapshot::startup()))),
            backend,
            write_tx,
        }
    }

    /// Populate the mirror from storage, replacing it wholesale.
    pub fn init_load(&self) {
        let snapshot = Snapshot {
            active: decode_active(self.backend.load(StorageKey::Active)),
            pairs: decode_pairs(self.backend.load(StorageKey::BracketPairs)),
            columns: decode_columns(self.backend.load(StorageKey::ColumnSettings)),
        };
        self.replace(snapshot);
    }

    /// Spawn a thread applying change notifications to the mirror until the
    /// sender side hangs up.
    pub fn start_change_pump(&self, rx: Receiver<StorageChange>) {
        let store = self.clone();
        thread::spawn(move || {
            while let Ok(change) = rx.recv() {
                store.apply_change(&change);
            }
        });
    }

    /// Apply one external change to the mirror.
    ///
    /// Only the `Local` area is honored. The affected field is replaced
    /// wholesale with the decoded new value, or with its documented default
    /// when the value is absent or undecodable.
    pub fn apply_change(&self, change: &StorageChange) {
        if change.area != StorageArea::Local {
            return;
        }
        log::trace!(
            target: "autopair.settings",
            "applying change to {}", change.key.as_str()
        );
        let mut snapshot = (*self.current()).clone();
        match change.key {
            StorageKey::Active => snapshot.active = decode_active(change.new_value.clone()),
            StorageKey::BracketPairs => snapshot.pairs = decode_pairs(change.new_value.clone()),
            StorageKey::ColumnSettings => {
                snapshot.columns = decode_columns(change.new_value.clone());
            }
        }
        self.replace(snapshot);
    }

    pub fn is_active(&self) -> bool {
        self.current().active
    }

    /// Flip the feature flag: the mirror sees it immediately, the backend
    /// eventually.
    pub fn set_active(&self, active: bool) -> WriteAck {
        let mut snapshot = (*self.current()).clone();
        snapshot.active = active;
        self.replace(snapshot);
        self.submit(StorageKey::Active, Value::Bool(active))
    }

    /// Pairs with at least one feature flag set, in authoritative order.
    pub fn active_pairs(&self) -> Vec<BracketPair> {
        self.current().active_pairs().copied().collect()
    }

    /// Read the pair list from storage (defaults when absent).
    pub fn load_pairs(&self) -> Vec<BracketPair> {
        decode_pairs(self.backend.load(StorageKey::BracketPairs))
    }

    /// Persist a pair list, fire-and-forget.
    ///
    /// The mirror is not updated here: it follows through the backend's
    /// change notification, like any other context's write would.
    pub fn save_pairs(&self, pairs: &[BracketPair]) -> WriteAck {
        match serde_json::to_value(pairs) {
            Ok(value) => self.submit(StorageKey::BracketPairs, value),
            Err(err) => {
                // char/bool structs cannot fail to serialize; guard anyway.
                log::warn!(target: "autopair.settings", "failed to encode pairs: {err}");
                let (tx, rx) = channel();
                let _ = tx.send(());
                WriteAck(rx)
            }
        }
    }

    pub fn column_settings(&self) -> ColumnSettings {
        self.current().columns
    }

    /// Read the column settings from storage (defaults when absent).
    pub fn load_column_settings(&self) -> ColumnSettings {
        decode_columns(self.backend.load(StorageKey::ColumnSettings))
    }

    /// Persist column settings: mirror immediately, backend eventually.
    pub fn save_column_settings(&self, columns: ColumnSettings) -> WriteAck {
        let mut snapshot = (*self.current()).clone();
        snapshot.columns = columns;
        self.replace(snapshot);
        match serde_json::to_value(columns) {
            Ok(value) => self.submit(StorageKey::ColumnSettings, value),
            Err(err) => {
                log::warn!(target: "autopair.settings", "failed to encode columns: {err}");
                let (tx, rx) = channel();
                let _ = tx.send(());
                WriteAck(rx)
            }
        }
    }

    fn submit(&self, key: StorageKey, value: Value) -> WriteAck {
        let (ack_tx, ack_rx) = channel();
        let _ = self.write_tx.send(WriteOp {
            key,
            value,
            ack: ack_tx,
        });
        WriteAck(ack_rx)
    }

    fn replace(&self, snapshot: Snapshot) {
        let mut guard = self
            .mirror
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(snapshot);
    }
}

impl ConfigProvider for SettingsStore {
    fn current(&self) -> Arc<Snapshot> {
        Arc::clone(
            &self
                .mirror
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

fn decode_active(value: Option<Value>) -> bool {
    value.and_then(|v| v.as_bool()).unwrap_or(false)
}

fn decode_pairs(value: Option<Value>) -> Vec<BracketPair> {
    let Some(value) = value else {
        return default_pairs();
    };
    match serde_json::from_value(value) {
        Ok(pairs) => pairs,
        Err(err) => {
            log::warn!(
                target: "autopair.settings",
                "malformed bracketPairs value, using defaults: {err}"
            );
            default_pairs()
        }
    }
}

fn decode_columns(value: Option<Value>) -> ColumnSettings {
    let Some(value) = value else {
        return ColumnSettings::default();
    };
    match serde_json::from_value(value) {
        Ok(columns) => columns,
        Err(err) => {
            log::warn!(
                target: "autopair.settings",
                "malformed columnSettings value, using defaults: {err}"
            );
            ColumnSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use serde_json::json;

    fn store() -> (SettingsStore, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new());
        let store = SettingsStore::new(backend.clone());
        (store, backend)
    }

    #[test]
    fn startup_mirror_is_optimistic_but_empty() {
        let (store, _) = store();
        assert!(store.is_active());
        assert!(store.active_pairs().is_empty());
    }

    #[test]
    fn init_load_defaults_on_empty_storage() {
        let (store, _) = store();
        store.init_load();
        // Storage-layer default for the flag is off; pairs and columns get
        // their built-in defaults.
        assert!(!store.is_active());
        assert_eq!(store.load_pairs(), default_pairs());
        assert_eq!(store.column_settings(), ColumnSettings::default());
    }

    #[test]
    fn save_then_load_round_trips_pairs() {
        let (store, _) = store();
        let list = vec![
            BracketPair::new('(', ')', true, false),
            BracketPair::new('«', '»', true, true),
        ];
        store.save_pairs(&list).wait().unwrap();
        assert_eq!(store.load_pairs(), list);
    }

    #[test]
    fn saved_pairs_reach_mirror_via_change_pump() {
        let (store, backend) = store();
        store.start_change_pump(backend.subscribe());
        store.set_active(true).wait().unwrap();

        let list = vec![BracketPair::new('<', '>', true, true)];
        store.save_pairs(&list).wait().unwrap();
        // The pump applies the backend's own-write notification.
        wait_until(|| store.active_pairs() == list);
    }

    #[test]
    fn set_active_updates_mirror_before_persistence() {
        let (store, _) = store();
        let ack = store.set_active(false);
        assert!(!store.is_active());
        ack.wait().unwrap();
    }

    #[test]
    fn column_settings_update_mirror_immediately() {
        let (store, _) = store();
        let columns = ColumnSettings {
            insert_enabled: false,
            surround_enabled: true,
        };
        let ack = store.save_column_settings(columns);
        assert_eq!(store.column_settings(), columns);
        ack.wait().unwrap();
        assert_eq!(store.load_column_settings(), columns);
    }

    #[test]
    fn non_local_changes_are_ignored() {
        let (store, _) = store();
        store.init_load();
        store.apply_change(&StorageChange {
            area: StorageArea::Sync,
            key: StorageKey::Active,
            new_value: Some(json!(true)),
        });
        assert!(!store.is_active());
    }

    #[test]
    fn absent_change_value_resets_to_defaults() {
        let (store, _) = store();
        store.save_pairs(&[]).wait().unwrap();
        store.init_load();
        assert!(store.load_pairs().is_empty());

        store.apply_change(&StorageChange {
            area: StorageArea::Local,
            key: StorageKey::BracketPairs,
            new_value: None,
        });
        assert_eq!((*store.current()).pairs, default_pairs());
    }

    #[test]
    fn malformed_pairs_fall_back_to_defaults() {
        let (store, backend) = store();
        backend.store(StorageKey::BracketPairs, json!("not a list"));
        store.init_load();
        assert_eq!((*store.current()).pairs, default_pairs());
    }

    #[test]
    fn falsy_active_change_turns_feature_off() {
        let (store, _) = store();
        store.apply_change(&StorageChange {
            area: StorageArea::Local,
            key: StorageKey::Active,
            new_value: Some(json!("yes")), // non-boolean counts as falsy
        });
        assert!(!store.is_active());
    }

    fn wait_until(mut cond: impl FnMut() -> bool) {
        for _ in 0..200 {
            if cond() {
                return;
            }
            thread::sleep(std::time::Duration::from_millis(5));
        }
        panic!("condition not reached");
    }
}
