//! # settings
//!
//! Persisted configuration store for bracket autoclosing.
//!
//! Three independent keys live in a key-value [`StorageBackend`]: the
//! feature flag, the pair list, and the column settings. An in-memory
//! mirror is populated by an initial load and kept current by applying
//! [`StorageChange`] notifications from other contexts (the settings UI
//! writes through the same backend). The keystroke path reads an immutable
//! [`Snapshot`] through the [`ConfigProvider`] capability and never waits on
//! storage; writes are fire-and-forget through a worker thread, with a
//! [`WriteAck`] completion signal for callers that need confirmation.

mod backend;
mod snapshot;
mod store;

pub use backend::{
    JsonFileBackend, MemoryBackend, StorageArea, StorageBackend, StorageChange, StorageKey,
};
pub use snapshot::{ConfigProvider, FixedConfig, Snapshot};
pub use store::{SettingsStore, WriteAck};
