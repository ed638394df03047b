//! Immutable configuration view for the keystroke path.

use std::sync::Arc;

use pairs::{BracketPair, ColumnSettings};

/// One consistent view of the configuration.
///
/// Handed out as an `Arc` so the keystroke path pays a clone of a pointer,
/// not of the pair list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Global feature flag.
    pub active: bool,
    /// Full pair list in authoritative order (resolution filters to active
    /// pairs itself).
    pub pairs: Vec<BracketPair>,
    /// Global column kill-switches.
    pub columns: ColumnSettings,
}

impl Snapshot {
    /// The view in effect before the initial storage load completes: the
    /// feature flag is optimistically on, but the pair list is empty, so no
    /// action can fire. This startup race is accepted, not guarded.
    pub fn startup() -> Self {
        Self {
            active: true,
            pairs: Vec::new(),
            columns: ColumnSettings::default(),
        }
    }

    /// Pairs with at least one feature flag set, in list order.
    pub fn active_pairs(&self) -> impl Iterator<Item = &BracketPair> {
        self.pairs.iter().filter(|p| p.is_active())
    }
}

/// Capability handing the current configuration to consumers.
///
/// The engine and surfaces depend on this instead of ambient global state,
/// which keeps them testable without a persistence backend.
pub trait ConfigProvider {
    fn current(&self) -> Arc<Snapshot>;
}

/// A provider that always returns the same snapshot. Useful for embedders
/// with static configuration and for tests.
#[derive(Clone, Debug)]
pub struct FixedConfig(Arc<Snapshot>);

impl FixedConfig {
    pub fn new(snapshot: Snapshot) -> Self {
        Self(Arc::new(snapshot))
    }
}

impl ConfigProvider for FixedConfig {
    fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairs::default_pairs;

    #[test]
    fn startup_snapshot_fires_nothing() {
        let snap = Snapshot::startup();
        assert!(snap.active);
        assert_eq!(snap.active_pairs().count(), 0);
    }

    #[test]
    fn active_pairs_filters_unflagged_entries() {
        let snap = Snapshot {
            active: true,
            pairs: default_pairs(),
            columns: ColumnSettings::default(),
        };
        // 13 of the 16 defaults have at least one flag set.
        assert_eq!(snap.active_pairs().count(), 13);
    }
}
