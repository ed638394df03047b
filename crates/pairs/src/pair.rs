//! Bracket pair data model, defaults, and list validation.

use serde::{Deserialize, Serialize};

/// A left/right character combination eligible for autoclose/autosurround.
///
/// Serialized field names match the persisted key-value format shared with
/// the settings UI (`l`, `r`, `activeInsert`, `activeSurround`). Records
/// written by older versions may carry an extra `active` field; unknown
/// fields are ignored on decode.
///
/// `left` may equal `right` (symmetric pairs such as quotes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketPair {
    /// Opening character.
    #[serde(rename = "l")]
    pub left: char,

    /// Closing character.
    #[serde(rename = "r")]
    pub right: char,

    /// Whether autoclose insertion is enabled for this pair.
    #[serde(rename = "activeInsert")]
    pub active_insert: bool,

    /// Whether selection surrounding is enabled for this pair.
    #[serde(rename = "activeSurround")]
    pub active_surround: bool,
}

impl BracketPair {
    /// Create a new pair.
    pub const fn new(left: char, right: char, active_insert: bool, active_surround: bool) -> Self {
        Self {
            left,
            right,
            active_insert,
            active_surround,
        }
    }

    /// Returns `true` if at least one per-pair feature flag is set.
    ///
    /// Only active pairs participate in keystroke resolution.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active_insert || self.active_surround
    }

    /// Returns `true` for pairs whose opening and closing characters are the
    /// same (quotes, markdown emphasis markers, ...).
    #[inline]
    pub fn is_symmetric(&self) -> bool {
        self.left == self.right
    }
}

/// Global feature kill-switches layered on top of the per-pair flags.
///
/// Feature flag AND pair flag AND column flag must all hold for an action
/// to fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSettings {
    /// Global toggle for the autoclose-insertion column.
    #[serde(rename = "insertEnabled")]
    pub insert_enabled: bool,

    /// Global toggle for the selection-surround column.
    #[serde(rename = "surroundEnabled")]
    pub surround_enabled: bool,
}

impl Default for ColumnSettings {
    fn default() -> Self {
        Self {
            insert_enabled: true,
            surround_enabled: true,
        }
    }
}

/// The built-in pair table used when no persisted value exists.
///
/// Order matters: keystroke resolution picks the first matching pair, so
/// this order is part of the observable behavior.
pub fn default_pairs() -> Vec<BracketPair> {
    vec![
        BracketPair::new('(', ')', true, true),
        BracketPair::new('{', '}', true, true),
        BracketPair::new('<', '>', true, true),
        BracketPair::new('[', ']', true, true),
        BracketPair::new('\'', '\'', true, true),
        BracketPair::new('"', '"', true, true),
        BracketPair::new('`', '`', true, true),
        BracketPair::new('_', '_', false, true),
        BracketPair::new('*', '*', false, true),
        BracketPair::new('~', '~', false, true),
        BracketPair::new('/', '/', false, true),
        BracketPair::new('\\', '\\', false, true),
        BracketPair::new('|', '|', false, true),
        BracketPair::new('#', '#', false, false),
        BracketPair::new('$', '$', false, false),
        BracketPair::new('%', '%', false, false),
    ]
}

/// Rejection reasons when adding a pair to an existing list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairListError {
    /// An active pair with the same opening character already exists.
    DuplicateLeft(char),
}

/// Validate that `candidate` may be added to `existing`.
///
/// The opening character must be unique among active pairs: two pairs that
/// both participate in resolution and share a `left` would make the
/// order-dependent tie-break ambiguous for the user editing the list.
/// Inactive pairs never conflict.
pub fn validate_new_pair(
    existing: &[BracketPair],
    candidate: &BracketPair,
) -> Result<(), PairListError> {
    if !candidate.is_active() {
        return Ok(());
    }
    if existing
        .iter()
        .any(|p| p.is_active() && p.left == candidate.left)
    {
        return Err(PairListError::DuplicateLeft(candidate.left));
    }
    Ok(())
}
