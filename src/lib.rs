//! # autopair
//!
//! Autoclosing and autosurrounding of configurable bracket pairs over
//! heterogeneous editing surfaces.
//!
//! Every keystroke about to insert a single character resolves, in strict
//! priority order, to one of: skipping over an already-present closing
//! delimiter, inserting the pair with the caret between the delimiters,
//! surrounding the current selection, or leaving the host's default
//! insertion alone.
//!
//! The workspace splits along those seams:
//!
//! - [`pairs`]: the [`BracketPair`] data model, the shipped defaults, and
//!   the pure decision functions.
//! - [`surface`]: the [`EditableSurface`] capability with two
//!   implementations, a flat [`TextBox`] and a content-editable
//!   [`RichText`] region.
//! - [`settings`]: persisted configuration behind [`ConfigProvider`], with
//!   an in-memory mirror fed by storage change notifications.
//! - [`engine`]: [`handle_before_input`], the pipeline tying the three
//!   together for one keystroke.
//!
//! ```
//! use std::sync::mpsc;
//!
//! use autopair::{
//!     BeforeInput, ColumnSettings, Disposition, FieldId, FixedConfig, Snapshot, TextBox,
//!     default_pairs, handle_before_input,
//! };
//!
//! let config = FixedConfig::new(Snapshot {
//!     active: true,
//!     pairs: default_pairs(),
//!     columns: ColumnSettings::default(),
//! });
//! let (tx, _rx) = mpsc::channel();
//! let mut field = TextBox::new(FieldId::from_raw(1), "let x = ", tx);
//! field.set_caret(8);
//!
//! let disposition = handle_before_input(&BeforeInput::typed('('), &mut field, &config);
//! assert_eq!(disposition, Disposition::Claimed);
//! assert_eq!(field.value(), "let x = ()");
//! assert_eq!(field.caret(), 9);
//! ```

pub use engine::{BeforeInput, Disposition, InputType, eligible_char, handle_before_input};
pub use pairs::{
    BracketPair, ColumnSettings, EditAction, EditContext, PairListError, decide, default_pairs,
    resolve_pair, should_insert, should_skip_close, validate_new_pair,
};
pub use settings::{
    ConfigProvider, FixedConfig, JsonFileBackend, MemoryBackend, SettingsStore, Snapshot,
    StorageArea, StorageBackend, StorageChange, StorageKey, WriteAck,
};
pub use surface::{
    Document, DomRange, EditableSurface, FieldId, InputNotification, Node, NodeId, NotifyTarget,
    Position, RichText, SelectionRange, TextBox,
};
