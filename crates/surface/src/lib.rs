//! # surface
//!
//! Editing-surface abstraction for bracket autoclosing.
//!
//! Two very different editing surfaces exist in a page: flat text fields
//! with integer offsets ([`TextBox`]) and content-editable regions backed by
//! a node tree with range-based selections ([`RichText`]). The engine never
//! touches either directly; it consumes only the [`EditableSurface`]
//! capability, which extracts the local keystroke context and applies the
//! decided action with surface-appropriate primitives.
//!
//! Every mutating action emits exactly one synthetic [`InputNotification`]
//! on the surface's channel: the host suppressed its default insertion, so
//! downstream listeners (frameworks, validators) must be told about the
//! programmatic change manually.

mod dom;
mod notify;
mod richtext;
mod selection;
mod text;
mod textbox;

pub use dom::{Document, DomRange, Node, NodeId, Position};
pub use notify::{InputNotification, NotifyTarget};
pub use richtext::RichText;
pub use selection::SelectionRange;
pub use text::{clamp_to_char_boundary, next_char_boundary};
pub use textbox::{FieldId, TextBox};

use pairs::{BracketPair, EditContext};

/// Capability interface over one editing surface.
///
/// Context extraction may fail (`None`) when the surface has no usable
/// caret/selection state — the keystroke then falls through to host default
/// behavior. The `apply_*` operations return `true` once the mutation has
/// been applied and its input notification sent; `false` means the surface
/// state was inconsistent with the requested action and nothing was touched.
/// The engine claims an event (suppresses default handling) only after a
/// successful commit, so a claim always carries exactly one notification.
pub trait EditableSurface {
    /// Gather the local context for the typed character.
    fn context(&self, inserted: char) -> Option<EditContext>;

    /// Advance the caret past an existing closing character. No text
    /// mutation, but still a committed action with a notification.
    fn apply_skip(&mut self) -> bool;

    /// Insert `left` + `right` at the caret and place the caret between them.
    fn apply_insert(&mut self, pair: &BracketPair) -> bool;

    /// Wrap the selected text with the pair, keeping the original text
    /// selected. Falls back to a plain pair insertion when the selection
    /// turns out to be collapsed.
    fn apply_surround(&mut self, pair: &BracketPair) -> bool;
}
