//! Flat-buffer editing surface for input/textarea-style fields.
//!
//! The field is a single linear UTF-8 buffer with a byte-offset caret and an
//! optional selection anchor; the selection handed out is always normalized
//! and on character boundaries. This mirrors what a host exposes for
//! `<input>`/`<textarea>` targets, minus layout concerns.

use std::sync::mpsc::Sender;

use pairs::{BracketPair, EditContext};

use crate::EditableSurface;
use crate::notify::InputNotification;
use crate::selection::SelectionRange;
use crate::text::{char_at, char_before, clamp_to_char_boundary, next_char_boundary};

/// Opaque handle identifying a flat field to the host.
///
/// The raw value has no meaning here; integration layers convert their own
/// element identifiers at the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldId(u64);

impl FieldId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

/// A flat text field surface.
pub struct TextBox {
    id: FieldId,
    value: String,
    caret: usize,
    selection_anchor: Option<usize>,
    read_only: bool,
    disabled: bool,
    notify_tx: Sender<InputNotification>,
}

impl TextBox {
    /// Create a field with the caret at the end of `value`.
    pub fn new(
        id: FieldId,
        value: impl Into<String>,
        notify_tx: Sender<InputNotification>,
    ) -> Self {
        let value = value.into();
        let caret = value.len();
        Self {
            id,
            value,
            caret,
            selection_anchor: None,
            read_only: false,
            disabled: false,
            notify_tx,
        }
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Read-only and disabled fields never take part in pairing.
    pub fn is_editable(&self) -> bool {
        !self.read_only && !self.disabled
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Caret byte offset (selection end when a selection exists).
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Current selection, normalized; `None` when collapsed.
    pub fn selection(&self) -> Option<SelectionRange> {
        let anchor = self.selection_anchor?;
        let a = clamp_to_char_boundary(&self.value, anchor);
        let c = clamp_to_char_boundary(&self.value, self.caret);
        if a == c {
            return None;
        }
        Some(SelectionRange::new(a, c))
    }

    /// Place the caret, clearing any selection.
    pub fn set_caret(&mut self, caret: usize) {
        self.caret = clamp_to_char_boundary(&self.value, caret);
        self.selection_anchor = None;
    }

    /// Select the range `a..b` (order-insensitive).
    pub fn select(&mut self, a: usize, b: usize) {
        let a = clamp_to_char_boundary(&self.value, a);
        let b = clamp_to_char_boundary(&self.value, b);
        self.selection_anchor = Some(a);
        self.caret = b;
    }

    /// The offset context is taken from: selection start, or the caret.
    fn context_offset(&self) -> usize {
        self.selection()
            .map(|sel| sel.start)
            .unwrap_or_else(|| clamp_to_char_boundary(&self.value, self.caret))
    }

    fn notify(&self) {
        let _ = self.notify_tx.send(InputNotification::field(self.id));
    }
}

impl EditableSurface for TextBox {
    fn context(&self, inserted: char) -> Option<EditContext> {
        if !self.is_editable() {
            return None;
        }
        let at = self.context_offset();
        Some(EditContext {
            inserted,
            prev: char_before(&self.value, at),
            next: char_at(&self.value, at),
            collapsed: self.selection().is_none(),
        })
    }

    fn apply_skip(&mut self) -> bool {
        if !self.is_editable() || self.selection().is_some() {
            return false;
        }
        let caret = clamp_to_char_boundary(&self.value, self.caret);
        let next = next_char_boundary(&self.value, caret);
        if next == caret {
            // Nothing after the caret to skip over.
            return false;
        }
        self.caret = next;
        // A degenerate anchor (select(n, n)) must not resurrect as a
        // selection once the caret moves.
        self.selection_anchor = None;
        self.notify();
        true
    }

    fn apply_insert(&mut self, pair: &BracketPair) -> bool {
        if !self.is_editable() || self.selection().is_some() {
            return false;
        }
        let caret = clamp_to_char_boundary(&self.value, self.caret);
        self.value.insert(caret, pair.left);
        self.value.insert(caret + pair.left.len_utf8(), pair.right);
        self.caret = caret + pair.left.len_utf8();
        self.selection_anchor = None;
        log::trace!(
            target: "autopair.surface",
            "field {:?}: inserted {}{} at {caret}",
            self.id, pair.left, pair.right
        );
        self.notify();
        true
    }

    fn apply_surround(&mut self, pair: &BracketPair) -> bool {
        if !self.is_editable() {
            return false;
        }
        let Some(sel) = self.selection() else {
            return self.apply_insert(pair);
        };

        let selected = sel.slice(&self.value).to_string();
        let mut wrapped = String::with_capacity(selected.len() + 8);
        wrapped.push(pair.left);
        wrapped.push_str(&selected);
        wrapped.push(pair.right);
        self.value.replace_range(sel.start..sel.end, &wrapped);

        // Keep the original text selected, shifted inside the delimiters.
        let inner_start = sel.start + pair.left.len_utf8();
        self.selection_anchor = Some(inner_start);
        self.caret = inner_start + selected.len();
        self.notify();
        true
    }
}
