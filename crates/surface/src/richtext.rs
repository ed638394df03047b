//! Rich-text editing surface over a content-editable node tree.
//!
//! Selection state is a [`DomRange`]; actions are expressed as range
//! surgery on the [`Document`] (clone, delete, insert fragments of text
//! nodes) followed by installing the new selection, the same sequence of
//! primitives a host performs on a real DOM selection.

use std::sync::mpsc::Sender;

use pairs::{BracketPair, EditContext};

use crate::EditableSurface;
use crate::dom::{Document, DomRange, Node, NodeId, Position};
use crate::notify::InputNotification;
use crate::text::{char_at, char_before, next_char_boundary};

/// A content-editable region surface.
///
/// Construction resolves the editable root from the event target and fails
/// when the target is not inside an editable region (including explicit
/// `contenteditable="false"` islands).
pub struct RichText {
    doc: Document,
    root: NodeId,
    selection: Option<DomRange>,
    notify_tx: Sender<InputNotification>,
}

impl RichText {
    pub fn new(
        doc: Document,
        target: NodeId,
        notify_tx: Sender<InputNotification>,
    ) -> Option<Self> {
        let root = doc.resolve_editable_root(target)?;
        Some(Self {
            doc,
            root,
            selection: None,
            notify_tx,
        })
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn into_doc(self) -> Document {
        self.doc
    }

    /// The resolved editable root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn selection(&self) -> Option<DomRange> {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Option<DomRange>) {
        self.selection = selection;
    }

    /// The active range, provided both endpoints sit inside the editable
    /// root. Ranges reaching outside (stale selections, nested islands) are
    /// treated as absent.
    fn contained_selection(&self) -> Option<DomRange> {
        let range = self.selection?;
        if !self.doc.contains(self.root, range.start.node)
            || !self.doc.contains(self.root, range.end.node)
        {
            return None;
        }
        Some(range)
    }

    fn notify(&self) {
        let _ = self
            .notify_tx
            .send(InputNotification::editable_root(self.root));
    }

    /// Insert `left` and `right` as two adjacent text nodes at `caret` and
    /// collapse the selection between them.
    fn insert_pair_at(&mut self, caret: Position, pair: &BracketPair) -> bool {
        let left = self.doc.new_text(&pair.left.to_string());
        let right = self.doc.new_text(&pair.right.to_string());
        let Some((parent, idx)) = self.doc.insert_at(caret, vec![left, right]) else {
            return false;
        };
        self.selection = Some(DomRange::caret(Position::new(parent, idx + 1)));
        log::trace!(
            target: "autopair.surface",
            "editable root {:?}: inserted {}{}",
            self.root, pair.left, pair.right
        );
        self.notify();
        true
    }
}

impl EditableSurface for RichText {
    fn context(&self, inserted: char) -> Option<EditContext> {
        let range = self.contained_selection()?;
        let (prev, next) = match self.doc.find(range.start.node)? {
            Node::Text { text, .. } => (
                char_before(text, range.start.offset),
                char_at(text, range.start.offset),
            ),
            // Element containers: the caret sits between nodes, no local
            // character context.
            Node::Element { .. } => (None, None),
        };
        Some(EditContext {
            inserted,
            prev,
            next,
            collapsed: range.collapsed(),
        })
    }

    fn apply_skip(&mut self) -> bool {
        let Some(range) = self.contained_selection() else {
            return false;
        };
        if !range.collapsed() {
            return false;
        }
        let at = range.start;
        let next = match self.doc.find(at.node) {
            Some(Node::Text { text, .. }) => {
                let next = next_char_boundary(text, at.offset);
                if next == at.offset {
                    return false;
                }
                next
            }
            Some(Node::Element { children, .. }) => {
                if at.offset >= children.len() {
                    return false;
                }
                at.offset + 1
            }
            None => return false,
        };
        self.selection = Some(DomRange::caret(Position::new(at.node, next)));
        self.notify();
        true
    }

    fn apply_insert(&mut self, pair: &BracketPair) -> bool {
        let Some(range) = self.contained_selection() else {
            return false;
        };
        // Clear whatever the range covers first; for a caret this is a no-op
        // that just hands back the position.
        let Some(caret) = self.doc.delete_range(&range) else {
            return false;
        };
        self.insert_pair_at(caret, pair)
    }

    fn apply_surround(&mut self, pair: &BracketPair) -> bool {
        let Some(range) = self.contained_selection() else {
            return false;
        };
        if range.collapsed() {
            return self.insert_pair_at(range.start, pair);
        }

        let Some(content) = self.doc.clone_range(&range) else {
            return false;
        };
        let Some(caret) = self.doc.delete_range(&range) else {
            return false;
        };

        let inner_len = content.len();
        let left = self.doc.new_text(&pair.left.to_string());
        let right = self.doc.new_text(&pair.right.to_string());
        let mut fragment = Vec::with_capacity(inner_len + 2);
        fragment.push(left);
        fragment.extend(content);
        fragment.push(right);

        let Some((parent, idx)) = self.doc.insert_at(caret, fragment) else {
            return false;
        };
        // Select exactly the re-inserted content: after the left delimiter,
        // before the right one.
        self.selection = Some(DomRange::new(
            Position::new(parent, idx + 1),
            Position::new(parent, idx + 1 + inner_len),
        ));
        self.notify();
        true
    }
}
