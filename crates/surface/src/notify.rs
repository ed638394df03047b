//! Synthetic input notifications.
//!
//! When an action fires, the host's default insertion has been suppressed,
//! so nothing tells listeners bound to the field that its content changed.
//! Each surface therefore sends exactly one [`InputNotification`] per
//! committed action on an mpsc channel the host wires to its own event
//! dispatch (the channel stands in for a bubbling `input` event on the
//! mutated element/root).

use crate::dom::NodeId;
use crate::textbox::FieldId;

/// What the notification should be dispatched on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotifyTarget {
    /// A flat input/textarea field.
    Field(FieldId),
    /// The editable root of a rich-text region.
    EditableRoot(NodeId),
}

/// One programmatic text mutation the host must re-announce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputNotification {
    pub target: NotifyTarget,
}

impl InputNotification {
    pub fn field(id: FieldId) -> Self {
        Self {
            target: NotifyTarget::Field(id),
        }
    }

    pub fn editable_root(id: NodeId) -> Self {
        Self {
            target: NotifyTarget::EditableRoot(id),
        }
    }
}
