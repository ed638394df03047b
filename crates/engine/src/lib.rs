//! # engine
//!
//! The per-keystroke pipeline. The host forwards its "about to insert
//! text" event together with the surface it targets;
//! [`handle_before_input`] filters, consults the decision layer against the
//! current configuration snapshot, and commits the resulting action through
//! the [`EditableSurface`](surface::EditableSurface) capability. The
//! returned [`Disposition`] tells the host whether to suppress its default
//! insertion.

mod dispatch;
mod event;

pub use dispatch::{Disposition, handle_before_input};
pub use event::{BeforeInput, InputType, eligible_char};
