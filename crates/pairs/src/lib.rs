//! # pairs
//!
//! Surface-agnostic data model and decision layer for bracket autoclosing.
//!
//! This crate provides the fundamental building blocks for pair handling:
//! - [`BracketPair`]: a left/right character combination with per-feature flags
//! - [`ColumnSettings`]: the global insert/surround kill-switches
//! - [`EditContext`]: the per-keystroke local text context
//! - [`decide`]: the pure decision procedure mapping a context to an
//!   [`EditAction`] (or none, meaning host default behavior proceeds)
//!
//! ## Design Principles
//!
//! This crate is intentionally free of side effects and does not depend on:
//! - Any editing surface (flat buffers, node trees)
//! - The persisted settings store
//! - Host event plumbing
//!
//! It depends only on `std` (plus `serde` for the persisted pair format) and
//! provides pure predicates that can be tested independently and reused
//! across different surface implementations.

mod decision;
mod pair;

pub use decision::{
    EditAction, EditContext, decide, resolve_pair, should_insert, should_skip_close,
};
pub use pair::{BracketPair, ColumnSettings, PairListError, default_pairs, validate_new_pair};
