//! Pure per-keystroke decision procedure.
//!
//! Surfaces derive an [`EditContext`] from their live state, the host
//! resolves a pair from the current configuration, and [`decide`] maps the
//! two onto a terminal [`EditAction`] — or `None`, in which case the host's
//! default insertion proceeds untouched. Nothing in this module mutates
//! anything.

use crate::pair::{BracketPair, ColumnSettings};

/// Local text context around the caret, derived fresh from the surface on
/// every keystroke and never cached.
///
/// `None` for `prev`/`next` means the caret sits at a boundary (start/end of
/// the field, or edge of a text node).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditContext {
    /// The literal character the user typed.
    pub inserted: char,
    /// Character immediately before the caret, if any.
    pub prev: Option<char>,
    /// Character immediately after the caret, if any.
    pub next: Option<char>,
    /// `true` when there is no selected range (caret only).
    pub collapsed: bool,
}

/// Terminal outcome for an eligible keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditAction {
    /// Advance the caret past an already-present closing character instead
    /// of inserting a duplicate.
    SkipClose,
    /// Insert `left` + `right` at the caret and place the caret between them.
    InsertPair,
    /// Wrap the selected text with `left` and `right`, keeping the original
    /// text selected.
    Surround,
}

/// Whitespace for the insertion heuristic: space, tab, newline only.
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

/// Find the pair responsible for `inserted`, if the feature is on.
///
/// Returns the first pair in list order whose `left` or `right` equals the
/// typed character, considering only pairs with at least one feature flag
/// set. First match wins: when a character is shared across pairs (symmetric
/// pairs, user-defined duplicates), list order is the deliberate,
/// order-dependent tie-break.
pub fn resolve_pair<'a>(
    feature_active: bool,
    pairs: &'a [BracketPair],
    inserted: char,
) -> Option<&'a BracketPair> {
    if !feature_active {
        return None;
    }
    pairs
        .iter()
        .find(|p| p.is_active() && (p.left == inserted || p.right == inserted))
}

/// Skip-over detection: the typed character is the pair's closer, there is
/// no selection, and the character after the caret already is that closer.
pub fn should_skip_close(
    inserted: char,
    pair: &BracketPair,
    next: Option<char>,
    collapsed: bool,
) -> bool {
    inserted == pair.right && collapsed && next == Some(pair.right)
}

/// Insertion enablement: the pair and the insertion column are both on, and
/// the caret is preceded by nothing or by whitespace. Firing adjacent to a
/// non-whitespace character is suppressed so autoclose stays out of
/// identifiers.
///
/// `next` is accepted for symmetry with [`should_skip_close`]; the
/// enablement predicate only looks behind the caret.
pub fn should_insert(
    pair: &BracketPair,
    columns: ColumnSettings,
    prev: Option<char>,
    next: Option<char>,
) -> bool {
    let _ = next;
    if !pair.active_insert || !columns.insert_enabled {
        return false;
    }
    match prev {
        None => true,
        Some(c) => is_whitespace(c),
    }
}

/// Map a context onto a terminal action, in strict priority order:
///
/// 1. skip-over (requires the insertion feature to be enabled),
/// 2. insert-pair for a collapsed selection,
/// 3. surround for a non-collapsed selection,
/// 4. otherwise none — the host default proceeds.
pub fn decide(
    ctx: &EditContext,
    pair: &BracketPair,
    columns: ColumnSettings,
) -> Option<EditAction> {
    if should_skip_close(ctx.inserted, pair, ctx.next, ctx.collapsed)
        && pair.active_insert
        && columns.insert_enabled
    {
        return Some(EditAction::SkipClose);
    }

    if ctx.collapsed {
        if should_insert(pair, columns, ctx.prev, ctx.next) {
            return Some(EditAction::InsertPair);
        }
        return None;
    }

    if pair.active_surround && columns.surround_enabled {
        return Some(EditAction::Surround);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pair::default_pairs;

    fn ctx(inserted: char, prev: Option<char>, next: Option<char>, collapsed: bool) -> EditContext {
        EditContext {
            inserted,
            prev,
            next,
            collapsed,
        }
    }

    fn paren() -> BracketPair {
        BracketPair::new('(', ')', true, true)
    }

    #[test]
    fn resolve_matches_left_and_right() {
        let pairs = default_pairs();
        assert_eq!(resolve_pair(true, &pairs, '(').map(|p| p.right), Some(')'));
        assert_eq!(resolve_pair(true, &pairs, ')').map(|p| p.left), Some('('));
        assert_eq!(resolve_pair(true, &pairs, 'a'), None);
    }

    #[test]
    fn resolve_requires_feature_flag() {
        let pairs = default_pairs();
        assert_eq!(resolve_pair(false, &pairs, '('), None);
    }

    #[test]
    fn resolve_skips_inactive_pairs() {
        // '#' ships with neither flag set.
        let pairs = default_pairs();
        assert_eq!(resolve_pair(true, &pairs, '#'), None);
    }

    #[test]
    fn resolve_first_match_wins() {
        let pairs = vec![
            BracketPair::new('(', ')', true, true),
            BracketPair::new('(', ']', true, true),
        ];
        assert_eq!(resolve_pair(true, &pairs, '(').map(|p| p.right), Some(')'));
    }

    #[test]
    fn skip_requires_collapsed_and_matching_next() {
        let p = paren();
        assert!(should_skip_close(')', &p, Some(')'), true));
        assert!(!should_skip_close(')', &p, Some(')'), false));
        assert!(!should_skip_close(')', &p, Some('x'), true));
        assert!(!should_skip_close('(', &p, Some(')'), true));
        assert!(!should_skip_close(')', &p, None, true));
    }

    #[test]
    fn insert_allowed_at_boundary_and_after_whitespace() {
        let p = paren();
        let cols = ColumnSettings::default();
        assert!(should_insert(&p, cols, None, None));
        assert!(should_insert(&p, cols, Some(' '), None));
        assert!(should_insert(&p, cols, Some('\t'), None));
        assert!(should_insert(&p, cols, Some('\n'), None));
        assert!(!should_insert(&p, cols, Some('o'), None));
        assert!(!should_insert(&p, cols, Some('('), None));
    }

    #[test]
    fn insert_respects_pair_flag_and_column() {
        let cols = ColumnSettings::default();
        let off = BracketPair::new('(', ')', false, true);
        assert!(!should_insert(&off, cols, None, None));

        let p = paren();
        let killed = ColumnSettings {
            insert_enabled: false,
            surround_enabled: true,
        };
        assert!(!should_insert(&p, killed, None, None));
    }

    #[test]
    fn decide_priority_skip_before_insert() {
        let p = paren();
        let cols = ColumnSettings::default();
        // ')' typed before an existing ')': skip wins even though the caret
        // is preceded by whitespace.
        let c = ctx(')', Some(' '), Some(')'), true);
        assert_eq!(decide(&c, &p, cols), Some(EditAction::SkipClose));
    }

    #[test]
    fn decide_skip_requires_insert_feature() {
        let surround_only = BracketPair::new('*', '*', false, true);
        let cols = ColumnSettings::default();
        let c = ctx('*', None, Some('*'), true);
        assert_eq!(decide(&c, &surround_only, cols), None);
    }

    #[test]
    fn decide_insert_for_collapsed_caret() {
        let p = paren();
        let cols = ColumnSettings::default();
        assert_eq!(
            decide(&ctx('(', Some(' '), None, true), &p, cols),
            Some(EditAction::InsertPair)
        );
        assert_eq!(decide(&ctx('(', Some('o'), None, true), &p, cols), None);
    }

    #[test]
    fn decide_surround_for_selection() {
        let p = paren();
        let cols = ColumnSettings::default();
        assert_eq!(
            decide(&ctx('(', Some('o'), Some('x'), false), &p, cols),
            Some(EditAction::Surround)
        );
    }

    #[test]
    fn decide_surround_respects_column_kill_switch() {
        let p = paren();
        let cols = ColumnSettings {
            insert_enabled: true,
            surround_enabled: false,
        };
        assert_eq!(decide(&ctx('(', None, None, false), &p, cols), None);
    }
}
