//! Decision dispatch over an editable surface.

use pairs::{EditAction, decide, resolve_pair};
use settings::ConfigProvider;
use surface::EditableSurface;

use crate::event::{BeforeInput, eligible_char};

/// What the host should do with the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Let default insertion proceed unmodified.
    Default,
    /// The action was committed (mutation + notification); suppress the
    /// default insertion.
    Claimed,
}

/// Run one keystroke through the pipeline.
///
/// Returns [`Disposition::Claimed`] only after the surface has both applied
/// the action and emitted its synthetic input notification; because all
/// surface mutation is synchronous, committing before claiming keeps the
/// claim/commit contract trivially paired. Every other path — ineligible
/// event, no usable context, no matching pair, no decided action, or a
/// surface refusing an inconsistent mutation — falls through to
/// [`Disposition::Default`].
pub fn handle_before_input(
    event: &BeforeInput,
    target: &mut dyn EditableSurface,
    config: &dyn ConfigProvider,
) -> Disposition {
    let Some(inserted) = eligible_char(event) else {
        return Disposition::Default;
    };
    let Some(ctx) = target.context(inserted) else {
        return Disposition::Default;
    };

    let snapshot = config.current();
    let Some(pair) = resolve_pair(snapshot.active, &snapshot.pairs, inserted) else {
        return Disposition::Default;
    };
    let Some(action) = decide(&ctx, pair, snapshot.columns) else {
        return Disposition::Default;
    };

    let committed = match action {
        EditAction::SkipClose => target.apply_skip(),
        EditAction::InsertPair => target.apply_insert(pair),
        EditAction::Surround => target.apply_surround(pair),
    };
    if committed {
        log::trace!(
            target: "autopair.engine",
            "claimed {inserted:?} as {action:?}"
        );
        Disposition::Claimed
    } else {
        Disposition::Default
    }
}
