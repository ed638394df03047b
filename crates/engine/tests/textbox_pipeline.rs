//! End-to-end pipeline over flat input/textarea fields.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};

use engine::{BeforeInput, Disposition, handle_before_input};
use pairs::{BracketPair, ColumnSettings, default_pairs};
use settings::{FixedConfig, MemoryBackend, SettingsStore, Snapshot};
use surface::{FieldId, InputNotification, TextBox};

fn default_config() -> FixedConfig {
    FixedConfig::new(Snapshot {
        active: true,
        pairs: default_pairs(),
        columns: ColumnSettings::default(),
    })
}

fn field(value: &str) -> (TextBox, Receiver<InputNotification>) {
    let (tx, rx) = mpsc::channel();
    (TextBox::new(FieldId::from_raw(7), value, tx), rx)
}

#[test]
fn typing_open_paren_after_whitespace_pairs_up() {
    let (mut tb, rx) = field("foo ");
    tb.set_caret(4);
    let config = default_config();

    let d = handle_before_input(&BeforeInput::typed('('), &mut tb, &config);
    assert_eq!(d, Disposition::Claimed);
    assert_eq!(tb.value(), "foo ()");
    assert_eq!(tb.caret(), 5);
    assert_eq!(rx.try_iter().count(), 1);
}

#[test]
fn typing_open_paren_after_word_char_stays_default() {
    let (mut tb, rx) = field("foo(");
    tb.set_caret(4);
    let config = default_config();

    let d = handle_before_input(&BeforeInput::typed('('), &mut tb, &config);
    assert_eq!(d, Disposition::Default);
    // Untouched: the host applies its native insertion, yielding "foo((".
    assert_eq!(tb.value(), "foo(");
    assert_eq!(rx.try_iter().count(), 0);
}

#[test]
fn typing_closer_skips_over_existing_one() {
    let (mut tb, rx) = field("()");
    tb.set_caret(1);
    let config = default_config();

    let d = handle_before_input(&BeforeInput::typed(')'), &mut tb, &config);
    assert_eq!(d, Disposition::Claimed);
    assert_eq!(tb.value(), "()");
    assert_eq!(tb.caret(), 2);
    assert_eq!(rx.try_iter().count(), 1);
}

#[test]
fn typing_over_selection_surrounds_it() {
    let (mut tb, rx) = field("abc");
    tb.select(0, 3);
    let config = default_config();

    let d = handle_before_input(&BeforeInput::typed('('), &mut tb, &config);
    assert_eq!(d, Disposition::Claimed);
    assert_eq!(tb.value(), "(abc)");
    let sel = tb.selection().unwrap();
    assert_eq!(sel.slice(tb.value()), "abc");
    assert_eq!(rx.try_iter().count(), 1);
}

#[test]
fn surround_only_pair_never_inserts_at_caret() {
    let (mut tb, _rx) = field(" ");
    tb.set_caret(1);
    let config = default_config();

    // '*' ships surround-only: collapsed caret gets host default.
    let d = handle_before_input(&BeforeInput::typed('*'), &mut tb, &config);
    assert_eq!(d, Disposition::Default);

    tb.select(0, 1);
    let d = handle_before_input(&BeforeInput::typed('*'), &mut tb, &config);
    assert_eq!(d, Disposition::Claimed);
    assert_eq!(tb.value(), "* *");
}

#[test]
fn insert_column_kill_switch_overrides_pair_flags() {
    let (mut tb, _rx) = field(" ");
    tb.set_caret(1);
    let killed = FixedConfig::new(Snapshot {
        active: true,
        pairs: default_pairs(),
        columns: ColumnSettings {
            insert_enabled: false,
            surround_enabled: true,
        },
    });

    for pair in default_pairs().iter().filter(|p| p.active_insert) {
        let d = handle_before_input(&BeforeInput::typed(pair.left), &mut tb, &killed);
        assert_eq!(d, Disposition::Default, "pair {}", pair.left);
    }
    assert_eq!(tb.value(), " ");

    // Re-enabling the column restores per-pair behavior untouched.
    let d = handle_before_input(&BeforeInput::typed('('), &mut tb, &default_config());
    assert_eq!(d, Disposition::Claimed);
    assert_eq!(tb.value(), " ()");
}

#[test]
fn disabled_feature_flag_suppresses_everything() {
    let (mut tb, rx) = field(" ");
    tb.set_caret(1);
    let config = FixedConfig::new(Snapshot {
        active: false,
        pairs: default_pairs(),
        columns: ColumnSettings::default(),
    });

    let d = handle_before_input(&BeforeInput::typed('('), &mut tb, &config);
    assert_eq!(d, Disposition::Default);
    assert_eq!(rx.try_iter().count(), 0);
}

#[test]
fn read_only_target_stays_default() {
    let (mut tb, rx) = field(" ");
    tb.set_caret(1);
    tb.set_read_only(true);
    let config = default_config();

    let d = handle_before_input(&BeforeInput::typed('('), &mut tb, &config);
    assert_eq!(d, Disposition::Default);
    assert_eq!(tb.value(), " ");
    assert_eq!(rx.try_iter().count(), 0);
}

#[test]
fn unknown_character_passes_through() {
    let (mut tb, rx) = field(" ");
    tb.set_caret(1);
    let config = default_config();

    let d = handle_before_input(&BeforeInput::typed('a'), &mut tb, &config);
    assert_eq!(d, Disposition::Default);
    assert_eq!(rx.try_iter().count(), 0);
}

#[test]
fn custom_pair_list_first_match_wins() {
    let (mut tb, _rx) = field(" ");
    tb.set_caret(1);
    let config = FixedConfig::new(Snapshot {
        active: true,
        pairs: vec![
            BracketPair::new('(', '}', true, true),
            BracketPair::new('(', ')', true, true),
        ],
        columns: ColumnSettings::default(),
    });

    let d = handle_before_input(&BeforeInput::typed('('), &mut tb, &config);
    assert_eq!(d, Disposition::Claimed);
    assert_eq!(tb.value(), " (}");
}

#[test]
fn store_backed_pipeline_follows_the_feature_flag() {
    let backend = Arc::new(MemoryBackend::new());
    let store = SettingsStore::new(backend.clone());
    store.init_load();

    // Empty storage: the persisted default for the flag is off.
    let (mut tb, _rx) = field(" ");
    tb.set_caret(1);
    let d = handle_before_input(&BeforeInput::typed('('), &mut tb, &store);
    assert_eq!(d, Disposition::Default);

    store.set_active(true).wait().unwrap();
    let d = handle_before_input(&BeforeInput::typed('('), &mut tb, &store);
    assert_eq!(d, Disposition::Claimed);
    assert_eq!(tb.value(), " ()");
}

#[test]
fn keystroke_before_initial_load_sees_empty_pair_list() {
    let backend = Arc::new(MemoryBackend::new());
    let store = SettingsStore::new(backend);
    // No init_load: optimistic flag, no pairs, nothing fires.

    let (mut tb, rx) = field(" ");
    tb.set_caret(1);
    let d = handle_before_input(&BeforeInput::typed('('), &mut tb, &store);
    assert_eq!(d, Disposition::Default);
    assert_eq!(rx.try_iter().count(), 0);
}
