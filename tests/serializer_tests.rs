use kbdforge::config::FormatOptions;
use kbdforge::layouts::KnownLayout;
use kbdforge::serializer::Serializer;
use kbdforge::{parse, serialize, Action, Keymap};
use proptest::prelude::*;

fn home_row() -> Keymap {
    let parsed = parse(
        "(defsrc a s d f)\n\
         (deflayer base a s d f)\n\
         (deflayer nav _ (tap-hold esc lctl 200) @cap (layer-switch base))\n\
         (defalias cap (layer-while-held nav))",
    )
    .unwrap();
    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    parsed.keymap
}

#[test]
fn test_columns_are_aligned() {
    let text = serialize(&home_row());

    let expected = "\
(defsrc
  a s                       d    f
)

(deflayer base
  a s                       d    f
)

(deflayer nav
  _ (tap-hold esc lctl 200) @cap (layer-switch base)
)

(defalias
  cap (layer-while-held nav)
)
";
    assert_eq!(text, expected);
}

#[test]
fn test_compact_and_wrap() {
    let options = FormatOptions {
        compact: true,
        wrap: 2,
        ..Default::default()
    };
    let text = Serializer::new(options).serialize(&home_row());

    assert!(text.starts_with("(defsrc\n  a s\n  d f\n)\n"), "{}", text);
    assert!(text.contains("(deflayer nav\n  _ (tap-hold esc lctl 200)\n  @cap (layer-switch base)\n)"));
}

#[test]
fn test_layout_rows_break_lines() {
    let layout = KnownLayout::Ansi60.build().unwrap();
    let keymap = Keymap::from_layout(&layout);

    let text = Serializer::new(FormatOptions::default())
        .with_rows(layout.row_lengths())
        .serialize(&keymap);

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(";; layout: ansi-60"));
    assert_eq!(lines.next(), Some(""));
    assert_eq!(lines.next(), Some("(defsrc"));
    let first_row: Vec<&str> = lines.next().unwrap().split_whitespace().collect();
    assert_eq!(first_row.len(), 14);
    assert_eq!(first_row[0], "grv");

    let reparsed = parse(&text).unwrap();
    assert!(reparsed.diagnostics.is_empty());
    assert_eq!(reparsed.keymap, keymap);
}

#[test]
fn test_rows_that_do_not_fit_are_ignored() {
    let keymap = home_row();
    let by_rows = Serializer::new(FormatOptions::default())
        .with_rows(vec![3, 3])
        .serialize(&keymap);
    assert_eq!(by_rows, serialize(&keymap));
}

#[test]
fn test_empty_keymap() {
    let text = serialize(&Keymap::default());
    assert_eq!(text, "(defsrc\n)\n");

    let parsed = parse(&text).unwrap();
    assert!(parsed.diagnostics.is_empty());
    assert_eq!(parsed.keymap, Keymap::default());
}

// --- STRATEGIES ---

const CODES: &[&str] = &["a", "b", "esc", "lctl", "spc", "ret", ";", "\\", "kp+", "f11"];

fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,6}"
}

fn arb_action() -> impl Strategy<Value = Action> {
    let leaf = prop_oneof![
        Just(Action::Transparent),
        prop::sample::select(CODES).prop_map(|code| Action::basic(code)),
        arb_name().prop_map(|name| Action::alias(name)),
        arb_name().prop_map(Action::LayerSwitch),
        arb_name().prop_map(Action::LayerWhileHeld),
    ];
    leaf.prop_recursive(2, 8, 2, |inner| {
        (inner.clone(), inner, 0u32..1000)
            .prop_map(|(tap, hold, ms)| Action::tap_hold(tap, hold, ms))
    })
}

prop_compose! {
    fn arb_keymap()(len in 0usize..24)(
        keys in prop::collection::hash_set("[a-z]{1,4}", len),
        layers in prop::collection::vec(
            (arb_name(), prop::collection::vec(arb_action(), len)),
            0..4
        ),
        aliases in prop::collection::vec((arb_name(), arb_action()), 0..4),
        layout in prop::option::of(arb_name()),
    ) -> Keymap {
        let mut keymap = Keymap::new(keys.into_iter().collect()).unwrap();
        keymap.set_layout(layout).unwrap();
        for (name, actions) in layers {
            if keymap.add_layer(&name).is_ok() {
                for (i, action) in actions.into_iter().enumerate() {
                    keymap.set_action(&name, i, action).unwrap();
                }
            }
        }
        for (name, action) in aliases {
            let _ = keymap.add_alias(&name, action);
        }
        keymap
    }
}

fn arb_options() -> impl Strategy<Value = FormatOptions> {
    (0usize..5, 0usize..20, any::<bool>()).prop_map(|(indent, wrap, compact)| FormatOptions {
        indent,
        wrap,
        compact,
        ignore_rows: false,
    })
}

proptest! {
    #[test]
    fn prop_serialized_text_parses_back(keymap in arb_keymap(), options in arb_options()) {
        let text = Serializer::new(options).serialize(&keymap);
        let parsed = parse(&text).unwrap();

        prop_assert!(!parsed.has_errors(), "{:?}\n{}", parsed.diagnostics, text);
        prop_assert_eq!(parsed.keymap, keymap);
    }

    #[test]
    fn prop_serializing_is_stable(keymap in arb_keymap()) {
        let once = serialize(&keymap);
        let twice = serialize(&parse(&once).unwrap().keymap);
        prop_assert_eq!(once, twice);
    }
}
