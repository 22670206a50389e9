use kbdforge::error::NameKind;
use kbdforge::keymap::DEFAULT_LAYER;
use kbdforge::layouts::KnownLayout;
use kbdforge::parser::sexpr::SExpr;
use kbdforge::{Action, KbdError, Keymap};
use rstest::rstest;

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn sample() -> Keymap {
    let mut keymap = Keymap::new(keys(&["a", "s", "d", "f"])).unwrap();
    keymap.add_layer("base").unwrap();
    keymap.add_layer("nav").unwrap();
    keymap
}

#[test]
fn test_new_layers_are_transparent() {
    let keymap = sample();
    assert_eq!(keymap.layer_count(), 2);
    for (_, actions) in keymap.layers() {
        assert_eq!(actions.len(), keymap.len());
        assert!(actions.iter().all(Action::is_transparent));
    }
}

#[test]
fn test_duplicate_defsrc_rejected() {
    let err = Keymap::new(keys(&["a", "b", "a"])).unwrap_err();
    assert!(matches!(
        err,
        KbdError::DuplicateName { kind: NameKind::Key, ref name } if name == "a"
    ));
}

#[rstest]
#[case("")]
#[case("two words")]
#[case("par(en")]
#[case(";;comment")]
#[case("#|block")]
fn test_invalid_layer_names(#[case] name: &str) {
    let mut keymap = sample();
    assert!(matches!(
        keymap.add_layer(name),
        Err(KbdError::InvalidName {
            kind: NameKind::Layer,
            ..
        })
    ));
    assert_eq!(keymap, sample());
}

#[test]
fn test_layer_lifecycle() {
    let mut keymap = sample();

    assert!(matches!(
        keymap.add_layer("nav"),
        Err(KbdError::DuplicateName { .. })
    ));

    keymap.add_layer("sym").unwrap();
    keymap.remove_layer("nav").unwrap();
    assert_eq!(keymap.layer_names().collect::<Vec<_>>(), ["base", "sym"]);

    assert!(matches!(
        keymap.remove_layer("nav"),
        Err(KbdError::NotFound {
            kind: NameKind::Layer,
            ..
        })
    ));
}

#[test]
fn test_set_action() {
    let mut keymap = sample();

    let previous = keymap.set_action("nav", 1, Action::basic("left")).unwrap();
    assert_eq!(previous, Action::Transparent);
    assert_eq!(keymap.layer("nav").unwrap()[1], Action::basic("left"));

    keymap
        .set_key_action("nav", "f", Action::LayerSwitch("base".into()))
        .unwrap();
    assert_eq!(
        keymap.layer("nav").unwrap()[3],
        Action::LayerSwitch("base".into())
    );

    // Other layers are untouched.
    assert!(keymap
        .layer("base")
        .unwrap()
        .iter()
        .all(Action::is_transparent));
}

#[test]
fn test_set_action_errors_leave_keymap_unchanged() {
    let mut keymap = sample();

    assert!(matches!(
        keymap.set_action("nav", 4, Action::basic("x")),
        Err(KbdError::IndexOutOfRange { index: 4, len: 4 })
    ));
    assert!(matches!(
        keymap.set_action("missing", 0, Action::basic("x")),
        Err(KbdError::NotFound {
            kind: NameKind::Layer,
            ..
        })
    ));
    assert!(matches!(
        keymap.set_key_action("nav", "q", Action::basic("x")),
        Err(KbdError::NotFound {
            kind: NameKind::Key,
            ..
        })
    ));
    assert_eq!(keymap, sample());
}

#[test]
fn test_alias_lifecycle() {
    let mut keymap = sample();
    let cap = Action::tap_hold(Action::basic("esc"), Action::basic("lctl"), 200);

    keymap.add_alias("cap", cap.clone()).unwrap();
    keymap.add_alias("nav", Action::LayerWhileHeld("nav".into())).unwrap();
    assert!(matches!(
        keymap.add_alias("cap", Action::basic("a")),
        Err(KbdError::DuplicateName {
            kind: NameKind::Alias,
            ..
        })
    ));

    let old = keymap.update_alias("cap", Action::basic("esc")).unwrap();
    assert_eq!(old, cap);
    // Updating keeps the alias in place.
    assert_eq!(
        keymap.aliases().map(|(n, _)| n).collect::<Vec<_>>(),
        ["cap", "nav"]
    );

    keymap.remove_alias("cap").unwrap();
    assert!(keymap.alias("cap").is_none());
    assert!(matches!(
        keymap.update_alias("cap", Action::basic("a")),
        Err(KbdError::NotFound { .. })
    ));
}

#[test]
fn test_from_layout() {
    let layout = KnownLayout::Ansi60.build().unwrap();
    let keymap = Keymap::from_layout(&layout);

    assert_eq!(keymap.layout(), Some("ansi-60"));
    assert_eq!(keymap.len(), 61);
    assert_eq!(keymap.defsrc()[0], "grv");
    assert_eq!(keymap.layer_names().collect::<Vec<_>>(), [DEFAULT_LAYER]);
    assert!(keymap
        .layer(DEFAULT_LAYER)
        .unwrap()
        .iter()
        .all(Action::is_transparent));
}

#[test]
fn test_action_display() {
    let action = Action::tap_hold(
        Action::alias("cap"),
        Action::LayerWhileHeld("nav".into()),
        150,
    );
    assert_eq!(action.to_string(), "(tap-hold @cap (layer-while-held nav) 150)");
    assert_eq!(action.to_string().parse::<Action>().unwrap(), action);
}

#[rstest]
#[case(Action::basic("_"))]
#[case(Action::basic("@x"))]
#[case(Action::basic("a b"))]
#[case(Action::basic(";;oops"))]
#[case(Action::alias(""))]
#[case(Action::LayerSwitch("x y".into()))]
#[case(Action::LayerWhileHeld("".into()))]
#[case(Action::Raw(SExpr::atom("a")))]
#[case(Action::tap_hold(Action::basic("_"), Action::basic("lctl"), 200))]
fn test_actions_that_do_not_read_back_are_rejected(#[case] action: Action) {
    let mut keymap = sample();
    keymap.add_alias("cap", Action::basic("esc")).unwrap();
    let before = keymap.clone();

    let err = keymap.set_action("nav", 0, action.clone()).unwrap_err();
    assert!(matches!(err, KbdError::InvalidAction(_)), "{:?}", err);
    assert!(matches!(
        keymap.add_alias("other", action.clone()),
        Err(KbdError::InvalidAction(_))
    ));
    assert!(matches!(
        keymap.update_alias("cap", action),
        Err(KbdError::InvalidAction(_))
    ));
    assert_eq!(keymap, before);
}

#[rstest]
#[case(Action::basic("\"hi\""))]
#[case(Action::Raw(SExpr::List(vec![SExpr::atom("macro"), SExpr::atom("a")])))]
#[case(Action::tap_hold(Action::alias("cap"), Action::LayerWhileHeld("nav".into()), 150))]
fn test_actions_that_read_back_are_accepted(#[case] action: Action) {
    let mut keymap = sample();
    keymap.set_action("nav", 1, action.clone()).unwrap();
    keymap.add_alias("cap", action.clone()).unwrap();

    let reparsed = kbdforge::parse(&kbdforge::serialize(&keymap)).unwrap().keymap;
    assert_eq!(reparsed.layer("nav").unwrap()[1], action);
    assert_eq!(reparsed, keymap);
}

#[rstest]
#[case("my board")]
#[case("")]
#[case("(x)")]
fn test_set_layout_rejects_bad_names(#[case] name: &str) {
    let mut keymap = sample();
    let err = keymap.set_layout(Some(name.to_string())).unwrap_err();
    assert!(matches!(
        err,
        KbdError::InvalidName {
            kind: NameKind::Layout,
            ..
        }
    ));
    assert_eq!(keymap.layout(), None);

    keymap.set_layout(Some("ansi-60".into())).unwrap();
    keymap.set_layout(None).unwrap();
    assert_eq!(keymap.layout(), None);
}
