use crate::keymap::Action;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Key names understood as `Basic` actions, paired with the label a renderer shows.
const KEYCODES: &[(&str, &str)] = &[
    // Function row
    ("esc", "Esc"),
    ("f1", "F1"),
    ("f2", "F2"),
    ("f3", "F3"),
    ("f4", "F4"),
    ("f5", "F5"),
    ("f6", "F6"),
    ("f7", "F7"),
    ("f8", "F8"),
    ("f9", "F9"),
    ("f10", "F10"),
    ("f11", "F11"),
    ("f12", "F12"),
    ("f13", "F13"),
    ("f14", "F14"),
    ("f15", "F15"),
    ("f16", "F16"),
    ("f17", "F17"),
    ("f18", "F18"),
    ("f19", "F19"),
    ("f20", "F20"),
    ("f21", "F21"),
    ("f22", "F22"),
    ("f23", "F23"),
    ("f24", "F24"),
    // Number row
    ("grv", "`"),
    ("1", "1"),
    ("2", "2"),
    ("3", "3"),
    ("4", "4"),
    ("5", "5"),
    ("6", "6"),
    ("7", "7"),
    ("8", "8"),
    ("9", "9"),
    ("0", "0"),
    ("-", "-"),
    ("min", "-"),
    ("=", "="),
    ("eql", "="),
    ("bspc", "Bksp"),
    ("bks", "Bksp"),
    // Letters
    ("a", "a"),
    ("b", "b"),
    ("c", "c"),
    ("d", "d"),
    ("e", "e"),
    ("f", "f"),
    ("g", "g"),
    ("h", "h"),
    ("i", "i"),
    ("j", "j"),
    ("k", "k"),
    ("l", "l"),
    ("m", "m"),
    ("n", "n"),
    ("o", "o"),
    ("p", "p"),
    ("q", "q"),
    ("r", "r"),
    ("s", "s"),
    ("t", "t"),
    ("u", "u"),
    ("v", "v"),
    ("w", "w"),
    ("x", "x"),
    ("y", "y"),
    ("z", "z"),
    // Punctuation
    ("tab", "Tab"),
    ("[", "["),
    ("]", "]"),
    ("\\", "\\"),
    ("caps", "Caps"),
    (";", ";"),
    ("'", "'"),
    ("ret", "Enter"),
    ("ent", "Enter"),
    ("enter", "Enter"),
    (",", ","),
    (".", "."),
    ("/", "/"),
    ("nubs", "\\"),
    // Modifiers
    ("lsft", "Shift"),
    ("rsft", "RShift"),
    ("lctl", "Ctrl"),
    ("rctl", "RCtrl"),
    ("lalt", "Alt"),
    ("ralt", "AltGr"),
    ("lmet", "Meta"),
    ("rmet", "RMeta"),
    ("menu", "Menu"),
    ("comp", "Menu"),
    ("spc", "Space"),
    // Navigation cluster
    ("prtsc", "PrtSc"),
    ("prnt", "PrtSc"),
    ("slck", "ScrLk"),
    ("pause", "Pause"),
    ("ins", "Ins"),
    ("home", "Home"),
    ("pgup", "PgUp"),
    ("del", "Del"),
    ("end", "End"),
    ("pgdn", "PgDn"),
    ("up", "↑"),
    ("down", "↓"),
    ("left", "←"),
    ("rght", "→"),
    ("right", "→"),
    // Numpad
    ("nlck", "NumLk"),
    ("kp/", "/"),
    ("kp*", "*"),
    ("kp-", "-"),
    ("kp+", "+"),
    ("kprt", "Enter"),
    ("kp.", "."),
    ("kp0", "0"),
    ("kp1", "1"),
    ("kp2", "2"),
    ("kp3", "3"),
    ("kp4", "4"),
    ("kp5", "5"),
    ("kp6", "6"),
    ("kp7", "7"),
    ("kp8", "8"),
    ("kp9", "9"),
    // Media
    ("mute", "Mute"),
    ("volu", "Vol+"),
    ("voldwn", "Vol-"),
    ("vold", "Vol-"),
    ("pp", "Play"),
    ("next", "Next"),
    ("prev", "Prev"),
    ("brup", "Bri+"),
    ("brdown", "Bri-"),
    // No-op
    ("XX", "✕"),
];

fn table() -> &'static HashMap<&'static str, &'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| KEYCODES.iter().copied().collect())
}

pub fn is_known(code: &str) -> bool {
    table().contains_key(code)
}

/// Display label for a key code. Unknown codes are shown as written.
pub fn label(code: &str) -> &str {
    table().get(code).copied().unwrap_or(code)
}

/// Short label for an action as shown on a rendered key cap.
pub fn action_label(action: &Action) -> String {
    match action {
        Action::Basic(code) => label(code).to_string(),
        Action::Transparent => "⊘".to_string(),
        Action::LayerSwitch(target) => format!("layer {}", target),
        Action::LayerWhileHeld(target) => format!("hold {}", target),
        Action::TapHold { tap, hold, .. } => {
            format!("{}/{}", action_label(tap), action_label(hold))
        }
        Action::Alias(name) => format!("@{}", name),
        Action::Raw(_) => "…".to_string(),
    }
}
