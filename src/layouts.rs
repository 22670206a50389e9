use crate::error::KbdResult;
use crate::geometry::PhysicalLayout;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Built-in layouts, in registration order.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
pub enum KnownLayout {
    #[strum(serialize = "ansi-60")]
    Ansi60,
    #[strum(serialize = "ansi-tkl")]
    AnsiTkl,
    #[strum(serialize = "ansi-full")]
    AnsiFull,
    #[strum(serialize = "iso-full")]
    IsoFull,
    #[strum(serialize = "kinesis-freestyle")]
    KinesisFreestyle,
}

// Row strings: `id`, `id:width` or `~:gap`, widths in key units.
const ANSI_60: &[&str] = &[
    "grv 1 2 3 4 5 6 7 8 9 0 - = bspc:2",
    "tab:1.5 q w e r t y u i o p [ ] \\:1.5",
    "caps:1.75 a s d f g h j k l ; ' ret:2.25",
    "lsft:2.25 z x c v b n m , . / rsft:2.75",
    "lctl:1.25 lmet:1.25 lalt:1.25 spc:6.25 ralt:1.25 rmet:1.25 menu:1.25 rctl:1.25",
];

const ANSI_TKL: &[&str] = &[
    "esc ~:1 f1 f2 f3 f4 ~:0.5 f5 f6 f7 f8 ~:0.5 f9 f10 f11 f12 ~:0.25 prtsc slck pause",
    "grv 1 2 3 4 5 6 7 8 9 0 - = bspc:2 ~:0.25 ins home pgup",
    "tab:1.5 q w e r t y u i o p [ ] \\:1.5 ~:0.25 del end pgdn",
    "caps:1.75 a s d f g h j k l ; ' ret:2.25",
    "lsft:2.25 z x c v b n m , . / rsft:2.75 ~:1.25 up",
    "lctl:1.25 lmet:1.25 lalt:1.25 spc:6.25 ralt:1.25 rmet:1.25 menu:1.25 rctl:1.25 ~:0.25 left down rght",
];

const ANSI_FULL: &[&str] = &[
    "esc ~:1 f1 f2 f3 f4 ~:0.5 f5 f6 f7 f8 ~:0.5 f9 f10 f11 f12 ~:0.25 prtsc slck pause",
    "grv 1 2 3 4 5 6 7 8 9 0 - = bspc:2 ~:0.25 ins home pgup ~:0.25 nlck kp/ kp* kp-",
    "tab:1.5 q w e r t y u i o p [ ] \\:1.5 ~:0.25 del end pgdn ~:0.25 kp7 kp8 kp9 kp+",
    "caps:1.75 a s d f g h j k l ; ' ret:2.25 ~:3.5 kp4 kp5 kp6",
    "lsft:2.25 z x c v b n m , . / rsft:2.75 ~:1.25 up ~:1.25 kp1 kp2 kp3 kprt",
    "lctl:1.25 lmet:1.25 lalt:1.25 spc:6.25 ralt:1.25 rmet:1.25 menu:1.25 rctl:1.25 ~:0.25 left down rght ~:0.25 kp0:2 kp.",
];

// ISO: tall enter on the tab row, `\` beside it on the home row, extra key by left shift.
const ISO_FULL: &[&str] = &[
    "esc ~:1 f1 f2 f3 f4 ~:0.5 f5 f6 f7 f8 ~:0.5 f9 f10 f11 f12 ~:0.25 prtsc slck pause",
    "grv 1 2 3 4 5 6 7 8 9 0 - = bspc:2 ~:0.25 ins home pgup ~:0.25 nlck kp/ kp* kp-",
    "tab:1.5 q w e r t y u i o p [ ] ret:1.5 ~:0.25 del end pgdn ~:0.25 kp7 kp8 kp9 kp+",
    "caps:1.75 a s d f g h j k l ; ' \\:1.25 ~:4.5 kp4 kp5 kp6",
    "lsft:1.25 nubs z x c v b n m , . / rsft:2.75 ~:1.25 up ~:1.25 kp1 kp2 kp3 kprt",
    "lctl:1.25 lmet:1.25 lalt:1.25 spc:6.25 ralt:1.25 rmet:1.25 menu:1.25 rctl:1.25 ~:0.25 left down rght ~:0.25 kp0:2 kp.",
];

// Split board: each row has a one-unit gap between the halves.
const KINESIS_FREESTYLE: &[&str] = &[
    "esc f1 f2 f3 f4 f5 f6 ~:1 f7 f8 f9 f10 f11 f12",
    "grv 1 2 3 4 5 6 ~:1 7 8 9 0 - = bspc:2",
    "tab:1.5 q w e r t ~:1 y u i o p [ ] \\:1.5",
    "caps:1.75 a s d f g ~:1 h j k l ; ' ret:2.25",
    "lsft:2.25 z x c v b ~:1 n m , . / rsft:2.75",
    "lctl:1.25 lmet:1.25 lalt:1.25 spc:3.25 ~:1 ralt:1.25 rmet:1.25 menu:1.25 rctl:1.25",
];

impl KnownLayout {
    pub fn rows(&self) -> &'static [&'static str] {
        match self {
            Self::Ansi60 => ANSI_60,
            Self::AnsiTkl => ANSI_TKL,
            Self::AnsiFull => ANSI_FULL,
            Self::IsoFull => ISO_FULL,
            Self::KinesisFreestyle => KINESIS_FREESTYLE,
        }
    }

    pub fn build(&self) -> KbdResult<PhysicalLayout> {
        PhysicalLayout::from_rows(self.to_string(), self.rows())
    }
}

pub fn get_all_layouts() -> Vec<KnownLayout> {
    KnownLayout::iter().collect()
}
