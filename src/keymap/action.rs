use crate::error::{KbdError, KbdResult};
use crate::parser::sexpr::SExpr;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumString};

/// Atom standing for a transparent slot.
pub const TRANSPARENT: &str = "_";

/// Prefix marking an alias reference, as in `@cap`.
pub const ALIAS_SIGIL: char = '@';

/// Heads of the list-shaped actions the model understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ActionHead {
    LayerSwitch,
    LayerWhileHeld,
    TapHold,
}

/// What a single key position does on a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Action {
    Basic(String),
    Transparent,
    LayerSwitch(String),
    LayerWhileHeld(String),
    TapHold {
        tap: Box<Action>,
        hold: Box<Action>,
        timeout_ms: u32,
    },
    Alias(String),
    /// A list form outside the modeled grammar, reproduced verbatim on output.
    Raw(SExpr),
}

impl Action {
    pub fn basic(code: impl Into<String>) -> Self {
        Self::Basic(code.into())
    }

    pub fn alias(name: impl Into<String>) -> Self {
        Self::Alias(name.into())
    }

    pub fn tap_hold(tap: Action, hold: Action, timeout_ms: u32) -> Self {
        Self::TapHold {
            tap: Box::new(tap),
            hold: Box::new(hold),
            timeout_ms,
        }
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, Self::Transparent)
    }

    /// Checks that the action's text reads back as the same action.
    ///
    /// Rejects payloads the grammar would reinterpret or split, e.g. `Basic("_")`,
    /// `Basic("@x")`, `Alias("")` or a layer target containing whitespace.
    pub fn validate(&self) -> KbdResult<()> {
        let text = self.to_string();
        match crate::parser::read_single_action(&text) {
            Some((read, _)) if read == *self => Ok(()),
            _ => Err(KbdError::InvalidAction(text)),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(code) => f.write_str(code),
            Self::Transparent => f.write_str(TRANSPARENT),
            Self::LayerSwitch(target) => write!(f, "({} {})", ActionHead::LayerSwitch, target),
            Self::LayerWhileHeld(target) => {
                write!(f, "({} {})", ActionHead::LayerWhileHeld, target)
            }
            Self::TapHold {
                tap,
                hold,
                timeout_ms,
            } => write!(f, "({} {} {} {})", ActionHead::TapHold, tap, hold, timeout_ms),
            Self::Alias(name) => write!(f, "{}{}", ALIAS_SIGIL, name),
            Self::Raw(expr) => write!(f, "{}", expr),
        }
    }
}

/// Parses one action written in the configuration grammar, e.g. `(tap-hold esc lctl 200)`.
///
/// Unlike a full parse, anything the grammar would only warn about (a bad timeout, a
/// modeled head with the wrong arguments) is rejected. Unknown key codes are accepted.
impl FromStr for Action {
    type Err = KbdError;

    fn from_str(s: &str) -> KbdResult<Self> {
        crate::parser::parse_action_text(s)
    }
}
