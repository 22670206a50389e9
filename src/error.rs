use strum_macros::Display;
use thiserror::Error;

/// The kind of named entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum NameKind {
    Key,
    Layer,
    Alias,
    Layout,
}

#[derive(Error, Debug)]
pub enum KbdError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unbalanced parenthesis at line {line}: {detail}")]
    UnbalancedParen { line: usize, detail: &'static str },

    #[error("Duplicate {kind} name '{name}'")]
    DuplicateName { kind: NameKind, name: String },

    #[error("Unknown {kind} '{name}'")]
    NotFound { kind: NameKind, name: String },

    #[error("Invalid {kind} name '{name}'")]
    InvalidName { kind: NameKind, name: String },

    #[error("Index {index} out of range for {len} keys")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid action '{0}'")]
    InvalidAction(String),

    #[error("Layout Error: {0}")]
    Layout(String),

    #[error("Layout registry is empty")]
    EmptyRegistry,
}

impl KbdError {
    pub(crate) fn duplicate(kind: NameKind, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            kind,
            name: name.into(),
        }
    }

    pub(crate) fn not_found(kind: NameKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }
}

pub type KbdResult<T> = Result<T, KbdError>;
