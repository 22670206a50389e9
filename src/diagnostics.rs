use serde::Serialize;
use strum_macros::Display;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A recoverable finding reported while parsing. The parse itself continues.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DiagnosticKind {
    #[error("layer '{layer}' has {found} actions but defsrc has {expected} keys")]
    LayerLengthMismatch {
        layer: String,
        expected: usize,
        found: usize,
    },

    #[error("unknown top-level form '{head}' ignored")]
    UnknownForm { head: String },

    #[error("invalid tap-hold timeout '{value}', using {fallback}ms")]
    InvalidTimeout { value: String, fallback: u32 },

    #[error("malformed {form} form: {reason}")]
    MalformedForm { form: String, reason: String },

    #[error("malformed action '{text}': {reason}")]
    MalformedAction { text: String, reason: String },

    #[error("key '{key}' appears more than once in defsrc")]
    DuplicateSourceKey { key: String },

    #[error("defsrc redefined, the last definition wins")]
    RedefinedSource,

    #[error("invalid token '{text}' skipped")]
    InvalidToken { text: String },

    #[error("unknown key code '{code}'")]
    UnknownKeyCode { code: String },
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            Self::LayerLengthMismatch { .. }
            | Self::MalformedForm { .. }
            | Self::DuplicateSourceKey { .. }
            | Self::InvalidToken { .. } => Severity::Error,
            Self::UnknownForm { .. }
            | Self::InvalidTimeout { .. }
            | Self::MalformedAction { .. }
            | Self::RedefinedSource
            | Self::UnknownKeyCode { .. } => Severity::Warning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 1-based line of the top-level form (or token) the finding belongs to.
    pub line: usize,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(line: usize, kind: DiagnosticKind) -> Self {
        Self { line, kind }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.severity(), self.kind)
    }
}
