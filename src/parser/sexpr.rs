use super::lexer::{tokenize, Lexeme, Token};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::error::{KbdError, KbdResult};
use serde::Serialize;
use std::fmt;

/// Generic nested-list syntax: an atom or a parenthesized list of expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SExpr {
    Atom(String),
    List(Vec<SExpr>),
}

impl SExpr {
    pub fn atom(text: impl Into<String>) -> Self {
        Self::Atom(text.into())
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Self::Atom(a) => Some(a),
            Self::List(_) => None,
        }
    }

    /// The leading atom of a list, if any.
    pub fn head(&self) -> Option<&str> {
        match self {
            Self::List(items) => items.first().and_then(SExpr::as_atom),
            Self::Atom(_) => None,
        }
    }
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(a) => f.write_str(a),
            Self::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A top-level expression and the line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub expr: SExpr,
    pub line: usize,
}

#[derive(Debug, Default)]
pub struct SyntaxTree {
    pub forms: Vec<Form>,
    /// Line comments with their line, markers included.
    pub comments: Vec<(usize, String)>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Reads the whole input into top-level forms.
///
/// Only unbalanced parentheses are fatal; unmatchable text is reported and skipped.
pub fn read(input: &str) -> KbdResult<SyntaxTree> {
    let mut tree = SyntaxTree::default();
    // Open lists, innermost last, each with the line of its '('.
    let mut stack: Vec<(Vec<SExpr>, usize)> = Vec::new();

    for (lexeme, line) in tokenize(input) {
        let token = match lexeme {
            Lexeme::Token(token) => token,
            Lexeme::Invalid(text) => {
                tree.diagnostics
                    .push(Diagnostic::new(line, DiagnosticKind::InvalidToken { text }));
                continue;
            }
        };

        let finished = match token {
            Token::LineComment(text) => {
                tree.comments.push((line, text));
                continue;
            }
            Token::BlockComment => continue,
            Token::LParen => {
                stack.push((Vec::new(), line));
                continue;
            }
            Token::RParen => {
                let (items, open_line) = stack.pop().ok_or(KbdError::UnbalancedParen {
                    line,
                    detail: "unexpected ')'",
                })?;
                (SExpr::List(items), open_line)
            }
            Token::Atom(text) => (SExpr::Atom(text), line),
        };

        match stack.last_mut() {
            Some((items, _)) => items.push(finished.0),
            None => tree.forms.push(Form {
                expr: finished.0,
                line: finished.1,
            }),
        }
    }

    if let Some((_, open_line)) = stack.last() {
        return Err(KbdError::UnbalancedParen {
            line: *open_line,
            detail: "unclosed '('",
        });
    }

    Ok(tree)
}
