//! Text to [`Keymap`].
//!
//! The input is tokenized, read into balanced lists, and the top-level forms are
//! interpreted in one left-to-right pass. Problems with individual forms become
//! [`Diagnostic`]s next to a best-effort keymap; only unbalanced parentheses abort.

pub mod lexer;
pub mod sexpr;

use self::sexpr::{Form, SExpr};
use crate::config::ParseOptions;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::error::{KbdError, KbdResult};
use crate::keycodes;
use crate::keymap::{Action, ActionHead, KeyId, Keymap, ALIAS_SIGIL, TRANSPARENT};
use std::collections::HashSet;
use strum_macros::{Display, EnumString};
use tracing::debug;

/// Comment prefix carrying the chosen physical layout, e.g. `;; layout: ansi-60`.
pub const LAYOUT_MARKER: &str = "layout:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
enum FormHead {
    Defsrc,
    Deflayer,
    Defalias,
}

#[derive(Debug, Clone)]
pub struct Parsed {
    pub keymap: Keymap,
    pub diagnostics: Vec<Diagnostic>,
}

impl Parsed {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Parses with default options.
pub fn parse(input: &str) -> KbdResult<Parsed> {
    Parser::new(ParseOptions::default()).parse(input)
}

pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn parse(&self, input: &str) -> KbdResult<Parsed> {
        let tree = sexpr::read(input)?;
        debug!(
            "Read {} top-level forms, {} comments",
            tree.forms.len(),
            tree.comments.len()
        );

        let mut interp = Interpreter {
            keymap: Keymap::default(),
            diagnostics: tree.diagnostics,
            options: &self.options,
            defsrc_seen: false,
        };
        interp.keymap.layout = layout_hint(&tree.comments);

        for form in &tree.forms {
            interp.form(form);
        }

        debug!(
            "Parsed {} keys, {} layers, {} aliases, {} diagnostics",
            interp.keymap.len(),
            interp.keymap.layer_count(),
            interp.keymap.aliases.len(),
            interp.diagnostics.len()
        );

        Ok(Parsed {
            keymap: interp.keymap,
            diagnostics: interp.diagnostics,
        })
    }
}

/// Reads the layout name out of the first `;; layout: NAME` comment.
fn layout_hint(comments: &[(usize, String)]) -> Option<String> {
    comments.iter().find_map(|(_, text)| {
        let body = text.trim_start_matches(';').trim_start();
        let name = body.strip_prefix(LAYOUT_MARKER)?.split_whitespace().next()?;
        Some(name.to_string())
    })
}

struct Interpreter<'a> {
    keymap: Keymap,
    diagnostics: Vec<Diagnostic>,
    options: &'a ParseOptions,
    defsrc_seen: bool,
}

impl Interpreter<'_> {
    fn report(&mut self, line: usize, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic::new(line, kind));
    }

    fn form(&mut self, form: &Form) {
        let items = match &form.expr {
            SExpr::List(items) => items,
            SExpr::Atom(atom) => {
                self.report(form.line, DiagnosticKind::UnknownForm { head: atom.clone() });
                return;
            }
        };

        let head = form.expr.head().unwrap_or("()");
        match head.parse::<FormHead>() {
            Ok(FormHead::Defsrc) => self.defsrc(&items[1..], form.line),
            Ok(FormHead::Deflayer) => self.deflayer(&items[1..], form.line),
            Ok(FormHead::Defalias) => self.defalias(&items[1..], form.line),
            Err(_) => {
                debug!("Ignoring unknown form '{}' at line {}", head, form.line);
                self.report(
                    form.line,
                    DiagnosticKind::UnknownForm {
                        head: head.to_string(),
                    },
                );
            }
        }
    }

    fn defsrc(&mut self, items: &[SExpr], line: usize) {
        let mut keys: Vec<KeyId> = Vec::with_capacity(items.len());
        for item in items {
            match item.as_atom() {
                Some(key) => keys.push(key.to_string()),
                None => {
                    self.report(
                        line,
                        malformed(FormHead::Defsrc, format!("'{}' is not a key name", item)),
                    );
                    return;
                }
            }
        }

        let mut seen = HashSet::with_capacity(keys.len());
        if let Some(dup) = keys.iter().find(|k| !seen.insert(k.as_str())) {
            let key = dup.clone();
            self.report(line, DiagnosticKind::DuplicateSourceKey { key });
            return;
        }

        if self.defsrc_seen {
            self.report(line, DiagnosticKind::RedefinedSource);
        }
        self.defsrc_seen = true;
        self.keymap.defsrc = keys;

        // Layers read against an earlier defsrc cannot stay if the length changed.
        let expected = self.keymap.len();
        let stale: Vec<(String, usize)> = self
            .keymap
            .layers
            .iter()
            .filter(|(_, actions)| actions.len() != expected)
            .map(|(name, actions)| (name.clone(), actions.len()))
            .collect();
        for (layer, found) in stale {
            self.keymap.layers.shift_remove(&layer);
            self.report(
                line,
                DiagnosticKind::LayerLengthMismatch {
                    layer,
                    expected,
                    found,
                },
            );
        }
    }

    fn deflayer(&mut self, items: &[SExpr], line: usize) {
        let Some(name) = items.first().and_then(SExpr::as_atom) else {
            self.report(line, malformed(FormHead::Deflayer, "missing layer name"));
            return;
        };

        let mut reader = ActionReader::new(line, self.options);
        let actions: Vec<Action> = items[1..].iter().map(|e| reader.read(e)).collect();
        self.diagnostics.append(&mut reader.diagnostics);

        let expected = self.keymap.len();
        if actions.len() != expected {
            self.report(
                line,
                DiagnosticKind::LayerLengthMismatch {
                    layer: name.to_string(),
                    expected,
                    found: actions.len(),
                },
            );
            return;
        }

        self.keymap.layers.insert(name.to_string(), actions);
    }

    fn defalias(&mut self, items: &[SExpr], line: usize) {
        let mut reader = ActionReader::new(line, self.options);
        for pair in items.chunks(2) {
            let name = match pair[0].as_atom() {
                Some(name) => name,
                None => {
                    self.report(
                        line,
                        malformed(
                            FormHead::Defalias,
                            format!("'{}' is not an alias name", pair[0]),
                        ),
                    );
                    continue;
                }
            };
            let Some(expr) = pair.get(1) else {
                self.report(
                    line,
                    malformed(FormHead::Defalias, format!("alias '{}' has no action", name)),
                );
                continue;
            };
            let action = reader.read(expr);
            self.keymap.aliases.insert(name.to_string(), action);
        }
        self.diagnostics.append(&mut reader.diagnostics);
    }
}

fn malformed(form: FormHead, reason: impl Into<String>) -> DiagnosticKind {
    DiagnosticKind::MalformedForm {
        form: form.to_string(),
        reason: reason.into(),
    }
}

/// Applies the action grammar, collecting diagnostics for the form being read.
struct ActionReader<'a> {
    line: usize,
    options: &'a ParseOptions,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> ActionReader<'a> {
    fn new(line: usize, options: &'a ParseOptions) -> Self {
        Self {
            line,
            options,
            diagnostics: Vec::new(),
        }
    }

    fn report(&mut self, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic::new(self.line, kind));
    }

    fn read(&mut self, expr: &SExpr) -> Action {
        match expr {
            SExpr::Atom(atom) => self.atom(atom),
            SExpr::List(items) => self.list(expr, items),
        }
    }

    fn atom(&mut self, atom: &str) -> Action {
        if atom == TRANSPARENT {
            return Action::Transparent;
        }
        if let Some(name) = atom.strip_prefix(ALIAS_SIGIL) {
            if !name.is_empty() {
                return Action::Alias(name.to_string());
            }
        }
        if self.options.warn_unknown_codes() && !keycodes::is_known(atom) {
            self.report(DiagnosticKind::UnknownKeyCode {
                code: atom.to_string(),
            });
        }
        Action::Basic(atom.to_string())
    }

    fn list(&mut self, expr: &SExpr, items: &[SExpr]) -> Action {
        let Some(head) = expr.head().and_then(|h| h.parse::<ActionHead>().ok()) else {
            return Action::Raw(expr.clone());
        };
        let args = &items[1..];

        match (head, args) {
            (ActionHead::LayerSwitch, [SExpr::Atom(target)]) => {
                Action::LayerSwitch(target.clone())
            }
            (ActionHead::LayerWhileHeld, [SExpr::Atom(target)]) => {
                Action::LayerWhileHeld(target.clone())
            }
            (ActionHead::TapHold, [tap, hold, timeout]) => {
                let tap = self.read(tap);
                let hold = self.read(hold);
                let timeout_ms = self.timeout(timeout);
                Action::tap_hold(tap, hold, timeout_ms)
            }
            (ActionHead::LayerSwitch | ActionHead::LayerWhileHeld, _) => {
                self.report(DiagnosticKind::MalformedAction {
                    text: expr.to_string(),
                    reason: "expected exactly one layer name".to_string(),
                });
                Action::Raw(expr.clone())
            }
            (ActionHead::TapHold, _) => {
                self.report(DiagnosticKind::MalformedAction {
                    text: expr.to_string(),
                    reason: "expected tap, hold and timeout".to_string(),
                });
                Action::Raw(expr.clone())
            }
        }
    }

    fn timeout(&mut self, expr: &SExpr) -> u32 {
        let digits = expr
            .as_atom()
            .filter(|a| !a.is_empty() && a.bytes().all(|b| b.is_ascii_digit()));
        if let Some(ms) = digits.and_then(|a| a.parse::<u32>().ok()) {
            return ms;
        }
        let fallback = self.options.default_tap_hold_timeout;
        self.report(DiagnosticKind::InvalidTimeout {
            value: expr.to_string(),
            fallback,
        });
        fallback
    }
}

/// Reads exactly one action from `text`, along with what the action grammar reported.
pub(crate) fn read_single_action(text: &str) -> Option<(Action, Vec<Diagnostic>)> {
    let tree = sexpr::read(text).ok()?;
    if !tree.diagnostics.is_empty() {
        return None;
    }
    let [form] = tree.forms.as_slice() else {
        return None;
    };

    let options = ParseOptions::default();
    let mut reader = ActionReader::new(form.line, &options);
    let action = reader.read(&form.expr);
    Some((action, reader.diagnostics))
}

/// Reads exactly one action from `text`, rejecting anything that would need a fallback.
pub(crate) fn parse_action_text(text: &str) -> KbdResult<Action> {
    let (action, diagnostics) =
        read_single_action(text).ok_or_else(|| KbdError::InvalidAction(text.to_string()))?;
    let rejected = diagnostics
        .iter()
        .any(|d| !matches!(d.kind, DiagnosticKind::UnknownKeyCode { .. }));
    if rejected {
        return Err(KbdError::InvalidAction(text.to_string()));
    }
    Ok(action)
}
