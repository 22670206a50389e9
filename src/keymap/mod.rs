//! The in-memory configuration: the `defsrc` key sequence, positionally aligned layers
//! and named aliases.
//!
//! Every layer holds exactly one action per `defsrc` key, and index `i` of any layer
//! belongs to `defsrc[i]`. Layers and aliases keep their insertion order so that
//! serialized output is stable across edits. All mutators either apply fully or
//! return an error with the keymap untouched.

mod action;

pub use self::action::{Action, ActionHead, ALIAS_SIGIL, TRANSPARENT};

use crate::error::{KbdError, KbdResult, NameKind};
use crate::geometry::PhysicalLayout;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

/// Name of one physical key slot as written in `defsrc`.
pub type KeyId = String;

/// Layer created by [`Keymap::from_layout`].
pub const DEFAULT_LAYER: &str = "base";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Keymap {
    pub(crate) layout: Option<String>,
    pub(crate) defsrc: Vec<KeyId>,
    pub(crate) layers: IndexMap<String, Vec<Action>>,
    pub(crate) aliases: IndexMap<String, Action>,
}

impl Keymap {
    /// Creates a keymap over `defsrc` with no layers or aliases.
    pub fn new(defsrc: Vec<KeyId>) -> KbdResult<Self> {
        if let Some(key) = first_duplicate(&defsrc) {
            return Err(KbdError::duplicate(NameKind::Key, key));
        }
        for key in &defsrc {
            check_name(NameKind::Key, key)?;
        }
        Ok(Self {
            defsrc,
            ..Self::default()
        })
    }

    /// Seeds `defsrc` from a physical layout with a single all-transparent layer.
    pub fn from_layout(layout: &PhysicalLayout) -> Self {
        let defsrc: Vec<KeyId> = layout.key_ids().map(str::to_string).collect();
        let mut layers = IndexMap::new();
        layers.insert(
            DEFAULT_LAYER.to_string(),
            vec![Action::Transparent; defsrc.len()],
        );
        Self {
            layout: Some(layout.name.clone()),
            defsrc,
            layers,
            aliases: IndexMap::new(),
        }
    }

    pub fn layout(&self) -> Option<&str> {
        self.layout.as_deref()
    }

    /// Records the physical layout. The name is written into a comment, so it must be
    /// a single atom.
    pub fn set_layout(&mut self, layout: Option<String>) -> KbdResult<()> {
        if let Some(name) = &layout {
            check_name(NameKind::Layout, name)?;
        }
        self.layout = layout;
        Ok(())
    }

    pub fn defsrc(&self) -> &[KeyId] {
        &self.defsrc
    }

    /// Number of keys in `defsrc`, which is also the length of every layer.
    pub fn len(&self) -> usize {
        self.defsrc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defsrc.is_empty()
    }

    pub fn key_index(&self, key: &str) -> Option<usize> {
        self.defsrc.iter().position(|k| k == key)
    }

    pub fn layers(&self) -> impl Iterator<Item = (&str, &[Action])> {
        self.layers.iter().map(|(n, a)| (n.as_str(), a.as_slice()))
    }

    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }

    pub fn layer(&self, name: &str) -> Option<&[Action]> {
        self.layers.get(name).map(Vec::as_slice)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &Action)> {
        self.aliases.iter().map(|(n, a)| (n.as_str(), a))
    }

    pub fn alias(&self, name: &str) -> Option<&Action> {
        self.aliases.get(name)
    }

    /// Appends a layer with every slot transparent.
    pub fn add_layer(&mut self, name: &str) -> KbdResult<()> {
        check_name(NameKind::Layer, name)?;
        if self.layers.contains_key(name) {
            return Err(KbdError::duplicate(NameKind::Layer, name));
        }
        self.layers
            .insert(name.to_string(), vec![Action::Transparent; self.len()]);
        Ok(())
    }

    /// Removes a layer and returns its actions. Other layers keep their order.
    pub fn remove_layer(&mut self, name: &str) -> KbdResult<Vec<Action>> {
        self.layers
            .shift_remove(name)
            .ok_or_else(|| KbdError::not_found(NameKind::Layer, name))
    }

    /// Replaces the action at `index` of `layer`, returning the previous one.
    pub fn set_action(&mut self, layer: &str, index: usize, action: Action) -> KbdResult<Action> {
        action.validate()?;
        let len = self.defsrc.len();
        let actions = self
            .layers
            .get_mut(layer)
            .ok_or_else(|| KbdError::not_found(NameKind::Layer, layer))?;
        let slot = actions
            .get_mut(index)
            .ok_or(KbdError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, action))
    }

    /// Same as [`Keymap::set_action`], addressing the slot by its `defsrc` key.
    pub fn set_key_action(&mut self, layer: &str, key: &str, action: Action) -> KbdResult<Action> {
        if !self.layers.contains_key(layer) {
            return Err(KbdError::not_found(NameKind::Layer, layer));
        }
        let index = self
            .key_index(key)
            .ok_or_else(|| KbdError::not_found(NameKind::Key, key))?;
        self.set_action(layer, index, action)
    }

    pub fn add_alias(&mut self, name: &str, action: Action) -> KbdResult<()> {
        check_name(NameKind::Alias, name)?;
        action.validate()?;
        if self.aliases.contains_key(name) {
            return Err(KbdError::duplicate(NameKind::Alias, name));
        }
        self.aliases.insert(name.to_string(), action);
        Ok(())
    }

    /// Replaces the definition of an existing alias, keeping its position.
    pub fn update_alias(&mut self, name: &str, action: Action) -> KbdResult<Action> {
        action.validate()?;
        let slot = self
            .aliases
            .get_mut(name)
            .ok_or_else(|| KbdError::not_found(NameKind::Alias, name))?;
        Ok(std::mem::replace(slot, action))
    }

    pub fn remove_alias(&mut self, name: &str) -> KbdResult<Action> {
        self.aliases
            .shift_remove(name)
            .ok_or_else(|| KbdError::not_found(NameKind::Alias, name))
    }
}

fn first_duplicate(keys: &[KeyId]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(keys.len());
    keys.iter().find(|k| !seen.insert(k.as_str())).map(String::as_str)
}

/// Names end up as bare atoms in the text, so they must survive tokenization intact.
pub(crate) fn check_name(kind: NameKind, name: &str) -> KbdResult<()> {
    let atom_safe = !name.is_empty()
        && !name.starts_with(";;")
        && !name.starts_with("#|")
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"'));
    if atom_safe {
        Ok(())
    } else {
        Err(KbdError::InvalidName {
            kind,
            name: name.to_string(),
        })
    }
}
