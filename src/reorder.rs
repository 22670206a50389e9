//! Moving a key within `defsrc` while keeping every layer aligned.
//!
//! A move removes the source key at index `i`, then inserts it at the index `j` the
//! target key has *after* that removal, so the moved key lands immediately before the
//! target. Every layer gets the same remove-at-`i`/insert-at-`j` splice, which keeps
//! each action attached to the physical key it belonged to. The rule is the same
//! whichever direction the key travels.

use crate::error::{KbdError, KbdResult, NameKind};
use crate::keymap::Keymap;
use tracing::debug;

impl Keymap {
    /// Moves `source` to sit immediately before `target`. Moving a key onto itself
    /// does nothing.
    pub fn move_key(&mut self, source: &str, target: &str) -> KbdResult<()> {
        let from = self
            .key_index(source)
            .ok_or_else(|| KbdError::not_found(NameKind::Key, source))?;
        let target_at = self
            .key_index(target)
            .ok_or_else(|| KbdError::not_found(NameKind::Key, target))?;
        if from == target_at {
            return Ok(());
        }

        // Target's index once the source is out of the sequence.
        let to = if target_at > from {
            target_at - 1
        } else {
            target_at
        };

        let key = self.defsrc.remove(from);
        self.defsrc.insert(to, key);

        for actions in self.layers.values_mut() {
            let action = actions.remove(from);
            actions.insert(to, action);
        }

        debug!("Moved key '{}' from {} to {} (before '{}')", source, from, to, target);
        Ok(())
    }
}

/// Returns a copy of `keymap` with `source` moved before `target`.
pub fn move_key(keymap: &Keymap, source: &str, target: &str) -> KbdResult<Keymap> {
    let mut moved = keymap.clone();
    moved.move_key(source, target)?;
    Ok(moved)
}
