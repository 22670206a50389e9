use crate::error::{KbdError, KbdResult, NameKind};
use crate::keycodes;
use crate::keymap::check_name;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutKey {
    /// Key name as it appears in `defsrc`.
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub x: f32, // Physical X coordinate (units ~1u key width)
    pub y: f32, // Physical Y coordinate (row)

    #[serde(default = "default_width")]
    pub w: f32,
}

fn default_width() -> f32 {
    1.0
}

/// A named physical key arrangement. Key order is the `defsrc` order it seeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLayout")]
pub struct PhysicalLayout {
    pub name: String,
    pub keys: Vec<LayoutKey>,
}

#[derive(Deserialize)]
struct RawLayout {
    name: String,
    keys: Vec<LayoutKey>,
}

impl TryFrom<RawLayout> for PhysicalLayout {
    type Error = KbdError;

    fn try_from(raw: RawLayout) -> KbdResult<Self> {
        Self::new(raw.name, raw.keys)
    }
}

impl PhysicalLayout {
    /// Validates key ids and fills in missing labels from the key-code table.
    ///
    /// Ids seed `defsrc` and the name lands in the layout comment, so both must be
    /// usable as bare atoms.
    pub fn new(name: impl Into<String>, mut keys: Vec<LayoutKey>) -> KbdResult<Self> {
        let name = name.into();
        check_name(NameKind::Layout, &name)?;

        let mut seen = HashSet::with_capacity(keys.len());
        for key in &mut keys {
            check_name(NameKind::Key, &key.id)?;
            if !seen.insert(key.id.clone()) {
                return Err(KbdError::duplicate(NameKind::Key, key.id.clone()));
            }
            if key.label.is_empty() {
                key.label = keycodes::label(&key.id).to_string();
            }
        }

        Ok(Self { name, keys })
    }

    /// Builds a layout from row strings of `id`, `id:width` and `~:gap` tokens.
    pub fn from_rows(name: impl Into<String>, rows: &[&str]) -> KbdResult<Self> {
        let mut keys = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            let mut x = 0.0;
            for token in row.split_whitespace() {
                let (id, w) = match token.rsplit_once(':') {
                    Some((id, w)) if !id.is_empty() => match w.parse::<f32>() {
                        Ok(w) => (id, w),
                        Err(_) => (token, 1.0),
                    },
                    _ => (token, 1.0),
                };
                if id != "~" {
                    keys.push(LayoutKey {
                        id: id.to_string(),
                        label: String::new(),
                        x,
                        y: y as f32,
                        w,
                    });
                }
                x += w;
            }
        }
        Self::new(name, keys)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KbdResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn key_ids(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.id.as_str())
    }

    /// Keys grouped into visual rows: consecutive keys sharing a y coordinate.
    pub fn rows(&self) -> Vec<&[LayoutKey]> {
        let mut rows = Vec::new();
        let mut start = 0;
        for i in 1..=self.keys.len() {
            let row_ends = i == self.keys.len() || (self.keys[i].y - self.keys[start].y).abs() > 0.01;
            if row_ends {
                rows.push(&self.keys[start..i]);
                start = i;
            }
        }
        rows
    }

    pub fn row_lengths(&self) -> Vec<usize> {
        self.rows().iter().map(|r| r.len()).collect()
    }
}
