//! The table of physical layouts, and the one-shot loader that fills it.
//!
//! [`RegistryLoader::finish`] is the readiness barrier: it returns only once every
//! source has either loaded or failed. Failures are soft. They are logged and reported,
//! but count as completed so a bad file can never hold the registry back.

use crate::error::{KbdError, KbdResult, NameKind};
use crate::geometry::PhysicalLayout;
use crate::keymap::Keymap;
use crate::layouts::{get_all_layouts, KnownLayout};
use indexmap::IndexMap;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    layouts: IndexMap<String, PhysicalLayout>,
}

impl LayoutRegistry {
    /// Registers `layouts` in order. An empty set or a repeated name is rejected.
    pub fn new(layouts: Vec<PhysicalLayout>) -> KbdResult<Self> {
        if layouts.is_empty() {
            return Err(KbdError::EmptyRegistry);
        }
        let mut map = IndexMap::with_capacity(layouts.len());
        for layout in layouts {
            if map.contains_key(&layout.name) {
                return Err(KbdError::duplicate(NameKind::Layout, layout.name));
            }
            map.insert(layout.name.clone(), layout);
        }
        Ok(Self { layouts: map })
    }

    /// All built-in layouts.
    pub fn builtin() -> KbdResult<Self> {
        Ok(RegistryLoader::new().with_builtins().finish()?.registry)
    }

    pub fn list_layouts(&self) -> impl Iterator<Item = &PhysicalLayout> {
        self.layouts.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layouts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn lookup(&self, name: &str) -> KbdResult<&PhysicalLayout> {
        self.layouts
            .get(name)
            .ok_or_else(|| KbdError::not_found(NameKind::Layout, name))
    }

    /// Picks the smallest layout holding at least `required_key_count` keys, the
    /// earliest registered on ties. When none is big enough, the largest one.
    pub fn suggest_layout(&self, required_key_count: usize) -> &str {
        let fitting = self
            .layouts
            .values()
            .filter(|l| l.key_count() >= required_key_count)
            .min_by_key(|l| l.key_count());

        let chosen = fitting.or_else(|| {
            self.layouts
                .values()
                .reduce(|best, l| if l.key_count() > best.key_count() { l } else { best })
        });

        debug!(
            "Suggested layout for {} keys: {:?}",
            required_key_count,
            chosen.map(|l| &l.name)
        );
        chosen.map(|l| l.name.as_str()).unwrap_or_default()
    }

    /// The layout a keymap should be shown with: its recorded layout when registered,
    /// otherwise a suggestion from its key count.
    pub fn resolve_for(&self, keymap: &Keymap) -> &PhysicalLayout {
        let name = keymap
            .layout()
            .filter(|name| self.layouts.contains_key(*name))
            .unwrap_or_else(|| self.suggest_layout(keymap.len()));
        &self.layouts[name]
    }
}

#[derive(Debug, Clone)]
pub enum LayoutSource {
    Builtin(KnownLayout),
    File(PathBuf),
}

impl LayoutSource {
    fn describe(&self) -> String {
        match self {
            Self::Builtin(layout) => format!("builtin:{}", layout),
            Self::File(path) => path.display().to_string(),
        }
    }

    fn load(&self) -> KbdResult<PhysicalLayout> {
        match self {
            Self::Builtin(layout) => layout.build(),
            Self::File(path) => PhysicalLayout::load_from_file(path),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadFailure {
    pub source: String,
    pub error: String,
}

#[derive(Debug)]
pub struct LoadReport {
    pub registry: LayoutRegistry,
    pub failures: Vec<LoadFailure>,
}

#[derive(Debug, Default)]
pub struct RegistryLoader {
    sources: Vec<LayoutSource>,
}

impl RegistryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins(mut self) -> Self {
        self.sources
            .extend(get_all_layouts().into_iter().map(LayoutSource::Builtin));
        self
    }

    pub fn add(mut self, source: LayoutSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Queues every `*.json` file in `dir`, sorted by file name.
    pub fn add_dir<P: AsRef<Path>>(mut self, dir: P) -> KbdResult<Self> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();
        self.sources.extend(files.into_iter().map(LayoutSource::File));
        Ok(self)
    }

    /// Number of sources the barrier waits for.
    pub fn expected(&self) -> usize {
        self.sources.len()
    }

    /// Loads every source and builds the registry in registration order.
    pub fn finish(self) -> KbdResult<LoadReport> {
        let expected = self.sources.len();
        let results: Vec<(String, KbdResult<PhysicalLayout>)> = self
            .sources
            .par_iter()
            .map(|source| (source.describe(), source.load()))
            .collect();

        let mut layouts: Vec<PhysicalLayout> = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (source, result) in results {
            let outcome = result.and_then(|layout| {
                if layouts.iter().any(|l| l.name == layout.name) {
                    Err(KbdError::duplicate(NameKind::Layout, layout.name))
                } else {
                    Ok(layout)
                }
            });
            match outcome {
                Ok(layout) => layouts.push(layout),
                Err(e) => {
                    warn!("Failed to load layout '{}': {}", source, e);
                    failures.push(LoadFailure {
                        source,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Layout registry ready: {}/{} sources loaded, {} failed",
            layouts.len(),
            expected,
            failures.len()
        );

        Ok(LoadReport {
            registry: LayoutRegistry::new(layouts)?,
            failures,
        })
    }
}
