pub mod check;
pub mod edit;
pub mod fmt;
pub mod layouts;
pub mod show;

use clap::Args;
use kbdforge::config::{Config, FormatOptions};
use kbdforge::parser::{Parsed, Parser};
use kbdforge::registry::LayoutRegistry;
use kbdforge::serializer::Serializer;
use kbdforge::{KbdResult, Keymap};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Configuration file to read
    pub file: PathBuf,

    #[command(flatten)]
    pub config: Config,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Write the result here instead of stdout
    #[arg(short, long, conflicts_with = "in_place")]
    pub output: Option<PathBuf>,

    /// Overwrite the input file
    #[arg(short, long, default_value_t = false)]
    pub in_place: bool,
}

impl InputArgs {
    /// Reads and parses the input file. Diagnostics are logged, not fatal.
    pub fn load(&self) -> KbdResult<Parsed> {
        let text = fs::read_to_string(&self.file)?;
        let parsed = Parser::new(self.config.parse.clone()).parse(&text)?;
        for d in &parsed.diagnostics {
            warn!("{}: {}", self.file.display(), d);
        }
        debug!(
            "Loaded {}: {} keys, {} layers",
            self.file.display(),
            parsed.keymap.len(),
            parsed.keymap.layer_count()
        );
        Ok(parsed)
    }
}

/// Serializes `keymap`, breaking lines along its layout's rows when that layout is known.
pub fn render(keymap: &Keymap, options: &FormatOptions, registry: &LayoutRegistry) -> String {
    let serializer = Serializer::new(options.clone());
    match keymap.layout().and_then(|name| registry.lookup(name).ok()) {
        Some(layout) => serializer.with_rows(layout.row_lengths()).serialize(keymap),
        None => serializer.serialize(keymap),
    }
}

pub fn write_output(text: &str, out: &OutputArgs, input: Option<&PathBuf>) -> KbdResult<()> {
    let target = match (&out.output, out.in_place) {
        (Some(path), _) => Some(path),
        (None, true) => input,
        (None, false) => None,
    };
    match target {
        Some(path) => {
            fs::write(path, text)?;
            debug!("Wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
