use super::{render, write_output, InputArgs, OutputArgs};
use crate::reports;
use clap::Args;
use kbdforge::config::FormatOptions;
use kbdforge::registry::{LayoutRegistry, LoadFailure};
use kbdforge::{KbdError, KbdResult, Keymap};

#[derive(Args, Debug, Clone)]
pub struct SuggestArgs {
    /// Configuration whose defsrc length is used
    #[arg(required_unless_present = "keys", conflicts_with = "keys")]
    pub file: Option<std::path::PathBuf>,

    /// Number of keys to fit
    #[arg(short, long)]
    pub keys: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct NewArgs {
    /// Layout to seed defsrc from
    #[arg(short, long, default_value = "ansi-full")]
    pub layout: String,

    #[command(flatten)]
    pub format: FormatOptions,

    /// Write the new configuration here instead of stdout
    #[arg(short, long)]
    pub output: Option<std::path::PathBuf>,
}

pub fn run_list(registry: &LayoutRegistry, failures: &[LoadFailure]) {
    reports::print_layouts(registry, failures);
}

pub fn run_suggest(args: SuggestArgs, registry: &LayoutRegistry) -> KbdResult<()> {
    let required = match (args.keys, args.file) {
        (Some(n), _) => n,
        (None, Some(file)) => {
            let input = InputArgs {
                file,
                config: Default::default(),
            };
            input.load()?.keymap.len()
        }
        (None, None) => return Err(KbdError::Layout("no key count given".to_string())),
    };

    let name = registry.suggest_layout(required);
    let count = registry.lookup(name)?.key_count();
    println!("{} ({} keys) for {} keys", name, count, required);
    Ok(())
}

pub fn run_new(args: NewArgs, registry: &LayoutRegistry) -> KbdResult<()> {
    let layout = registry.lookup(&args.layout)?;
    let keymap = Keymap::from_layout(layout);
    let text = render(&keymap, &args.format, registry);
    let out = OutputArgs {
        output: args.output,
        in_place: false,
    };
    write_output(&text, &out, None)
}
