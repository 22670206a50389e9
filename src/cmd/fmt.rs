use super::{render, write_output, InputArgs, OutputArgs};
use clap::Args;
use kbdforge::registry::LayoutRegistry;
use kbdforge::KbdResult;

#[derive(Args, Debug, Clone)]
pub struct FmtArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Record this physical layout in the output
    #[arg(long)]
    pub layout: Option<String>,
}

pub fn run(args: FmtArgs, registry: &LayoutRegistry) -> KbdResult<()> {
    let mut keymap = args.input.load()?.keymap;
    if let Some(name) = &args.layout {
        registry.lookup(name)?;
        keymap.set_layout(Some(name.clone()))?;
    }

    let text = render(&keymap, &args.input.config.format, registry);
    write_output(&text, &args.output, Some(&args.input.file))
}
