use super::InputArgs;
use crate::reports::grid;
use clap::Args;
use kbdforge::error::NameKind;
use kbdforge::registry::LayoutRegistry;
use kbdforge::{KbdError, KbdResult};

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only show this layer
    #[arg(short, long)]
    pub layer: Option<String>,

    /// Draw on this layout instead of the recorded or suggested one
    #[arg(long)]
    pub layout: Option<String>,
}

pub fn run(args: ShowArgs, registry: &LayoutRegistry) -> KbdResult<()> {
    let keymap = args.input.load()?.keymap;
    let layout = match &args.layout {
        Some(name) => registry.lookup(name)?,
        None => registry.resolve_for(&keymap),
    };

    match &args.layer {
        Some(name) => {
            if keymap.layer(name).is_none() {
                return Err(KbdError::NotFound {
                    kind: NameKind::Layer,
                    name: name.clone(),
                });
            }
            grid::print_layer(&keymap, name, layout);
        }
        None => {
            for name in keymap.layer_names() {
                grid::print_layer(&keymap, name, layout);
            }
        }
    }
    Ok(())
}
