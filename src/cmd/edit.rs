//! Single-edit commands: parse, apply one mutation, write the result back out.

use super::{render, write_output, InputArgs, OutputArgs};
use clap::Args;
use kbdforge::registry::LayoutRegistry;
use kbdforge::{Action, KbdResult, Keymap};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct MoveArgs {
    #[command(flatten)]
    pub edit: EditArgs,

    /// Key to move
    pub source: String,

    /// Key whose position it takes
    pub target: String,
}

#[derive(Args, Debug, Clone)]
pub struct SetArgs {
    #[command(flatten)]
    pub edit: EditArgs,

    pub layer: String,

    /// defsrc key to rebind
    pub key: String,

    /// Action text, e.g. `a`, `_`, `@cap` or `(tap-hold esc lctl 200)`
    pub action: String,
}

#[derive(Args, Debug, Clone)]
pub struct LayerArgs {
    #[command(flatten)]
    pub edit: EditArgs,

    pub name: String,
}

#[derive(Args, Debug, Clone)]
pub struct AddAliasArgs {
    #[command(flatten)]
    pub edit: EditArgs,

    pub name: String,

    pub action: String,

    /// Replace the alias if it already exists
    #[arg(long, default_value_t = false)]
    pub replace: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RemoveAliasArgs {
    #[command(flatten)]
    pub edit: EditArgs,

    pub name: String,
}

fn apply<F>(args: &EditArgs, registry: &LayoutRegistry, edit: F) -> KbdResult<()>
where
    F: FnOnce(&mut Keymap) -> KbdResult<()>,
{
    let mut keymap = args.input.load()?.keymap;
    edit(&mut keymap)?;
    let text = render(&keymap, &args.input.config.format, registry);
    write_output(&text, &args.output, Some(&args.input.file))
}

pub fn run_move(args: MoveArgs, registry: &LayoutRegistry) -> KbdResult<()> {
    apply(&args.edit, registry, |keymap| {
        keymap.move_key(&args.source, &args.target)?;
        info!("Moved '{}' to the position of '{}'", args.source, args.target);
        Ok(())
    })
}

pub fn run_set(args: SetArgs, registry: &LayoutRegistry) -> KbdResult<()> {
    let action: Action = args.action.parse()?;
    apply(&args.edit, registry, |keymap| {
        let previous = keymap.set_key_action(&args.layer, &args.key, action)?;
        info!("{}/{}: {} -> {}", args.layer, args.key, previous, args.action);
        Ok(())
    })
}

pub fn run_add_layer(args: LayerArgs, registry: &LayoutRegistry) -> KbdResult<()> {
    apply(&args.edit, registry, |keymap| keymap.add_layer(&args.name))
}

pub fn run_remove_layer(args: LayerArgs, registry: &LayoutRegistry) -> KbdResult<()> {
    apply(&args.edit, registry, |keymap| {
        keymap.remove_layer(&args.name).map(|_| ())
    })
}

pub fn run_add_alias(args: AddAliasArgs, registry: &LayoutRegistry) -> KbdResult<()> {
    let action: Action = args.action.parse()?;
    apply(&args.edit, registry, |keymap| {
        if args.replace && keymap.alias(&args.name).is_some() {
            keymap.update_alias(&args.name, action).map(|_| ())
        } else {
            keymap.add_alias(&args.name, action)
        }
    })
}

pub fn run_remove_alias(args: RemoveAliasArgs, registry: &LayoutRegistry) -> KbdResult<()> {
    apply(&args.edit, registry, |keymap| {
        keymap.remove_alias(&args.name).map(|_| ())
    })
}
