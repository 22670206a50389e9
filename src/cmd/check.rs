use super::InputArgs;
use crate::reports;
use clap::Args;
use kbdforge::diagnostics::Diagnostic;
use kbdforge::{KbdResult, Keymap};
use serde::Serialize;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the parsed keymap and diagnostics as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    keymap: &'a Keymap,
    diagnostics: &'a [Diagnostic],
}

/// Returns whether the file parsed without error-severity diagnostics.
pub fn run(args: CheckArgs) -> KbdResult<bool> {
    let parsed = args.input.load()?;

    if args.json {
        let report = CheckReport {
            keymap: &parsed.keymap,
            diagnostics: &parsed.diagnostics,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let path = args.input.file.display().to_string();
        reports::print_diagnostics(&path, &parsed.diagnostics);
    }

    Ok(!parsed.has_errors())
}
