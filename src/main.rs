use clap::{Parser, Subcommand};
use kbdforge::registry::RegistryLoader;
use std::process;
use tracing::{error, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory of extra JSON layout files to register after the built-ins
    #[arg(global = true, long)]
    layouts_dir: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a configuration and report diagnostics
    Check(cmd::check::CheckArgs),
    /// Rewrite a configuration in canonical form
    Fmt(cmd::fmt::FmtArgs),
    /// Draw each layer on its physical layout
    Show(cmd::show::ShowArgs),
    /// Move a key to another key's position in defsrc and every layer
    Move(cmd::edit::MoveArgs),
    /// Rebind one key in one layer
    Set(cmd::edit::SetArgs),
    AddLayer(cmd::edit::LayerArgs),
    RemoveLayer(cmd::edit::LayerArgs),
    AddAlias(cmd::edit::AddAliasArgs),
    RemoveAlias(cmd::edit::RemoveAliasArgs),
    /// Suggest the smallest layout that fits a key count
    Suggest(cmd::layouts::SuggestArgs),
    /// List registered layouts
    Layouts,
    /// Start a configuration from a layout
    New(cmd::layouts::NewArgs),
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut loader = RegistryLoader::new().with_builtins();
    if let Some(dir) = &cli.layouts_dir {
        loader = loader.add_dir(dir).unwrap_or_else(|e| {
            error!("Cannot read layouts directory '{}': {}", dir, e);
            process::exit(1);
        });
    }
    let report = loader.finish().unwrap_or_else(|e| {
        error!("Cannot build layout registry: {}", e);
        process::exit(1);
    });
    let registry = &report.registry;

    let result = match cli.command {
        Commands::Check(args) => match cmd::check::run(args) {
            Ok(true) => Ok(()),
            Ok(false) => process::exit(1),
            Err(e) => Err(e),
        },
        Commands::Fmt(args) => cmd::fmt::run(args, registry),
        Commands::Show(args) => cmd::show::run(args, registry),
        Commands::Move(args) => cmd::edit::run_move(args, registry),
        Commands::Set(args) => cmd::edit::run_set(args, registry),
        Commands::AddLayer(args) => cmd::edit::run_add_layer(args, registry),
        Commands::RemoveLayer(args) => cmd::edit::run_remove_layer(args, registry),
        Commands::AddAlias(args) => cmd::edit::run_add_alias(args, registry),
        Commands::RemoveAlias(args) => cmd::edit::run_remove_alias(args, registry),
        Commands::Suggest(args) => cmd::layouts::run_suggest(args, registry),
        Commands::Layouts => {
            cmd::layouts::run_list(registry, &report.failures);
            Ok(())
        }
        Commands::New(args) => cmd::layouts::run_new(args, registry),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
