//! Binary entrypoint: a terminal driver for the command palette.
use std::{
    path::{Path, PathBuf},
    process,
};

use clap::{Parser, Subcommand};
use config::{PaletteFile, RegistrySpec, load_from_path, resolve_config_path};
use palette_engine::{Action, Hotkey, Palette, PaletteBuilder, Platform, Registry};
use tracing::{debug, error};

/// stdin line driver.
mod session;
/// Shell-backed actions.
mod shell;

#[derive(Parser, Debug)]
#[command(name = "palette", about = "A keyboard-driven command palette", version)]
/// Command-line interface for the `palette` binary.
struct Cli {
    /// Optional subcommand.
    #[command(subcommand)]
    command: Option<Command>,

    /// Logging controls
    #[command(flatten)]
    log: logging::LogArgs,

    /// Optional path to the palette file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
/// Top-level CLI subcommands.
enum Command {
    /// Load and validate a palette file then exit.
    Check {
        /// Path to the palette file (defaults to ~/.palette/palette.ron)
        path: Option<PathBuf>,
    },
}

/// Resolve and load the palette file, exiting with a readable error on failure.
fn load_or_exit(explicit: Option<&Path>) -> PaletteFile {
    let loaded = resolve_config_path(explicit).and_then(|p| {
        debug!(path = %p.display(), "loading_palette_file");
        load_from_path(&p)
    });
    match loaded {
        Ok(file) => file,
        Err(e) => {
            eprintln!("{}", e.pretty());
            process::exit(1);
        }
    }
}

/// Turn a loaded file into a palette whose `run` entries execute in the shell.
fn build_palette(file: &PaletteFile) -> palette_engine::Result<Palette> {
    let registry = Registry::from_spec(&file.commands, |c| match &c.run {
        Some(cmd) => shell::shell_action(cmd.clone()),
        None => Action::noop(),
    });
    PaletteBuilder::from_config(&file.palette)
        .registry(registry)
        .build()
}

/// Summary line printed by `check`.
fn summarize(file: &PaletteFile) -> Result<String, palette_engine::Error> {
    let hotkey = Hotkey::parse(&file.palette.hotkey, Platform::current())?;
    let groups = match &file.commands {
        RegistrySpec::Flat(cmds) => usize::from(!cmds.is_empty()),
        RegistrySpec::Grouped(g) => g.len(),
    };
    let mut out = format!(
        "OK: {} commands in {} group(s), hotkey {}",
        file.commands.len(),
        groups,
        hotkey
    );
    let dups = file.commands.duplicate_ids();
    if !dups.is_empty() {
        out.push_str(&format!("\nwarning: duplicate ids: {}", dups.join(", ")));
    }
    Ok(out)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log);

    if let Some(Command::Check { path }) = &cli.command {
        let explicit = path.as_deref().or(cli.config.as_deref());
        let file = load_or_exit(explicit);
        match summarize(&file) {
            Ok(summary) => println!("{summary}"),
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
        return;
    }

    let file = load_or_exit(cli.config.as_deref());
    let palette = match build_palette(&file) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    match session::run(palette).await {
        Ok(0) => {}
        Ok(failed) => {
            error!(failed, "actions_failed");
            process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "session_failed");
            process::exit(1);
        }
    }
}
