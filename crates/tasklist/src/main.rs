//! CLI entry point for tasklist.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tasklist_app::{Controller, ProjectConfig};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use commands::{OutputFormat, RunOptions};

mod commands;
mod config;
mod tui;

/// In-memory task list with a trash view.
#[derive(Parser, Debug)]
#[command(
    name = "tasklist",
    version,
    about = "tasklist: add, check, trash and restore tasks from a script or a terminal UI"
)]
struct Cli {
    /// Project configuration file (defaults to .tasklist/config.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a command script to a fresh list and print the resulting view.
    Run {
        /// Script file; reads stdin when omitted.
        file: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Do not print views.
        #[arg(short, long)]
        quiet: bool,
    },

    /// Launch interactive terminal UI.
    Tui,

    /// Write the default user configuration (keybindings).
    InitConfig {
        /// Destination (defaults to the user config directory).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite without asking.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let Cli { config, verbose, cmd } = Cli::parse();

    install_tracing(verbose);

    execute_command(config.as_deref(), cmd)
}

fn execute_command(config: Option<&Path>, command: Command) -> Result<()> {
    match command {
        Command::InitConfig { output, force } => config::init_config(output.as_deref(), force),

        Command::Run { file, format, quiet } => {
            let controller = start_session(config)?;
            commands::run(controller, file.as_deref(), RunOptions { format, quiet })
        }

        Command::Tui => {
            let controller = start_session(config)?;
            let keybindings = config::keybindings::load_keybindings(None)?;
            tui::run(controller, keybindings)
        }
    }
}

fn start_session(config: Option<&Path>) -> Result<Controller> {
    let project = ProjectConfig::load(config, ".")?;
    tracing::debug!(filter = %project.list.default_filter, "session starting");
    Ok(Controller::new(project.list.default_filter))
}

const fn default_level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    }
}

fn install_tracing(verbose: u8) {
    // RUST_LOG を優先し、未指定なら -v の回数でレベルを決める。
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(verbose).into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}
