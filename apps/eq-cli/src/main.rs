//! # eq-cli
//!
//! Command-line front end for the Eternal Quest goal tracker.
//!
//! - `eq goal add <kind> ...` — create a goal
//! - `eq goal list` — show goals with their completion marks
//! - `eq goal record [N]` — record goal N, or every goal
//! - `eq status` — score and level
//!
//! `--file <PATH>` works with every command and points it at another goal
//! file, e.g. to keep separate save slots.

mod banner;
mod commands;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use eq_goals::QuestConfig;
use tracing_subscriber::EnvFilter;

/// Eternal Quest — earn points for the goals you keep.
#[derive(Parser)]
#[command(name = "eq", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Goal file to load and save instead of the configured one.
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage goals.
    Goal {
        #[command(subcommand)]
        command: commands::goal::GoalCommands,
    },
    /// Show score and level.
    Status,
}

/// Project config with the `--file` override applied.
fn resolve_config(project_root: &Path, file: Option<&Path>) -> anyhow::Result<QuestConfig> {
    let mut config = QuestConfig::load(project_root)?;
    if let Some(file) = file {
        config.goals_file = file.to_path_buf();
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't mix with command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("eq_goals=info".parse()?)
                .add_directive("eq=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let config = resolve_config(&project_root, cli.file.as_deref())?;
    tracing::debug!(
        root = %project_root.display(),
        goals = %config.goals_file.display(),
        "using project"
    );

    match &cli.command {
        Commands::Goal { command } => commands::goal::execute(command, &config),
        Commands::Status => {
            commands::goal::execute(&commands::goal::GoalCommands::Status, &config)
        }
    }
}
