//! # quest-cli
//!
//! Command-line interface for Eternal Quest.
//!
//! - `quest goal create/list/record` — manage goals and record progress
//! - `quest score` — total points, level and title
//! - `quest achievements` — unlocked achievements and the catalog
//! - `quest export/import` — copy the quest to or from another save file
//! - `quest shell` — interactive, menu-driven session

mod commands;
mod render;
mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quest_goal::QuestConfig;
use tracing_subscriber::EnvFilter;

use crate::session::Session;

/// Eternal Quest — set goals, record progress, level up.
#[derive(Parser)]
#[command(name = "quest", version, about)]
struct Cli {
    /// Project root directory holding `.quest/` (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Save file to use instead of the configured one.
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
    /// Show total points, level and progress to the next level.
    Score,
    /// Show unlocked achievements.
    Achievements,
    /// Save the current quest to another file.
    Export {
        /// Destination file (overwritten).
        path: PathBuf,
    },
    /// Replace the current quest with a save file.
    Import {
        /// Save file to read.
        path: PathBuf,
    },
    /// Start an interactive session.
    Shell,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("quest_goal=warn,quest_cli=warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let config = QuestConfig::load(&project_root);
    tracing::debug!(root = %project_root.display(), "using project");

    // Import replaces the save file, and the shell can load another one, so
    // neither is blocked by an unreadable save file.
    let mut session = match &cli.command {
        Commands::Import { .. } => Session::open_empty(config, cli.file),
        Commands::Shell => Session::open_or_recover(config, cli.file),
        _ => Session::open(config, cli.file)?,
    };

    match &cli.command {
        Commands::Goal { command } => commands::goal::execute(command, &mut session),
        Commands::Score => commands::progress::score(&session),
        Commands::Achievements => commands::progress::achievements(&session),
        Commands::Export { path } => commands::transfer::export(&session, path),
        Commands::Import { path } => commands::transfer::import(&mut session, path),
        Commands::Shell => commands::shell::execute(&mut session),
    }
}
