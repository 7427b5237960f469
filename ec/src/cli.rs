//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// editorctx - SQL editor session context
#[derive(Parser)]
#[command(
    name = "ec",
    about = "Replay editor session scripts against a live session context",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay a session script and print emitted events and final state
    Run {
        /// YAML script of session steps
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Override the project the session starts in
        #[arg(short, long)]
        project: Option<String>,

        /// Print the final state as YAML instead of text
        #[arg(long)]
        yaml: bool,
    },

    /// Print the effective configuration
    Config,
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("editorctx")
        .join("logs")
        .join("editorctx.log");
    debug!(?path, "get_log_path: returning path");
    path
}
