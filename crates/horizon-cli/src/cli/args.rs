use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "horizon",
    version,
    about = "Terminate the local master supervisors so they can be restarted"
)]
pub struct Cli {
    /// Config file (default: horizon.yaml when present)
    #[arg(long, global = true, env = "HORIZON_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Terminate the master supervisor so it can be restarted
    Terminate(super::commands::terminate::TerminateArgs),
    /// Show the last published restart marker and wait flag
    Status(super::commands::status::StatusArgs),
    Version,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
