//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, contact::ContactCommands, init::InitArgs, menu::MenuArgs,
    project::ProjectCommands,
};

#[derive(Parser)]
#[command(name = "poised")]
#[command(author, version, about = "Poised PMS - construction project tracker")]
#[command(
    long_about = "A console tool for tracking construction projects and their \
                  architects, contractors, and customers in a local SQLite database."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to the project database (default: POISED_DB, config file, or
    /// the per-user data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create and initialize the project database
    Init(InitArgs),

    /// Project management (add, update, finalize, find, list)
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Architect management
    #[command(subcommand)]
    Architect(ContactCommands),

    /// Contractor management
    #[command(subcommand)]
    Contractor(ContactCommands),

    /// Customer management
    #[command(subcommand)]
    Customer(ContactCommands),

    /// Interactive menu (the classic numbered console interface)
    Menu(MenuArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically pick based on context (tsv for lists)
    #[default]
    Auto,
    /// Tab-separated columns (for piping)
    Tsv,
    /// JSON (for programming)
    Json,
    /// CSV (for spreadsheets)
    Csv,
}
