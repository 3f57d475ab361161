//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AvailabilityCommand, CancelCommand, CompletionsCommand, InitCommand, ListCommand,
    MarkCommand, ReserveCommand, RestaurantCommand, ShowCommand, TableCommand, UserCommand,
};
use crate::utils::GlobalOptions;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for restaurant table reservations.
#[derive(Parser)]
#[command(name = "tablebook")]
#[command(version, about = "Book restaurant tables without double booking", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "TABLEBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "TABLEBOOK_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization
    #[arg(long, global = true)]
    pub disable_autoinit: bool,

    /// Additional configuration file, applied over the data directory's
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Acting user, as an email or numeric id
    #[arg(long, value_name = "USER", global = true, env = "TABLEBOOK_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Collects the global flags.
    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            verbose: self.verbose,
            quiet: self.quiet,
            data_dir: self.data_dir.clone(),
            busy_timeout: self.busy_timeout,
            disable_autoinit: self.disable_autoinit,
            config: self.config.clone(),
            user: self.user.clone(),
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize tablebook data directory and database
    Init(InitCommand),

    /// Manage users
    User(UserCommand),

    /// Manage restaurants
    Restaurant(RestaurantCommand),

    /// Manage tables
    Table(TableCommand),

    /// Book a table for the acting user
    Reserve(ReserveCommand),

    /// Cancel one of the acting user's reservations
    Cancel(CancelCommand),

    /// Show free tables for a party without booking
    Availability(AvailabilityCommand),

    /// List reservations
    List(ListCommand),

    /// Show one of the acting user's reservations
    Show(ShowCommand),

    /// Move a reservation along its lifecycle
    Mark(MarkCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

impl Command {
    /// Runs the selected command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), crate::error::CliError> {
        match self {
            Command::Init(cmd) => cmd.execute(global),
            Command::User(cmd) => cmd.execute(global),
            Command::Restaurant(cmd) => cmd.execute(global),
            Command::Table(cmd) => cmd.execute(global),
            Command::Reserve(cmd) => cmd.execute(global),
            Command::Cancel(cmd) => cmd.execute(global),
            Command::Availability(cmd) => cmd.execute(global),
            Command::List(cmd) => cmd.execute(global),
            Command::Show(cmd) => cmd.execute(global),
            Command::Mark(cmd) => cmd.execute(global),
            Command::Completions(cmd) => cmd.execute(global),
        }
    }
}
