//! Main entry point for the tablebook CLI.
//!
//! This is the command-line interface for the tablebook reservation system.
//! Registry commands (`user`, `restaurant`, `table`) set up the venues;
//! `reserve`, `cancel` and `availability` drive the allocator.

use clap::Parser;
use tablebook_cli::Cli;

fn main() {
    let cli = Cli::parse();

    let _logger = tablebook::init_logger(cli.verbose, cli.quiet);

    let global = cli.global_options();
    let result = cli.command.execute(&global);

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
