//! Build script for tablebook-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("tablebook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book restaurant tables without double booking")
        .long_about(
            "Command-line tool for restaurant table reservations. Each booking gets the \
             smallest free table that seats the party, and no table is booked twice within \
             the conflict window.",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("TABLEBOOK_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("TABLEBOOK_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Additional configuration file, applied over the data directory's")
                .value_name("FILE")
                .global(true),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .help("Acting user, as an email or numeric id")
                .value_name("USER")
                .global(true)
                .env("TABLEBOOK_USER"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize tablebook data directory and database")
                .long_about("Create the data directory, the database and optionally a config file"),
            Command::new("user")
                .about("Manage users")
                .long_about("Register, show, list and remove users (add|show|list|remove)"),
            Command::new("restaurant")
                .about("Manage restaurants")
                .long_about(
                    "Register, update, show, list and remove restaurants \
                     (add|update|show|list|remove)",
                ),
            Command::new("table")
                .about("Manage tables")
                .long_about("Add, update, list and remove tables (add|update|list|remove)"),
            Command::new("reserve")
                .about("Book a table for the acting user")
                .long_about("Book the smallest free table that seats the party"),
            Command::new("cancel")
                .about("Cancel one of the acting user's reservations")
                .long_about("Cancel a pending or confirmed reservation owned by the acting user"),
            Command::new("availability")
                .about("Show free tables for a party without booking")
                .long_about("List free tables, smallest sufficient capacity first"),
            Command::new("list")
                .about("List reservations")
                .long_about("List reservations filtered by restaurant, date, status or owner"),
            Command::new("show")
                .about("Show one of the acting user's reservations")
                .long_about("Display a reservation owned by the acting user"),
            Command::new("mark")
                .about("Move a reservation along its lifecycle")
                .long_about("Confirm, seat, complete or record a no-show"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("cargo sets OUT_DIR"));
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("failed to create man directory");

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).expect("failed to render man page");

    fs::write(man_dir.join("tablebook.1"), buffer).expect("failed to write man page");

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
