//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including data directory resolution, configuration loading, database
//! management, acting-user lookup and input parsing.

use crate::error::CliError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Duration;
use tablebook::database::{resolve_data_dir as default_data_dir, DATABASE_FILE};
use tablebook::{Config, ConfigBuilder, Database, DatabaseConfig, UserDirectory, UserId, UserReference};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// Additional configuration file.
    pub config: Option<PathBuf>,

    /// Acting user, as an email or numeric id.
    pub user: Option<String>,
}

/// Resolve the data directory: `--data-dir`, then the library default.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => default_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. The `--config` file
/// 3. `config.yaml` in the data directory
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;
    let mut builder = ConfigBuilder::new().with_data_dir(&data_dir);
    if let Some(ref path) = global.config {
        builder = builder.with_config_file(path);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE);

    let autoinit_disabled = global.disable_autoinit || config.disable_autoinit.unwrap_or(false);
    if !db_path.exists() && autoinit_disabled {
        return Err(CliError::NoDataDirectory);
    }

    let seconds = global
        .busy_timeout
        .unwrap_or_else(|| config.lock_wait_seconds());
    let db_config = DatabaseConfig::new(db_path).with_busy_timeout(Duration::from_secs(seconds));

    Database::open(db_config).map_err(CliError::from)
}

/// Resolves the acting user from `--user` / `TABLEBOOK_USER`.
#[derive(Debug)]
pub struct FlagDirectory<'a> {
    reference: Option<UserReference>,
    conn: &'a Connection,
}

impl<'a> FlagDirectory<'a> {
    /// Creates a directory reading the acting user from the global options.
    pub fn new(global: &GlobalOptions, conn: &'a Connection) -> Self {
        Self {
            reference: global.user.as_deref().map(UserReference::parse),
            conn,
        }
    }
}

impl UserDirectory for FlagDirectory<'_> {
    fn resolve_current_user_id(&self) -> tablebook::Result<UserId> {
        match self.reference {
            Some(ref reference) => reference.resolve(self.conn),
            None => Err(tablebook::Error::Validation {
                field: "user".into(),
                message: "no acting user; pass --user or set TABLEBOOK_USER".into(),
            }),
        }
    }
}

/// Looks up the acting user for commands that act on someone's behalf.
pub fn acting_user(global: &GlobalOptions, conn: &Connection) -> Result<UserId, CliError> {
    FlagDirectory::new(global, conn)
        .resolve_current_user_id()
        .map_err(CliError::from)
}

/// Accepted spellings of an instant.
const INSTANT_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse a wall-clock instant: `YYYY-MM-DD HH:MM[:SS]`, or with a `T`
/// between date and time.
pub fn parse_instant(input: &str) -> Result<NaiveDateTime, String> {
    let trimmed = input.trim();
    INSTANT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| format!("'{input}' is not an instant (expected YYYY-MM-DD HH:MM)"))
}

/// Parse a time of day, `HH:MM` or `HH:MM:SS`.
pub fn parse_time(input: &str) -> Result<NaiveTime, String> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| format!("'{input}' is not a time of day (expected HH:MM)"))
}

/// Parse a calendar date, `YYYY-MM-DD`.
pub fn parse_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| format!("'{input}' is not a date (expected YYYY-MM-DD)"))
}

/// Format a wall-clock instant for display.
pub fn format_instant(instant: NaiveDateTime) -> String {
    instant.format("%Y-%m-%d %H:%M").to_string()
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Print a status line to stderr unless `--quiet` was given.
pub fn report(global: &GlobalOptions, message: impl std::fmt::Display) {
    if !global.quiet {
        eprintln!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instant_formats() {
        let expected = NaiveDate::from_ymd_opt(2030, 5, 1)
            .unwrap()
            .and_hms_opt(19, 30, 0)
            .unwrap();
        assert_eq!(parse_instant("2030-05-01 19:30").unwrap(), expected);
        assert_eq!(parse_instant("2030-05-01 19:30:00").unwrap(), expected);
        assert_eq!(parse_instant("2030-05-01T19:30").unwrap(), expected);
        assert_eq!(parse_instant(" 2030-05-01T19:30:00 ").unwrap(), expected);
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        assert!(parse_instant("tomorrow").is_err());
        assert!(parse_instant("2030-05-01").is_err());
        assert!(parse_instant("2030-13-01 19:00").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse_time("11:00").unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time("22:00:30").unwrap(),
            NaiveTime::from_hms_opt(22, 0, 30).unwrap()
        );
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn test_format_instant() {
        let instant = parse_instant("2030-05-01 09:05").unwrap();
        assert_eq!(format_instant(instant), "2030-05-01 09:05");
    }

    #[test]
    fn test_data_dir_flag_wins() {
        let global = GlobalOptions {
            data_dir: Some(PathBuf::from("/srv/tablebook")),
            ..GlobalOptions::default()
        };
        assert_eq!(
            resolve_data_dir(&global).unwrap(),
            PathBuf::from("/srv/tablebook")
        );
    }

    #[test]
    fn test_missing_user_is_validation_error() {
        let conn = Connection::open_in_memory().unwrap();
        let err = acting_user(&GlobalOptions::default(), &conn).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
