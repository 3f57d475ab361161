//! Data directory initialization.
//!
//! `plan_init` inspects the data directory and lists the steps needed;
//! `init_database` applies them. Dry runs print the plan and stop there.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE;
use crate::database::DATABASE_FILE;
use crate::error::{Error, Result};
use crate::{Database, DatabaseConfig};

/// What `init` was asked to do.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database, discarding its data.
    pub overwrite: bool,
    /// Write the commented configuration template.
    pub create_config: bool,
}

impl InitOptions {
    /// Creates options for `data_dir` with overwrite and config writing off.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
        }
    }

    /// Sets whether an existing database is replaced.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether the configuration template is written.
    #[must_use]
    pub fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }
}

/// One filesystem action of an initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitStep {
    /// Create the data directory and its parents.
    CreateDataDir(PathBuf),
    /// Create a fresh database with the current schema.
    CreateDatabase(PathBuf),
    /// Delete the database and its WAL side files, then create it afresh.
    ReplaceDatabase(PathBuf),
    /// Write the commented configuration template.
    WriteConfig(PathBuf),
    /// A configuration file exists and is left alone.
    KeepConfig(PathBuf),
}

impl fmt::Display for InitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDataDir(path) => write!(f, "Create data directory: {}", path.display()),
            Self::CreateDatabase(path) => write!(f, "Create database: {}", path.display()),
            Self::ReplaceDatabase(path) => write!(f, "Replace database: {}", path.display()),
            Self::WriteConfig(path) => write!(f, "Create configuration file: {}", path.display()),
            Self::KeepConfig(path) => {
                write!(f, "Keep existing configuration file: {}", path.display())
            }
        }
    }
}

/// Steps an initialization performed, in order.
#[derive(Debug)]
pub struct InitResult {
    /// The initialized data directory.
    pub data_dir: PathBuf,
    /// Steps applied, in order.
    pub steps: Vec<InitStep>,
}

impl InitResult {
    /// Whether the data directory had to be created.
    #[must_use]
    pub fn created_data_dir(&self) -> bool {
        self.steps
            .iter()
            .any(|step| matches!(step, InitStep::CreateDataDir(_)))
    }

    /// Whether an existing database was replaced.
    #[must_use]
    pub fn replaced_database(&self) -> bool {
        self.steps
            .iter()
            .any(|step| matches!(step, InitStep::ReplaceDatabase(_)))
    }

    /// Whether the configuration template was written.
    #[must_use]
    pub fn wrote_config(&self) -> bool {
        self.steps
            .iter()
            .any(|step| matches!(step, InitStep::WriteConfig(_)))
    }
}

const CONFIG_TEMPLATE: &str = r"# tablebook configuration
# Every setting is optional; the values below are the defaults.

# Bookings on one table closer than this many minutes collide.
# conflict_window_minutes: 120

# Compare bookings across midnight instead of only on the same date.
# span_midnight: false

# booking:
#   min_lead_minutes: 60
#   max_advance_days: 30

# maximum_lock_wait_seconds: 5

# output_format: table
";

/// Works out what `init_database` would do, without touching anything.
///
/// # Errors
///
/// Returns a validation error on the `database` field when a database
/// already exists and `overwrite` is not set.
pub fn plan_init(options: &InitOptions) -> Result<Vec<InitStep>> {
    let mut steps = Vec::new();
    if !options.data_dir.exists() {
        steps.push(InitStep::CreateDataDir(options.data_dir.clone()));
    }

    let db_path = options.data_dir.join(DATABASE_FILE);
    if !db_path.exists() {
        steps.push(InitStep::CreateDatabase(db_path));
    } else if options.overwrite {
        steps.push(InitStep::ReplaceDatabase(db_path));
    } else {
        return Err(Error::Validation {
            field: "database".into(),
            message: format!(
                "database already exists at {}; use --overwrite to replace it",
                db_path.display()
            ),
        });
    }

    if options.create_config {
        let config_path = options.data_dir.join(CONFIG_FILE);
        if config_path.exists() {
            steps.push(InitStep::KeepConfig(config_path));
        } else {
            steps.push(InitStep::WriteConfig(config_path));
        }
    }

    Ok(steps)
}

fn remove_database_files(db_path: &Path) -> Result<()> {
    fs::remove_file(db_path)?;
    for suffix in ["-wal", "-shm"] {
        let mut side = db_path.as_os_str().to_owned();
        side.push(suffix);
        let side = PathBuf::from(side);
        if side.exists() {
            fs::remove_file(side)?;
        }
    }
    Ok(())
}

fn apply(step: &InitStep) -> Result<()> {
    match step {
        InitStep::CreateDataDir(path) => fs::create_dir_all(path)?,
        InitStep::CreateDatabase(path) => {
            // Opening creates the schema.
            Database::open(DatabaseConfig::new(path))?;
        }
        InitStep::ReplaceDatabase(path) => {
            log::warn!("replacing existing database at {}", path.display());
            remove_database_files(path)?;
            Database::open(DatabaseConfig::new(path))?;
        }
        InitStep::WriteConfig(path) => fs::write(path, CONFIG_TEMPLATE)?,
        InitStep::KeepConfig(_) => {}
    }
    Ok(())
}

/// Initializes the data directory and database.
///
/// # Errors
///
/// Fails as [`plan_init`] does, or with the I/O or database error of the
/// first step that cannot be applied.
///
/// # Examples
///
/// ```no_run
/// use tablebook::operations::{init_database, InitOptions};
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/tablebook-test")).with_create_config(true);
/// let result = init_database(&options)?;
/// assert!(result.wrote_config());
/// # Ok::<(), tablebook::Error>(())
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let steps = plan_init(options)?;
    for step in &steps {
        log::debug!("init: {step}");
        apply(step)?;
    }
    Ok(InitResult {
        data_dir: options.data_dir.clone(),
        steps,
    })
}
