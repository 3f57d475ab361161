//! Configuration system for tablebook.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (`{data_dir}/config.yaml` and an explicit file)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of the merged result
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`TABLEBOOK_*`)
//! 3. Explicit configuration file (`--config`)
//! 4. Data directory config (`~/.tablebook/config.yaml`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! Loading from a specific data directory:
//!
//! ```no_run
//! use tablebook::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_data_dir(Path::new("/srv/tablebook"))
//!     .build()
//!     .unwrap();
//!
//! println!("Conflict window: {:?}", config.conflict_window_minutes);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE};
pub use merger::ConfigMerger;
pub use schema::{
    BookingConfig, Config, OutputFormat, DEFAULT_LOCK_WAIT_SECONDS, DEFAULT_MAX_ADVANCE_DAYS,
    DEFAULT_MIN_LEAD_MINUTES,
};
pub use validator::ConfigValidator;
