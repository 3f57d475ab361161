//! Configuration schema definitions.
//!
//! Every field is optional so that partial files and environment overrides
//! can be layered on top of each other.

use serde::{Deserialize, Serialize};

/// Default minimum lead time before a booking, in minutes.
pub const DEFAULT_MIN_LEAD_MINUTES: u32 = 60;

/// Default maximum booking horizon, in days.
pub const DEFAULT_MAX_ADVANCE_DAYS: u32 = 30;

/// Default lock wait, in seconds.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use tablebook::config::{BookingConfig, Config};
///
/// let config = Config {
///     conflict_window_minutes: Some(90),
///     booking: Some(BookingConfig {
///         min_lead_minutes: Some(30),
///         max_advance_days: None,
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.conflict_window_minutes, Some(90));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Proximity window in minutes within which bookings on one table
    /// collide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_window_minutes: Option<u32>,

    /// Detect conflicts across midnight instead of only on the same date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_midnight: Option<bool>,

    /// Booking window limits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<BookingConfig>,

    /// Maximum time to wait for database lock acquisition (seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Disable automatic database initialization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_autoinit: Option<bool>,

    /// Output format for list commands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Returns the lock wait, falling back to the default.
    #[must_use]
    pub fn lock_wait_seconds(&self) -> u64 {
        self.maximum_lock_wait_seconds
            .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS)
    }
}

/// How far ahead of time a reservation may be made.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BookingConfig {
    /// Minimum minutes between now and the reserved instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_lead_minutes: Option<u32>,

    /// Maximum days between now and the reserved instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_advance_days: Option<u32>,
}

/// Output format for listing commands.
///
/// # Examples
///
/// ```
/// use tablebook::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
    /// Human-readable table format.
    #[default]
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
            Self::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "table" => Ok(Self::Table),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r"
conflict_window_minutes: 90
span_midnight: true
booking:
  min_lead_minutes: 15
  max_advance_days: 60
maximum_lock_wait_seconds: 10
disable_autoinit: true
output_format: json
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.conflict_window_minutes, Some(90));
        assert_eq!(config.span_midnight, Some(true));
        let booking = config.booking.unwrap();
        assert_eq!(booking.min_lead_minutes, Some(15));
        assert_eq!(booking.max_advance_days, Some(60));
        assert_eq!(config.lock_wait_seconds(), 10);
        assert_eq!(config.output_format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("seating:\n  max: 40\n");
        assert!(result.is_err());

        let result: Result<Config, _> = serde_yaml::from_str("booking:\n  lead: 5\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_config() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.lock_wait_seconds(), DEFAULT_LOCK_WAIT_SECONDS);
    }

    #[test]
    fn test_serialize_skips_unset_fields() {
        let config = Config {
            span_midnight: Some(false),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(yaml.trim(), "span_midnight: false");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("TSV".parse::<OutputFormat>().unwrap(), OutputFormat::Tsv);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }
}
