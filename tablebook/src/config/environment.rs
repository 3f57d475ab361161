//! Environment variable handling for configuration overrides.
//!
//! `TABLEBOOK_*` variables override values read from configuration files.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use tablebook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds a value of the wrong shape
    /// (a non-numeric window, an invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var("TABLEBOOK_CONFLICT_WINDOW_MINUTES") {
            config.conflict_window_minutes =
                Some(Self::parse_number("TABLEBOOK_CONFLICT_WINDOW_MINUTES", &val)?);
        }

        if let Ok(val) = env::var("TABLEBOOK_SPAN_MIDNIGHT") {
            config.span_midnight = Some(Self::parse_bool("TABLEBOOK_SPAN_MIDNIGHT", &val)?);
        }

        if let Ok(val) = env::var("TABLEBOOK_MIN_LEAD_MINUTES") {
            let minutes = Self::parse_number("TABLEBOOK_MIN_LEAD_MINUTES", &val)?;
            let booking = config.booking.get_or_insert_with(Default::default);
            booking.min_lead_minutes = Some(minutes);
        }

        if let Ok(val) = env::var("TABLEBOOK_MAX_ADVANCE_DAYS") {
            let days = Self::parse_number("TABLEBOOK_MAX_ADVANCE_DAYS", &val)?;
            let booking = config.booking.get_or_insert_with(Default::default);
            booking.max_advance_days = Some(days);
        }

        if let Ok(val) = env::var("TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds =
                Some(Self::parse_number("TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS", &val)?);
        }

        if let Ok(val) = env::var("TABLEBOOK_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("TABLEBOOK_DISABLE_AUTOINIT", &val)?);
        }

        if let Ok(val) = env::var("TABLEBOOK_OUTPUT_FORMAT") {
            config.output_format = Some(OutputFormat::from_str(&val).map_err(|message| {
                Error::Validation {
                    field: "TABLEBOOK_OUTPUT_FORMAT".into(),
                    message,
                }
            })?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn parse_number<T: FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Must be a non-negative integer, got '{s}'"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct EnvGuard(&'static [&'static str]);

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for key in self.0 {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_parse_bool_true_variants() {
        for input in ["true", "TRUE", "1", "yes", "YES", "on", "ON"] {
            assert!(EnvironmentConfig::parse_bool("test", input).unwrap(), "{input}");
        }
    }

    #[test]
    fn test_parse_bool_false_variants() {
        for input in ["false", "FALSE", "0", "no", "NO", "off", "OFF"] {
            assert!(!EnvironmentConfig::parse_bool("test", input).unwrap(), "{input}");
        }
    }

    #[test]
    fn test_parse_bool_invalid() {
        let result = EnvironmentConfig::parse_bool("test", "maybe");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_number_rejects_negative() {
        let err = EnvironmentConfig::parse_number::<u32>("TABLEBOOK_X", "-5").unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "TABLEBOOK_X"));
    }

    #[test]
    #[serial]
    fn test_apply_overrides_no_env_vars() {
        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_apply_overrides_reads_variables() {
        let _guard = EnvGuard(&[
            "TABLEBOOK_CONFLICT_WINDOW_MINUTES",
            "TABLEBOOK_SPAN_MIDNIGHT",
            "TABLEBOOK_MAX_ADVANCE_DAYS",
            "TABLEBOOK_OUTPUT_FORMAT",
        ]);
        env::set_var("TABLEBOOK_CONFLICT_WINDOW_MINUTES", "90");
        env::set_var("TABLEBOOK_SPAN_MIDNIGHT", "yes");
        env::set_var("TABLEBOOK_MAX_ADVANCE_DAYS", "7");
        env::set_var("TABLEBOOK_OUTPUT_FORMAT", "csv");

        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();

        assert_eq!(config.conflict_window_minutes, Some(90));
        assert_eq!(config.span_midnight, Some(true));
        assert_eq!(config.booking.unwrap().max_advance_days, Some(7));
        assert_eq!(config.booking.unwrap().min_lead_minutes, None);
        assert_eq!(config.output_format, Some(OutputFormat::Csv));
    }

    #[test]
    #[serial]
    fn test_apply_overrides_invalid_value() {
        let _guard = EnvGuard(&["TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS"]);
        env::set_var("TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS", "soon");

        let err = EnvironmentConfig::apply_overrides(&mut Config::default()).unwrap_err();
        assert!(err.to_string().contains("TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS"));
    }
}
