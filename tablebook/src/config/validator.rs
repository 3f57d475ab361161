//! Configuration validation.

use crate::availability::MAX_CONFLICT_WINDOW_MINUTES;
use crate::config::schema::{
    BookingConfig, Config, DEFAULT_MAX_ADVANCE_DAYS, DEFAULT_MIN_LEAD_MINUTES,
};
use crate::error::{Error, Result};

/// Upper bound for the lock wait, in seconds.
pub const MAX_LOCK_WAIT_SECONDS: u64 = 3600;

/// Upper bound for the booking horizon, in days.
pub const MAX_ADVANCE_DAYS: u32 = 3650;

/// Validates a merged or partial configuration.
///
/// # Examples
///
/// ```
/// use tablebook::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(minutes) = config.conflict_window_minutes {
            if minutes == 0 || minutes > MAX_CONFLICT_WINDOW_MINUTES {
                return Err(Error::Validation {
                    field: "conflict_window_minutes".into(),
                    message: format!(
                        "must be between 1 and {MAX_CONFLICT_WINDOW_MINUTES}, got {minutes}"
                    ),
                });
            }
        }

        if let Some(seconds) = config.maximum_lock_wait_seconds {
            if seconds == 0 || seconds > MAX_LOCK_WAIT_SECONDS {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: format!("must be between 1 and {MAX_LOCK_WAIT_SECONDS}, got {seconds}"),
                });
            }
        }

        if let Some(ref booking) = config.booking {
            Self::validate_booking(booking)?;
        }

        Ok(())
    }

    /// Checks the effective window: unset bounds take their defaults, so a
    /// lead time alone is still measured against the default horizon.
    fn validate_booking(booking: &BookingConfig) -> Result<()> {
        let days = booking.max_advance_days.unwrap_or(DEFAULT_MAX_ADVANCE_DAYS);
        if days == 0 || days > MAX_ADVANCE_DAYS {
            return Err(Error::Validation {
                field: "booking.max_advance_days".into(),
                message: format!("must be between 1 and {MAX_ADVANCE_DAYS}, got {days}"),
            });
        }

        let lead = booking.min_lead_minutes.unwrap_or(DEFAULT_MIN_LEAD_MINUTES);
        if u64::from(lead) >= u64::from(days) * 24 * 60 {
            return Err(Error::Validation {
                field: "booking.min_lead_minutes".into(),
                message: format!(
                    "lead time of {lead} minutes leaves no bookable time within {days} day(s)"
                ),
            });
        }

        Ok(())
    }
}
