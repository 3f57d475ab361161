//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{BookingConfig, Config};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use tablebook::config::{Config, ConfigMerger};
///
/// let low = Config { conflict_window_minutes: Some(60), ..Default::default() };
/// let high = Config { conflict_window_minutes: Some(90), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.conflict_window_minutes, Some(90));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// Simple fields are overwritten when set in `source`; the booking
    /// section is merged field by field.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.conflict_window_minutes.is_some() {
            target.conflict_window_minutes = source.conflict_window_minutes;
        }

        if source.span_midnight.is_some() {
            target.span_midnight = source.span_midnight;
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(source_booking) = source.booking {
            target.booking = Some(match target.booking {
                Some(target_booking) => Self::merge_booking(target_booking, source_booking),
                None => source_booking,
            });
        }
    }

    fn merge_booking(target: BookingConfig, source: BookingConfig) -> BookingConfig {
        BookingConfig {
            min_lead_minutes: source.min_lead_minutes.or(target.min_lead_minutes),
            max_advance_days: source.max_advance_days.or(target.max_advance_days),
        }
    }
}
