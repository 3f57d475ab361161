//! Limits on how far ahead a reservation may be made.

use chrono::{Duration, NaiveDateTime};

use crate::config::{Config, DEFAULT_MAX_ADVANCE_DAYS, DEFAULT_MIN_LEAD_MINUTES};
use crate::error::ValidationError;

/// The range of instants, relative to now, that can be booked.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, NaiveDate};
/// use tablebook::operations::BookingWindow;
///
/// let now = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let window = BookingWindow::default();
///
/// assert!(window.check(now, now + Duration::hours(2)).is_ok());
/// assert!(window.check(now, now + Duration::minutes(30)).is_err());
/// assert!(window.check(now, now + Duration::days(31)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    min_lead: Duration,
    max_advance: Duration,
}

impl BookingWindow {
    /// Creates a window from a minimum lead time and a maximum horizon.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is negative or the lead time
    /// reaches past the horizon.
    pub fn new(min_lead: Duration, max_advance: Duration) -> Result<Self, ValidationError> {
        if min_lead < Duration::zero() {
            return Err(ValidationError::new(
                "booking.min_lead_minutes",
                "cannot be negative",
            ));
        }
        if max_advance <= min_lead {
            return Err(ValidationError::new(
                "booking.max_advance_days",
                "must reach past the minimum lead time",
            ));
        }
        Ok(Self {
            min_lead,
            max_advance,
        })
    }

    /// Returns the minimum lead time.
    #[must_use]
    pub const fn min_lead(&self) -> Duration {
        self.min_lead
    }

    /// Returns the maximum horizon.
    #[must_use]
    pub const fn max_advance(&self) -> Duration {
        self.max_advance
    }

    /// Checks `requested` against the window opening at `now`. Both bounds
    /// are exclusive: the instant must lie strictly after `now + min_lead`
    /// and strictly before `now + max_advance`.
    ///
    /// # Errors
    ///
    /// Returns a `reserved_for` validation error when the instant is too
    /// soon, too far ahead, or the window itself is not representable.
    pub fn check(&self, now: NaiveDateTime, requested: NaiveDateTime) -> Result<(), ValidationError> {
        let earliest = now
            .checked_add_signed(self.min_lead)
            .ok_or_else(|| ValidationError::new("reserved_for", "minimum lead time out of range"))?;
        if requested <= earliest {
            return Err(ValidationError::new(
                "reserved_for",
                format!(
                    "must be more than {} minute(s) from now (after {earliest})",
                    self.min_lead.num_minutes()
                ),
            ));
        }

        let latest = now
            .checked_add_signed(self.max_advance)
            .ok_or_else(|| ValidationError::new("reserved_for", "booking horizon out of range"))?;
        if requested >= latest {
            return Err(ValidationError::new(
                "reserved_for",
                format!(
                    "must be less than {} day(s) ahead (before {latest})",
                    self.max_advance.num_days()
                ),
            ));
        }

        Ok(())
    }
}

impl Default for BookingWindow {
    fn default() -> Self {
        Self {
            min_lead: Duration::minutes(i64::from(DEFAULT_MIN_LEAD_MINUTES)),
            max_advance: Duration::days(i64::from(DEFAULT_MAX_ADVANCE_DAYS)),
        }
    }
}

/// Takes the configured bounds as they are; `ConfigValidator` is what
/// rejects an unusable pair.
impl From<&Config> for BookingWindow {
    fn from(config: &Config) -> Self {
        let booking = config.booking.unwrap_or_default();
        let lead = booking.min_lead_minutes.unwrap_or(DEFAULT_MIN_LEAD_MINUTES);
        let days = booking.max_advance_days.unwrap_or(DEFAULT_MAX_ADVANCE_DAYS);
        Self {
            min_lead: Duration::minutes(i64::from(lead)),
            max_advance: Duration::days(i64::from(days)),
        }
    }
}
