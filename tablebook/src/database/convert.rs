//! Conversions between domain values and their stored representation.

use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};

use crate::error::{Error, ValidationError};
use crate::reservation::INSTANT_FORMAT;
use crate::restaurant::TIME_FORMAT;

/// Converts a conversion failure into a row-mapping error.
pub(super) fn conversion_error<E>(err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::ToSqlConversionFailure(Box::new(err))
}

pub(super) fn utc_to_unix_secs(time: DateTime<Utc>) -> i64 {
    time.timestamp()
}

pub(super) fn unix_secs_to_utc(secs: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        conversion_error(ValidationError::new(
            "created_at",
            format!("timestamp {secs} is out of range"),
        ))
    })
}

pub(super) fn format_instant(instant: NaiveDateTime) -> String {
    instant.format(INSTANT_FORMAT).to_string()
}

pub(super) fn parse_instant(text: &str) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, INSTANT_FORMAT).map_err(conversion_error)
}

pub(super) fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub(super) fn parse_time(text: &str) -> rusqlite::Result<NaiveTime> {
    NaiveTime::parse_from_str(text, TIME_FORMAT).map_err(conversion_error)
}

/// Parses a stored enum-like value through its `FromStr` impl.
pub(super) fn parse_stored<T>(text: &str) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = ValidationError>,
{
    text.parse().map_err(conversion_error)
}

/// Whether an error is a `SQLite` constraint failure with the given
/// extended code.
pub(super) fn is_constraint(err: &rusqlite::Error, extended_code: std::os::raw::c_int) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation && e.extended_code == extended_code
    )
}

/// Maps a UNIQUE violation to [`Error::AlreadyExists`].
pub(super) fn map_unique(err: rusqlite::Error, resource: impl FnOnce() -> String) -> Error {
    if is_constraint(&err, rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE) {
        Error::AlreadyExists {
            resource: resource(),
        }
    } else {
        err.into()
    }
}
