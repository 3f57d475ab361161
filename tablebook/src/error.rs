//! Error types for the tablebook library.
//!
//! This module provides the error hierarchy for every operation in the
//! library, using `thiserror` for ergonomic error handling.

use std::fmt;
use std::path::PathBuf;

use chrono::{NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::reservation::{ReservationId, ReservationStatus};
use crate::restaurant::RestaurantId;
use crate::table::TableId;

/// Result type alias for operations that may fail with a tablebook error.
///
/// # Examples
///
/// ```
/// use tablebook::{Error, Result};
///
/// fn example_operation() -> Result<u8> {
///     Ok(4)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the tablebook library.
#[derive(Debug, Error)]
pub enum Error {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The restaurant does not exist.
    #[error("restaurant {id} not found")]
    RestaurantNotFound {
        /// The requested restaurant id.
        id: RestaurantId,
    },

    /// The table does not exist.
    #[error("table {id} not found")]
    TableNotFound {
        /// The requested table id.
        id: TableId,
    },

    /// The reservation does not exist, or belongs to somebody else.
    #[error("reservation {id} not found")]
    ReservationNotFound {
        /// The requested reservation id.
        id: ReservationId,
    },

    /// The user does not exist.
    #[error("user {reference} not found")]
    UserNotFound {
        /// The id or email that was looked up.
        reference: String,
    },

    /// The requested time of day is outside the restaurant's hours.
    #[error("{requested} is outside operating hours {opening}-{closing}")]
    OutsideOperatingHours {
        /// The requested time of day.
        requested: NaiveTime,
        /// Opening time of the restaurant.
        opening: NaiveTime,
        /// Closing time of the restaurant.
        closing: NaiveTime,
    },

    /// Every suitable table is taken around the requested instant.
    #[error("no table available for {party_size} guest(s) at restaurant {restaurant_id} on {requested}")]
    NoTableAvailable {
        /// The restaurant that was searched.
        restaurant_id: RestaurantId,
        /// Number of guests requested.
        party_size: u8,
        /// The requested instant.
        requested: NaiveDateTime,
    },

    /// The reservation can no longer be changed by its owner.
    #[error("reservation {id} cannot be modified in status {status}")]
    NotModifiable {
        /// The reservation id.
        id: ReservationId,
        /// The reservation's current status.
        status: ReservationStatus,
    },

    /// A status change is not allowed by the reservation lifecycle.
    #[error("cannot move reservation from {from} to {to}")]
    InvalidStatusTransition {
        /// Current status.
        from: ReservationStatus,
        /// Requested status.
        to: ReservationStatus,
    },

    /// A concurrent allocation collided with this one. Safe to retry.
    #[error("reservation conflict: {details}")]
    Conflict {
        /// Details about the collision.
        details: String,
    },

    /// The table is still referenced by reservations.
    #[error("table {id} still has reservations")]
    TableInUse {
        /// The table id.
        id: TableId,
    },

    /// A unique value is already taken.
    #[error("{resource} already exists")]
    AlreadyExists {
        /// Description of the duplicated resource.
        resource: String,
    },

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

/// A field-level validation failure raised by domain builders.
///
/// Converted into [`Error::Validation`] at the library boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check if the error reports a missing (or hidden) resource.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::{Error, RestaurantId};
    ///
    /// let err = Error::RestaurantNotFound { id: RestaurantId::new(7) };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RestaurantNotFound { .. }
                | Self::TableNotFound { .. }
                | Self::ReservationNotFound { .. }
                | Self::UserNotFound { .. }
        )
    }

    /// Check if repeating the same request may succeed.
    ///
    /// Contention errors are retryable; `NoTableAvailable` is not, since the
    /// request itself has to change.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::Error;
    ///
    /// let err = Error::Conflict { details: "table 3 taken".into() };
    /// assert!(err.is_retryable());
    /// ```
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { .. } | Self::LockTimeout { .. })
    }
}
