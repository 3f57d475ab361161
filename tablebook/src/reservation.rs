//! Reservation types and the reservation status lifecycle.
//!
//! A reservation binds a user and a party to one table at a requested
//! instant. Instants are restaurant wall-clock times without a zone.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ValidationError};
use crate::table::TableId;
use crate::user::UserId;

#[cfg(test)]
mod proptests;

/// Storage and display format of reservation instants.
pub const INSTANT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Maximum length of a special request, in characters.
pub const MAX_SPECIAL_REQUEST_LEN: usize = 500;

/// Store-generated identity of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of guests in a reservation (1-20).
///
/// # Examples
///
/// ```
/// use tablebook::PartySize;
///
/// assert_eq!(PartySize::try_from(4).unwrap().value(), 4);
/// assert!(PartySize::try_from(0).is_err());
/// assert!(PartySize::try_from(21).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartySize(u8);

impl PartySize {
    /// The smallest party.
    pub const MIN: u8 = 1;

    /// The largest party.
    pub const MAX: u8 = 20;

    /// Returns the number of guests.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for PartySize {
    type Error = ValidationError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::new(
                "party_size",
                format!("must be between {} and {}", Self::MIN, Self::MAX),
            ));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for PartySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a reservation.
///
/// ```text
/// Pending -> Confirmed -> Seated -> Completed
/// Pending | Confirmed -> Cancelled
/// Confirmed | Seated -> NoShow
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Requested, not yet confirmed.
    Pending,
    /// Confirmed and holding a table.
    Confirmed,
    /// The party is at the table.
    Seated,
    /// The visit is over.
    Completed,
    /// Cancelled by the guest.
    Cancelled,
    /// The party never arrived.
    NoShow,
}

impl ReservationStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Seated,
        Self::Completed,
        Self::Cancelled,
        Self::NoShow,
    ];

    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Seated => "seated",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }

    /// Whether the owner may still change or cancel the reservation.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::ReservationStatus;
    ///
    /// assert!(ReservationStatus::Confirmed.can_be_modified());
    /// assert!(!ReservationStatus::Seated.can_be_modified());
    /// ```
    #[must_use]
    pub const fn can_be_modified(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Whether the reservation still occupies its table.
    #[must_use]
    pub const fn holds_table(self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Seated | Self::Cancelled | Self::NoShow)
                | (Self::Seated, Self::Completed | Self::NoShow)
        )
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ValidationError::new("status", format!("unknown status '{s}'")))
    }
}

/// A validated reservation that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub(crate) table_id: TableId,
    pub(crate) user_id: UserId,
    pub(crate) reserved_for: NaiveDateTime,
    pub(crate) party_size: PartySize,
    pub(crate) status: ReservationStatus,
    pub(crate) special_request: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

impl NewReservation {
    /// Returns the assigned table.
    #[must_use]
    pub const fn table_id(&self) -> TableId {
        self.table_id
    }

    /// Returns the requested instant.
    #[must_use]
    pub const fn reserved_for(&self) -> NaiveDateTime {
        self.reserved_for
    }

    /// Returns the initial status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }
}

/// A stored reservation.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Utc};
/// use tablebook::{PartySize, Reservation, ReservationStatus, TableId, UserId};
///
/// let at = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap().and_hms_opt(19, 0, 0).unwrap();
/// let draft = Reservation::builder(TableId::new(1), UserId::new(1), at, PartySize::try_from(4).unwrap())
///     .special_request(Some("window seat".into()))
///     .created_at(Utc::now())
///     .build()
///     .unwrap();
///
/// assert_eq!(draft.status(), ReservationStatus::Confirmed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    table_id: TableId,
    user_id: UserId,
    reserved_for: NaiveDateTime,
    party_size: PartySize,
    status: ReservationStatus,
    special_request: Option<String>,
    created_at: DateTime<Utc>,
}

impl Reservation {
    /// Starts building a new reservation. The default status is `Confirmed`.
    #[must_use]
    pub fn builder(
        table_id: TableId,
        user_id: UserId,
        reserved_for: NaiveDateTime,
        party_size: PartySize,
    ) -> ReservationBuilder {
        ReservationBuilder {
            table_id,
            user_id,
            reserved_for,
            party_size,
            status: ReservationStatus::Confirmed,
            special_request: None,
            created_at: None,
        }
    }

    pub(crate) fn from_parts(id: ReservationId, draft: NewReservation) -> Self {
        Self {
            id,
            table_id: draft.table_id,
            user_id: draft.user_id,
            reserved_for: draft.reserved_for,
            party_size: draft.party_size,
            status: draft.status,
            special_request: draft.special_request,
            created_at: draft.created_at,
        }
    }

    /// Returns the id.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the assigned table.
    #[must_use]
    pub const fn table_id(&self) -> TableId {
        self.table_id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the requested instant.
    #[must_use]
    pub const fn reserved_for(&self) -> NaiveDateTime {
        self.reserved_for
    }

    /// Returns the party size.
    #[must_use]
    pub const fn party_size(&self) -> PartySize {
        self.party_size
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns the special request, if any.
    #[must_use]
    pub fn special_request(&self) -> Option<&str> {
        self.special_request.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the owner may still change or cancel this reservation.
    #[must_use]
    pub const fn can_be_modified(&self) -> bool {
        self.status.can_be_modified()
    }

    /// Cancels the reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotModifiable`] unless the status is Pending or
    /// Confirmed.
    pub fn cancel(&mut self) -> Result<()> {
        if !self.can_be_modified() {
            return Err(Error::NotModifiable {
                id: self.id,
                status: self.status,
            });
        }
        self.status = ReservationStatus::Cancelled;
        Ok(())
    }

    /// Moves the reservation to `next` following the lifecycle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStatusTransition`] when the lifecycle forbids
    /// the move.
    pub fn transition_to(&mut self, next: ReservationStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(Error::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

/// Checks the length limit of a special request.
pub(crate) fn validate_special_request(
    request: Option<&str>,
) -> std::result::Result<(), ValidationError> {
    match request {
        Some(text) if text.trim().chars().count() > MAX_SPECIAL_REQUEST_LEN => {
            Err(ValidationError::new(
                "special_request",
                format!("cannot exceed {MAX_SPECIAL_REQUEST_LEN} characters"),
            ))
        }
        _ => Ok(()),
    }
}

/// Builder for [`NewReservation`] values.
#[derive(Debug)]
pub struct ReservationBuilder {
    table_id: TableId,
    user_id: UserId,
    reserved_for: NaiveDateTime,
    party_size: PartySize,
    status: ReservationStatus,
    special_request: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl ReservationBuilder {
    /// Sets the free-text request. Blank text is treated as no request.
    #[must_use]
    pub fn special_request(mut self, request: Option<String>) -> Self {
        self.special_request = request
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the reservation.
    ///
    /// Without an explicit creation timestamp the current system time is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the special request exceeds
    /// [`MAX_SPECIAL_REQUEST_LEN`] characters.
    pub fn build(self) -> std::result::Result<NewReservation, ValidationError> {
        validate_special_request(self.special_request.as_deref())?;

        Ok(NewReservation {
            table_id: self.table_id,
            user_id: self.user_id,
            reserved_for: self.reserved_for,
            party_size: self.party_size,
            status: self.status,
            special_request: self.special_request,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}
