//! Reservation allocation, cancellation, and status changes.
//!
//! Allocation reads availability and inserts the booking inside one
//! `BEGIN IMMEDIATE` transaction, so concurrent allocators serialize on the
//! database write lock. The store's overlap trigger backs this up: an insert
//! that would double-book a table aborts and surfaces as
//! [`Error::Conflict`].

use chrono::NaiveDateTime;
use rusqlite::{Connection, ErrorCode, TransactionBehavior};

use crate::availability::{AvailabilityResolver, ConflictPolicy};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::database::{store_conflict_policy, Database};
use crate::directory::UserDirectory;
use crate::error::{Error, Result};
use crate::operations::booking::BookingWindow;
use crate::reservation::{
    validate_special_request, PartySize, Reservation, ReservationId, ReservationStatus,
};
use crate::restaurant::RestaurantId;
use crate::table::Table;
use crate::user::UserId;

/// A request for a new reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    /// The restaurant to book at.
    pub restaurant_id: RestaurantId,
    /// The guest making the booking.
    pub user_id: UserId,
    /// Requested wall-clock instant.
    pub reserved_for: NaiveDateTime,
    /// Number of guests.
    pub party_size: PartySize,
    /// Optional free-text request.
    pub special_request: Option<String>,
}

impl ReservationRequest {
    /// Creates a request without a special request.
    #[must_use]
    pub const fn new(
        restaurant_id: RestaurantId,
        user_id: UserId,
        reserved_for: NaiveDateTime,
        party_size: PartySize,
    ) -> Self {
        Self {
            restaurant_id,
            user_id,
            reserved_for,
            party_size,
            special_request: None,
        }
    }

    /// Creates a request on behalf of whoever `directory` names as the
    /// current user.
    ///
    /// # Errors
    ///
    /// Propagates the directory's error when no current user is known.
    pub fn for_current_user(
        directory: &dyn UserDirectory,
        restaurant_id: RestaurantId,
        reserved_for: NaiveDateTime,
        party_size: PartySize,
    ) -> Result<Self> {
        let user_id = directory.resolve_current_user_id()?;
        Ok(Self::new(restaurant_id, user_id, reserved_for, party_size))
    }

    /// Sets the special request.
    #[must_use]
    pub fn with_special_request(mut self, request: Option<String>) -> Self {
        self.special_request = request;
        self
    }
}

/// Turns lock contention into a retryable conflict.
fn contention_to_conflict(err: Error) -> Error {
    match err {
        Error::Database(rusqlite::Error::SqliteFailure(ref e, _))
            if matches!(e.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) =>
        {
            Error::Conflict {
                details: "another booking holds the database lock; retry".into(),
            }
        }
        other => other,
    }
}

/// Allocates tables to reservation requests.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use tablebook::config::ConfigBuilder;
/// use tablebook::operations::{ReservationAllocator, ReservationRequest};
/// use tablebook::{Database, DatabaseConfig, PartySize, RestaurantId, SystemClock, UserId};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/tablebook.db")).unwrap();
/// let config = ConfigBuilder::new().build().unwrap();
/// let allocator = ReservationAllocator::from_config(&config, SystemClock);
///
/// let at = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap().and_hms_opt(19, 0, 0).unwrap();
/// let request = ReservationRequest::new(
///     RestaurantId::new(1),
///     UserId::new(1),
///     at,
///     PartySize::try_from(4).unwrap(),
/// );
/// let reservation = allocator.create_reservation(&mut db, &request).unwrap();
/// println!("Booked table {}", reservation.table_id());
/// ```
#[derive(Debug, Clone)]
pub struct ReservationAllocator<C: Clock = SystemClock> {
    resolver: AvailabilityResolver,
    window: BookingWindow,
    clock: C,
}

impl<C: Clock> ReservationAllocator<C> {
    /// Creates an allocator from its parts.
    pub const fn new(policy: ConflictPolicy, window: BookingWindow, clock: C) -> Self {
        Self {
            resolver: AvailabilityResolver::new(policy),
            window,
            clock,
        }
    }

    /// Creates an allocator with the policy and window from `config`.
    pub fn from_config(config: &Config, clock: C) -> Self {
        Self::new(ConflictPolicy::from(config), BookingWindow::from(config), clock)
    }

    /// Returns the conflict policy.
    pub const fn policy(&self) -> &ConflictPolicy {
        self.resolver.policy()
    }

    /// Returns the booking window.
    pub const fn booking_window(&self) -> &BookingWindow {
        &self.window
    }

    /// Books the smallest free table that seats the party.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the instant is outside the booking window or
    ///   the special request is too long
    /// - [`Error::RestaurantNotFound`] / [`Error::UserNotFound`]
    /// - [`Error::OutsideOperatingHours`] if the time of day is outside
    ///   `[opening, closing]`
    /// - [`Error::NoTableAvailable`] if every suitable table is taken
    /// - [`Error::Conflict`] on lock contention or a concurrent double booking
    pub fn create_reservation(
        &self,
        db: &mut Database,
        request: &ReservationRequest,
    ) -> Result<Reservation> {
        let now = self.clock.now();
        self.window.check(now.naive_utc(), request.reserved_for)?;
        validate_special_request(request.special_request.as_deref())?;

        let stored = self
            .allocate(db, request)
            .map_err(contention_to_conflict)?;

        log::info!(
            "reservation {} booked table {} for {} at {}",
            stored.id(),
            stored.table_id(),
            stored.party_size(),
            stored.reserved_for()
        );

        Database::require_reservation(db.connection(), stored.id())
    }

    fn allocate(&self, db: &mut Database, request: &ReservationRequest) -> Result<Reservation> {
        let tx = db
            .connection_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        store_conflict_policy(&tx, self.resolver.policy())?;

        let restaurant = Database::require_restaurant(&tx, request.restaurant_id)?;
        let hours = restaurant.hours();
        let time = request.reserved_for.time();
        if !hours.contains(time) {
            return Err(Error::OutsideOperatingHours {
                requested: time,
                opening: hours.opening(),
                closing: hours.closing(),
            });
        }

        Database::require_user(&tx, request.user_id)?;

        let candidates = self.resolver.resolve(
            &tx,
            request.restaurant_id,
            request.reserved_for,
            request.party_size,
        )?;
        let Some(table) = candidates.first() else {
            return Err(Error::NoTableAvailable {
                restaurant_id: request.restaurant_id,
                party_size: request.party_size.value(),
                requested: request.reserved_for,
            });
        };

        let draft = Reservation::builder(
            table.id(),
            request.user_id,
            request.reserved_for,
            request.party_size,
        )
        .special_request(request.special_request.clone())
        .created_at(self.clock.now())
        .build()?;

        let stored = Database::insert_reservation(&tx, &draft)?;
        tx.commit()?;
        Ok(stored)
    }

    /// Cancels a reservation on behalf of its owner.
    ///
    /// # Errors
    ///
    /// - [`Error::ReservationNotFound`] if the reservation does not exist or
    ///   belongs to another user
    /// - [`Error::NotModifiable`] unless the status is pending or confirmed
    pub fn cancel_reservation(
        &self,
        db: &mut Database,
        reservation_id: ReservationId,
        user_id: UserId,
    ) -> Result<Reservation> {
        let conn = db.connection();
        let mut reservation = Database::reservation_for_user(conn, reservation_id, user_id)?;
        let previous = reservation.status();
        reservation.cancel()?;

        Self::apply_status(conn, &reservation, previous)?;
        log::info!("reservation {reservation_id} cancelled by user {user_id}");

        Database::require_reservation(conn, reservation_id)
    }

    /// Moves a reservation along the staff lifecycle.
    ///
    /// # Errors
    ///
    /// - [`Error::ReservationNotFound`] if the reservation does not exist
    /// - [`Error::InvalidStatusTransition`] if the lifecycle forbids the move,
    ///   including any move to cancelled
    pub fn update_status(
        &self,
        db: &mut Database,
        reservation_id: ReservationId,
        next: ReservationStatus,
    ) -> Result<Reservation> {
        let conn = db.connection();
        let mut reservation = Database::require_reservation(conn, reservation_id)?;
        let previous = reservation.status();

        if next == ReservationStatus::Cancelled {
            return Err(Error::InvalidStatusTransition {
                from: previous,
                to: next,
            });
        }
        reservation.transition_to(next)?;

        Self::apply_status(conn, &reservation, previous)?;
        log::info!("reservation {reservation_id} moved from {previous} to {next}");

        Database::require_reservation(conn, reservation_id)
    }

    /// Writes the in-memory status if the row still has `previous`.
    fn apply_status(
        conn: &Connection,
        reservation: &Reservation,
        previous: ReservationStatus,
    ) -> Result<()> {
        let applied = Database::compare_and_set_status(
            conn,
            reservation.id(),
            previous,
            reservation.status(),
        )
        .map_err(contention_to_conflict)?;

        if applied {
            return Ok(());
        }

        // Someone changed the row in between; report against its new state.
        let current = Database::require_reservation(conn, reservation.id())?;
        Err(if reservation.status() == ReservationStatus::Cancelled {
            Error::NotModifiable {
                id: current.id(),
                status: current.status(),
            }
        } else {
            Error::InvalidStatusTransition {
                from: current.status(),
                to: reservation.status(),
            }
        })
    }

    /// Lists free tables for a party, smallest sufficient capacity first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RestaurantNotFound`] if the restaurant does not exist.
    pub fn check_availability(
        &self,
        conn: &Connection,
        restaurant_id: RestaurantId,
        requested: NaiveDateTime,
        party_size: PartySize,
    ) -> Result<Vec<Table>> {
        self.resolver
            .resolve(conn, restaurant_id, requested, party_size)
    }
}
