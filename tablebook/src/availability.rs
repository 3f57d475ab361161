//! Availability resolution.
//!
//! A table is free for a request when no active reservation on it falls
//! within the proximity window of the requested instant. Among the free
//! tables, those large enough for the party are candidates, smallest first.

use std::collections::HashSet;

use chrono::{Duration, NaiveDateTime};
use rusqlite::Connection;

use crate::config::Config;
use crate::database::Database;
use crate::error::{Result, ValidationError};
use crate::reservation::PartySize;
use crate::restaurant::RestaurantId;
use crate::table::{Table, TableId};

#[cfg(test)]
mod proptests;

/// Default proximity window, in minutes.
pub const DEFAULT_CONFLICT_WINDOW_MINUTES: u32 = 120;

/// Largest accepted proximity window, in minutes.
pub const MAX_CONFLICT_WINDOW_MINUTES: u32 = 24 * 60;

/// Decides whether two reservation instants on one table collide.
///
/// Two instants conflict when they are strictly closer than the window.
/// Unless the policy spans midnight, they must also share a calendar date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tablebook::ConflictPolicy;
///
/// let day = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap();
/// let policy = ConflictPolicy::default();
///
/// let seven = day.and_hms_opt(19, 0, 0).unwrap();
/// assert!(policy.conflicts(seven, day.and_hms_opt(20, 59, 0).unwrap()));
/// assert!(!policy.conflicts(seven, day.and_hms_opt(21, 0, 0).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictPolicy {
    window: Duration,
    span_midnight: bool,
}

impl ConflictPolicy {
    /// Creates a policy with the given window that keeps the same-date rule.
    ///
    /// # Errors
    ///
    /// Returns an error unless the window is positive and at most one day.
    pub fn new(window: Duration) -> std::result::Result<Self, ValidationError> {
        if window <= Duration::zero()
            || window > Duration::minutes(i64::from(MAX_CONFLICT_WINDOW_MINUTES))
        {
            return Err(ValidationError::new(
                "conflict_window_minutes",
                format!("must be between 1 and {MAX_CONFLICT_WINDOW_MINUTES} minutes"),
            ));
        }
        Ok(Self {
            window,
            span_midnight: false,
        })
    }

    /// Sets whether conflicts are detected across midnight.
    #[must_use]
    pub const fn spanning_midnight(mut self, span_midnight: bool) -> Self {
        self.span_midnight = span_midnight;
        self
    }

    /// Returns the proximity window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Whether instants on different dates can conflict.
    #[must_use]
    pub const fn spans_midnight(&self) -> bool {
        self.span_midnight
    }

    /// Whether an existing reservation at `existing` blocks a request at
    /// `requested` on the same table.
    #[must_use]
    pub fn conflicts(&self, existing: NaiveDateTime, requested: NaiveDateTime) -> bool {
        if !self.span_midnight && existing.date() != requested.date() {
            return false;
        }
        let distance = if existing >= requested {
            existing - requested
        } else {
            requested - existing
        };
        distance < self.window
    }

    /// The inclusive range of instants that may conflict with `requested`,
    /// clamped to the representable range.
    #[must_use]
    pub fn search_bounds(&self, requested: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        let from = requested
            .checked_sub_signed(self.window)
            .unwrap_or(NaiveDateTime::MIN);
        let to = requested
            .checked_add_signed(self.window)
            .unwrap_or(NaiveDateTime::MAX);
        (from, to)
    }
}

impl Default for ConflictPolicy {
    fn default() -> Self {
        Self {
            window: Duration::minutes(i64::from(DEFAULT_CONFLICT_WINDOW_MINUTES)),
            span_midnight: false,
        }
    }
}

impl From<&Config> for ConflictPolicy {
    fn from(config: &Config) -> Self {
        let minutes = config
            .conflict_window_minutes
            .unwrap_or(DEFAULT_CONFLICT_WINDOW_MINUTES)
            .clamp(1, MAX_CONFLICT_WINDOW_MINUTES);
        Self {
            window: Duration::minutes(i64::from(minutes)),
            span_midnight: config.span_midnight.unwrap_or(false),
        }
    }
}

/// Filters and orders candidate tables.
///
/// Keeps tables that seat `party_size` (exact fit included) and are not in
/// `busy`, ordered by capacity, then table number, then id.
#[must_use]
pub fn select_candidates(
    tables: Vec<Table>,
    busy: &HashSet<TableId>,
    party_size: PartySize,
) -> Vec<Table> {
    let mut candidates: Vec<Table> = tables
        .into_iter()
        .filter(|t| t.capacity().seats(party_size.value()) && !busy.contains(&t.id()))
        .collect();
    candidates.sort_by_key(|t| (t.capacity(), t.number(), t.id()));
    candidates
}

/// Computes the free tables of a restaurant for a request.
///
/// The resolver only reads; it never takes locks of its own. The allocator
/// calls it inside its write transaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityResolver {
    policy: ConflictPolicy,
}

impl AvailabilityResolver {
    /// Creates a resolver applying `policy`.
    #[must_use]
    pub const fn new(policy: ConflictPolicy) -> Self {
        Self { policy }
    }

    /// Returns the conflict policy.
    #[must_use]
    pub const fn policy(&self) -> &ConflictPolicy {
        &self.policy
    }

    /// Returns the ids of tables blocked around `requested`.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation query fails.
    pub fn busy_tables(
        &self,
        conn: &Connection,
        restaurant_id: RestaurantId,
        requested: NaiveDateTime,
    ) -> Result<HashSet<TableId>> {
        let (from, to) = self.policy.search_bounds(requested);
        let nearby = Database::active_reservations_between(conn, restaurant_id, from, to)?;
        Ok(nearby
            .iter()
            .filter(|r| r.status().holds_table())
            .filter(|r| self.policy.conflicts(r.reserved_for(), requested))
            .map(|r| r.table_id())
            .collect())
    }

    /// Lists the candidate tables for a party at `requested`, smallest
    /// sufficient capacity first. An empty list means nothing is free.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RestaurantNotFound`](crate::Error::RestaurantNotFound)
    /// if the restaurant does not exist.
    pub fn resolve(
        &self,
        conn: &Connection,
        restaurant_id: RestaurantId,
        requested: NaiveDateTime,
        party_size: PartySize,
    ) -> Result<Vec<Table>> {
        let tables = Database::list_tables(conn, restaurant_id)?;
        let busy = self.busy_tables(conn, restaurant_id, requested)?;
        let candidates = select_candidates(tables, &busy, party_size);

        log::debug!(
            "restaurant {restaurant_id}: {} busy, {} candidate(s) for {party_size} at {requested}",
            busy.len(),
            candidates.len()
        );
        Ok(candidates)
    }
}
