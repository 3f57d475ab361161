//! Reservation store.
//!
//! Statements here take a plain `&Connection` so they can run inside a
//! caller's transaction.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::reservation::{NewReservation, PartySize, Reservation, ReservationId, ReservationStatus};
use crate::restaurant::RestaurantId;
use crate::table::TableId;
use crate::user::UserId;

use super::connection::Database;
use super::convert::{
    conversion_error, format_instant, parse_instant, parse_stored, unix_secs_to_utc,
    utc_to_unix_secs,
};
use super::schema::{INSERT_RESERVATION, OVERLAP_MARKER, RESERVATION_COLUMNS};

fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let table_id: i64 = row.get(1)?;
    let user_id: i64 = row.get(2)?;
    let reserved_for: String = row.get(3)?;
    let party_size: u8 = row.get(4)?;
    let status: String = row.get(5)?;
    let special_request: Option<String> = row.get(6)?;
    let created_at: i64 = row.get(7)?;

    Ok(Reservation::from_parts(
        ReservationId::new(id),
        NewReservation {
            table_id: TableId::new(table_id),
            user_id: UserId::new(user_id),
            reserved_for: parse_instant(&reserved_for)?,
            party_size: PartySize::try_from(party_size).map_err(conversion_error)?,
            status: parse_stored::<ReservationStatus>(&status)?,
            special_request,
            created_at: unix_secs_to_utc(created_at)?,
        },
    ))
}

/// Whether an insert was rejected by the overlap trigger.
pub(crate) fn is_overlap_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, Some(message))
            if e.code == rusqlite::ErrorCode::ConstraintViolation && message.contains(OVERLAP_MARKER)
    )
}

/// Narrows a reservation listing. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    /// Only reservations at this restaurant.
    pub restaurant_id: Option<RestaurantId>,
    /// Only reservations owned by this user.
    pub user_id: Option<UserId>,
    /// Only reservations on this calendar date.
    pub date: Option<NaiveDate>,
    /// Only reservations in this status.
    pub status: Option<ReservationStatus>,
}

impl ReservationFilter {
    /// Restricts the listing to one restaurant.
    #[must_use]
    pub const fn restaurant(mut self, id: RestaurantId) -> Self {
        self.restaurant_id = Some(id);
        self
    }

    /// Restricts the listing to one user.
    #[must_use]
    pub const fn user(mut self, id: UserId) -> Self {
        self.user_id = Some(id);
        self
    }

    /// Restricts the listing to one date.
    #[must_use]
    pub const fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Restricts the listing to one status.
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl Database {
    /// Inserts a reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if the store rejects the row because it
    /// overlaps an active reservation on the same table.
    pub fn insert_reservation(conn: &Connection, draft: &NewReservation) -> Result<Reservation> {
        let mut stmt = conn.prepare_cached(INSERT_RESERVATION)?;
        stmt.execute(params![
            draft.table_id.value(),
            draft.user_id.value(),
            format_instant(draft.reserved_for),
            draft.party_size.value(),
            draft.status.as_str(),
            draft.special_request,
            utc_to_unix_secs(draft.created_at),
        ])
        .map_err(|e| {
            if is_overlap_violation(&e) {
                Error::Conflict {
                    details: format!(
                        "table {} is already booked near {}",
                        draft.table_id, draft.reserved_for
                    ),
                }
            } else {
                e.into()
            }
        })?;

        let id = ReservationId::new(conn.last_insert_rowid());
        Ok(Reservation::from_parts(id, draft.clone()))
    }

    /// Gets a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?");
        Ok(conn
            .query_row(&sql, [id.value()], row_to_reservation)
            .optional()?)
    }

    /// Gets a reservation by id, failing when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservationNotFound`] if the reservation does not
    /// exist.
    pub fn require_reservation(conn: &Connection, id: ReservationId) -> Result<Reservation> {
        Self::get_reservation(conn, id)?.ok_or(Error::ReservationNotFound { id })
    }

    /// Gets a reservation on behalf of a user.
    ///
    /// Another user's reservation is reported exactly like a missing one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservationNotFound`] if the reservation does not
    /// exist or belongs to someone else.
    pub fn reservation_for_user(
        conn: &Connection,
        id: ReservationId,
        user_id: UserId,
    ) -> Result<Reservation> {
        Self::get_reservation(conn, id)?
            .filter(|r| r.user_id() == user_id)
            .ok_or(Error::ReservationNotFound { id })
    }

    /// Lists a user's reservations, latest requested instant first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn user_reservations(conn: &Connection, user_id: UserId) -> Result<Vec<Reservation>> {
        Self::list_reservations(conn, &ReservationFilter::default().user(user_id))
    }

    /// Lists reservations matching a filter, latest requested instant first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations(
        conn: &Connection,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(restaurant_id) = filter.restaurant_id {
            clauses.push(
                "table_id IN (SELECT id FROM dining_tables WHERE restaurant_id = ?)",
            );
            values.push(Value::Integer(restaurant_id.value()));
        }
        if let Some(user_id) = filter.user_id {
            clauses.push("user_id = ?");
            values.push(Value::Integer(user_id.value()));
        }
        if let Some(date) = filter.date {
            clauses.push("date(reserved_for) = ?");
            values.push(Value::Text(date.format("%Y-%m-%d").to_string()));
        }
        if let Some(status) = filter.status {
            clauses.push("status = ?");
            values.push(Value::Text(status.as_str().to_string()));
        }

        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations{where_clause} \
             ORDER BY reserved_for DESC, id DESC"
        );

        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map(params_from_iter(values.iter()), row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    /// Lists active reservations of a restaurant whose instant lies within
    /// `[from, to]`, ordered by table and time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn active_reservations_between(
        conn: &Connection,
        restaurant_id: RestaurantId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE table_id IN (SELECT id FROM dining_tables WHERE restaurant_id = ?) \
               AND status <> 'cancelled' \
               AND reserved_for BETWEEN ? AND ? \
             ORDER BY table_id, reserved_for"
        );
        let mut stmt = conn.prepare_cached(&sql)?;
        let reservations = stmt
            .query_map(
                params![
                    restaurant_id.value(),
                    format_instant(from),
                    format_instant(to)
                ],
                row_to_reservation,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    /// Moves a reservation to `next` only if it is currently `expected`.
    ///
    /// Returns `false` when the row did not match, leaving it unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn compare_and_set_status(
        conn: &Connection,
        id: ReservationId,
        expected: ReservationStatus,
        next: ReservationStatus,
    ) -> Result<bool> {
        let changed = conn.execute(
            "UPDATE reservations SET status = ? WHERE id = ? AND status = ?",
            params![next.as_str(), id.value(), expected.as_str()],
        )?;
        Ok(changed == 1)
    }
}
