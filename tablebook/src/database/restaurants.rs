//! Restaurant storage and the registry's operating-hours lookup.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use crate::error::{Error, Result};
use crate::restaurant::{Address, NewRestaurant, OperatingHours, Restaurant, RestaurantId};
use crate::table::TableId;

use super::connection::Database;
use super::convert::{
    conversion_error, format_time, parse_time, unix_secs_to_utc, utc_to_unix_secs,
};
use super::schema::RESTAURANT_COLUMNS;

fn row_to_restaurant(row: &rusqlite::Row<'_>) -> rusqlite::Result<Restaurant> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let opening: String = row.get(2)?;
    let closing: String = row.get(3)?;
    let street: Option<String> = row.get(4)?;
    let zip_code: Option<u32> = row.get(5)?;
    let city: Option<String> = row.get(6)?;
    let country: Option<String> = row.get(7)?;
    let created_at: i64 = row.get(8)?;

    let hours = OperatingHours::new(parse_time(&opening)?, parse_time(&closing)?)
        .map_err(conversion_error)?;

    let address = match (street, zip_code, city, country) {
        (Some(street), Some(zip_code), Some(city), Some(country)) => {
            Some(Address::new(street, zip_code, city, country).map_err(conversion_error)?)
        }
        _ => None,
    };

    Ok(Restaurant::from_parts(
        RestaurantId::new(id),
        NewRestaurant {
            name,
            hours,
            address,
        },
        unix_secs_to_utc(created_at)?,
    ))
}

fn address_params(
    address: Option<&Address>,
) -> (Option<&str>, Option<u32>, Option<&str>, Option<&str>) {
    address.map_or((None, None, None, None), |a| {
        (
            Some(a.street()),
            Some(a.zip_code()),
            Some(a.city()),
            Some(a.country()),
        )
    })
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl Database {
    /// Stores a new restaurant.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_restaurant(&mut self, draft: &NewRestaurant) -> Result<Restaurant> {
        let (street, zip_code, city, country) = address_params(draft.address());
        self.conn.execute(
            r"INSERT INTO restaurants
              (name, opening_time, closing_time, street, zip_code, city, country, created_at)
              VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                draft.name(),
                format_time(draft.hours().opening()),
                format_time(draft.hours().closing()),
                street,
                zip_code,
                city,
                country,
                utc_to_unix_secs(Utc::now()),
            ],
        )?;
        let id = RestaurantId::new(self.conn.last_insert_rowid());
        log::info!("created restaurant {id} '{}'", draft.name());
        Self::require_restaurant(&self.conn, id)
    }

    /// Replaces the name, hours and address of a restaurant.
    ///
    /// Existing reservations are left untouched even if they now fall
    /// outside the new hours.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RestaurantNotFound`] if the restaurant does not exist.
    pub fn update_restaurant(
        &mut self,
        id: RestaurantId,
        draft: &NewRestaurant,
    ) -> Result<Restaurant> {
        let (street, zip_code, city, country) = address_params(draft.address());
        let changed = self.conn.execute(
            r"UPDATE restaurants
              SET name = ?, opening_time = ?, closing_time = ?,
                  street = ?, zip_code = ?, city = ?, country = ?
              WHERE id = ?",
            params![
                draft.name(),
                format_time(draft.hours().opening()),
                format_time(draft.hours().closing()),
                street,
                zip_code,
                city,
                country,
                id.value(),
            ],
        )?;
        if changed == 0 {
            return Err(Error::RestaurantNotFound { id });
        }
        log::info!("updated restaurant {id}");
        Self::require_restaurant(&self.conn, id)
    }

    /// Deletes a restaurant and its tables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RestaurantNotFound`] if it does not exist, or
    /// [`Error::TableInUse`] naming the first table that still has
    /// reservations.
    pub fn delete_restaurant(&mut self, id: RestaurantId) -> Result<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if Self::get_restaurant(&tx, id)?.is_none() {
            return Err(Error::RestaurantNotFound { id });
        }

        let referenced: Option<i64> = tx
            .query_row(
                r"SELECT r.table_id FROM reservations r
                  JOIN dining_tables t ON t.id = r.table_id
                  WHERE t.restaurant_id = ?
                  ORDER BY r.table_id LIMIT 1",
                [id.value()],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(table_id) = referenced {
            return Err(Error::TableInUse {
                id: TableId::new(table_id),
            });
        }

        tx.execute("DELETE FROM restaurants WHERE id = ?", [id.value()])?;
        tx.commit()?;
        log::info!("deleted restaurant {id}");
        Ok(())
    }

    /// Gets a restaurant by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_restaurant(conn: &Connection, id: RestaurantId) -> Result<Option<Restaurant>> {
        let sql = format!("SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = ?");
        Ok(conn
            .query_row(&sql, [id.value()], row_to_restaurant)
            .optional()?)
    }

    /// Gets a restaurant by id, failing when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RestaurantNotFound`] if the restaurant does not exist.
    pub fn require_restaurant(conn: &Connection, id: RestaurantId) -> Result<Restaurant> {
        Self::get_restaurant(conn, id)?.ok_or(Error::RestaurantNotFound { id })
    }

    /// Returns the opening window of a restaurant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RestaurantNotFound`] if the restaurant does not exist.
    pub fn operating_hours(conn: &Connection, id: RestaurantId) -> Result<OperatingHours> {
        Ok(Self::require_restaurant(conn, id)?.hours())
    }

    /// Lists all restaurants ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_restaurants(conn: &Connection) -> Result<Vec<Restaurant>> {
        let sql = format!("SELECT {RESTAURANT_COLUMNS} FROM restaurants ORDER BY name COLLATE NOCASE, id");
        let mut stmt = conn.prepare(&sql)?;
        let restaurants = stmt
            .query_map([], row_to_restaurant)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(restaurants)
    }

    /// Lists restaurants whose name contains `term`, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn search_restaurants(conn: &Connection, term: &str) -> Result<Vec<Restaurant>> {
        let sql = format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants \
             WHERE name LIKE '%' || ? || '%' ESCAPE '\\' ORDER BY name COLLATE NOCASE, id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let restaurants = stmt
            .query_map([escape_like(term.trim())], row_to_restaurant)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(restaurants)
    }
}
