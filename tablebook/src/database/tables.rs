//! Dining table storage and the registry's table listing.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::restaurant::RestaurantId;
use crate::table::{Capacity, NewTable, Table, TableId, TableNumber};

use super::connection::Database;
use super::convert::{conversion_error, is_constraint, map_unique};
use super::schema::TABLE_COLUMNS;

pub(super) fn row_to_table(row: &rusqlite::Row<'_>) -> rusqlite::Result<Table> {
    let id: i64 = row.get(0)?;
    let restaurant_id: i64 = row.get(1)?;
    let number: u32 = row.get(2)?;
    let capacity: u8 = row.get(3)?;

    Ok(Table::from_parts(
        TableId::new(id),
        RestaurantId::new(restaurant_id),
        TableNumber::try_from(number).map_err(conversion_error)?,
        Capacity::try_from(capacity).map_err(conversion_error)?,
    ))
}

impl Database {
    /// Adds a table to a restaurant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RestaurantNotFound`] if the restaurant does not
    /// exist, or [`Error::AlreadyExists`] if the number is taken there.
    pub fn add_table(&mut self, table: NewTable) -> Result<Table> {
        Self::require_restaurant(&self.conn, table.restaurant_id)?;

        self.conn
            .execute(
                "INSERT INTO dining_tables (restaurant_id, table_number, capacity) VALUES (?, ?, ?)",
                params![
                    table.restaurant_id.value(),
                    table.number.value(),
                    table.capacity.value()
                ],
            )
            .map_err(|e| {
                map_unique(e, || {
                    format!(
                        "table {} in restaurant {}",
                        table.number, table.restaurant_id
                    )
                })
            })?;

        let id = TableId::new(self.conn.last_insert_rowid());
        log::info!(
            "added table {} (capacity {}) to restaurant {}",
            table.number,
            table.capacity,
            table.restaurant_id
        );
        Self::require_table(&self.conn, id)
    }

    /// Changes the number and capacity of a table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableNotFound`] if the table does not exist, or
    /// [`Error::AlreadyExists`] if the new number is taken.
    pub fn update_table(
        &mut self,
        id: TableId,
        number: TableNumber,
        capacity: Capacity,
    ) -> Result<Table> {
        let changed = self
            .conn
            .execute(
                "UPDATE dining_tables SET table_number = ?, capacity = ? WHERE id = ?",
                params![number.value(), capacity.value(), id.value()],
            )
            .map_err(|e| map_unique(e, || format!("table number {number}")))?;
        if changed == 0 {
            return Err(Error::TableNotFound { id });
        }
        log::info!("updated table {id}");
        Self::require_table(&self.conn, id)
    }

    /// Deletes a table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableNotFound`] if the table does not exist, or
    /// [`Error::TableInUse`] while any reservation references it.
    pub fn delete_table(&mut self, id: TableId) -> Result<()> {
        match self
            .conn
            .execute("DELETE FROM dining_tables WHERE id = ?", [id.value()])
        {
            Ok(0) => Err(Error::TableNotFound { id }),
            Ok(_) => {
                log::info!("deleted table {id}");
                Ok(())
            }
            Err(e) if is_constraint(&e, rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => {
                Err(Error::TableInUse { id })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Gets a table by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_table(conn: &Connection, id: TableId) -> Result<Option<Table>> {
        let sql = format!("SELECT {TABLE_COLUMNS} FROM dining_tables WHERE id = ?");
        Ok(conn.query_row(&sql, [id.value()], row_to_table).optional()?)
    }

    /// Gets a table by id, failing when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableNotFound`] if the table does not exist.
    pub fn require_table(conn: &Connection, id: TableId) -> Result<Table> {
        Self::get_table(conn, id)?.ok_or(Error::TableNotFound { id })
    }

    /// Lists the tables of a restaurant ordered by table number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RestaurantNotFound`] if the restaurant does not exist.
    pub fn list_tables(conn: &Connection, restaurant_id: RestaurantId) -> Result<Vec<Table>> {
        Self::require_restaurant(conn, restaurant_id)?;

        let sql = format!(
            "SELECT {TABLE_COLUMNS} FROM dining_tables WHERE restaurant_id = ? ORDER BY table_number"
        );
        let mut stmt = conn.prepare_cached(&sql)?;
        let tables = stmt
            .query_map([restaurant_id.value()], row_to_table)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, seed_restaurant, seed_user, table};
    use crate::reservation::{PartySize, Reservation};
    use chrono::NaiveDate;

    #[test]
    fn test_add_and_list_tables() {
        let mut db = create_test_database();
        let restaurant = seed_restaurant(&mut db, 11, 22);

        db.add_table(table(restaurant, 2, 6)).unwrap();
        db.add_table(table(restaurant, 1, 2)).unwrap();

        let tables = Database::list_tables(db.connection(), restaurant).unwrap();
        let numbers: Vec<u32> = tables.iter().map(|t| t.number().value()).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(tables[1].capacity().value(), 6);
    }

    #[test]
    fn test_list_tables_unknown_restaurant() {
        let db = create_test_database();
        let err = Database::list_tables(db.connection(), RestaurantId::new(99)).unwrap_err();
        assert!(matches!(err, Error::RestaurantNotFound { .. }));
    }

    #[test]
    fn test_list_tables_empty_restaurant() {
        let mut db = create_test_database();
        let restaurant = seed_restaurant(&mut db, 11, 22);
        assert!(Database::list_tables(db.connection(), restaurant)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_add_table_duplicate_number() {
        let mut db = create_test_database();
        let restaurant = seed_restaurant(&mut db, 11, 22);
        db.add_table(table(restaurant, 1, 2)).unwrap();

        let err = db.add_table(table(restaurant, 1, 4)).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { .. }));
    }

    #[test]
    fn test_same_number_in_different_restaurants() {
        let mut db = create_test_database();
        let first = seed_restaurant(&mut db, 11, 22);
        let second = seed_restaurant(&mut db, 11, 22);
        db.add_table(table(first, 1, 2)).unwrap();
        db.add_table(table(second, 1, 2)).unwrap();
    }

    #[test]
    fn test_add_table_unknown_restaurant() {
        let mut db = create_test_database();
        let err = db.add_table(table(RestaurantId::new(5), 1, 2)).unwrap_err();
        assert!(matches!(err, Error::RestaurantNotFound { .. }));
    }

    #[test]
    fn test_update_table() {
        let mut db = create_test_database();
        let restaurant = seed_restaurant(&mut db, 11, 22);
        let added = db.add_table(table(restaurant, 1, 2)).unwrap();

        let updated = db
            .update_table(
                added.id(),
                TableNumber::try_from(7).unwrap(),
                Capacity::try_from(8).unwrap(),
            )
            .unwrap();
        assert_eq!(updated.number().value(), 7);
        assert_eq!(updated.capacity().value(), 8);
    }

    #[test]
    fn test_delete_table_in_use() {
        let mut db = create_test_database();
        let restaurant = seed_restaurant(&mut db, 11, 22);
        let added = db.add_table(table(restaurant, 1, 4)).unwrap();
        let user = seed_user(&mut db, "guest@example.com");

        let at = NaiveDate::from_ymd_opt(2030, 5, 1)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        let draft = Reservation::builder(added.id(), user, at, PartySize::try_from(2).unwrap())
            .build()
            .unwrap();
        Database::insert_reservation(db.connection(), &draft).unwrap();

        let err = db.delete_table(added.id()).unwrap_err();
        assert!(matches!(err, Error::TableInUse { .. }));

        let err = db.delete_restaurant(restaurant).unwrap_err();
        assert!(matches!(err, Error::TableInUse { .. }));
    }

    #[test]
    fn test_delete_table() {
        let mut db = create_test_database();
        let restaurant = seed_restaurant(&mut db, 11, 22);
        let added = db.add_table(table(restaurant, 1, 4)).unwrap();

        db.delete_table(added.id()).unwrap();
        assert!(matches!(
            db.delete_table(added.id()),
            Err(Error::TableNotFound { .. })
        ));
    }

    #[test]
    fn test_deleting_restaurant_cascades_tables() {
        let mut db = create_test_database();
        let restaurant = seed_restaurant(&mut db, 11, 22);
        let added = db.add_table(table(restaurant, 1, 4)).unwrap();

        db.delete_restaurant(restaurant).unwrap();
        assert!(Database::get_table(db.connection(), added.id())
            .unwrap()
            .is_none());
    }
}
