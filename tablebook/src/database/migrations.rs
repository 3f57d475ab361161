//! Database schema management and version checks.

use rusqlite::{params, Connection};

use crate::availability::ConflictPolicy;
use crate::error::{Error, Result};

use super::schema::{
    CONFLICT_WINDOW_KEY, CREATE_METADATA_TABLE, CREATE_OVERLAP_TRIGGER,
    CREATE_RESERVATIONS_TABLE, CREATE_RESERVATION_TABLE_INDEX, CREATE_RESERVATION_USER_INDEX,
    CREATE_RESTAURANTS_TABLE, CREATE_TABLES_TABLE, CREATE_TABLE_RESTAURANT_INDEX,
    CREATE_USERS_TABLE, CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
    SPAN_MIDNIGHT_KEY, UPSERT_METADATA,
};

/// Initializes the database schema.
///
/// Creates every table, index and trigger, stores the default conflict
/// policy and records the schema version. Runs in one transaction.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```no_run
/// use rusqlite::Connection;
/// use tablebook::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("BEGIN IMMEDIATE")?;
    let result = create_objects(conn);
    match result {
        Ok(()) => conn.execute_batch("COMMIT")?,
        Err(_) => {
            let _ = conn.execute_batch("ROLLBACK");
        }
    }
    result
}

fn create_objects(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;
    conn.execute(CREATE_USERS_TABLE, [])?;
    conn.execute(CREATE_RESTAURANTS_TABLE, [])?;
    conn.execute(CREATE_TABLES_TABLE, [])?;
    conn.execute(CREATE_RESERVATIONS_TABLE, [])?;

    conn.execute(CREATE_TABLE_RESTAURANT_INDEX, [])?;
    conn.execute(CREATE_RESERVATION_TABLE_INDEX, [])?;
    conn.execute(CREATE_RESERVATION_USER_INDEX, [])?;

    conn.execute_batch(CREATE_OVERLAP_TRIGGER)?;

    store_conflict_policy(conn, &ConflictPolicy::default())?;
    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;

    Ok(())
}

/// Stores the conflict policy consulted by the overlap trigger.
///
/// # Errors
///
/// Returns an error if the metadata table cannot be written.
pub fn store_conflict_policy(conn: &Connection, policy: &ConflictPolicy) -> Result<()> {
    conn.execute(
        UPSERT_METADATA,
        params![CONFLICT_WINDOW_KEY, policy.window().num_seconds().to_string()],
    )?;
    conn.execute(
        UPSERT_METADATA,
        params![
            SPAN_MIDNIGHT_KEY,
            if policy.spans_midnight() { "1" } else { "0" }
        ],
    )?;
    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than a missing
/// metadata table or row (which indicate version 0).
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(rusqlite::Error::SqliteFailure(_, Some(ref message)))
            if message.contains("no such table") =>
        {
            Ok(0)
        }
        Err(e) => Err(e.into()),
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// A fresh database is initialized. Any other version than
/// [`CURRENT_SCHEMA_VERSION`](super::schema::CURRENT_SCHEMA_VERSION) is
/// rejected with [`Error::UnsupportedSchemaVersion`].
///
/// # Errors
///
/// Returns an error if the version is incompatible or initialization fails.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        initialize_schema(conn)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_connection() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn test_initialize_schema() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, CURRENT_SCHEMA_VERSION);

        for table in ["users", "restaurants", "dining_tables", "reservations"] {
            let count: i32 = conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
                .unwrap();
            assert_eq!(count, 0, "{table} should start empty");
        }
    }

    #[test]
    fn test_get_schema_version_uninitialized() {
        let conn = create_test_connection();
        assert_eq!(get_schema_version(&conn).unwrap(), 0);
    }

    #[test]
    fn test_check_schema_compatibility_fresh_database() {
        let conn = create_test_connection();
        check_schema_compatibility(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);

        // Idempotent on an initialized database.
        check_schema_compatibility(&conn).unwrap();
    }

    #[test]
    fn test_check_schema_compatibility_newer_version() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();
        conn.execute(
            "UPDATE metadata SET value = '999' WHERE key = 'schema_version'",
            [],
        )
        .unwrap();

        let err = check_schema_compatibility(&conn).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedSchemaVersion { found: 999, .. }
        ));
    }

    #[test]
    fn test_default_policy_stored() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();

        let window: String = conn
            .query_row(
                "SELECT value FROM metadata WHERE key = 'conflict_window_secs'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(window, "7200");

        let span: String = conn
            .query_row(
                "SELECT value FROM metadata WHERE key = 'span_midnight'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(span, "0");
    }

    #[test]
    fn test_schema_creates_all_indices() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();

        let index_count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(index_count, 3);

        let trigger_count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'trigger'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(trigger_count, 1);
    }
}
