//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, triggers and
//! statements shared between the store modules.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// Besides the schema version, the metadata table holds the conflict policy
/// read by the overlap trigger.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the users table.
pub const CREATE_USERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL UNIQUE COLLATE NOCASE,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        phone TEXT,
        role TEXT NOT NULL DEFAULT 'customer'
            CHECK (role IN ('customer', 'administrator')),
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the restaurants table.
///
/// Times of day are stored as `HH:MM:SS` text, which orders correctly.
pub const CREATE_RESTAURANTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS restaurants (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        opening_time TEXT NOT NULL,
        closing_time TEXT NOT NULL,
        street TEXT,
        zip_code INTEGER,
        city TEXT,
        country TEXT,
        created_at INTEGER NOT NULL,
        CHECK (opening_time <= closing_time)
    )";

/// SQL statement to create the dining tables table.
pub const CREATE_TABLES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS dining_tables (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        restaurant_id INTEGER NOT NULL
            REFERENCES restaurants(id) ON DELETE CASCADE,
        table_number INTEGER NOT NULL CHECK (table_number > 0),
        capacity INTEGER NOT NULL CHECK (capacity BETWEEN 1 AND 100),
        UNIQUE (restaurant_id, table_number)
    )";

/// SQL statement to create the reservations table.
///
/// `reserved_for` is stored as `YYYY-MM-DD HH:MM:SS` text so that SQLite's
/// date functions and lexical ordering both apply.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        table_id INTEGER NOT NULL
            REFERENCES dining_tables(id) ON DELETE RESTRICT,
        user_id INTEGER NOT NULL
            REFERENCES users(id) ON DELETE CASCADE,
        reserved_for TEXT NOT NULL,
        party_size INTEGER NOT NULL CHECK (party_size BETWEEN 1 AND 20),
        status TEXT NOT NULL CHECK (status IN
            ('pending', 'confirmed', 'seated', 'completed', 'cancelled', 'no_show')),
        special_request TEXT,
        created_at INTEGER NOT NULL
    )";

/// Index used by availability lookups.
pub const CREATE_RESERVATION_TABLE_INDEX: &str = "CREATE INDEX IF NOT EXISTS \
     idx_reservations_table_time ON reservations(table_id, reserved_for)";

/// Index used by per-user listings.
pub const CREATE_RESERVATION_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_user ON reservations(user_id)";

/// Index used by per-restaurant table listings.
pub const CREATE_TABLE_RESTAURANT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_tables_restaurant ON dining_tables(restaurant_id)";

/// Message raised by the overlap trigger.
pub const OVERLAP_MARKER: &str = "table already booked within conflict window";

/// Trigger rejecting an active reservation that overlaps another active
/// reservation on the same table.
///
/// The window and the midnight policy are read from the metadata table so
/// the store enforces the same rule the resolver applies.
pub const CREATE_OVERLAP_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS reservations_no_overlap
    BEFORE INSERT ON reservations
    FOR EACH ROW WHEN NEW.status <> 'cancelled'
    BEGIN
        SELECT RAISE(ABORT, 'table already booked within conflict window')
        WHERE EXISTS (
            SELECT 1 FROM reservations r
            WHERE r.table_id = NEW.table_id
              AND r.status <> 'cancelled'
              AND abs(strftime('%s', r.reserved_for) - strftime('%s', NEW.reserved_for))
                  < (SELECT CAST(value AS INTEGER) FROM metadata
                     WHERE key = 'conflict_window_secs')
              AND (
                  (SELECT value FROM metadata WHERE key = 'span_midnight') = '1'
                  OR date(r.reserved_for) = date(NEW.reserved_for)
              )
        );
    END";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to store one metadata entry.
pub const UPSERT_METADATA: &str = "INSERT OR REPLACE INTO metadata (key, value) VALUES (?, ?)";

/// Metadata key holding the conflict window in seconds.
pub const CONFLICT_WINDOW_KEY: &str = "conflict_window_secs";

/// Metadata key holding the midnight policy (`'1'` spans midnight).
pub const SPAN_MIDNIGHT_KEY: &str = "span_midnight";

pub(super) const RESTAURANT_COLUMNS: &str = "id, name, opening_time, closing_time, street, \
     zip_code, city, country, created_at";

pub(super) const TABLE_COLUMNS: &str = "id, restaurant_id, table_number, capacity";

pub(super) const USER_COLUMNS: &str =
    "id, email, first_name, last_name, phone, role, created_at";

pub(super) const RESERVATION_COLUMNS: &str = "id, table_id, user_id, reserved_for, party_size, \
     status, special_request, created_at";

/// SQL statement to insert a reservation.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (table_id, user_id, reserved_for, party_size, status, special_request, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";
