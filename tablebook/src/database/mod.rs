//! Database layer for persistent storage of restaurants, tables, users and
//! reservations.
//!
//! This module provides a SQLite-based store: connection management, schema
//! versioning, the registry lookups and the reservation store.
//!
//! Read operations are associated functions taking a `&Connection`, so they
//! work both on a plain connection and inside a transaction.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveTime;
//! use tablebook::database::{Database, DatabaseConfig};
//! use tablebook::{OperatingHours, Restaurant};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/tablebook.db")).unwrap();
//!
//! let hours = OperatingHours::new(
//!     NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
//!     NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
//! ).unwrap();
//! let restaurant = db
//!     .create_restaurant(&Restaurant::builder("Trattoria", hours).build().unwrap())
//!     .unwrap();
//!
//! for table in Database::list_tables(db.connection(), restaurant.id()).unwrap() {
//!     println!("{table:?}");
//! }
//! ```

mod config;
mod connection;
mod convert;
pub mod migrations;
mod reservations;
mod restaurants;
mod schema;
mod tables;
mod users;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use reservations::ReservationFilter;

pub use migrations::{
    check_schema_compatibility, get_schema_version, initialize_schema, store_conflict_policy,
};
