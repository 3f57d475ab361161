//! Shared test utilities for database unit tests.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::restaurant::{OperatingHours, Restaurant, RestaurantId};
use crate::table::{Capacity, NewTable, TableNumber};
use crate::user::{User, UserId};

/// Creates a temporary test database.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive for the lifetime of the test process.
    std::mem::forget(dir);

    db
}

/// Opening window between two whole hours.
#[must_use]
pub fn hours(opening: u32, closing: u32) -> OperatingHours {
    OperatingHours::new(
        NaiveTime::from_hms_opt(opening, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(closing, 0, 0).unwrap(),
    )
    .unwrap()
}

/// An instant in May 2030.
#[must_use]
pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2030, 5, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// A table description with the given number and capacity.
#[must_use]
pub fn table(restaurant_id: RestaurantId, number: u32, capacity: u8) -> NewTable {
    NewTable::new(
        restaurant_id,
        TableNumber::try_from(number).unwrap(),
        Capacity::try_from(capacity).unwrap(),
    )
}

/// Stores a restaurant open between two whole hours.
pub fn seed_restaurant(db: &mut Database, opening: u32, closing: u32) -> RestaurantId {
    let draft = Restaurant::builder("Test Kitchen", hours(opening, closing))
        .build()
        .unwrap();
    db.create_restaurant(&draft).unwrap().id()
}

/// Stores a customer with the given email.
pub fn seed_user(db: &mut Database, email: &str) -> UserId {
    let draft = User::builder(email, "Test", "Guest").build().unwrap();
    db.create_user(&draft).unwrap().id()
}
