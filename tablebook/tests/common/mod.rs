//! Common test utilities for integration tests.
//!
//! Fixtures that seed a restaurant with tables and a guest into a
//! temporary database.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use tablebook::{
    BookingWindow, Capacity, ConflictPolicy, Database, DatabaseConfig, FixedClock, NewTable,
    OperatingHours, PartySize, ReservationAllocator, ReservationRequest, Restaurant, RestaurantId,
    TableId, TableNumber, User, UserId,
};

/// Creates a database file in a temporary directory that outlives the test.
#[allow(dead_code)]
pub fn create_test_database_path() -> PathBuf {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    // Keep the directory alive for the lifetime of the test process.
    std::mem::forget(dir);
    path
}

/// Opens a fresh temporary database.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    Database::open(DatabaseConfig::new(create_test_database_path())).unwrap()
}

/// An instant in May 2030.
#[allow(dead_code)]
pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2030, 5, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// Opening window between two whole hours.
#[allow(dead_code)]
pub fn hours(opening: u32, closing: u32) -> OperatingHours {
    OperatingHours::new(
        NaiveTime::from_hms_opt(opening, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(closing, 0, 0).unwrap(),
    )
    .unwrap()
}

/// Shorthand for a party size.
#[allow(dead_code)]
pub fn party(guests: u8) -> PartySize {
    PartySize::try_from(guests).unwrap()
}

/// The morning of 2030-05-01, before any booked instant in these tests.
#[allow(dead_code)]
pub fn morning_clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2030, 5, 1, 8, 0, 0).unwrap())
}

/// An allocator with default policy and window, pinned to [`morning_clock`].
#[allow(dead_code)]
pub fn allocator() -> ReservationAllocator<FixedClock> {
    ReservationAllocator::new(
        ConflictPolicy::default(),
        BookingWindow::default(),
        morning_clock(),
    )
}

/// A restaurant with tables and one guest, seeded into a database.
#[allow(dead_code)]
pub struct Venue {
    /// The database holding the venue.
    pub db: Database,
    /// The restaurant.
    pub restaurant: RestaurantId,
    /// Table ids in the order their capacities were given.
    pub tables: Vec<TableId>,
    /// A registered guest.
    pub guest: UserId,
}

impl Venue {
    /// Seeds a restaurant open `opening..=closing` with one table per
    /// capacity, numbered from 1.
    #[allow(dead_code)]
    pub fn seed(mut db: Database, opening: u32, closing: u32, capacities: &[u8]) -> Self {
        let draft = Restaurant::builder("Chez Test", hours(opening, closing))
            .build()
            .unwrap();
        let restaurant = db.create_restaurant(&draft).unwrap().id();

        let tables = capacities
            .iter()
            .zip(1u32..)
            .map(|(&capacity, number)| {
                db.add_table(NewTable::new(
                    restaurant,
                    TableNumber::try_from(number).unwrap(),
                    Capacity::try_from(capacity).unwrap(),
                ))
                .unwrap()
                .id()
            })
            .collect();

        let guest = db
            .create_user(&User::builder("guest@example.com", "Ada", "Guest").build().unwrap())
            .unwrap()
            .id();

        Self {
            db,
            restaurant,
            tables,
            guest,
        }
    }

    /// The standard venue: open 11:00-22:00 with a 2-, 4- and 6-top.
    #[allow(dead_code)]
    pub fn standard() -> Self {
        Self::seed(create_test_database(), 11, 22, &[2, 4, 6])
    }

    /// A booking request from the seeded guest.
    #[allow(dead_code)]
    pub fn request(&self, instant: NaiveDateTime, guests: u8) -> ReservationRequest {
        ReservationRequest::new(self.restaurant, self.guest, instant, party(guests))
    }

    /// Registers another user.
    #[allow(dead_code)]
    pub fn add_user(&mut self, email: &str) -> UserId {
        self.db
            .create_user(&User::builder(email, "Other", "Guest").build().unwrap())
            .unwrap()
            .id()
    }
}
