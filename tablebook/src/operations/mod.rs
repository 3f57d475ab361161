//! Reservation operations.
//!
//! [`ReservationAllocator`] is the write path for bookings: it creates,
//! cancels, and advances reservations. Reads that need no locking live on
//! [`Database`](crate::Database) directly.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use tablebook::operations::ReservationAllocator;
//! use tablebook::{Config, Database, DatabaseConfig, PartySize, RestaurantId, SystemClock};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/tablebook.db")).unwrap();
//! let allocator = ReservationAllocator::from_config(&Config::default(), SystemClock);
//!
//! let at = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap().and_hms_opt(19, 0, 0).unwrap();
//! let free = allocator
//!     .check_availability(db.connection(), RestaurantId::new(1), at, PartySize::try_from(4).unwrap())
//!     .unwrap();
//! println!("{} table(s) free", free.len());
//! ```

pub mod allocator;
pub mod booking;
pub mod init;

pub use allocator::{ReservationAllocator, ReservationRequest};
pub use booking::BookingWindow;
pub use init::{init_database, plan_init, InitOptions, InitResult, InitStep};
