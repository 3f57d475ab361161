#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # tablebook
//!
//! A library for restaurant table reservations.
//!
//! Restaurants own tables; guests book a table for an instant. The allocator
//! picks the smallest free table that seats the party and guarantees that no
//! table is booked twice within the conflict window, even when many
//! processes allocate at once.
//!
//! ## Core Types
//!
//! - [`Restaurant`], [`OperatingHours`], and [`Table`]: the registry
//! - [`Reservation`] and [`ReservationStatus`]: bookings and their lifecycle
//! - [`AvailabilityResolver`] and [`ConflictPolicy`]: which tables are free
//! - [`ReservationAllocator`](operations::ReservationAllocator): create and cancel
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveTime;
//! use tablebook::{Capacity, OperatingHours, PartySize};
//!
//! let hours = OperatingHours::new(
//!     NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
//!     NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
//! )
//! .unwrap();
//! assert!(hours.contains(NaiveTime::from_hms_opt(22, 0, 0).unwrap()));
//!
//! let four_top = Capacity::try_from(4).unwrap();
//! assert!(four_top.seats(PartySize::try_from(4).unwrap().value()));
//! ```

pub mod availability;
pub mod clock;
pub mod config;
pub mod database;
pub mod directory;
pub mod error;
pub mod logging;
pub mod operations;
pub mod reservation;
pub mod restaurant;
pub mod table;
pub mod user;

// Re-export key types at crate root for convenience
pub use availability::{AvailabilityResolver, ConflictPolicy};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig, ReservationFilter};
pub use directory::{StaticDirectory, UserDirectory, UserReference};
pub use error::{Error, Result, ValidationError};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{BookingWindow, ReservationAllocator, ReservationRequest};
pub use reservation::{NewReservation, PartySize, Reservation, ReservationId, ReservationStatus};
pub use restaurant::{Address, NewRestaurant, OperatingHours, Restaurant, RestaurantId};
pub use table::{Capacity, NewTable, Table, TableId, TableNumber};
pub use user::{NewUser, User, UserId, UserRole};
