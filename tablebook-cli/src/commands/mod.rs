//! CLI command implementations.
//!
//! Registry administration:
//! - `init`: create the data directory and database
//! - `user`: register, show, list and remove users
//! - `restaurant`: register, update, show, list and remove restaurants
//! - `table`: add, update, list and remove tables
//!
//! Reservations:
//! - `reserve`: book the smallest free table for the acting user
//! - `cancel`: cancel one of the acting user's reservations
//! - `availability`: list free tables without booking
//! - `list`: list reservations with filters
//! - `show`: show one of the acting user's reservations
//! - `mark`: staff status changes
//!
//! And `completions` for shell completion scripts.

pub mod availability;
pub mod cancel;
pub mod completions;
pub mod init;
pub mod list;
pub mod mark;
pub mod reserve;
pub mod restaurant;
pub mod show;
pub mod table;
pub mod user;

pub use availability::AvailabilityCommand;
pub use cancel::CancelCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use mark::MarkCommand;
pub use reserve::ReserveCommand;
pub use restaurant::RestaurantCommand;
pub use show::ShowCommand;
pub use table::TableCommand;
pub use user::UserCommand;
