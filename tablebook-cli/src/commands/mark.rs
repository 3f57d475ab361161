//! Mark command implementation.
//!
//! Staff-side status changes: confirm, seat, complete or record a no-show.
//! Cancelling goes through `cancel`, which checks ownership.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, report, GlobalOptions};
use clap::Args;
use tablebook::{ReservationAllocator, ReservationId, ReservationStatus, SystemClock};

/// Move a reservation along its lifecycle.
#[derive(Args)]
pub struct MarkCommand {
    /// Reservation id
    pub id: i64,

    /// New status: confirmed, seated, completed or no_show
    pub status: ReservationStatus,
}

impl MarkCommand {
    /// Execute the mark command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let allocator = ReservationAllocator::from_config(&config, SystemClock);
        let reservation =
            allocator.update_status(&mut db, ReservationId::new(self.id), self.status)?;

        report(
            global,
            format!("Reservation {} is now {}", reservation.id(), reservation.status()),
        );
        Ok(())
    }
}
