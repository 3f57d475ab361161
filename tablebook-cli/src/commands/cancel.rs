//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{acting_user, load_configuration, open_database, report, GlobalOptions};
use clap::Args;
use tablebook::{ReservationAllocator, ReservationId, SystemClock};

/// Cancel one of the acting user's reservations.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    pub id: i64,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let user_id = acting_user(global, db.connection())?;

        let allocator = ReservationAllocator::from_config(&config, SystemClock);
        let reservation =
            allocator.cancel_reservation(&mut db, ReservationId::new(self.id), user_id)?;

        report(
            global,
            format!("Cancelled reservation {}; its table is free again", reservation.id()),
        );
        Ok(())
    }
}
