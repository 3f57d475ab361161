//! Reserve command implementation.
//!
//! This module implements the `reserve` command, which books the smallest
//! free table that seats the party and prints the new reservation id.

use crate::error::CliError;
use crate::utils::{
    format_instant, load_configuration, open_database, parse_instant, report, FlagDirectory,
    GlobalOptions,
};
use chrono::NaiveDateTime;
use clap::Args;
use tablebook::{
    Database, PartySize, ReservationAllocator, ReservationRequest, RestaurantId, SystemClock,
};

/// Book a table for the acting user.
#[derive(Args)]
pub struct ReserveCommand {
    /// Restaurant id
    #[arg(long)]
    pub restaurant: i64,

    /// Requested instant, YYYY-MM-DD HH:MM
    #[arg(long, value_name = "INSTANT", value_parser = parse_instant)]
    pub at: NaiveDateTime,

    /// Number of guests
    #[arg(long, value_name = "GUESTS")]
    pub party: u8,

    /// Free-text request for the restaurant
    #[arg(long, value_name = "TEXT")]
    pub note: Option<String>,
}

impl ReserveCommand {
    /// Execute the reserve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let request = ReservationRequest::for_current_user(
            &FlagDirectory::new(global, db.connection()),
            RestaurantId::new(self.restaurant),
            self.at,
            PartySize::try_from(self.party)?,
        )?
        .with_special_request(self.note);

        let allocator = ReservationAllocator::from_config(&config, SystemClock);
        let reservation = allocator.create_reservation(&mut db, &request)?;
        let table = Database::require_table(db.connection(), reservation.table_id())?;

        println!("{}", reservation.id());
        report(
            global,
            format!(
                "Reserved table {} ({} seats) for {} guest(s) at {}",
                table.number(),
                table.capacity(),
                reservation.party_size(),
                format_instant(reservation.reserved_for())
            ),
        );

        Ok(())
    }
}
