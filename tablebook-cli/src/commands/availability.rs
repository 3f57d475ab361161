//! Availability command implementation.
//!
//! Lists the tables that could take a party at an instant, smallest
//! sufficient capacity first. Nothing is written.

use crate::error::CliError;
use crate::output::print_records;
use crate::utils::{load_configuration, open_database, parse_instant, report, GlobalOptions};
use chrono::NaiveDateTime;
use clap::Args;
use tablebook::config::OutputFormat;
use tablebook::{PartySize, ReservationAllocator, RestaurantId, SystemClock};

/// Show free tables for a party.
#[derive(Args)]
pub struct AvailabilityCommand {
    /// Restaurant id
    #[arg(long)]
    pub restaurant: i64,

    /// Requested instant, YYYY-MM-DD HH:MM
    #[arg(long, value_name = "INSTANT", value_parser = parse_instant)]
    pub at: NaiveDateTime,

    /// Number of guests
    #[arg(long, value_name = "GUESTS")]
    pub party: u8,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,
}

impl AvailabilityCommand {
    /// Execute the availability command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let allocator = ReservationAllocator::from_config(&config, SystemClock);
        let free = allocator.check_availability(
            db.connection(),
            RestaurantId::new(self.restaurant),
            self.at,
            PartySize::try_from(self.party)?,
        )?;

        if free.is_empty() {
            report(global, "No table available");
        }
        print_records(
            self.format
                .unwrap_or(config.output_format.unwrap_or_default()),
            &free,
        )
    }
}
