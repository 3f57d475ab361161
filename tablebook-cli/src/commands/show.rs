//! Show command implementation.

use crate::error::CliError;
use crate::output::print_records;
use crate::utils::{acting_user, load_configuration, open_database, GlobalOptions};
use clap::Args;
use tablebook::config::OutputFormat;
use tablebook::{Database, ReservationId};

/// Show one of the acting user's reservations.
#[derive(Args)]
pub struct ShowCommand {
    /// Reservation id
    pub id: i64,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,
}

impl ShowCommand {
    /// Execute the show command.
    ///
    /// Reservations of other users are reported as not found.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let user_id = acting_user(global, db.connection())?;

        let reservation =
            Database::reservation_for_user(db.connection(), ReservationId::new(self.id), user_id)?;
        print_records(
            self.format
                .unwrap_or(config.output_format.unwrap_or_default()),
            &[reservation],
        )
    }
}
