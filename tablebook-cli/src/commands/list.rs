//! List command implementation.
//!
//! This module implements the `list` command, which displays reservations
//! in various formats (table, JSON, CSV, TSV), latest instant first.

use crate::error::CliError;
use crate::output::print_records;
use crate::utils::{acting_user, load_configuration, open_database, parse_date, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use tablebook::config::OutputFormat;
use tablebook::{Database, ReservationFilter, ReservationStatus, RestaurantId};

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Filter by restaurant id
    #[arg(long, value_name = "ID")]
    pub restaurant: Option<i64>,

    /// Filter by date, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Filter by status
    #[arg(long)]
    pub status: Option<ReservationStatus>,

    /// Only the acting user's reservations
    #[arg(long)]
    pub mine: bool,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let mut filter = ReservationFilter::default();
        if let Some(id) = self.restaurant {
            filter = filter.restaurant(RestaurantId::new(id));
        }
        if let Some(date) = self.date {
            filter = filter.on(date);
        }
        if let Some(status) = self.status {
            filter = filter.status(status);
        }
        if self.mine {
            filter = filter.user(acting_user(global, db.connection())?);
        }

        let reservations = Database::list_reservations(db.connection(), &filter)?;
        print_records(
            self.format
                .unwrap_or(config.output_format.unwrap_or_default()),
            &reservations,
        )
    }
}
