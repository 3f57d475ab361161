//! Table command implementation.
//!
//! `table add|update|list|remove` manage the tables of a restaurant.

use crate::error::CliError;
use crate::output::print_records;
use crate::utils::{load_configuration, open_database, report, GlobalOptions};
use clap::{Args, Subcommand};
use tablebook::config::OutputFormat;
use tablebook::{Capacity, Database, NewTable, RestaurantId, TableId, TableNumber};

/// Manage tables.
#[derive(Args)]
pub struct TableCommand {
    #[command(subcommand)]
    pub action: TableAction,
}

/// Table subcommands.
#[derive(Subcommand)]
pub enum TableAction {
    /// Add a table to a restaurant and print its id
    Add {
        /// Owning restaurant id
        #[arg(long)]
        restaurant: i64,

        /// Table number, unique within the restaurant
        #[arg(long)]
        number: u32,

        /// Seats at the table
        #[arg(long)]
        capacity: u8,
    },

    /// Change the number or capacity of a table
    Update {
        /// Table id
        id: i64,

        /// New table number
        #[arg(long)]
        number: Option<u32>,

        /// New capacity
        #[arg(long)]
        capacity: Option<u8>,
    },

    /// List the tables of a restaurant by number
    List {
        /// Restaurant id
        #[arg(long)]
        restaurant: i64,

        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<OutputFormat>,
    },

    /// Delete a table that has no reservations
    Remove {
        /// Table id
        id: i64,
    },
}

impl TableCommand {
    /// Execute the table command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        match self.action {
            TableAction::Add {
                restaurant,
                number,
                capacity,
            } => {
                let restaurant_id = RestaurantId::new(restaurant);
                Database::require_restaurant(db.connection(), restaurant_id)?;

                let table = db.add_table(NewTable::new(
                    restaurant_id,
                    TableNumber::try_from(number)?,
                    Capacity::try_from(capacity)?,
                ))?;

                println!("{}", table.id());
                report(
                    global,
                    format!(
                        "Added table {} ({} seats) to restaurant {restaurant_id}",
                        table.number(),
                        table.capacity()
                    ),
                );
            }
            TableAction::Update {
                id,
                number,
                capacity,
            } => {
                if number.is_none() && capacity.is_none() {
                    return Err(CliError::InvalidArguments(
                        "nothing to change; pass --number and/or --capacity".to_string(),
                    ));
                }

                let id = TableId::new(id);
                let current = Database::require_table(db.connection(), id)?;
                let number = number
                    .map(TableNumber::try_from)
                    .transpose()?
                    .unwrap_or(current.number());
                let capacity = capacity
                    .map(Capacity::try_from)
                    .transpose()?
                    .unwrap_or(current.capacity());

                let table = db.update_table(id, number, capacity)?;
                report(
                    global,
                    format!(
                        "Table {id} is now number {} with {} seats",
                        table.number(),
                        table.capacity()
                    ),
                );
            }
            TableAction::List { restaurant, format } => {
                let restaurant_id = RestaurantId::new(restaurant);
                Database::require_restaurant(db.connection(), restaurant_id)?;
                let tables = Database::list_tables(db.connection(), restaurant_id)?;
                print_records(
                    format.unwrap_or(config.output_format.unwrap_or_default()),
                    &tables,
                )?;
            }
            TableAction::Remove { id } => {
                let id = TableId::new(id);
                db.delete_table(id)?;
                report(global, format!("Removed table {id}"));
            }
        }

        Ok(())
    }
}
