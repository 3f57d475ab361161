//! Restaurant command implementation.
//!
//! `restaurant add|update|show|list|remove` administer the registry side of
//! restaurants: names, operating hours and postal addresses.

use crate::error::CliError;
use crate::output::print_records;
use crate::utils::{load_configuration, open_database, parse_time, report, GlobalOptions};
use chrono::NaiveTime;
use clap::{Args, Subcommand};
use tablebook::config::OutputFormat;
use tablebook::{Address, Database, OperatingHours, Restaurant, RestaurantId};

/// Manage restaurants.
#[derive(Args)]
pub struct RestaurantCommand {
    #[command(subcommand)]
    pub action: RestaurantAction,
}

/// Restaurant subcommands.
#[derive(Subcommand)]
pub enum RestaurantAction {
    /// Register a restaurant and print its id
    Add(RestaurantAddArgs),

    /// Change name, hours or address
    Update(RestaurantUpdateArgs),

    /// Show one restaurant
    Show {
        /// Restaurant id
        id: i64,

        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<OutputFormat>,
    },

    /// List restaurants ordered by name
    List {
        /// Only restaurants whose name contains this text
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,

        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<OutputFormat>,
    },

    /// Delete a restaurant and its tables
    Remove {
        /// Restaurant id
        id: i64,
    },
}

/// Postal address flags shared by `add` and `update`.
#[derive(Args, Default)]
pub struct AddressArgs {
    /// Street and number
    #[arg(long)]
    pub street: Option<String>,

    /// Five digit zip code
    #[arg(long)]
    pub zip: Option<u32>,

    /// City
    #[arg(long)]
    pub city: Option<String>,

    /// Country
    #[arg(long)]
    pub country: Option<String>,
}

impl AddressArgs {
    /// Builds an address when any field was given; all four are then required.
    fn into_address(self) -> Result<Option<Address>, CliError> {
        match (self.street, self.zip, self.city, self.country) {
            (None, None, None, None) => Ok(None),
            (Some(street), Some(zip), Some(city), Some(country)) => {
                Ok(Some(Address::new(street, zip, city, country)?))
            }
            _ => Err(CliError::InvalidArguments(
                "an address needs --street, --zip, --city and --country together".to_string(),
            )),
        }
    }
}

/// Arguments for `restaurant add`.
#[derive(Args)]
pub struct RestaurantAddArgs {
    /// Restaurant name
    #[arg(long)]
    pub name: String,

    /// Opening time, HH:MM
    #[arg(long, value_parser = parse_time)]
    pub opens: NaiveTime,

    /// Closing time, HH:MM (inclusive)
    #[arg(long, value_parser = parse_time)]
    pub closes: NaiveTime,

    #[command(flatten)]
    pub address: AddressArgs,
}

/// Arguments for `restaurant update`.
#[derive(Args)]
pub struct RestaurantUpdateArgs {
    /// Restaurant id
    pub id: i64,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New opening time, HH:MM
    #[arg(long, value_parser = parse_time)]
    pub opens: Option<NaiveTime>,

    /// New closing time, HH:MM
    #[arg(long, value_parser = parse_time)]
    pub closes: Option<NaiveTime>,

    #[command(flatten)]
    pub address: AddressArgs,

    /// Remove the stored address
    #[arg(long, conflicts_with_all = ["street", "zip", "city", "country"])]
    pub clear_address: bool,
}

impl RestaurantCommand {
    /// Execute the restaurant command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let default_format = config.output_format.unwrap_or_default();

        match self.action {
            RestaurantAction::Add(args) => {
                let hours = OperatingHours::new(args.opens, args.closes)?;
                let draft = Restaurant::builder(args.name, hours)
                    .address(args.address.into_address()?)
                    .build()?;
                let restaurant = db.create_restaurant(&draft)?;

                println!("{}", restaurant.id());
                report(
                    global,
                    format!("Registered {} ({})", restaurant.name(), restaurant.hours()),
                );
            }
            RestaurantAction::Update(args) => {
                let id = RestaurantId::new(args.id);
                let current = Database::require_restaurant(db.connection(), id)?;

                let hours = OperatingHours::new(
                    args.opens.unwrap_or(current.hours().opening()),
                    args.closes.unwrap_or(current.hours().closing()),
                )?;
                let address = if args.clear_address {
                    None
                } else {
                    args.address
                        .into_address()?
                        .or_else(|| current.address().cloned())
                };
                let name = args.name.unwrap_or_else(|| current.name().to_string());

                let draft = Restaurant::builder(name, hours).address(address).build()?;
                let updated = db.update_restaurant(id, &draft)?;
                report(global, format!("Updated restaurant {}", updated.id()));
            }
            RestaurantAction::Show { id, format } => {
                let restaurant =
                    Database::require_restaurant(db.connection(), RestaurantId::new(id))?;
                print_records(format.unwrap_or(default_format), &[restaurant])?;
            }
            RestaurantAction::List { search, format } => {
                let restaurants = match search {
                    Some(term) => Database::search_restaurants(db.connection(), &term)?,
                    None => Database::list_restaurants(db.connection())?,
                };
                print_records(format.unwrap_or(default_format), &restaurants)?;
            }
            RestaurantAction::Remove { id } => {
                let id = RestaurantId::new(id);
                db.delete_restaurant(id)?;
                report(global, format!("Removed restaurant {id} and its tables"));
            }
        }

        Ok(())
    }
}
