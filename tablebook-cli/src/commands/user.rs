//! User command implementation.
//!
//! `user add|show|list|remove` manage the profiles reservations belong to.

use crate::error::CliError;
use crate::output::print_records;
use crate::utils::{load_configuration, open_database, report, GlobalOptions};
use clap::{Args, Subcommand};
use tablebook::config::OutputFormat;
use tablebook::{Database, User, UserReference, UserRole};

/// Manage users.
#[derive(Args)]
pub struct UserCommand {
    #[command(subcommand)]
    pub action: UserAction,
}

/// User subcommands.
#[derive(Subcommand)]
pub enum UserAction {
    /// Register a user and print its id
    Add(UserAddArgs),

    /// Show one user
    Show {
        /// User id or email
        #[arg(value_name = "USER")]
        reference: String,

        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<OutputFormat>,
    },

    /// List all users
    List {
        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<OutputFormat>,
    },

    /// Delete a user together with their reservations
    Remove {
        /// User id or email
        #[arg(value_name = "USER")]
        reference: String,
    },
}

/// Arguments for `user add`.
#[derive(Args)]
pub struct UserAddArgs {
    /// Email address (unique, case-insensitive)
    #[arg(long)]
    pub email: String,

    /// First name
    #[arg(long)]
    pub first_name: String,

    /// Last name
    #[arg(long)]
    pub last_name: String,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Role: customer or administrator
    #[arg(long, default_value = "customer")]
    pub role: UserRole,
}

impl UserCommand {
    /// Execute the user command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let default_format = config.output_format.unwrap_or_default();

        match self.action {
            UserAction::Add(args) => {
                let draft = User::builder(args.email, args.first_name, args.last_name)
                    .phone(args.phone)
                    .role(args.role)
                    .build()?;
                let user = db.create_user(&draft)?;

                println!("{}", user.id());
                report(global, format!("Registered {} <{}>", user.full_name(), user.email()));
            }
            UserAction::Show { reference, format } => {
                let id = UserReference::parse(&reference).resolve(db.connection())?;
                let user = Database::require_user(db.connection(), id)?;
                print_records(format.unwrap_or(default_format), &[user])?;
            }
            UserAction::List { format } => {
                let users = Database::list_users(db.connection())?;
                print_records(format.unwrap_or(default_format), &users)?;
            }
            UserAction::Remove { reference } => {
                let id = UserReference::parse(&reference).resolve(db.connection())?;
                db.delete_user(id)?;
                report(global, format!("Removed user {id}"));
            }
        }

        Ok(())
    }
}
