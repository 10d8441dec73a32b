//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use uuid::Uuid;

use crate::domain::CustomerInput;

/// customer-desk - Customer records server and client
#[derive(Parser, Debug)]
#[command(name = "customer-desk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Work with customer records through the HTTP API
    Customers(CustomersArgs),

    /// Mint a development session token
    Token(TokenArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to (defaults to SERVER_HOST)
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on (defaults to SERVER_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Drop all tables and re-run every migration
    Fresh {
        /// Confirm that existing records are discarded
        #[arg(long)]
        yes: bool,
    },
}

/// Arguments for the customers command
#[derive(Parser, Debug)]
pub struct CustomersArgs {
    /// Base URL of the server (defaults to CUSTOMER_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Bearer token (defaults to CUSTOMER_API_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub action: CustomerAction,
}

/// Customer actions
#[derive(Subcommand, Debug)]
pub enum CustomerAction {
    /// Fill a new customer form and submit it
    Create(CustomerFields),
    /// Load a customer into the form, override the given fields and submit
    Update {
        id: i32,
        #[command(flatten)]
        fields: CustomerFields,
    },
    /// Delete a customer by id
    Delete { id: i32 },
    /// List all customers
    List,
    /// Show one customer
    Get { id: i32 },
    /// First customer with this username
    FindByUsername { username: String },
    /// First customer with this email
    FindByEmail { email: String },
}

/// Form inputs; omitted ones keep their current value
#[derive(Args, Debug, Default, Clone)]
pub struct CustomerFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub surname: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// Date of birth as YYYY-MM-DD
    #[arg(long)]
    pub date_of_birth: Option<NaiveDate>,
    #[arg(long, action = ArgAction::Set)]
    pub premium_user: Option<bool>,
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
}

impl CustomerFields {
    /// Overwrite the form values that were given on the command line.
    pub fn apply_to(self, values: &mut CustomerInput) {
        if let Some(name) = self.name {
            values.name = name;
        }
        if let Some(surname) = self.surname {
            values.surname = surname;
        }
        if let Some(email) = self.email {
            values.email = email;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            values.date_of_birth = Some(date_of_birth);
        }
        if let Some(premium_user) = self.premium_user {
            values.premium_user = premium_user;
        }
        if let Some(username) = self.username {
            values.username = username;
        }
        if let Some(address) = self.address {
            values.address = address;
        }
        if let Some(postal_code) = self.postal_code {
            values.postal_code = postal_code;
        }
        if let Some(city) = self.city {
            values.city = city;
        }
        if let Some(country) = self.country {
            values.country = country;
        }
    }
}

/// Arguments for the token command
#[derive(Parser, Debug)]
pub struct TokenArgs {
    /// Subject id (random when omitted)
    #[arg(long)]
    pub user_id: Option<Uuid>,

    /// Email carried in the token
    #[arg(long)]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_parses_partial_fields() {
        let cli = Cli::try_parse_from([
            "customer-desk",
            "customers",
            "update",
            "7",
            "--city",
            "Shelbyville",
            "--premium-user",
            "true",
        ])
        .unwrap();

        let Commands::Customers(args) = cli.command else {
            panic!("expected customers command");
        };
        let CustomerAction::Update { id, fields } = args.action else {
            panic!("expected update action");
        };
        assert_eq!(id, 7);

        let mut values = CustomerInput {
            city: "Springfield".to_string(),
            name: "Ann".to_string(),
            ..Default::default()
        };
        fields.apply_to(&mut values);

        assert_eq!(values.city, "Shelbyville");
        assert_eq!(values.name, "Ann");
        assert!(values.premium_user);
    }

    #[test]
    fn test_create_parses_date_of_birth() {
        let cli = Cli::try_parse_from([
            "customer-desk",
            "customers",
            "create",
            "--date-of-birth",
            "2000-01-01",
        ])
        .unwrap();

        let Commands::Customers(args) = cli.command else {
            panic!("expected customers command");
        };
        let CustomerAction::Create(fields) = args.action else {
            panic!("expected create action");
        };
        assert_eq!(fields.date_of_birth, NaiveDate::from_ymd_opt(2000, 1, 1));
    }
}
