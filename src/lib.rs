//! customer-desk - Customer records with country-aware validation
//!
//! A server exposing customer operations over HTTP and a client that
//! submits records through a validating form.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Customer entity, validation schema, caller identity
//! - **services**: Customer operations and session verification
//! - **infra**: Database, migrations, repository, unit of work
//! - **api**: HTTP handlers, middleware, and routes
//! - **client**: Customer form and HTTP client
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Create a customer through the form
//! cargo run -- customers create --name Ann --surname Lee --email ann@x.com \
//!     --date-of-birth 2000-01-01 --username annlee --address "1 Rd" \
//!     --postal-code 12345 --city Springfield --country US
//! ```

pub mod api;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Customer, CustomerInput};
pub use errors::{AppError, AppResult};
