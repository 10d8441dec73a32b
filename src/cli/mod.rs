//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `customers` - Customer form and lookups against a running server
//! - `token` - Development session tokens

pub mod args;

pub use args::{Cli, Commands};
