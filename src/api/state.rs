//! Application state - Dependency injection container.
//!
//! Provides centralized access to the services and the database handle.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{CustomerService, Services, SessionService};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Customer operations
    pub customer_service: Arc<dyn CustomerService>,
    /// Bearer token verification
    pub sessions: Arc<dyn SessionService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a connected database and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);

        Self {
            customer_service: services.customers(),
            sessions: services.sessions(),
            database,
        }
    }
}
