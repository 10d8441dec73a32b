//! Service Container - Centralized service access.
//!
//! Builds every service from one database connection and config so the
//! HTTP state and the CLI share the same wiring.

use std::sync::Arc;

use super::{CustomerManager, CustomerService, JwtSessions, SessionService};
use crate::config::Config;
use crate::infra::Persistence;

/// Services built over one connection
pub struct Services {
    customer_service: Arc<dyn CustomerService>,
    session_service: Arc<dyn SessionService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let customer_service = Arc::new(CustomerManager::new(uow));
        let session_service = Arc::new(JwtSessions::new(config));

        Self {
            customer_service,
            session_service,
        }
    }

    /// Get customer service
    pub fn customers(&self) -> Arc<dyn CustomerService> {
        self.customer_service.clone()
    }

    /// Get session service
    pub fn sessions(&self) -> Arc<dyn SessionService> {
        self.session_service.clone()
    }
}
