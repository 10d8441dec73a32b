//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - Customer repository
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{CustomerRepository, CustomerStore};
pub use unit_of_work::{Persistence, TransactionContext, TxCustomerRepository, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockCustomerRepository;
