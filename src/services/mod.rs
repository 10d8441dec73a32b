//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

pub mod container;
mod customer_service;
mod session_service;

// Service Container
pub use container::Services;

// Service traits and implementations
pub use customer_service::{CustomerManager, CustomerService};
pub use session_service::{Claims, JwtSessions, SessionService, TokenResponse};
