//! Domain layer - Core business entities and logic
//!
//! Contains the customer record, the validation schema that guards it,
//! and the caller identity operations are checked against.
//! No infrastructure dependencies live here.

pub mod customer;
pub mod session;
pub mod validation;

pub use customer::{Customer, CustomerDraft, CustomerInput, DeleteCount};
pub use session::CurrentUser;
pub use validation::{fields, validate_customer, FieldError, FieldErrors};
