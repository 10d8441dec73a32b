//! Customer domain entity and related types.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail, ValidationError};

/// Customer domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    /// Server-assigned identifier
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Ann")]
    pub name: String,
    #[schema(example = "Lee")]
    pub surname: String,
    #[schema(example = "ann@example.com")]
    pub email: String,
    #[schema(example = "2000-01-01")]
    pub date_of_birth: NaiveDate,
    pub premium_user: bool,
    #[schema(example = "annlee")]
    pub username: String,
    #[schema(example = "1 Rd")]
    pub address: String,
    #[schema(example = "12345")]
    pub postal_code: String,
    #[schema(example = "Springfield")]
    pub city: String,
    #[schema(example = "US")]
    pub country: String,
}

/// Candidate customer record as typed into the form or sent over the wire.
///
/// Every field except the identifier. Missing fields deserialize to empty
/// values so they surface as field errors instead of a parse failure.
/// The derived rules are the per-field checks; the full schema lives in
/// [`crate::domain::validation`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CustomerInput {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Ann")]
    pub name: String,
    #[validate(length(min = 1, message = "Surname is required"))]
    #[schema(example = "Lee")]
    pub surname: String,
    #[validate(custom(function = "email_address"))]
    #[schema(example = "ann@example.com")]
    pub email: String,
    #[schema(example = "2000-01-01")]
    pub date_of_birth: Option<NaiveDate>,
    pub premium_user: bool,
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "annlee")]
    pub username: String,
    #[validate(length(min = 1, message = "Address is required"))]
    #[schema(example = "1 Rd")]
    pub address: String,
    #[validate(length(min = 1, message = "Postal code is required"))]
    #[schema(example = "12345")]
    pub postal_code: String,
    #[validate(length(min = 1, message = "City is required"))]
    #[schema(example = "Springfield")]
    pub city: String,
    #[validate(length(min = 1, message = "Country is required"))]
    #[schema(example = "US")]
    pub country: String,
}

/// Email syntax plus an alphabetic top-level domain of two or more letters.
fn email_address(email: &str) -> Result<(), ValidationError> {
    let has_tld = email
        .rsplit_once('@')
        .and_then(|(_, domain)| domain.rsplit_once('.'))
        .is_some_and(|(host, tld)| {
            !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
        });

    if has_tld && email.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message(Cow::Borrowed("Invalid email address")))
    }
}

/// Customer fields that passed the validation schema.
///
/// Only produced by [`crate::domain::validate_customer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub premium_user: bool,
    pub username: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
}

impl Customer {
    /// Build the persisted form of a draft once the store assigned an id.
    pub fn from_draft(id: i32, draft: CustomerDraft) -> Self {
        Self {
            id,
            name: draft.name,
            surname: draft.surname,
            email: draft.email,
            date_of_birth: draft.date_of_birth,
            premium_user: draft.premium_user,
            username: draft.username,
            address: draft.address,
            postal_code: draft.postal_code,
            city: draft.city,
            country: draft.country,
        }
    }
}

/// Prefill form values from an existing record (edit mode)
impl From<Customer> for CustomerInput {
    fn from(customer: Customer) -> Self {
        Self {
            name: customer.name,
            surname: customer.surname,
            email: customer.email,
            date_of_birth: Some(customer.date_of_birth),
            premium_user: customer.premium_user,
            username: customer.username,
            address: customer.address,
            postal_code: customer.postal_code,
            city: customer.city,
            country: customer.country,
        }
    }
}

impl From<CustomerDraft> for CustomerInput {
    fn from(draft: CustomerDraft) -> Self {
        Self {
            name: draft.name,
            surname: draft.surname,
            email: draft.email,
            date_of_birth: Some(draft.date_of_birth),
            premium_user: draft.premium_user,
            username: draft.username,
            address: draft.address,
            postal_code: draft.postal_code,
            city: draft.city,
            country: draft.country,
        }
    }
}

/// Response body of the delete operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteCount {
    /// Number of removed records (0 or 1)
    #[schema(example = 1)]
    pub count: u64,
}
