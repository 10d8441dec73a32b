//! Customer validation schema.
//!
//! A candidate record goes through two ordered passes:
//!
//! 1. field rules: the `validator` derive on [`CustomerInput`] plus the
//!    date-of-birth rule, which needs the current date;
//! 2. cross-field rules: postal code against country, username and city
//!    content.
//!
//! Every rule runs on every call; the second pass does not depend on the
//! first one succeeding. The result is either a [`CustomerDraft`] or the
//! full, ordered list of [`FieldErrors`].

use std::borrow::Cow;

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationErrors};

use super::customer::{CustomerDraft, CustomerInput};
use crate::config::{is_uk_country, UK_POSTCODE_PATTERN};

/// Field names as they appear in request bodies and error lists.
pub mod fields {
    pub const NAME: &str = "name";
    pub const SURNAME: &str = "surname";
    pub const EMAIL: &str = "email";
    pub const DATE_OF_BIRTH: &str = "date_of_birth";
    pub const PREMIUM_USER: &str = "premium_user";
    pub const USERNAME: &str = "username";
    pub const ADDRESS: &str = "address";
    pub const POSTAL_CODE: &str = "postal_code";
    pub const CITY: &str = "city";
    pub const COUNTRY: &str = "country";

    /// Display order of the form inputs
    pub const ALL: &[&str] = &[
        NAME,
        SURNAME,
        USERNAME,
        EMAIL,
        DATE_OF_BIRTH,
        PREMIUM_USER,
        COUNTRY,
        ADDRESS,
        POSTAL_CODE,
        CITY,
    ];
}

static UK_POSTCODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(UK_POSTCODE_PATTERN).expect("UK postcode pattern is a valid regex")
});

/// A single problem with one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub code: Cow<'static, str>,
    pub message: Cow<'static, str>,
}

impl FieldError {
    fn new(field: &'static str, code: &'static str, message: &'static str) -> Self {
        Self {
            field,
            code: Cow::Borrowed(code),
            message: Cow::Borrowed(message),
        }
    }
}

/// Ordered collection of field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Messages reported for one input, in rule order.
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_ref())
            .collect()
    }

    /// Check if an input has at least one error
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// All messages joined for single-line display
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(|e| e.message.as_ref())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Field rule with access to the validation date
type FieldRule = fn(&CustomerInput, NaiveDate, &mut FieldErrors);

/// Rule relating several inputs
type CrossFieldRule = fn(&CustomerInput, &mut FieldErrors);

const FIELD_RULES: &[FieldRule] = &[derived_field_rules, date_of_birth_rule];

const CROSS_FIELD_RULES: &[CrossFieldRule] = &[
    postal_code_matches_country,
    username_without_spaces,
    city_not_numeric,
];

/// Run the schema against a candidate record.
///
/// `today` is the date "now" resolves to; a date of birth after it is
/// rejected.
pub fn validate_customer(
    input: &CustomerInput,
    today: NaiveDate,
) -> Result<CustomerDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    for rule in FIELD_RULES {
        rule(input, today, &mut errors);
    }
    for rule in CROSS_FIELD_RULES {
        rule(input, &mut errors);
    }

    match input.date_of_birth {
        Some(date_of_birth) if errors.is_empty() => Ok(CustomerDraft {
            name: input.name.clone(),
            surname: input.surname.clone(),
            email: input.email.clone(),
            date_of_birth,
            premium_user: input.premium_user,
            username: input.username.clone(),
            address: input.address.clone(),
            postal_code: input.postal_code.clone(),
            city: input.city.clone(),
            country: input.country.clone(),
        }),
        _ => Err(errors),
    }
}

impl CustomerInput {
    /// Validate against the current UTC date.
    pub fn parse(&self) -> Result<CustomerDraft, FieldErrors> {
        validate_customer(self, Utc::now().date_naive())
    }
}

/// Non-empty and email checks declared on [`CustomerInput`].
fn derived_field_rules(input: &CustomerInput, _today: NaiveDate, errors: &mut FieldErrors) {
    if let Err(derived) = input.validate() {
        collect_derived(&derived, errors);
    }
}

fn collect_derived(derived: &ValidationErrors, errors: &mut FieldErrors) {
    let by_field = derived.field_errors();
    for &name in fields::ALL {
        for (field, issues) in by_field.iter() {
            if *field != name {
                continue;
            }
            for issue in issues.iter() {
                errors.push(FieldError {
                    field: name,
                    code: issue.code.clone(),
                    message: issue
                        .message
                        .clone()
                        .unwrap_or_else(|| Cow::Owned(format!("{} is invalid", name))),
                });
            }
        }
    }
}

fn date_of_birth_rule(input: &CustomerInput, today: NaiveDate, errors: &mut FieldErrors) {
    match input.date_of_birth {
        None => errors.push(FieldError::new(
            fields::DATE_OF_BIRTH,
            "required",
            "Date of birth is required",
        )),
        Some(date) if date > today => errors.push(FieldError::new(
            fields::DATE_OF_BIRTH,
            "future_date",
            "Date of birth cannot be in the future",
        )),
        Some(_) => {}
    }
}

fn postal_code_matches_country(input: &CustomerInput, errors: &mut FieldErrors) {
    if is_uk_country(&input.country) {
        if !UK_POSTCODE.is_match(&input.postal_code) {
            errors.push(FieldError::new(
                fields::POSTAL_CODE,
                "uk_postcode",
                "Invalid UK postal code format (e.g., SW1A 1AA)",
            ));
        }
    } else if !is_all_digits(&input.postal_code) {
        errors.push(FieldError::new(
            fields::POSTAL_CODE,
            "numeric_postcode",
            "Postal code must be numeric for non-UK addresses",
        ));
    }
}

fn username_without_spaces(input: &CustomerInput, errors: &mut FieldErrors) {
    if input.username.chars().any(char::is_whitespace) {
        errors.push(FieldError::new(
            fields::USERNAME,
            "no_spaces",
            "Username cannot contain spaces",
        ));
    }
}

fn city_not_numeric(input: &CustomerInput, errors: &mut FieldErrors) {
    if is_all_digits(&input.city) {
        errors.push(FieldError::new(
            fields::CITY,
            "numeric_city",
            "City name cannot be purely numeric",
        ));
    }
}

/// Non-empty and ASCII digits only
fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn ann() -> CustomerInput {
        CustomerInput {
            name: "Ann".to_string(),
            surname: "Lee".to_string(),
            email: "ann@x.com".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1),
            premium_user: false,
            username: "annlee".to_string(),
            address: "1 Rd".to_string(),
            postal_code: "12345".to_string(),
            city: "Springfield".to_string(),
            country: "US".to_string(),
        }
    }

    fn uk(postal_code: &str) -> CustomerInput {
        CustomerInput {
            postal_code: postal_code.to_string(),
            country: "UK".to_string(),
            ..ann()
        }
    }

    #[test]
    fn test_valid_record_produces_draft() {
        let draft = validate_customer(&ann(), today()).unwrap();

        assert_eq!(draft.name, "Ann");
        assert_eq!(draft.date_of_birth, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert!(!draft.premium_user);
    }

    #[test]
    fn test_uk_postcodes_matching_pattern_pass() {
        for code in ["SW1A 1AA", "sw1a1aa", "M1 1AE", "B33 8TH", "CR2 6XH", "AB1 2CD"] {
            assert!(
                validate_customer(&uk(code), today()).is_ok(),
                "{} should be accepted",
                code
            );
        }
    }

    #[test]
    fn test_uk_postcodes_not_matching_pattern_fail() {
        for code in ["12345", "SW1A", "1AA SW1", "SW1A 1A", "SW1A  1AA"] {
            let errors = validate_customer(&uk(code), today()).unwrap_err();
            assert_eq!(
                errors.messages_for(fields::POSTAL_CODE),
                vec!["Invalid UK postal code format (e.g., SW1A 1AA)"],
                "{} should be rejected",
                code
            );
        }
    }

    #[test]
    fn test_united_kingdom_spelling_selects_uk_format() {
        let input = CustomerInput {
            country: "United Kingdom".to_string(),
            postal_code: "SW1A 1AA".to_string(),
            ..ann()
        };
        assert!(validate_customer(&input, today()).is_ok());
    }

    #[test]
    fn test_non_uk_postal_code_must_be_digits() {
        let input = CustomerInput {
            postal_code: "12-345".to_string(),
            ..ann()
        };
        let errors = validate_customer(&input, today()).unwrap_err();
        assert_eq!(
            errors.messages_for(fields::POSTAL_CODE),
            vec!["Postal code must be numeric for non-UK addresses"]
        );

        let input = CustomerInput {
            country: "uk".to_string(),
            postal_code: "SW1A 1AA".to_string(),
            ..ann()
        };
        assert!(validate_customer(&input, today())
            .unwrap_err()
            .has(fields::POSTAL_CODE));
    }

    #[test]
    fn test_username_with_space_fails() {
        for username in ["ann lee", "ann\tlee", "annlee\n"] {
            let input = CustomerInput {
                username: username.to_string(),
                ..ann()
            };
            let errors = validate_customer(&input, today()).unwrap_err();

            assert_eq!(errors.len(), 1, "{:?}", username);
            assert_eq!(
                errors.messages_for(fields::USERNAME),
                vec!["Username cannot contain spaces"]
            );
        }
    }

    #[test]
    fn test_username_space_reported_alongside_other_errors() {
        let input = CustomerInput {
            username: " ".to_string(),
            email: "not-an-email".to_string(),
            ..ann()
        };
        let errors = validate_customer(&input, today()).unwrap_err();

        assert!(errors.has(fields::USERNAME));
        assert!(errors.has(fields::EMAIL));
    }

    #[test]
    fn test_numeric_city_fails() {
        let input = CustomerInput {
            city: "90210".to_string(),
            ..ann()
        };
        let errors = validate_customer(&input, today()).unwrap_err();
        assert_eq!(
            errors.messages_for(fields::CITY),
            vec!["City name cannot be purely numeric"]
        );

        let input = CustomerInput {
            city: "District 9".to_string(),
            ..ann()
        };
        assert!(validate_customer(&input, today()).is_ok());
    }

    #[test]
    fn test_date_of_birth_boundaries() {
        let on_today = CustomerInput {
            date_of_birth: Some(today()),
            ..ann()
        };
        assert!(validate_customer(&on_today, today()).is_ok());

        let tomorrow = CustomerInput {
            date_of_birth: today().succ_opt(),
            ..ann()
        };
        let errors = validate_customer(&tomorrow, today()).unwrap_err();
        assert_eq!(
            errors.messages_for(fields::DATE_OF_BIRTH),
            vec!["Date of birth cannot be in the future"]
        );
    }

    #[test]
    fn test_missing_date_of_birth_is_required() {
        let input = CustomerInput {
            date_of_birth: None,
            ..ann()
        };
        let errors = validate_customer(&input, today()).unwrap_err();
        assert_eq!(
            errors.messages_for(fields::DATE_OF_BIRTH),
            vec!["Date of birth is required"]
        );
    }

    #[test]
    fn test_invalid_email_fails() {
        for email in ["ann.example.com", "ann@x", "ann@x.c", "ann@x.123", "ann@.com"] {
            let input = CustomerInput {
                email: email.to_string(),
                ..ann()
            };
            let errors = validate_customer(&input, today()).unwrap_err();
            assert_eq!(
                errors.messages_for(fields::EMAIL),
                vec!["Invalid email address"],
                "{}",
                email
            );
        }
    }

    #[test]
    fn test_email_with_subdomain_passes() {
        let input = CustomerInput {
            email: "ann.lee@mail.example.co.uk".to_string(),
            ..ann()
        };
        assert!(validate_customer(&input, today()).is_ok());
    }

    #[test]
    fn test_empty_record_reports_every_field() {
        let errors = validate_customer(&CustomerInput::default(), today()).unwrap_err();

        for field in [
            fields::NAME,
            fields::SURNAME,
            fields::EMAIL,
            fields::DATE_OF_BIRTH,
            fields::USERNAME,
            fields::ADDRESS,
            fields::POSTAL_CODE,
            fields::CITY,
            fields::COUNTRY,
        ] {
            assert!(errors.has(field), "{} should have an error", field);
        }
        assert!(!errors.has(fields::PREMIUM_USER));

        // Cross-field rules still run when field rules fail
        assert_eq!(
            errors.messages_for(fields::POSTAL_CODE),
            vec![
                "Postal code is required",
                "Postal code must be numeric for non-UK addresses"
            ]
        );
    }

    #[test]
    fn test_errors_follow_form_order() {
        let input = CustomerInput {
            name: String::new(),
            city: String::new(),
            ..ann()
        };
        let errors = validate_customer(&input, today()).unwrap_err();
        let order: Vec<_> = errors.iter().map(|e| e.field).collect();

        assert_eq!(order, vec![fields::NAME, fields::CITY]);
    }
}
