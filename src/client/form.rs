//! Customer form controller.
//!
//! Holds the candidate values of one form, runs the validation schema
//! locally and drives a single remote submission at a time:
//!
//! ```text
//! Idle -> Validating -> Idle                (invalid, errors stored)
//!                    -> Submitting -> Idle  (notified success or failure)
//! ```
//!
//! The remote call is kept outside the form: [`CustomerForm::begin_submit`]
//! hands out a [`Submission`], the caller sends it, and
//! [`CustomerForm::complete`] records the outcome. A second
//! `begin_submit` while a submission is in flight is rejected.

use thiserror::Error;

use super::error::ClientError;
use super::http::CustomerApi;
use crate::domain::{Customer, CustomerDraft, CustomerInput, FieldErrors};

pub const SUCCESS_TITLE: &str = "Success!";
pub const CREATED_MESSAGE: &str = "Customer created successfully";
pub const UPDATED_MESSAGE: &str = "Customer updated successfully";

/// Where the outcome of a submission is reported.
pub trait Notifier: Send + Sync {
    /// Non-blocking confirmation
    fn success(&self, title: &str, description: &str);

    /// Blocking alert with the raw error text
    fn failure(&self, message: &str);
}

/// Prints notifications to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, title: &str, description: &str) {
        println!("{} {}", title, description);
    }

    fn failure(&self, message: &str) {
        eprintln!("{}", message);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Validating,
    Submitting,
}

/// Why a submission did not go out or did not succeed.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("A submission is already in progress")]
    Busy,

    #[error("{}", .0.summary())]
    Invalid(FieldErrors),

    #[error(transparent)]
    Remote(#[from] ClientError),
}

/// A validated record ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(CustomerDraft),
    Update(i32, CustomerDraft),
}

impl Submission {
    /// Perform the remote call.
    pub async fn send<A>(self, api: &A) -> Result<Customer, ClientError>
    where
        A: CustomerApi + ?Sized,
    {
        match self {
            Submission::Create(draft) => api.create_customer(draft).await,
            Submission::Update(id, draft) => api.update_customer(id, draft).await,
        }
    }
}

pub struct CustomerForm<N: Notifier> {
    values: CustomerInput,
    initial: CustomerInput,
    errors: FieldErrors,
    editing: Option<i32>,
    phase: FormPhase,
    notifier: N,
}

impl<N: Notifier> CustomerForm<N> {
    /// Empty form; submitting creates a customer.
    pub fn new(notifier: N) -> Self {
        Self {
            values: CustomerInput::default(),
            initial: CustomerInput::default(),
            errors: FieldErrors::new(),
            editing: None,
            phase: FormPhase::Idle,
            notifier,
        }
    }

    /// Form prefilled from an existing record; submitting updates it.
    pub fn edit(customer: Customer, notifier: N) -> Self {
        let id = customer.id;
        let values = CustomerInput::from(customer);
        Self {
            initial: values.clone(),
            values,
            errors: FieldErrors::new(),
            editing: Some(id),
            phase: FormPhase::Idle,
            notifier,
        }
    }

    pub fn values(&self) -> &CustomerInput {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut CustomerInput {
        &mut self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Id of the record being edited
    pub fn editing(&self) -> Option<i32> {
        self.editing
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Validate the current values and, if they pass, enter `Submitting`.
    pub fn begin_submit(&mut self) -> Result<Submission, SubmitError> {
        if self.phase == FormPhase::Submitting {
            return Err(SubmitError::Busy);
        }

        self.phase = FormPhase::Validating;
        match self.values.parse() {
            Ok(draft) => {
                self.errors = FieldErrors::new();
                self.phase = FormPhase::Submitting;
                Ok(match self.editing {
                    Some(id) => Submission::Update(id, draft),
                    None => Submission::Create(draft),
                })
            }
            Err(errors) => {
                tracing::debug!(count = errors.len(), "Customer form has invalid fields");
                self.errors = errors.clone();
                self.phase = FormPhase::Idle;
                Err(SubmitError::Invalid(errors))
            }
        }
    }

    /// Record the outcome of the submission handed out by `begin_submit`.
    pub fn complete(
        &mut self,
        result: Result<Customer, ClientError>,
    ) -> Result<Customer, ClientError> {
        self.phase = FormPhase::Idle;

        match result {
            Ok(customer) => {
                if self.editing.is_some() {
                    self.notifier.success(SUCCESS_TITLE, UPDATED_MESSAGE);
                } else {
                    self.notifier.success(SUCCESS_TITLE, CREATED_MESSAGE);
                    self.values = self.initial.clone();
                }
                Ok(customer)
            }
            Err(error) => {
                self.notifier.failure(&format!("Error: {}", error));
                Err(error)
            }
        }
    }

    /// Validate, send and record in one step.
    pub async fn submit<A>(&mut self, api: &A) -> Result<Customer, SubmitError>
    where
        A: CustomerApi + ?Sized,
    {
        let submission = self.begin_submit()?;
        let result = submission.send(api).await;
        Ok(self.complete(result)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::NaiveDate;

    use super::*;
    use crate::client::MockCustomerApi;
    use crate::domain::fields;

    #[derive(Default)]
    struct RecordingNotifier {
        events: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, title: &str, description: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{} {}", title, description));
        }

        fn failure(&self, message: &str) {
            self.events.lock().unwrap().push(message.to_string());
        }
    }

    fn fill(values: &mut CustomerInput) {
        values.name = "Ann".to_string();
        values.surname = "Lee".to_string();
        values.email = "ann@x.com".to_string();
        values.date_of_birth = NaiveDate::from_ymd_opt(2000, 1, 1);
        values.username = "annlee".to_string();
        values.address = "1 Rd".to_string();
        values.postal_code = "12345".to_string();
        values.city = "Springfield".to_string();
        values.country = "US".to_string();
    }

    fn existing(id: i32) -> Customer {
        let mut values = CustomerInput::default();
        fill(&mut values);
        Customer::from_draft(id, values.parse().unwrap())
    }

    #[tokio::test]
    async fn test_create_success_notifies_and_resets() {
        let mut api = MockCustomerApi::new();
        api.expect_create_customer()
            .times(1)
            .returning(|draft| Ok(Customer::from_draft(1, draft)));
        let mut form = CustomerForm::new(RecordingNotifier::default());
        fill(form.values_mut());

        let customer = form.submit(&api).await.unwrap();

        assert_eq!(customer.id, 1);
        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(form.values(), &CustomerInput::default());
        assert_eq!(
            form.notifier().events(),
            vec!["Success! Customer created successfully"]
        );
    }

    #[tokio::test]
    async fn test_edit_sends_update_with_id() {
        let mut api = MockCustomerApi::new();
        api.expect_update_customer()
            .withf(|id, draft| *id == 7 && draft.city == "Shelbyville")
            .times(1)
            .returning(|id, draft| Ok(Customer::from_draft(id, draft)));
        let mut form = CustomerForm::edit(existing(7), RecordingNotifier::default());
        form.values_mut().city = "Shelbyville".to_string();

        let customer = form.submit(&api).await.unwrap();

        assert_eq!(customer.city, "Shelbyville");
        assert_eq!(form.values().city, "Shelbyville");
        assert_eq!(
            form.notifier().events(),
            vec!["Success! Customer updated successfully"]
        );
    }

    #[tokio::test]
    async fn test_invalid_values_never_reach_api() {
        let api = MockCustomerApi::new();
        let mut form = CustomerForm::new(RecordingNotifier::default());
        fill(form.values_mut());
        form.values_mut().username = "ann lee".to_string();

        let result = form.submit(&api).await;

        assert!(matches!(result, Err(SubmitError::Invalid(_))));
        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(
            form.errors().messages_for(fields::USERNAME),
            vec!["Username cannot contain spaces"]
        );
        assert!(form.notifier().events().is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_shows_raw_message() {
        let mut api = MockCustomerApi::new();
        api.expect_update_customer().returning(|_, _| {
            Err(ClientError::Api {
                status: 404,
                code: "NOT_FOUND".to_string(),
                message: "Resource not found".to_string(),
            })
        });
        let mut form = CustomerForm::edit(existing(99), RecordingNotifier::default());

        let result = form.submit(&api).await;

        assert!(matches!(result, Err(SubmitError::Remote(_))));
        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(form.notifier().events(), vec!["Error: Resource not found"]);
    }

    #[test]
    fn test_second_submit_while_in_flight_is_busy() {
        let mut form = CustomerForm::new(RecordingNotifier::default());
        fill(form.values_mut());

        let first = form.begin_submit().unwrap();
        assert!(matches!(first, Submission::Create(_)));
        assert_eq!(form.phase(), FormPhase::Submitting);

        assert!(matches!(form.begin_submit(), Err(SubmitError::Busy)));

        form.complete(Ok(existing(1))).unwrap();
        assert_eq!(form.phase(), FormPhase::Idle);
        assert!(form.begin_submit().is_err());
    }

    #[test]
    fn test_fixing_errors_clears_them() {
        let mut form = CustomerForm::new(RecordingNotifier::default());
        assert!(form.begin_submit().is_err());
        assert!(form.errors().has(fields::NAME));

        fill(form.values_mut());
        assert!(form.begin_submit().is_ok());
        assert!(form.errors().is_empty());
    }
}
