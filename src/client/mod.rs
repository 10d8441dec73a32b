//! Client side of the customer operations: the form controller and the
//! HTTP client it submits through.

mod error;
mod form;
mod http;

pub use error::ClientError;
pub use form::{
    ConsoleNotifier, CustomerForm, FormPhase, Notifier, SubmitError, Submission, CREATED_MESSAGE,
    SUCCESS_TITLE, UPDATED_MESSAGE,
};
pub use http::{CustomerApi, HttpCustomerClient};

#[cfg(any(test, feature = "test-utils"))]
pub use http::MockCustomerApi;
