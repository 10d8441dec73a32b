//! Customers command - Drives the customer form against a running server.

use serde::Serialize;

use crate::cli::args::{CustomerAction, CustomersArgs};
use crate::client::{ConsoleNotifier, CustomerApi, CustomerForm, HttpCustomerClient, SubmitError};
use crate::config::Config;
use crate::domain::DeleteCount;
use crate::errors::{AppError, AppResult};

/// Execute the customers command
pub async fn execute(args: CustomersArgs, config: Config) -> AppResult<()> {
    let api_url = args.api_url.unwrap_or_else(|| config.api_url.clone());
    let token = args
        .token
        .or_else(|| config.api_token().map(str::to_owned));
    if token.is_none() {
        tracing::warn!("No session token given; the server will reject the request");
    }

    let client = HttpCustomerClient::new(api_url, token)?;

    match args.action {
        CustomerAction::Create(fields) => {
            let mut form = CustomerForm::new(ConsoleNotifier);
            fields.apply_to(form.values_mut());
            let customer = form.submit(&client).await.map_err(submit_error)?;
            print_json(&customer)
        }
        CustomerAction::Update { id, fields } => {
            let existing = client.get_customer(id).await?.ok_or(AppError::NotFound)?;
            let mut form = CustomerForm::edit(existing, ConsoleNotifier);
            fields.apply_to(form.values_mut());
            let customer = form.submit(&client).await.map_err(submit_error)?;
            print_json(&customer)
        }
        CustomerAction::Delete { id } => {
            let count = client.delete_customer(id).await?;
            print_json(&DeleteCount { count })
        }
        CustomerAction::List => print_json(&client.list_customers().await?),
        CustomerAction::Get { id } => print_json(&client.get_customer(id).await?),
        CustomerAction::FindByUsername { username } => {
            print_json(&client.find_customer_by_username(&username).await?)
        }
        CustomerAction::FindByEmail { email } => {
            print_json(&client.find_customer_by_email(&email).await?)
        }
    }
}

/// Print field errors next to their inputs before failing the command.
fn submit_error(error: SubmitError) -> AppError {
    match error {
        SubmitError::Invalid(errors) => {
            for error in errors.iter() {
                eprintln!("  {}: {}", error.field, error.message);
            }
            AppError::from(errors)
        }
        SubmitError::Remote(e) => AppError::from(e),
        SubmitError::Busy => AppError::internal("form submission already in progress"),
    }
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let body =
        serde_json::to_string_pretty(value).map_err(|e| AppError::internal(e.to_string()))?;
    println!("{}", body);
    Ok(())
}
