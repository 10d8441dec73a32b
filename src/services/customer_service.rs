//! Customer service - The customer operations behind the HTTP surface.
//!
//! Every operation takes the caller identity explicitly and rejects a
//! missing caller with `Unauthorized` before the store is touched.
//! Create and update run the validation schema again so a request that
//! skipped the form cannot store an invalid record.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CurrentUser, Customer, CustomerInput};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Customer service trait for dependency injection.
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// Validate and insert a new customer
    async fn create_customer(
        &self,
        caller: Option<&CurrentUser>,
        input: CustomerInput,
    ) -> AppResult<Customer>;

    /// Replace every field of an existing customer
    async fn update_customer(
        &self,
        caller: Option<&CurrentUser>,
        id: i32,
        input: CustomerInput,
    ) -> AppResult<Customer>;

    /// Delete by id; zero removed records is not an error
    async fn delete_customer(&self, caller: Option<&CurrentUser>, id: i32) -> AppResult<u64>;

    /// All customers ordered by id
    async fn list_customers(&self, caller: Option<&CurrentUser>) -> AppResult<Vec<Customer>>;

    /// Customer with this id, if any
    async fn get_customer(
        &self,
        caller: Option<&CurrentUser>,
        id: i32,
    ) -> AppResult<Option<Customer>>;

    /// First customer with this exact username
    async fn find_customer_by_username(
        &self,
        caller: Option<&CurrentUser>,
        username: &str,
    ) -> AppResult<Option<Customer>>;

    /// First customer with this exact email
    async fn find_customer_by_email(
        &self,
        caller: Option<&CurrentUser>,
        email: &str,
    ) -> AppResult<Option<Customer>>;
}

/// Reject calls that carry no session.
fn require_caller(caller: Option<&CurrentUser>) -> AppResult<&CurrentUser> {
    caller.ok_or(AppError::Unauthorized)
}

/// Concrete implementation of CustomerService using Unit of Work.
pub struct CustomerManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CustomerManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CustomerService for CustomerManager<U> {
    async fn create_customer(
        &self,
        caller: Option<&CurrentUser>,
        input: CustomerInput,
    ) -> AppResult<Customer> {
        let caller = require_caller(caller)?;
        let draft = input.parse()?;

        let customer = self.uow.customers().create(draft).await?;
        tracing::info!(customer_id = customer.id, caller = %caller.id, "Customer created");

        Ok(customer)
    }

    async fn update_customer(
        &self,
        caller: Option<&CurrentUser>,
        id: i32,
        input: CustomerInput,
    ) -> AppResult<Customer> {
        let caller = require_caller(caller)?;
        let draft = input.parse()?;

        let customer = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move { ctx.customers().update(id, draft).await })
            })
            .await?;
        tracing::info!(customer_id = id, caller = %caller.id, "Customer updated");

        Ok(customer)
    }

    async fn delete_customer(&self, caller: Option<&CurrentUser>, id: i32) -> AppResult<u64> {
        let caller = require_caller(caller)?;

        let count = self.uow.customers().delete_many(id).await?;
        tracing::info!(customer_id = id, caller = %caller.id, count, "Customer delete processed");

        Ok(count)
    }

    async fn list_customers(&self, caller: Option<&CurrentUser>) -> AppResult<Vec<Customer>> {
        require_caller(caller)?;
        self.uow.customers().list().await
    }

    async fn get_customer(
        &self,
        caller: Option<&CurrentUser>,
        id: i32,
    ) -> AppResult<Option<Customer>> {
        require_caller(caller)?;
        self.uow.customers().find_by_id(id).await
    }

    async fn find_customer_by_username(
        &self,
        caller: Option<&CurrentUser>,
        username: &str,
    ) -> AppResult<Option<Customer>> {
        require_caller(caller)?;
        self.uow.customers().find_first_by_username(username).await
    }

    async fn find_customer_by_email(
        &self,
        caller: Option<&CurrentUser>,
        email: &str,
    ) -> AppResult<Option<Customer>> {
        require_caller(caller)?;
        self.uow.customers().find_first_by_email(email).await
    }
}
