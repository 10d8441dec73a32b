//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and owns the transaction lifecycle.
//! Read-then-write sequences such as update run inside one transaction
//! so the existence check and the write see the same row.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IsolationLevel, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::entities::customer::{ActiveModel, Entity as CustomerEntity};
use super::repositories::{apply_draft, CustomerRepository, CustomerStore};
use crate::domain::{Customer, CustomerDraft};
use crate::errors::{AppError, AppResult, OptionExt};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction management.
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, implement it over a mocked repository.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get customer repository
    fn customers(&self) -> Arc<dyn CustomerRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    /// Uses ReadCommitted isolation level.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// The context borrows the transaction so repositories cannot outlive it.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get customer repository for this transaction
    pub fn customers(&self) -> TxCustomerRepository<'_> {
        TxCustomerRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    customer_repo: Arc<CustomerStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let customer_repo = Arc::new(CustomerStore::new(db.clone()));
        Self { db, customer_repo }
    }

    /// Internal transaction execution with configurable isolation level
    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn customers(&self) -> Arc<dyn CustomerRepository> {
        self.customer_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }
}

/// Transaction-aware customer repository.
pub struct TxCustomerRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxCustomerRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Replace every field of an existing customer.
    ///
    /// Returns `NotFound` when no record has this id.
    pub async fn update(&self, id: i32, draft: CustomerDraft) -> AppResult<Customer> {
        let customer = CustomerEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or_not_found()?;

        let mut active: ActiveModel = customer.into();
        apply_draft(&mut active, draft);

        let model = active.update(self.txn).await.map_err(AppError::from)?;
        Ok(Customer::from(model))
    }
}
