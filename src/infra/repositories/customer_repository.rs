//! Customer repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::customer::{self, ActiveModel, Entity as CustomerEntity};
use crate::domain::{Customer, CustomerDraft};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Customer repository trait for dependency injection.
///
/// Lookups by username or email return the lowest id on duplicates;
/// neither column is unique.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find customer by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Customer>>;

    /// First customer with exactly this username
    async fn find_first_by_username(&self, username: &str) -> AppResult<Option<Customer>>;

    /// First customer with exactly this email
    async fn find_first_by_email(&self, email: &str) -> AppResult<Option<Customer>>;

    /// All customers, ascending by id
    async fn list(&self) -> AppResult<Vec<Customer>>;

    /// Insert a validated record and return it with its new id
    async fn create(&self, draft: CustomerDraft) -> AppResult<Customer>;

    /// Delete every record with this id, returning how many went away
    async fn delete_many(&self, id: i32) -> AppResult<u64>;
}

/// Copy every draft field onto an active model.
pub(crate) fn apply_draft(active: &mut ActiveModel, draft: CustomerDraft) {
    active.name = Set(draft.name);
    active.surname = Set(draft.surname);
    active.email = Set(draft.email);
    active.date_of_birth = Set(draft.date_of_birth);
    active.premium_user = Set(draft.premium_user);
    active.username = Set(draft.username);
    active.address = Set(draft.address);
    active.postal_code = Set(draft.postal_code);
    active.city = Set(draft.city);
    active.country = Set(draft.country);
}

/// Concrete implementation of CustomerRepository
pub struct CustomerStore {
    db: DatabaseConnection,
}

impl CustomerStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for CustomerStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Customer>> {
        let result = CustomerEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Customer::from))
    }

    async fn find_first_by_username(&self, username: &str) -> AppResult<Option<Customer>> {
        let result = CustomerEntity::find()
            .filter(customer::Column::Username.eq(username))
            .order_by_asc(customer::Column::Id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Customer::from))
    }

    async fn find_first_by_email(&self, email: &str) -> AppResult<Option<Customer>> {
        let result = CustomerEntity::find()
            .filter(customer::Column::Email.eq(email))
            .order_by_asc(customer::Column::Id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Customer::from))
    }

    async fn list(&self) -> AppResult<Vec<Customer>> {
        let models = CustomerEntity::find()
            .order_by_asc(customer::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Customer::from).collect())
    }

    async fn create(&self, draft: CustomerDraft) -> AppResult<Customer> {
        let mut active_model = <ActiveModel as Default>::default();
        apply_draft(&mut active_model, draft);

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Customer::from(model))
    }

    async fn delete_many(&self, id: i32) -> AppResult<u64> {
        let result = CustomerEntity::delete_many()
            .filter(customer::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
