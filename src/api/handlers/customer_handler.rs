//! Customer handlers.

use axum::{
    extract::{rejection::PathRejection, Extension, Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::{JsonBody, ValidatedQuery};
use crate::api::AppState;
use crate::domain::{CurrentUser, Customer, CustomerInput, DeleteCount};
use crate::errors::{AppError, AppResult};
use crate::types::Created;

/// Exact-match lookup value
#[derive(Debug, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct LookupQuery {
    /// Username or email to look for
    #[validate(length(min = 1, message = "Lookup value is required"))]
    #[param(example = "annlee")]
    pub value: String,
}

/// Caller attached by the session middleware, if any
type Caller = Option<Extension<CurrentUser>>;

/// Id, body and query rejections are only reported once this passes.
fn authenticated(ext: &Caller) -> AppResult<&CurrentUser> {
    ext.as_ref()
        .map(|Extension(user)| user)
        .ok_or(AppError::Unauthorized)
}

fn customer_id(path: Result<Path<i32>, PathRejection>) -> AppResult<i32> {
    path.map(|Path(id)| id)
        .map_err(|e| AppError::bad_request(e.body_text()))
}

/// Create customer routes
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/lookup/username", get(find_by_username))
        .route("/lookup/email", get(find_by_email))
}

/// Create a customer
#[utoipa::path(
    post,
    path = "/customers",
    tag = "Customers",
    security(("bearer_auth" = [])),
    request_body = CustomerInput,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_customer(
    current_user: Caller,
    State(state): State<AppState>,
    body: Result<JsonBody<CustomerInput>, AppError>,
) -> AppResult<Created<Customer>> {
    let user = authenticated(&current_user)?;
    let JsonBody(payload) = body?;

    let customer = state
        .customer_service
        .create_customer(Some(user), payload)
        .await?;

    Ok(Created(customer))
}

/// List all customers ordered by id
#[utoipa::path(
    get,
    path = "/customers",
    tag = "Customers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All customers", body = Vec<Customer>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_customers(
    current_user: Caller,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Customer>>> {
    let user = authenticated(&current_user)?;
    let customers = state
        .customer_service
        .list_customers(Some(user))
        .await?;
    Ok(Json(customers))
}

/// Get a customer by id
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "The customer, or null when absent", body = Customer),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_customer(
    current_user: Caller,
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<Option<Customer>>> {
    let user = authenticated(&current_user)?;
    let id = customer_id(path)?;

    let customer = state
        .customer_service
        .get_customer(Some(user), id)
        .await?;
    Ok(Json(customer))
}

/// Replace every field of a customer
#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    request_body = CustomerInput,
    responses(
        (status = 200, description = "Customer updated", body = Customer),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn update_customer(
    current_user: Caller,
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<JsonBody<CustomerInput>, AppError>,
) -> AppResult<Json<Customer>> {
    let user = authenticated(&current_user)?;
    let id = customer_id(path)?;
    let JsonBody(payload) = body?;

    let customer = state
        .customer_service
        .update_customer(Some(user), id, payload)
        .await?;
    Ok(Json(customer))
}

/// Delete a customer by id
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Number of removed customers (0 or 1)", body = DeleteCount),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn delete_customer(
    current_user: Caller,
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<DeleteCount>> {
    let user = authenticated(&current_user)?;
    let id = customer_id(path)?;

    let count = state
        .customer_service
        .delete_customer(Some(user), id)
        .await?;
    Ok(Json(DeleteCount { count }))
}

/// First customer with the given username
#[utoipa::path(
    get,
    path = "/customers/lookup/username",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(LookupQuery),
    responses(
        (status = 200, description = "The customer, or null when absent", body = Customer),
        (status = 400, description = "Missing lookup value"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn find_by_username(
    current_user: Caller,
    State(state): State<AppState>,
    query: Result<ValidatedQuery<LookupQuery>, AppError>,
) -> AppResult<Json<Option<Customer>>> {
    let user = authenticated(&current_user)?;
    let ValidatedQuery(query) = query?;

    let customer = state
        .customer_service
        .find_customer_by_username(Some(user), &query.value)
        .await?;
    Ok(Json(customer))
}

/// First customer with the given email
#[utoipa::path(
    get,
    path = "/customers/lookup/email",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(LookupQuery),
    responses(
        (status = 200, description = "The customer, or null when absent", body = Customer),
        (status = 400, description = "Missing lookup value"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn find_by_email(
    current_user: Caller,
    State(state): State<AppState>,
    query: Result<ValidatedQuery<LookupQuery>, AppError>,
) -> AppResult<Json<Option<Customer>>> {
    let user = authenticated(&current_user)?;
    let ValidatedQuery(query) = query?;

    let customer = state
        .customer_service
        .find_customer_by_email(Some(user), &query.value)
        .await?;
    Ok(Json(customer))
}
