//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::customer_handler;
use crate::api::routes;
use crate::domain::{Customer, CustomerInput, DeleteCount};
use crate::types::{HealthResponse, ServiceStatus};

/// OpenAPI documentation for the customer API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "customer-desk",
        version = "0.1.0",
        description = "Customer records with country-aware validation",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        routes::health,
        customer_handler::create_customer,
        customer_handler::list_customers,
        customer_handler::get_customer,
        customer_handler::update_customer,
        customer_handler::delete_customer,
        customer_handler::find_by_username,
        customer_handler::find_by_email,
    ),
    components(
        schemas(
            Customer,
            CustomerInput,
            DeleteCount,
            HealthResponse,
            ServiceStatus,
            customer_handler::LookupQuery,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Customers", description = "Customer record operations"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token from the identity provider"))
                        .build(),
                ),
            );
        }
    }
}
