//! OpenAPI documentation.

use axum::response::Json;
use utoipa::OpenApi;

use domain::{Balance, Customer, NewCustomer, OpenAccount, OpenedAccount, Transfer};

use crate::handlers::health_handler::HealthResponse;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::customer_handler::open_account,
        crate::handlers::customer_handler::get_customers,
        crate::handlers::customer_handler::get_customer,
        crate::handlers::account_handler::get_balance,
        crate::handlers::account_handler::make_transfer,
        crate::handlers::health_handler::health_check,
    ),
    components(
        schemas(
            Customer,
            NewCustomer,
            OpenAccount,
            OpenedAccount,
            Balance,
            Transfer,
            HealthResponse,
        )
    ),
    tags(
        (name = "Customers", description = "Customer onboarding and lookup"),
        (name = "Accounts", description = "Balances and transfers"),
        (name = "Health", description = "Database liveness"),
    )
)]
pub struct ApiDoc;

/// Serve the generated document as JSON.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
