//! Customer handlers.

use axum::{extract::State, response::Json, routing::get, Router};

use common::AppResult;
use domain::{Customer, OpenAccount, OpenedAccount};

use crate::extractors::{JsonBody, PathId};
use crate::state::AppState;

/// Create customer routes
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_customers).post(open_account))
        .route("/:id", get(get_customer))
}

/// Open a customer together with its first account
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "Customers",
    request_body = OpenAccount,
    responses(
        (status = 200, description = "Customer and account created", body = OpenedAccount),
        (status = 422, description = "Malformed JSON body"),
        (status = 500, description = "Database error")
    )
)]
pub async fn open_account(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<OpenAccount>,
) -> AppResult<Json<OpenedAccount>> {
    let opened = state
        .repo
        .open_account(&request.customer, request.initial_balance)
        .await?;
    Ok(Json(opened))
}

/// List customers, at most 100
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "Customers",
    responses(
        (status = 200, description = "Customers in no particular order", body = Vec<Customer>),
        (status = 500, description = "Database error")
    )
)]
pub async fn get_customers(State(state): State<AppState>) -> AppResult<Json<Vec<Customer>>> {
    let customers = state.repo.get_customers().await?;
    Ok(Json(customers))
}

/// Get customer by ID
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "Customers",
    params(
        ("id" = i64, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer", body = Customer),
        (status = 422, description = "ID is not an integer"),
        (status = 500, description = "Unknown customer or database error")
    )
)]
pub async fn get_customer(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Customer>> {
    let customer = state.repo.get_customer(id).await?;
    Ok(Json(customer))
}
