//! Account handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};

use common::AppResult;
use domain::{Balance, Transfer, TRANSFER_OK};

use crate::extractors::{PathId, ValidatedJson};
use crate::state::AppState;

/// Create account routes
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(make_transfer))
        .route("/:id", get(get_balance))
}

/// Get the balance of an account
#[utoipa::path(
    get,
    path = "/api/accounts/{id}",
    tag = "Accounts",
    params(
        ("id" = i64, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Current balance", body = Balance),
        (status = 422, description = "ID is not an integer"),
        (status = 500, description = "Unknown account or database error")
    )
)]
pub async fn get_balance(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Balance>> {
    let balance = state.repo.get_balance(id).await?;
    Ok(Json(Balance { balance }))
}

/// Move funds between two accounts
#[utoipa::path(
    post,
    path = "/api/accounts",
    tag = "Accounts",
    request_body = Transfer,
    responses(
        (status = 200, description = "Transfer applied", body = String, content_type = "text/plain"),
        (status = 400, description = "Amount is not positive"),
        (status = 422, description = "Malformed JSON body"),
        (status = 500, description = "Database error")
    )
)]
pub async fn make_transfer(
    State(state): State<AppState>,
    ValidatedJson(transfer): ValidatedJson<Transfer>,
) -> AppResult<&'static str> {
    state
        .repo
        .make_transfer(transfer.account_id, transfer.to_account_id, transfer.amount)
        .await?;
    Ok(TRANSFER_OK)
}
