//! HTTP-level tests for the banking routes, driven through the router with
//! a mocked repository.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bank_service_lib::repository::{BankRepository, MockBankRepository};
use common::{ErrorResponse, ServiceConfig};
use domain::{Customer, NewCustomer, OpenedAccount, RepositoryError, RepositoryResult};
use gateway_lib::config::GatewayConfig;
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;

fn app(repo: impl BankRepository + 'static) -> Router {
    create_router(AppState::new(Arc::new(repo), GatewayConfig::default()))
}

fn customer(id: i64, name: &str) -> Customer {
    Customer {
        id,
        name: name.to_string(),
        email: format!("{}@x.com", name.to_lowercase()),
    }
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn error_code(body: &[u8]) -> String {
    let response: ErrorResponse = serde_json::from_slice(body).unwrap();
    response.error.code
}

// =============================================================================
// Customers
// =============================================================================

#[tokio::test]
async fn test_open_account_returns_generated_ids() {
    let mut repo = MockBankRepository::new();
    repo.expect_open_account()
        .withf(|customer: &NewCustomer, balance: &f64| {
            customer.name == "Ana" && customer.email == "ana@x.com" && *balance == 100.0
        })
        .times(1)
        .returning(|_, _| {
            Ok(OpenedAccount {
                customer_id: 1,
                account_id: 10,
            })
        });

    let (status, body) = send(
        app(repo),
        post_json(
            "/api/customers",
            json!({"customer": {"name": "Ana", "email": "ana@x.com"}, "initial_balance": 100.0}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let opened: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(opened, json!({"customer_id": 1, "account_id": 10}));
}

#[tokio::test]
async fn test_open_account_malformed_json_is_422() {
    let mut repo = MockBankRepository::new();
    repo.expect_open_account().never();

    let request = Request::builder()
        .method("POST")
        .uri("/api/customers")
        .header("content-type", "application/json")
        .body(Body::from("{\"customer\":"))
        .unwrap();
    let (status, body) = send(app(repo), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_open_account_duplicate_email_is_500() {
    let mut repo = MockBankRepository::new();
    repo.expect_open_account().returning(|_, _| {
        Err(RepositoryError::database(
            "open_account",
            "calling procedure",
            "duplicate key value violates unique constraint",
        ))
    });

    let (status, body) = send(
        app(repo),
        post_json(
            "/api/customers",
            json!({"customer": {"name": "Ana", "email": "ana@x.com"}, "initial_balance": 1}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let text = String::from_utf8(body.clone()).unwrap();
    assert!(!text.contains("duplicate key"), "driver detail leaked: {}", text);
    assert_eq!(error_code(&body), "DATABASE_ERROR");
}

#[tokio::test]
async fn test_get_customer_returns_customer() {
    let mut repo = MockBankRepository::new();
    repo.expect_get_customer()
        .withf(|id| *id == 1)
        .returning(|id| Ok(customer(id, "Ana")));

    let (status, body) = send(app(repo), get("/api/customers/1")).await;

    assert_eq!(status, StatusCode::OK);
    let found: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(found, json!({"id": 1, "name": "Ana", "email": "ana@x.com"}));
}

#[tokio::test]
async fn test_get_customer_non_numeric_id_is_422() {
    let mut repo = MockBankRepository::new();
    repo.expect_get_customer().never();

    let (status, body) = send(app(repo), get("/api/customers/abc")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_unknown_customer_is_500() {
    let mut repo = MockBankRepository::new();
    repo.expect_get_customer()
        .returning(|_| Err(RepositoryError::not_found("get_customer")));

    let (status, _) = send(app(repo), get("/api/customers/999999")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_get_customers_returns_repository_listing() {
    let mut repo = MockBankRepository::new();
    repo.expect_get_customers()
        .times(1)
        .returning(|| Ok(vec![customer(2, "Bo"), customer(1, "Ana")]));

    let (status, body) = send(app(repo), get("/api/customers")).await;

    assert_eq!(status, StatusCode::OK);
    let customers: Vec<Customer> = serde_json::from_slice(&body).unwrap();
    assert_eq!(customers.len(), 2);
    assert!(customers.contains(&customer(1, "Ana")));
    assert!(customers.contains(&customer(2, "Bo")));
}

#[tokio::test]
async fn test_get_customers_empty_is_empty_array() {
    let mut repo = MockBankRepository::new();
    repo.expect_get_customers().returning(|| Ok(Vec::new()));

    let (status, body) = send(app(repo), get("/api/customers")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]");
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn test_get_balance_returns_balance() {
    let mut repo = MockBankRepository::new();
    repo.expect_get_balance()
        .withf(|id| *id == 10)
        .returning(|_| Ok(100.0));

    let (status, body) = send(app(repo), get("/api/accounts/10")).await;

    assert_eq!(status, StatusCode::OK);
    let balance: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(balance, json!({"balance": 100.0}));
}

#[tokio::test]
async fn test_get_balance_non_numeric_id_is_422() {
    let mut repo = MockBankRepository::new();
    repo.expect_get_balance().never();

    let (status, _) = send(app(repo), get("/api/accounts/ten")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_transfer_success_returns_ok() {
    let mut repo = MockBankRepository::new();
    repo.expect_make_transfer()
        .withf(|from, to, amount| *from == 10 && *to == 11 && *amount == 25.5)
        .times(1)
        .returning(|_, _, _| Ok(()));

    let (status, body) = send(
        app(repo),
        post_json(
            "/api/accounts",
            json!({"account_id": 10, "to_account_id": 11, "amount": 25.5}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn test_transfer_non_positive_amount_never_reaches_database() {
    for amount in [json!(0), json!(-5.0)] {
        let mut repo = MockBankRepository::new();
        repo.expect_make_transfer().never();

        let (status, body) = send(
            app(repo),
            post_json(
                "/api/accounts",
                json!({"account_id": 10, "to_account_id": 11, "amount": amount}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "amount {}", amount);
        assert_eq!(error_code(&body), "BAD_REQUEST");
    }
}

#[tokio::test]
async fn test_transfer_without_content_type_is_still_decoded() {
    let mut repo = MockBankRepository::new();
    repo.expect_make_transfer().never();

    let request = Request::builder()
        .method("POST")
        .uri("/api/accounts")
        .body(Body::from(r#"{"account_id":1,"to_account_id":2,"amount":0}"#))
        .unwrap();
    let (status, body) = send(app(repo), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.error.message, "transfer amount must be greater than zero");
}

#[tokio::test]
async fn test_open_account_without_content_type_is_accepted() {
    let mut repo = MockBankRepository::new();
    repo.expect_open_account().times(1).returning(|_, _| {
        Ok(OpenedAccount {
            customer_id: 1,
            account_id: 2,
        })
    });

    let request = Request::builder()
        .method("POST")
        .uri("/api/customers")
        .header("content-type", "text/plain")
        .body(Body::from(
            r#"{"customer":{"name":"Ana","email":"ana@x.com"},"initial_balance":5}"#,
        ))
        .unwrap();
    let (status, _) = send(app(repo), request).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_oversized_body_keeps_its_status() {
    let mut repo = MockBankRepository::new();
    repo.expect_make_transfer().never();

    let request = Request::builder()
        .method("POST")
        .uri("/api/accounts")
        .header("content-type", "application/json")
        .body(Body::from(vec![b' '; 3 * 1024 * 1024]))
        .unwrap();
    let (status, body) = send(app(repo), request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(error_code(&body), "REQUEST_ERROR");
}

#[tokio::test]
async fn test_transfer_missing_amount_is_400() {
    let mut repo = MockBankRepository::new();
    repo.expect_make_transfer().never();

    let (status, _) = send(
        app(repo),
        post_json("/api/accounts", json!({"account_id": 10, "to_account_id": 11})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_transfer_database_failure_is_500() {
    let mut repo = MockBankRepository::new();
    repo.expect_make_transfer().returning(|_, _, _| {
        Err(RepositoryError::database(
            "make_transfer",
            "calling procedure",
            "insufficient funds",
        ))
    });

    let (status, _) = send(
        app(repo),
        post_json(
            "/api/accounts",
            json!({"account_id": 10, "to_account_id": 11, "amount": 1_000_000.0}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_handler_panic_is_rendered_as_internal_error() {
    let mut repo = MockBankRepository::new();
    repo.expect_get_balance()
        .returning(|_| panic!("balance row vanished"));

    let (status, body) = send(app(repo), get("/api/accounts/10")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_code(&body), "INTERNAL_ERROR");
    let text = String::from_utf8(body).unwrap();
    assert!(!text.contains("vanished"), "panic detail leaked: {}", text);
}

// =============================================================================
// Cancellation
// =============================================================================

/// Sets its flag when dropped.
struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Repository whose balance lookup never completes.
struct HangingRepository {
    dropped: Arc<AtomicBool>,
}

#[async_trait]
impl BankRepository for HangingRepository {
    async fn open_account(&self, _: &NewCustomer, _: f64) -> RepositoryResult<OpenedAccount> {
        unimplemented!()
    }

    async fn get_balance(&self, _account_id: i64) -> RepositoryResult<f64> {
        let _flag = DropFlag(self.dropped.clone());
        std::future::pending().await
    }

    async fn make_transfer(&self, _: i64, _: i64, _: f64) -> RepositoryResult<()> {
        unimplemented!()
    }

    async fn get_customer(&self, _: i64) -> RepositoryResult<Customer> {
        unimplemented!()
    }

    async fn get_customers(&self) -> RepositoryResult<Vec<Customer>> {
        unimplemented!()
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn test_request_deadline_abandons_database_call() {
    let dropped = Arc::new(AtomicBool::new(false));
    let config = GatewayConfig {
        service: ServiceConfig {
            request_timeout_seconds: 1,
            ..ServiceConfig::default()
        },
        ..GatewayConfig::default()
    };
    let app = create_router(AppState::new(
        Arc::new(HangingRepository {
            dropped: dropped.clone(),
        }),
        config,
    ));

    let (status, _) = send(app, get("/api/accounts/10")).await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert!(dropped.load(Ordering::SeqCst), "in-flight call was not dropped");
}

// =============================================================================
// Health and docs
// =============================================================================

#[tokio::test]
async fn test_health_reports_database_state() {
    let mut repo = MockBankRepository::new();
    repo.expect_ping().returning(|| Ok(()));
    let (status, _) = send(app(repo), get("/health")).await;
    assert_eq!(status, StatusCode::OK);

    let mut repo = MockBankRepository::new();
    repo.expect_ping()
        .returning(|| Err(RepositoryError::database("ping", "pinging", "refused")));
    let (status, body) = send(app(repo), get("/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "unhealthy");
}

#[tokio::test]
async fn test_openapi_document_lists_banking_paths() {
    let (status, body) = send(app(MockBankRepository::new()), get("/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    let doc: Value = serde_json::from_slice(&body).unwrap();
    for path in ["/api/customers", "/api/customers/{id}", "/api/accounts", "/api/accounts/{id}"] {
        assert!(doc["paths"].get(path).is_some(), "missing {}", path);
    }
}
