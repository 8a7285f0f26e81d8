//! Request logging around the banking routes.
//!
//! Each test installs a thread-local subscriber that writes plain text into a
//! buffer, then inspects what the logging middleware recorded.

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

use bank_service_lib::repository::{BankRepository, MockBankRepository};
use common::ServiceConfig;
use domain::{Customer, NewCustomer, OpenedAccount, RepositoryResult};
use gateway_lib::config::GatewayConfig;
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;

/// Shared in-memory log sink.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}

fn app_with_timeout(repo: impl BankRepository + 'static, seconds: u64) -> Router {
    let config = GatewayConfig {
        service: ServiceConfig {
            request_timeout_seconds: seconds,
            ..ServiceConfig::default()
        },
        ..GatewayConfig::default()
    };
    create_router(AppState::new(Arc::new(repo), config))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Lines emitted by the logging middleware, in order.
fn request_lines(logs: &str) -> Vec<&str> {
    logs.lines()
        .filter(|line| line.contains("started") || line.contains("finished"))
        .collect()
}

#[tokio::test]
async fn test_request_is_logged_with_method_path_status_and_duration() {
    let (logs, _guard) = capture_logs();
    let mut repo = MockBankRepository::new();
    repo.expect_get_balance().returning(|_| Ok(100.0));

    let response = app_with_timeout(repo, 30)
        .oneshot(get("/api/accounts/10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let logs = logs.contents();
    let lines = request_lines(&logs);
    assert_eq!(lines.len(), 2, "logs: {}", logs);

    let (started, finished) = (lines[0], lines[1]);
    assert!(started.contains("started"));
    for line in [started, finished] {
        assert!(line.contains("method=GET"), "line: {}", line);
        assert!(line.contains("path=/api/accounts/10"), "line: {}", line);
        assert!(line.contains("request_id="), "line: {}", line);
    }
    assert!(finished.contains("finished"));
    assert!(finished.contains("status=200"), "line: {}", finished);
    assert!(finished.contains("elapsed_ms="), "line: {}", finished);
}

#[tokio::test]
async fn test_rejected_request_is_logged_with_its_status() {
    let (logs, _guard) = capture_logs();
    let mut repo = MockBankRepository::new();
    repo.expect_get_customer().never();

    let response = app_with_timeout(repo, 30)
        .oneshot(get("/api/customers/abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let logs = logs.contents();
    let lines = request_lines(&logs);
    assert!(
        lines.last().is_some_and(|line| line.contains("status=422")),
        "logs: {}",
        logs
    );
}

/// Repository whose balance lookup never completes.
struct StalledRepository;

#[async_trait]
impl BankRepository for StalledRepository {
    async fn open_account(&self, _: &NewCustomer, _: f64) -> RepositoryResult<OpenedAccount> {
        unimplemented!()
    }

    async fn get_balance(&self, _account_id: i64) -> RepositoryResult<f64> {
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
async fn test_logger_wraps_the_timeout_layer() {
    let (logs, _guard) = capture_logs();

    let response = app_with_timeout(StalledRepository, 1)
        .oneshot(get("/api/accounts/10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

    // The logger starts before the deadline is armed and finishes after the
    // timeout produced its response.
    let logs = logs.contents();
    let lines = request_lines(&logs);
    assert_eq!(lines.len(), 2, "logs: {}", logs);
    assert!(lines[0].contains("started"));
    assert!(lines[1].contains("status=408"), "logs: {}", logs);
}
