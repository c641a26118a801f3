//! Common test utilities for in-process API testing.
//!
//! The fixture builds the real router over a temporary SQLite database and a
//! `MockNotifier`, so handlers run end to end without a webhook endpoint.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Duration as ChronoDuration;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use inbox_core::{
    testing::MockNotifier, Config, NewTicket, NotificationDispatcher, SqliteTicketStore, Ticket,
    TicketStore,
};

/// Re-export fixtures for test convenience
pub use inbox_core::testing::fixtures;

/// Test fixture for API tests.
pub struct TestFixture {
    /// The Axum router under test
    pub router: Router,
    /// Store shared with the router, for seeding and direct inspection
    pub store: Arc<SqliteTicketStore>,
    /// Records every notification the handlers dispatch
    pub notifier: Arc<MockNotifier>,
    /// Where the dashboard metrics artifact is expected
    pub metrics_path: PathBuf,
    /// Holds the database and metrics artifact
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture with default configuration and an empty store.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a fixture after letting the caller adjust the configuration.
    pub async fn with_config(configure: impl FnOnce(&mut Config)) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let metrics_path = temp_dir.path().join("metrics.json");

        let mut config = Config::default();
        config.database.path = db_path.clone();
        config.seed.path = temp_dir.path().join("no-seed.json");
        config.metrics.path = metrics_path.clone();
        configure(&mut config);

        let store =
            Arc::new(SqliteTicketStore::new(&db_path).expect("Failed to create ticket store"));
        let notifier = Arc::new(MockNotifier::new());
        let notifications =
            NotificationDispatcher::new(Arc::clone(&notifier) as Arc<dyn inbox_core::Notifier>);

        let state = Arc::new(inbox_server::state::AppState::new(
            config,
            Arc::clone(&store) as Arc<dyn TicketStore>,
            notifications,
        ));

        let router = inbox_server::api::create_router(state);

        Self {
            router,
            store,
            notifier,
            metrics_path,
            temp_dir,
        }
    }

    /// Insert tickets directly into the store.
    pub fn insert(&self, tickets: Vec<NewTicket>) -> Vec<Ticket> {
        self.store
            .insert_many(tickets)
            .expect("Failed to insert tickets")
    }

    /// Insert the two-ticket scenario used across tests.
    ///
    /// Returns `(alan, emily)`; Emily's ticket is the newer one.
    pub fn insert_alan_and_emily(&self) -> (Ticket, Ticket) {
        let base = fixtures::base_time();
        let inserted = self.insert(vec![
            fixtures::new_ticket("Test Alan", "Bug Report", "open", "high", base),
            fixtures::new_ticket(
                "Test Emily",
                "Feature Request",
                "closed",
                "low",
                base + ChronoDuration::hours(1),
            ),
        ]);
        (inserted[0].clone(), inserted[1].clone())
    }

    /// Write the dashboard metrics artifact.
    pub fn write_metrics(&self, contents: &str) {
        std::fs::write(&self.metrics_path, contents).expect("Failed to write metrics artifact");
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a PATCH request with JSON body.
    pub async fn patch(&self, path: &str, body: Value) -> TestResponse {
        let body = serde_json::to_string(&body).expect("Failed to serialize body");
        self.request("PATCH", path, Some(body)).await
    }

    /// Send a PATCH request with a raw body (for malformed JSON).
    pub async fn patch_raw(&self, path: &str, body: &str) -> TestResponse {
        self.request("PATCH", path, Some(body.to_string())).await
    }

    async fn request(&self, method: &str, path: &str, body: Option<String>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = match body {
            Some(raw) => {
                request_builder = request_builder.header("Content-Type", "application/json");
                Body::from(raw)
            }
            None => Body::empty(),
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
