//! Server test utilities.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use filegate_client::FileServiceClient;
use filegate_core::config::AppConfig;
use filegate_server::bootstrap::build_operator_registry;
use filegate_server::{AppState, create_router};
use httpmock::MockServer;
use tower::ServiceExt;

/// Raw bearer token resolving to the test super-admin operator.
pub const SUPER_ADMIN_TOKEN: &str = "test-operator-token";

/// Raw bearer token resolving to the test auditor operator (not super-admin).
pub const AUDITOR_TOKEN: &str = "test-auditor-token";

/// A test server wrapper with a mocked downstream service.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub upstream: MockServer,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a test server whose downstream client points at a fresh mock.
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a test server with custom config modifications.
    pub fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        filegate_server::metrics::register_metrics();

        let upstream = MockServer::start();

        let mut config = AppConfig::for_testing();
        config.upstream.base_url = upstream.base_url();
        modifier(&mut config);

        let operators =
            build_operator_registry(&config.operators).expect("invalid test operator config");
        let files =
            FileServiceClient::new(&config.upstream).expect("failed to build downstream client");

        let state = AppState::new(config, files, operators);
        let router = create_router(state);

        Self { router, upstream }
    }

    /// Issue a request against the router and decode the JSON response.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
        auth_token: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = auth_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let body = match body {
            Some(v) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(serde_json::to_vec(&v).unwrap())
            }
            None => Body::empty(),
        };

        let request = builder.body(body).unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_json: serde_json::Value = if body_bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, body_json)
    }

    /// Issue a multipart POST against the router and decode the JSON response.
    pub async fn multipart_request(
        &self,
        uri: &str,
        boundary: &str,
        body: Vec<u8>,
        auth_token: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method("POST").uri(uri).header(
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        );

        if let Some(token) = auth_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let request = builder.body(Body::from(body)).unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_json: serde_json::Value = if body_bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, body_json)
    }
}
