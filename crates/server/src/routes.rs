//! Route configuration.

use crate::auth::auth_middleware;
use crate::guard::require_super_admin;
use crate::handlers;
use crate::metrics::metrics_handler;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, patch, post};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    // File operations all sit behind the centralized super-admin gate.
    let file_routes = Router::new()
        .route("/v1/users/{user_id}/files", get(handlers::list_files))
        .route(
            "/v1/users/{user_id}/files/{file_id}",
            patch(handlers::update_file).delete(handlers::delete_file),
        )
        .route("/v1/users/{user_id}/storage", get(handlers::storage_usage))
        .route("/v1/files/uploads", post(handlers::upload_files))
        .layer(DefaultBodyLimit::max(state.config.server.max_upload_bytes))
        .route_layer(middleware::from_fn(require_super_admin));

    let api_routes = Router::new()
        // Health check (intentionally unauthenticated for load balancers/probes)
        .route("/v1/health", get(handlers::health_check))
        // Operator identity
        .route("/v1/auth/whoami", get(handlers::whoami))
        .merge(file_routes);

    let mut router = Router::new().merge(api_routes);

    // Conditionally add metrics endpoint based on config.
    // SECURITY: When enabled, this endpoint MUST be network-restricted
    // to authorized Prometheus scraper IPs only.
    // See crate::metrics module documentation for details.
    if state.config.server.metrics_enabled {
        router = router.merge(Router::new().route("/metrics", get(metrics_handler)));
    }

    // Middleware layers are applied in reverse order (outermost first).
    // Order of execution: TraceLayer -> Auth -> role gate (file routes) -> Handler
    router
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
