//! Shared handler helpers plus health and identity endpoints.

use crate::auth::require_auth;
use crate::error::{ApiError, ApiResult};
use crate::metrics::record_upstream_failure;
use axum::Json;
use axum::extract::Request;
use filegate_client::ClientError;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;

/// Convert a downstream result into an API result, recording the failure
/// kind for metrics on the way through.
pub fn relay<T>(result: Result<T, ClientError>) -> ApiResult<T> {
    result.map_err(|e| {
        let err = ApiError::from(e);
        record_upstream_failure(err.code());
        err
    })
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /v1/health - Health check.
///
/// This endpoint is intentionally unauthenticated to support load balancer
/// and orchestrator probes. It reports only the relay's own liveness; the
/// downstream service is not probed, so a healthy relay can still return
/// upstream errors.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Response for the authenticated caller.
#[derive(Debug, Serialize)]
pub struct WhoamiResponse {
    pub role: String,
    pub description: Option<String>,
    pub expires_at: Option<String>,
}

/// GET /v1/auth/whoami - Return the operator identity behind the token.
pub async fn whoami(req: Request) -> ApiResult<Json<WhoamiResponse>> {
    let auth = require_auth(&req)?;
    let operator = &auth.operator;

    let expires_at = match operator.expires_at {
        Some(ts) => Some(
            ts.format(&Rfc3339)
                .map_err(|e| ApiError::Internal(format!("failed to format expires_at: {e}")))?,
        ),
        None => None,
    };

    Ok(Json(WhoamiResponse {
        role: operator.role.as_str().to_string(),
        description: operator.description.clone(),
        expires_at,
    }))
}
