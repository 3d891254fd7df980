//! Centralized super-admin gate for file routes.
//!
//! Every file operation requires the `super-admin` role. The check lives in
//! one middleware applied to the whole file router, so no handler repeats it
//! and no downstream call can be issued past a failed check.

use crate::auth::AuthenticatedOperator;
use crate::error::ApiError;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use filegate_core::operator::Role;

/// Reject the request unless an authenticated super-admin issued it.
pub async fn require_super_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    let operator = req
        .extensions()
        .get::<AuthenticatedOperator>()
        .ok_or_else(|| ApiError::Unauthorized("authentication required".to_string()))?;

    operator.require_role(Role::SuperAdmin)?;

    Ok(next.run(req).await)
}
