//! Authentication middleware and operator lookup.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use filegate_core::operator::{Operator, Role};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::Instrument;
use uuid::Uuid;

/// Maximum length for trace IDs.
/// Longer trace IDs are truncated to prevent log bloat and log injection.
const MAX_TRACE_ID_LEN: usize = 128;

/// Trace ID for request correlation.
#[derive(Clone, Debug)]
pub struct TraceId(pub String);

impl TraceId {
    /// Generate a new random trace ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a trace ID from a client-provided value.
    /// The value is truncated to MAX_TRACE_ID_LEN characters and filtered to
    /// printable ASCII for log safety.
    pub fn from_client(value: &str) -> Self {
        let sanitized: String = value
            .chars()
            .take(MAX_TRACE_ID_LEN)
            .filter(|c| c.is_ascii_graphic() || *c == ' ')
            .collect();

        if sanitized.is_empty() {
            Self::new()
        } else {
            Self(sanitized)
        }
    }

    /// Get the trace ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry of configured operator tokens, keyed by token hash.
#[derive(Clone, Debug, Default)]
pub struct OperatorRegistry {
    operators: HashMap<String, Operator>,
}

impl OperatorRegistry {
    /// Build a registry from normalized (hash, operator) pairs.
    pub fn new(operators: HashMap<String, Operator>) -> Self {
        Self { operators }
    }

    /// Look up an operator by token hash.
    pub fn find(&self, token_hash: &str) -> Option<&Operator> {
        self.operators.get(token_hash)
    }

    /// Number of configured operators.
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

/// Authenticated request extension.
#[derive(Clone, Debug)]
pub struct AuthenticatedOperator {
    /// The validated operator identity.
    pub operator: Operator,
}

impl AuthenticatedOperator {
    /// Check if the operator carries a role.
    pub fn has_role(&self, role: Role) -> bool {
        self.operator.role.implies(&role)
    }

    /// Require a role, returning an error if not carried.
    pub fn require_role(&self, role: Role) -> ApiResult<()> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "missing required role: {role}"
            )))
        }
    }
}

/// Extract bearer token from Authorization header.
/// Per RFC 6750, the "Bearer" scheme is case-insensitive.
fn extract_bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            if v.len() >= 7 && v[..7].eq_ignore_ascii_case("bearer ") {
                Some(&v[7..])
            } else {
                None
            }
        })
}

/// Extract trace ID from X-Trace-Id header or generate a new one.
fn extract_or_generate_trace_id(req: &Request) -> TraceId {
    req.headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(TraceId::from_client)
        .unwrap_or_else(TraceId::new)
}

/// Hash a token for registry lookup.
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Authentication middleware that resolves operator tokens and sets up trace
/// context. Unknown tokens leave the request unauthenticated; expired tokens
/// are rejected outright.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let trace_id = extract_or_generate_trace_id(&req);
    let trace_id_str = trace_id.0.clone();
    req.extensions_mut().insert(trace_id);

    if let Some(token_str) = extract_bearer_token(&req) {
        let token_hash = hash_token(token_str);

        if let Some(operator) = state.operators.find(&token_hash) {
            if !operator.is_valid() {
                return Err(ApiError::Unauthorized(
                    "operator token expired".to_string(),
                ));
            }

            req.extensions_mut().insert(AuthenticatedOperator {
                operator: operator.clone(),
            });
        }
    }

    let response = next
        .run(req)
        .instrument(tracing::info_span!("request", trace_id = %trace_id_str))
        .await;

    Ok(response)
}

/// Require authentication (operator token must be present and resolved).
pub fn require_auth(req: &Request) -> ApiResult<&AuthenticatedOperator> {
    req.extensions()
        .get::<AuthenticatedOperator>()
        .ok_or_else(|| ApiError::Unauthorized("authentication required".to_string()))
}
