//! Configuration types shared across crates.

use crate::operator::Role;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum accepted request body size for uploads, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Enable the /metrics endpoint for Prometheus scraping (default: true).
    /// When enabled, ensure this endpoint is network-restricted to authorized
    /// scraper IPs at the infrastructure level.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

/// Downstream user/file service configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the downstream service (e.g., "https://files.internal:3000").
    pub base_url: String,
    /// Bearer token presented to the downstream service on every relayed call.
    pub service_token: String,
    /// Total request timeout in seconds for downstream calls.
    #[serde(default = "default_upstream_timeout_secs")]
    pub timeout_secs: u64,
}

/// One operator token entry in the registry.
///
/// Operators authenticate with a bearer token; only its SHA-256 hash is
/// configured. Generate with: `echo -n "your-secret-token" | sha256sum`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// Pre-computed hash of the operator token (SHA-256 hex, 64 characters,
    /// optionally prefixed with "sha256:").
    pub token_hash: String,
    /// Role granted to this operator.
    pub role: Role,
    /// Description for the operator token.
    pub description: Option<String>,
    /// Optional expiry; an expired token is rejected like an unknown one.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
}

/// Top-level application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub operators: Vec<OperatorConfig>,
}

impl AppConfig {
    /// Create a test configuration with a dummy operator registry.
    ///
    /// **For testing only.** The upstream base URL is a placeholder; tests
    /// point it at a mock server before building state.
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig {
                base_url: "http://127.0.0.1:0".to_string(),
                service_token: "test-service-token".to_string(),
                timeout_secs: default_upstream_timeout_secs(),
            },
            operators: vec![
                OperatorConfig {
                    // SHA256 of "test-operator-token"
                    token_hash:
                        "21a41ec35ffe053418f5ebab652c9b4cb07a643a9100640d18b635e0df503928"
                            .to_string(),
                    role: Role::SuperAdmin,
                    description: Some("Test super-admin token".to_string()),
                    expires_at: None,
                },
                OperatorConfig {
                    // SHA256 of "test-auditor-token"
                    token_hash:
                        "57d6cc542388f851e86b07b700b82c139cb61d88b7a0e76d34ac5d7278785931"
                            .to_string(),
                    role: Role::Auditor,
                    description: Some("Test auditor token".to_string()),
                    expires_at: None,
                },
            ],
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024 // 50 MiB
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_upstream_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_upload_bytes: default_max_upload_bytes(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}
