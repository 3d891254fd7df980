//! Application state shared across handlers.

use crate::auth::OperatorRegistry;
use filegate_client::FileServiceClient;
use filegate_core::config::AppConfig;
use std::sync::Arc;

/// Shared application state.
///
/// The relay keeps no mutable state between requests; everything here is
/// read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Client for the downstream user/file service.
    pub files: FileServiceClient,
    /// Operator token registry.
    pub operators: Arc<OperatorRegistry>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: AppConfig, files: FileServiceClient, operators: OperatorRegistry) -> Self {
        Self {
            config: Arc::new(config),
            files,
            operators: Arc::new(operators),
        }
    }
}
