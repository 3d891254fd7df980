//! HTTP control plane for the admin file relay.
//!
//! This crate provides the gateway surface operators talk to:
//! - Bearer-token authentication against a configured operator registry
//! - A centralized super-admin gate in front of every file operation
//! - Relay handlers that translate, forward and normalize file operations
//! - Fan-out uploads across multiple target users
//! - Health, whoami and metrics endpoints

pub mod auth;
pub mod bootstrap;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use auth::TraceId;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
