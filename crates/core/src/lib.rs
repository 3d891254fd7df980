//! Core domain types and shared logic for the filegate admin relay.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Object identifiers used by the downstream file service
//! - Operator identity, roles and token expiry
//! - File listing filters and pass-through DTOs
//! - Configuration types

pub mod config;
pub mod error;
pub mod files;
pub mod object_id;
pub mod operator;

pub use error::{Error, Result};
pub use files::{
    FileListPage, FilePayload, FileUpdate, ListFilters, StorageUsage, UploadAssociations,
    UploadResponse,
};
pub use object_id::ObjectId;
pub use operator::{Operator, Role};
