//! DTOs for the downstream file service contract.
//!
//! The relay does not own a file model; descriptors returned by the
//! downstream service are passed through as raw JSON. Only the envelopes
//! consumed by the relay (`files`/`hasMore`, `file`, `storageUsed`/
//! `totalStorage`) are typed. Downstream JSON is camelCase; the admin API
//! re-serializes envelopes as snake_case.

use serde::{Deserialize, Serialize};

/// Filters accepted by the file listing operation.
///
/// Values are forwarded verbatim to the downstream listing endpoint; none of
/// them is interpreted locally.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ListFilters {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Free-text search over file names.
    pub search: Option<String>,
    /// File type filter (e.g. "image", "document").
    #[serde(rename = "type")]
    pub file_type: Option<String>,
    /// Restrict to files associated with a task.
    pub task_id: Option<String>,
    /// Comma-separated tag filter.
    pub tags: Option<String>,
    /// Include only trashed (true) or only live (false) files.
    pub trashed: Option<bool>,
    /// Restrict to a folder.
    pub folder_id: Option<String>,
}

/// One page of file descriptors from the downstream listing endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct FileListPage {
    pub files: Vec<serde_json::Value>,
    pub has_more: bool,
}

/// A file payload to upload: binary content plus its original identity.
#[derive(Clone, Debug)]
pub struct FilePayload {
    /// Original filename as submitted by the operator.
    pub name: String,
    /// Declared content type, if any.
    pub content_type: Option<String>,
    /// Raw file bytes.
    pub data: Vec<u8>,
}

/// Optional associations attached to uploaded files.
#[derive(Clone, Debug, Default)]
pub struct UploadAssociations {
    pub task_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub folder_id: Option<String>,
}

/// Downstream response to a single-user upload.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(default)]
    pub files: Vec<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Partial update for one user's one file, serialized for the downstream
/// modify endpoint. Absent fields are left untouched downstream.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

/// Storage usage figures reported by the downstream service, verbatim.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct StorageUsage {
    pub storage_used: u64,
    pub total_storage: u64,
}
