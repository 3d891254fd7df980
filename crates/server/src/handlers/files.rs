//! File relay endpoints: list, modify, delete, storage usage.
//!
//! Each handler is a stateless translate-forward-normalize cycle: validate
//! identifiers, forward to the downstream service, re-shape the response
//! envelope. The super-admin gate has already run by the time these execute.

use crate::error::ApiResult;
use crate::handlers::common::relay;
use crate::metrics::record_relayed;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use filegate_core::files::{FileListPage, FileUpdate, ListFilters, StorageUsage};
use filegate_core::object_id::ObjectId;
use serde::{Deserialize, Serialize};

/// GET /v1/users/{user_id}/files - List one user's files.
///
/// Filter values are forwarded verbatim to the downstream listing endpoint.
pub async fn list_files(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(filters): Query<ListFilters>,
) -> ApiResult<Json<FileListPage>> {
    let user_id = ObjectId::parse(&user_id)?;
    record_relayed("list");

    let page = relay(state.files.list_files(&user_id, &filters).await)?;
    Ok(Json(page))
}

/// Partial update accepted from operators.
#[derive(Debug, Deserialize)]
pub struct UpdateFileRequest {
    pub name: Option<String>,
    pub task_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub folder_id: Option<String>,
}

/// Updated file envelope returned to operators.
#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub file: serde_json::Value,
}

/// PATCH /v1/users/{user_id}/files/{file_id} - Modify one user's one file.
pub async fn update_file(
    State(state): State<AppState>,
    Path((user_id, file_id)): Path<(String, String)>,
    Json(request): Json<UpdateFileRequest>,
) -> ApiResult<Json<FileResponse>> {
    let user_id = ObjectId::parse(&user_id)?;
    let file_id = ObjectId::parse(&file_id)?;
    record_relayed("update");

    let update = FileUpdate {
        name: request.name,
        task_id: request.task_id,
        tags: request.tags,
        folder_id: request.folder_id,
    };

    let file = relay(state.files.update_file(&user_id, &file_id, &update).await)?;
    Ok(Json(FileResponse { file }))
}

/// Delete mode selector.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    /// When true, erase the file instead of moving it to trash.
    #[serde(default)]
    pub permanent: bool,
}

/// DELETE /v1/users/{user_id}/files/{file_id} - Delete one user's one file.
///
/// The `permanent` flag only selects the downstream route: trash is a
/// reversible marker owned by the downstream service, permanent delete hits
/// the resource base path with the destructive verb. No fallback between the
/// two.
pub async fn delete_file(
    State(state): State<AppState>,
    Path((user_id, file_id)): Path<(String, String)>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<StatusCode> {
    let user_id = ObjectId::parse(&user_id)?;
    let file_id = ObjectId::parse(&file_id)?;
    record_relayed("delete");

    if params.permanent {
        relay(state.files.delete_file_permanent(&user_id, &file_id).await)?;
    } else {
        relay(state.files.trash_file(&user_id, &file_id).await)?;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/users/{user_id}/storage - One user's storage usage, verbatim.
pub async fn storage_usage(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<StorageUsage>> {
    let user_id = ObjectId::parse(&user_id)?;
    record_relayed("storage");

    let usage = relay(state.files.storage_usage(&user_id).await)?;
    Ok(Json(usage))
}
