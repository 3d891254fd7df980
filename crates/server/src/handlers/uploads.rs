//! Fan-out upload endpoint.
//!
//! One multipart request distributes the same file set to several target
//! users. The request is handled in two phases: every target identifier is
//! validated before any downstream call, then each validated target gets its
//! own independent upload whose failure does not abort the rest of the batch.

use crate::auth::TraceId;
use crate::error::{ApiError, ApiResult};
use crate::metrics::{FANOUT_TARGET_FAILURES, FANOUT_TARGETS, record_relayed};
use crate::state::AppState;
use axum::extract::multipart::Multipart;
use axum::extract::State;
use axum::{Extension, Json};
use filegate_core::files::{FilePayload, UploadAssociations};
use filegate_core::object_id::ObjectId;
use serde::Serialize;

/// Successful upload for one target user.
#[derive(Debug, Serialize)]
pub struct UserUploadResult {
    pub user_id: String,
    /// File descriptors created downstream, passed through verbatim.
    pub files: Vec<serde_json::Value>,
}

/// Failed upload for one target user.
#[derive(Debug, Serialize)]
pub struct UserUploadError {
    pub user_id: String,
    pub error: String,
}

/// Per-target outcomes of a fan-out upload.
#[derive(Debug, Serialize)]
pub struct UploadFanoutResponse {
    pub uploaded: Vec<UserUploadResult>,
    pub errors: Vec<UserUploadError>,
}

/// Parsed multipart form for a fan-out upload.
#[derive(Default)]
struct UploadForm {
    raw_user_ids: Option<String>,
    files: Vec<FilePayload>,
    associations: UploadAssociations,
}

/// POST /v1/files/uploads - Upload the same files to multiple users.
pub async fn upload_files(
    State(state): State<AppState>,
    Extension(trace_id): Extension<TraceId>,
    multipart: Multipart,
) -> ApiResult<Json<UploadFanoutResponse>> {
    let form = read_upload_form(multipart).await?;

    // Phase 1: validate everything before the first downstream call. A
    // single malformed target id rejects the whole batch.
    let raw_user_ids = form
        .raw_user_ids
        .ok_or_else(|| ApiError::BadRequest("missing user_ids field".to_string()))?;
    let targets = parse_targets(&raw_user_ids)?;
    if form.files.is_empty() {
        return Err(ApiError::BadRequest("no files provided".to_string()));
    }

    record_relayed("upload");

    // Phase 2: one independent upload per target. A failed target is
    // recorded and the batch moves on; nothing is rolled back.
    let mut uploaded = Vec::new();
    let mut errors = Vec::new();
    for user_id in &targets {
        FANOUT_TARGETS.inc();
        match state
            .files
            .upload_files(user_id, &form.files, &form.associations)
            .await
        {
            Ok(response) => {
                uploaded.push(UserUploadResult {
                    user_id: user_id.to_string(),
                    files: response.files,
                });
            }
            Err(e) => {
                FANOUT_TARGET_FAILURES.inc();
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "Fan-out upload failed for target"
                );
                errors.push(UserUploadError {
                    user_id: user_id.to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        trace_id = %trace_id,
        targets = targets.len(),
        files = form.files.len(),
        failed = errors.len(),
        "Fan-out upload finished"
    );

    Ok(Json(UploadFanoutResponse { uploaded, errors }))
}

/// Drain the multipart stream into file payloads and form fields.
/// Unknown fields are ignored.
async fn read_upload_form(mut multipart: Multipart) -> ApiResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("user_ids") => {
                form.raw_user_ids = Some(read_text(field).await?);
            }
            Some("files") => {
                let file_name = field.file_name().map(str::to_string).ok_or_else(|| {
                    ApiError::BadRequest("files part is missing a filename".to_string())
                })?;
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("failed to read file: {e}")))?
                    .to_vec();
                form.files.push(FilePayload {
                    name: file_name,
                    content_type,
                    data,
                });
            }
            Some("task_id") => {
                form.associations.task_id = Some(read_text(field).await?);
            }
            Some("tags") => {
                let raw = read_text(field).await?;
                let tags: Vec<String> = serde_json::from_str(&raw).map_err(|_| {
                    ApiError::BadRequest(
                        "tags must be a JSON-encoded array of strings".to_string(),
                    )
                })?;
                form.associations.tags = Some(tags);
            }
            Some("folder_id") => {
                form.associations.folder_id = Some(read_text(field).await?);
            }
            _ => continue,
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart field: {e}")))
}

/// Parse the JSON-encoded target list, validating every id up front.
fn parse_targets(raw: &str) -> ApiResult<Vec<ObjectId>> {
    let raw_ids: Vec<String> = serde_json::from_str(raw).map_err(|_| {
        ApiError::BadRequest("user_ids must be a JSON-encoded array of strings".to_string())
    })?;

    if raw_ids.is_empty() {
        return Err(ApiError::BadRequest("user_ids is empty".to_string()));
    }

    let mut targets = Vec::with_capacity(raw_ids.len());
    for (position, raw_id) in raw_ids.iter().enumerate() {
        let id = ObjectId::parse(raw_id).map_err(|_| {
            ApiError::BadRequest(format!(
                "user_ids[{position}]: invalid object id {raw_id:?}"
            ))
        })?;
        targets.push(id);
    }
    Ok(targets)
}
