//! Client for the downstream user/file service REST API.

use crate::error::{ClientError, ClientResult};
use filegate_core::config::UpstreamConfig;
use filegate_core::files::{
    FileListPage, FilePayload, FileUpdate, ListFilters, StorageUsage, UploadAssociations,
    UploadResponse,
};
use filegate_core::object_id::ObjectId;
use reqwest::Url;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the downstream service's `/api/files` namespace.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct FileServiceClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

#[derive(Debug, Deserialize)]
struct FileEnvelope {
    file: serde_json::Value,
}

impl FileServiceClient {
    /// Build a client from upstream configuration.
    pub fn new(config: &UpstreamConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ClientError::from_reqwest)?;
        Ok(Self {
            http,
            base_url,
            token: config.service_token.clone(),
        })
    }

    fn url(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{path}: {e}")))
    }

    async fn send_json<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> ClientResult<T> {
        let response = req
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ClientError::Upstream {
                status: status.as_u16(),
                message: extract_message(&body),
            });
        }
        serde_json::from_str(&body).map_err(ClientError::Decode)
    }

    async fn send_empty(&self, req: reqwest::RequestBuilder) -> ClientResult<()> {
        let response = req
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ClientError::Upstream {
                status: status.as_u16(),
                message: extract_message(&body),
            });
        }
        Ok(())
    }

    /// List one user's files, forwarding filter values verbatim.
    pub async fn list_files(
        &self,
        user_id: &ObjectId,
        filters: &ListFilters,
    ) -> ClientResult<FileListPage> {
        let mut url = self.url(&format!("/api/files/admin/{user_id}"))?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(page) = filters.page {
                query.append_pair("page", &page.to_string());
            }
            if let Some(limit) = filters.limit {
                query.append_pair("limit", &limit.to_string());
            }
            if let Some(search) = &filters.search {
                query.append_pair("search", search);
            }
            if let Some(file_type) = &filters.file_type {
                query.append_pair("type", file_type);
            }
            if let Some(task_id) = &filters.task_id {
                query.append_pair("taskId", task_id);
            }
            if let Some(tags) = &filters.tags {
                query.append_pair("tags", tags);
            }
            if let Some(trashed) = filters.trashed {
                query.append_pair("trashed", if trashed { "true" } else { "false" });
            }
            if let Some(folder_id) = &filters.folder_id {
                query.append_pair("folderId", folder_id);
            }
        }
        self.send_json(self.http.get(url)).await
    }

    /// Upload a set of files into one user's storage as a multipart request.
    ///
    /// Every payload becomes a `files` part with its original filename and
    /// content type; associations become `taskId`/`tags`/`folderId` form
    /// fields, with tags JSON-encoded as the downstream service expects.
    pub async fn upload_files(
        &self,
        user_id: &ObjectId,
        files: &[FilePayload],
        associations: &UploadAssociations,
    ) -> ClientResult<UploadResponse> {
        let url = self.url(&format!("/api/files/admin/{user_id}/upload"))?;

        let mut form = Form::new();
        for file in files {
            let mut part = Part::bytes(file.data.clone()).file_name(file.name.clone());
            if let Some(content_type) = &file.content_type {
                part = part
                    .mime_str(content_type)
                    .map_err(ClientError::from_reqwest)?;
            }
            form = form.part("files", part);
        }
        if let Some(task_id) = &associations.task_id {
            form = form.text("taskId", task_id.clone());
        }
        if let Some(tags) = &associations.tags {
            form = form.text("tags", serde_json::json!(tags).to_string());
        }
        if let Some(folder_id) = &associations.folder_id {
            form = form.text("folderId", folder_id.clone());
        }

        self.send_json(self.http.post(url).multipart(form)).await
    }

    /// Apply a partial update to one user's one file.
    pub async fn update_file(
        &self,
        user_id: &ObjectId,
        file_id: &ObjectId,
        update: &FileUpdate,
    ) -> ClientResult<serde_json::Value> {
        let url = self.url(&format!("/api/files/admin/{user_id}/{file_id}"))?;
        let envelope: FileEnvelope = self.send_json(self.http.patch(url).json(update)).await?;
        Ok(envelope.file)
    }

    /// Mark one user's one file as trashed (reversible).
    pub async fn trash_file(&self, user_id: &ObjectId, file_id: &ObjectId) -> ClientResult<()> {
        let url = self.url(&format!("/api/files/admin/{user_id}/{file_id}/trash"))?;
        self.send_empty(self.http.patch(url)).await
    }

    /// Permanently delete one user's one file.
    pub async fn delete_file_permanent(
        &self,
        user_id: &ObjectId,
        file_id: &ObjectId,
    ) -> ClientResult<()> {
        let url = self.url(&format!("/api/files/admin/{user_id}/{file_id}"))?;
        self.send_empty(self.http.delete(url)).await
    }

    /// Fetch one user's storage usage figures.
    pub async fn storage_usage(&self, user_id: &ObjectId) -> ClientResult<StorageUsage> {
        let url = self.url(&format!("/api/files/admin/{user_id}/storage"))?;
        self.send_json(self.http.get(url)).await
    }
}

/// Pull the downstream-provided `message` field out of an error body, if the
/// body is JSON and carries one.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
