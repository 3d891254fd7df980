//! Integration tests for the list/modify/storage relay endpoints.

mod common;

use axum::http::StatusCode;
use common::TestServer;
use common::fixtures::{FILE_ID, USER_A};
use common::server::{AUDITOR_TOKEN, SUPER_ADMIN_TOKEN};
use httpmock::Method::{GET, PATCH};
use serde_json::json;

// =============================================================================
// Authorization: no downstream call without a super-admin identity
// =============================================================================

#[tokio::test]
async fn file_operations_require_authentication() {
    let server = TestServer::new();
    let catch_all = server.upstream.mock(|when, then| {
        when.path_includes("/api/files");
        then.status(200).json_body(json!({}));
    });

    let (status, body) = server
        .request("GET", &format!("/v1/users/{USER_A}/files"), None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(catch_all.hits(), 0);
}

#[tokio::test]
async fn file_operations_require_the_super_admin_role() {
    let server = TestServer::new();
    let catch_all = server.upstream.mock(|when, then| {
        when.path_includes("/api/files");
        then.status(200).json_body(json!({}));
    });

    for (method, uri) in [
        ("GET", format!("/v1/users/{USER_A}/files")),
        ("GET", format!("/v1/users/{USER_A}/storage")),
        ("DELETE", format!("/v1/users/{USER_A}/files/{FILE_ID}")),
    ] {
        let (status, body) = server
            .request(method, &uri, None, Some(AUDITOR_TOKEN))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri}");
        assert_eq!(body["code"], "forbidden");
    }
    assert_eq!(catch_all.hits(), 0);
}

// =============================================================================
// Identifier validation happens before any downstream call
// =============================================================================

#[tokio::test]
async fn malformed_user_id_fails_without_a_downstream_call() {
    let server = TestServer::new();
    let catch_all = server.upstream.mock(|when, then| {
        when.path_includes("/api/files");
        then.status(200).json_body(json!({}));
    });

    for uri in [
        "/v1/users/not-an-object-id/files".to_string(),
        "/v1/users/not-an-object-id/storage".to_string(),
        format!("/v1/users/{USER_A}/files/also-not-an-id"),
    ] {
        let method = if uri.contains("/files/") { "DELETE" } else { "GET" };
        let (status, body) = server
            .request(method, &uri, None, Some(SUPER_ADMIN_TOKEN))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], "bad_request");
    }
    assert_eq!(catch_all.hits(), 0);
}

// =============================================================================
// Listing: filters are forwarded unmodified
// =============================================================================

#[tokio::test]
async fn list_filters_round_trip_to_the_downstream_request() {
    let server = TestServer::new();
    let list = server.upstream.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/files/admin/{USER_A}"))
            .query_param("page", "2")
            .query_param("limit", "10")
            .query_param("search", "report")
            .query_param("type", "document")
            .query_param("taskId", FILE_ID)
            .query_param("tags", "finance,q3")
            .query_param("trashed", "true")
            .query_param("folderId", "64b7f0a1c2d3e4f5a6b7c8da");
        then.status(200).json_body(json!({
            "files": [{"_id": FILE_ID, "name": "report.pdf"}],
            "hasMore": false
        }));
    });

    let uri = format!(
        "/v1/users/{USER_A}/files?page=2&limit=10&search=report&type=document\
         &task_id={FILE_ID}&tags=finance,q3&trashed=true&folder_id=64b7f0a1c2d3e4f5a6b7c8da"
    );
    let (status, body) = server
        .request("GET", &uri, None, Some(SUPER_ADMIN_TOKEN))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["files"][0]["name"], "report.pdf");
    assert_eq!(body["has_more"], json!(false));
    list.assert();
}

#[tokio::test]
async fn list_without_filters_reaches_the_bare_listing_path() {
    let server = TestServer::new();
    let list = server.upstream.mock(|when, then| {
        when.method(GET).path(format!("/api/files/admin/{USER_A}"));
        then.status(200).json_body(json!({"files": [], "hasMore": false}));
    });

    let (status, _) = server
        .request(
            "GET",
            &format!("/v1/users/{USER_A}/files"),
            None,
            Some(SUPER_ADMIN_TOKEN),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    list.assert();
}

// =============================================================================
// Modify
// =============================================================================

#[tokio::test]
async fn update_translates_and_returns_the_file_envelope() {
    let server = TestServer::new();
    let update = server.upstream.mock(|when, then| {
        when.method(PATCH)
            .path(format!("/api/files/admin/{USER_A}/{FILE_ID}"))
            .json_body(json!({
                "name": "renamed.pdf",
                "taskId": "64b7f0a1c2d3e4f5a6b7c8db",
                "tags": ["archived"]
            }));
        then.status(200).json_body(json!({
            "file": {"_id": FILE_ID, "name": "renamed.pdf"}
        }));
    });

    let (status, body) = server
        .request(
            "PATCH",
            &format!("/v1/users/{USER_A}/files/{FILE_ID}"),
            Some(json!({
                "name": "renamed.pdf",
                "task_id": "64b7f0a1c2d3e4f5a6b7c8db",
                "tags": ["archived"]
            })),
            Some(SUPER_ADMIN_TOKEN),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["file"]["name"], "renamed.pdf");
    update.assert();
}

// =============================================================================
// Storage usage
// =============================================================================

#[tokio::test]
async fn storage_usage_is_passed_through_verbatim() {
    let server = TestServer::new();
    server.upstream.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/files/admin/{USER_A}/storage"));
        then.status(200).json_body(json!({
            "storageUsed": 123456,
            "totalStorage": 1073741824u64
        }));
    });

    let (status, body) = server
        .request(
            "GET",
            &format!("/v1/users/{USER_A}/storage"),
            None,
            Some(SUPER_ADMIN_TOKEN),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storage_used"], 123456);
    assert_eq!(body["total_storage"], 1073741824u64);
}

// =============================================================================
// Downstream failures surface as 500 with the downstream message
// =============================================================================

#[tokio::test]
async fn downstream_failure_surfaces_the_downstream_message() {
    let server = TestServer::new();
    server.upstream.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/files/admin/{USER_A}/storage"));
        then.status(404).json_body(json!({"message": "user not found"}));
    });

    let (status, body) = server
        .request(
            "GET",
            &format!("/v1/users/{USER_A}/storage"),
            None,
            Some(SUPER_ADMIN_TOKEN),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "upstream_error");
    assert_eq!(body["message"], "user not found");
}

#[tokio::test]
async fn malformed_downstream_body_gets_its_own_error_code() {
    let server = TestServer::new();
    server.upstream.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/files/admin/{USER_A}/storage"));
        then.status(200).body("<html>surprise</html>");
    });

    let (status, body) = server
        .request(
            "GET",
            &format!("/v1/users/{USER_A}/storage"),
            None,
            Some(SUPER_ADMIN_TOKEN),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "upstream_invalid_response");
}
