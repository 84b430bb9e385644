//! Resource read tests against a stub backend

mod common;

use std::sync::Arc;

use automatisch_client::BackendOperation;
use automatisch_mcp::{DispatchError, ErrorCode};
use common::{dispatcher, StubBackend};
use serde_json::{json, Value};
use tokio_test::assert_err;

#[tokio::test]
async fn test_each_resource_reads_its_overview() {
    let cases = [
        ("automatisch://workflows", BackendOperation::WorkflowsOverview),
        ("automatisch://connections", BackendOperation::ConnectionsOverview),
        ("automatisch://apps", BackendOperation::ListApps),
        ("automatisch://executions/recent", BackendOperation::RecentExecutions),
    ];

    for (uri, operation) in cases {
        let backend = Arc::new(StubBackend::new());
        let result = dispatcher(&backend).read_resource(uri).await.unwrap();

        assert_eq!(backend.operations(), vec![operation], "{}", uri);
        assert_eq!(result.contents.len(), 1);

        let content = &result.contents[0];
        assert_eq!(content.uri, uri);
        assert_eq!(content.mime_type, "application/json");
        let parsed: Value = serde_json::from_str(&content.text).unwrap();
        assert_eq!(parsed, json!({"operation": operation.as_str()}));
    }
}

#[tokio::test]
async fn test_apps_resource_requests_full_catalog() {
    let backend = Arc::new(StubBackend::new());
    dispatcher(&backend).read_resource("automatisch://apps").await.unwrap();
    assert_eq!(backend.calls()[0].arguments, json!({}));
}

#[tokio::test]
async fn test_unknown_resource_is_invalid_request() {
    let backend = Arc::new(StubBackend::new());
    let dispatcher = dispatcher(&backend);

    for uri in [
        "automatisch://bogus",
        "automatisch://workflows/",
        "automatisch://executions",
        "",
    ] {
        let err = assert_err!(dispatcher.read_resource(uri).await);
        assert_eq!(err, DispatchError::UnknownResource(uri.to_string()));
        assert_eq!(err.error_code(), ErrorCode::InvalidRequest);
    }
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_overview_content_round_trips() {
    let overview = json!({
        "total": 2,
        "active": 1,
        "inactive": 1,
        "workflows": [
            {"id": "wf-1", "name": "Sync leads", "active": true},
            {"id": "wf-2", "name": "Post digest", "active": false}
        ]
    });
    let backend = Arc::new(
        StubBackend::new().with_response(BackendOperation::WorkflowsOverview, overview.clone()),
    );

    let result = dispatcher(&backend)
        .read_resource("automatisch://workflows")
        .await
        .unwrap();
    let parsed: Value = serde_json::from_str(&result.contents[0].text).unwrap();
    assert_eq!(parsed, overview);
}

#[tokio::test]
async fn test_resource_backend_failure_is_internal_error() {
    let backend = Arc::new(StubBackend::failing("API error (401): Unauthorized"));

    let err = assert_err!(
        dispatcher(&backend)
            .read_resource("automatisch://executions/recent")
            .await
    );
    assert_eq!(err.error_code(), ErrorCode::InternalError);
    assert!(err.to_string().contains("API error (401): Unauthorized"));
}
