//! Tool dispatch tests against a stub backend

mod common;

use std::sync::Arc;

use automatisch_client::BackendOperation;
use automatisch_mcp::{CallResult, DispatchError, ErrorCode};
use common::{args, dispatcher, StubBackend};
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};

fn parsed(result: &CallResult) -> Value {
    assert_eq!(result.content.len(), 1);
    serde_json::from_str(result.content[0].text()).unwrap()
}

#[tokio::test]
async fn test_each_tool_routes_to_its_operation() {
    let cases = [
        ("list_workflows", json!({}), BackendOperation::ListWorkflows),
        ("get_workflow", json!({"workflowId": "1"}), BackendOperation::GetWorkflow),
        ("create_workflow", json!({"name": "n"}), BackendOperation::CreateWorkflow),
        ("update_workflow", json!({"workflowId": "1"}), BackendOperation::UpdateWorkflow),
        ("delete_workflow", json!({"workflowId": "1"}), BackendOperation::DeleteWorkflow),
        ("list_connections", json!({}), BackendOperation::ListConnections),
        (
            "create_connection",
            json!({"appKey": "slack", "name": "Team", "credentials": {"token": "t"}}),
            BackendOperation::CreateConnection,
        ),
        ("list_executions", json!({}), BackendOperation::ListExecutions),
        ("get_available_apps", json!({}), BackendOperation::ListApps),
        ("test_workflow", json!({"workflowId": "1"}), BackendOperation::TestWorkflow),
    ];

    for (tool, arguments, operation) in cases {
        let backend = Arc::new(StubBackend::new());
        let result = dispatcher(&backend).dispatch_tool(tool, args(arguments)).await;
        assert_ok!(result, "{}", tool);
        assert_eq!(backend.operations(), vec![operation], "{}", tool);
    }
}

#[tokio::test]
async fn test_unknown_tool_never_reaches_backend() {
    let backend = Arc::new(StubBackend::new());
    let dispatcher = dispatcher(&backend);

    for name in ["nonexistent", "", "LIST_WORKFLOWS", "workflows.list"] {
        let err = assert_err!(dispatcher.dispatch_tool(name, args(json!({}))).await);
        assert_eq!(err, DispatchError::UnknownTool(name.to_string()));
        assert_eq!(err.error_code(), ErrorCode::MethodNotFound);
    }
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_create_connection_requires_each_field() {
    let complete = json!({"appKey": "slack", "name": "Team", "credentials": {"token": "t"}});

    for missing in ["appKey", "name", "credentials"] {
        let backend = Arc::new(StubBackend::new());
        let mut arguments = args(complete.clone());
        arguments.remove(missing);

        let err = assert_err!(
            dispatcher(&backend)
                .dispatch_tool("create_connection", arguments)
                .await
        );
        assert_eq!(err.error_code(), ErrorCode::InvalidParams);
        assert_eq!(err.field(), Some(missing));
        assert!(err.to_string().contains(missing));
        assert!(backend.calls().is_empty());
    }
}

#[tokio::test]
async fn test_create_connection_forwards_verbatim_and_round_trips() {
    let created = json!({
        "id": "conn-1",
        "key": "slack",
        "formattedData": {"screenName": "Team"},
        "verified": true
    });
    let backend = Arc::new(
        StubBackend::new().with_response(BackendOperation::CreateConnection, created.clone()),
    );

    let credentials = json!({"token": "xoxb-1", "nested": {"scopes": ["chat:write"]}});
    let result = dispatcher(&backend)
        .dispatch_tool(
            "create_connection",
            args(json!({"appKey": "slack", "name": "Team", "credentials": credentials})),
        )
        .await
        .unwrap();

    assert_eq!(parsed(&result), created);
    assert_eq!(
        backend.calls()[0].arguments,
        json!({"appKey": "slack", "name": "Team", "credentials": credentials})
    );
}

#[tokio::test]
async fn test_list_workflows_preserves_backend_order() {
    let workflows = json!([
        {"id": "wf-3", "name": "Archive", "active": true},
        {"id": "wf-1", "name": "Sync leads", "active": true},
        {"id": "wf-2", "name": "Post digest", "active": true}
    ]);
    let backend = Arc::new(
        StubBackend::new().with_response(BackendOperation::ListWorkflows, workflows.clone()),
    );

    let result = dispatcher(&backend)
        .dispatch_tool("list_workflows", args(json!({"status": "active", "limit": 5})))
        .await
        .unwrap();

    let value = parsed(&result);
    assert_eq!(value.as_array().unwrap().len(), 3);
    assert_eq!(value, workflows);
    assert_eq!(backend.calls()[0].arguments, json!({"status": "active", "limit": 5}));
}

#[tokio::test]
async fn test_get_workflow_not_found_is_null_content() {
    let backend = Arc::new(StubBackend::new().with_response(BackendOperation::GetWorkflow, Value::Null));
    let dispatcher = dispatcher(&backend);

    let err = assert_err!(dispatcher.dispatch_tool("get_workflow", args(json!({}))).await);
    assert!(matches!(err, DispatchError::InvalidArgument { .. }));
    assert!(backend.calls().is_empty());

    let result = dispatcher
        .dispatch_tool("get_workflow", args(json!({"workflowId": "42"})))
        .await
        .unwrap();
    assert_eq!(result.content[0].text(), "null");
    assert_eq!(backend.calls()[0].arguments, json!({"workflowId": "42"}));
}

#[tokio::test]
async fn test_update_workflow_passes_remaining_fields() {
    let backend = Arc::new(StubBackend::new());
    dispatcher(&backend)
        .dispatch_tool(
            "update_workflow",
            args(json!({"workflowId": "wf-7", "name": "Renamed", "active": false, "description": null})),
        )
        .await
        .unwrap();

    assert_eq!(
        backend.calls()[0].arguments,
        json!({"workflowId": "wf-7", "changes": {"name": "Renamed", "active": false}})
    );
}

#[tokio::test]
async fn test_test_workflow_sends_empty_sample_by_default() {
    let backend = Arc::new(StubBackend::new());
    dispatcher(&backend)
        .dispatch_tool("test_workflow", args(json!({"workflowId": "wf-1"})))
        .await
        .unwrap();

    assert_eq!(
        backend.calls()[0].arguments,
        json!({"workflowId": "wf-1", "testData": {}})
    );
}

#[tokio::test]
async fn test_backend_failure_becomes_internal_error() {
    let backend = Arc::new(StubBackend::failing("connection refused"));

    let err = assert_err!(
        dispatcher(&backend)
            .dispatch_tool("list_executions", args(json!({"workflowId": "wf-1"})))
            .await
    );
    assert_eq!(err.error_code(), ErrorCode::InternalError);
    match &err {
        DispatchError::BackendFailure { operation, message } => {
            assert_eq!(*operation, BackendOperation::ListExecutions);
            assert!(message.contains("connection refused"), "{}", message);
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let protocol = err.to_protocol_error();
    assert_eq!(protocol.code.code(), -32603);
    assert!(protocol.message.contains("connection refused"));
}

#[tokio::test]
async fn test_invalid_enum_is_rejected_before_backend() {
    let backend = Arc::new(StubBackend::new());
    let dispatcher = dispatcher(&backend);

    let err = assert_err!(
        dispatcher
            .dispatch_tool("list_executions", args(json!({"status": "pending"})))
            .await
    );
    assert_eq!(err.error_code(), ErrorCode::InvalidParams);
    assert_eq!(err.field(), Some("status"));

    let err = assert_err!(
        dispatcher
            .dispatch_tool("create_workflow", args(json!({"name": "n", "active": "yes"})))
            .await
    );
    assert_eq!(err.field(), Some("active"));

    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_round_trip_for_every_tool() {
    let document = json!({
        "id": "x",
        "count": 3,
        "ratio": 0.5,
        "tags": ["a", "b"],
        "nested": {"ok": true, "none": null}
    });

    let mut backend = StubBackend::new();
    for operation in BackendOperation::ALL {
        backend = backend.with_response(operation, document.clone());
    }
    let backend = Arc::new(backend);
    let dispatcher = dispatcher(&backend);

    for tool in dispatcher.list_tools() {
        let arguments = match tool.name.as_str() {
            "create_workflow" => json!({"name": "n"}),
            "create_connection" => json!({"appKey": "a", "name": "n", "credentials": {}}),
            name if name.ends_with("_workflow") => json!({"workflowId": "1"}),
            _ => json!({}),
        };
        let result = dispatcher
            .dispatch_tool(&tool.name, args(arguments))
            .await
            .unwrap();
        assert_eq!(parsed(&result), document, "{}", tool.name);
    }
}

#[tokio::test]
async fn test_whole_float_limit_reaches_backend() {
    let backend = Arc::new(StubBackend::new());
    let result = dispatcher(&backend)
        .dispatch_tool("list_workflows", args(json!({"limit": 5.0})))
        .await;
    assert_ok!(result);
    assert_eq!(backend.calls()[0].arguments, json!({"limit": 5}));

    let err = assert_err!(
        dispatcher(&backend)
            .dispatch_tool("list_executions", args(json!({"limit": 2.5})))
            .await
    );
    assert_eq!(err.error_code(), ErrorCode::InvalidParams);
    assert_eq!(err.field(), Some("limit"));
    assert_eq!(backend.calls().len(), 1);
}
