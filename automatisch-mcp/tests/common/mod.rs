//! Shared test fixtures

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use automatisch_client::{
    AppQuery, AutomatischBackend, BackendOperation, ClientError, ClientResult, ConnectionQuery,
    ExecutionQuery, NewConnection, NewWorkflow, WorkflowPatch, WorkflowQuery,
};
use automatisch_mcp::{Dispatcher, McpServer};
use serde_json::{json, Value};
use tokio::sync::Notify;

/// Workflow id whose lookup waits until another backend call has happened
pub const BLOCKED_WORKFLOW: &str = "blocked";

/// One backend invocation as seen by the stub
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub operation: BackendOperation,
    pub arguments: Value,
}

/// In-memory backend that records calls and answers canned documents
#[derive(Default)]
pub struct StubBackend {
    calls: Mutex<Vec<RecordedCall>>,
    responses: HashMap<BackendOperation, Value>,
    failure: Option<String>,
    gate: Arc<Notify>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, operation: BackendOperation, response: Value) -> Self {
        self.responses.insert(operation, response);
        self
    }

    /// Every call fails with a transport error carrying `message`
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn operations(&self) -> Vec<BackendOperation> {
        self.calls().into_iter().map(|c| c.operation).collect()
    }

    async fn answer(&self, operation: BackendOperation, arguments: Value) -> ClientResult<Value> {
        let blocked = operation == BackendOperation::GetWorkflow
            && arguments["workflowId"] == json!(BLOCKED_WORKFLOW);

        self.calls.lock().unwrap().push(RecordedCall {
            operation,
            arguments,
        });

        if blocked {
            self.gate.notified().await;
        } else {
            self.gate.notify_one();
        }

        if let Some(message) = &self.failure {
            return Err(ClientError::Transport(message.clone()));
        }

        Ok(self
            .responses
            .get(&operation)
            .cloned()
            .unwrap_or_else(|| json!({"operation": operation.as_str()})))
    }
}

#[async_trait]
impl AutomatischBackend for StubBackend {
    async fn list_workflows(&self, query: WorkflowQuery) -> ClientResult<Value> {
        self.answer(BackendOperation::ListWorkflows, serde_json::to_value(query)?)
            .await
    }

    async fn get_workflow(&self, workflow_id: &str) -> ClientResult<Value> {
        self.answer(BackendOperation::GetWorkflow, json!({"workflowId": workflow_id}))
            .await
    }

    async fn create_workflow(&self, workflow: NewWorkflow) -> ClientResult<Value> {
        self.answer(BackendOperation::CreateWorkflow, serde_json::to_value(workflow)?)
            .await
    }

    async fn update_workflow(&self, workflow_id: &str, changes: WorkflowPatch) -> ClientResult<Value> {
        self.answer(
            BackendOperation::UpdateWorkflow,
            json!({"workflowId": workflow_id, "changes": changes}),
        )
        .await
    }

    async fn delete_workflow(&self, workflow_id: &str) -> ClientResult<Value> {
        self.answer(BackendOperation::DeleteWorkflow, json!({"workflowId": workflow_id}))
            .await
    }

    async fn list_connections(&self, query: ConnectionQuery) -> ClientResult<Value> {
        self.answer(BackendOperation::ListConnections, serde_json::to_value(query)?)
            .await
    }

    async fn create_connection(&self, connection: NewConnection) -> ClientResult<Value> {
        self.answer(BackendOperation::CreateConnection, serde_json::to_value(connection)?)
            .await
    }

    async fn list_executions(&self, query: ExecutionQuery) -> ClientResult<Value> {
        self.answer(BackendOperation::ListExecutions, serde_json::to_value(query)?)
            .await
    }

    async fn available_apps(&self, query: AppQuery) -> ClientResult<Value> {
        self.answer(BackendOperation::ListApps, serde_json::to_value(query)?)
            .await
    }

    async fn test_workflow(&self, workflow_id: &str, test_data: Value) -> ClientResult<Value> {
        self.answer(
            BackendOperation::TestWorkflow,
            json!({"workflowId": workflow_id, "testData": test_data}),
        )
        .await
    }

    async fn workflows_overview(&self) -> ClientResult<Value> {
        self.answer(BackendOperation::WorkflowsOverview, Value::Null).await
    }

    async fn connections_overview(&self) -> ClientResult<Value> {
        self.answer(BackendOperation::ConnectionsOverview, Value::Null).await
    }

    async fn recent_executions(&self) -> ClientResult<Value> {
        self.answer(BackendOperation::RecentExecutions, Value::Null).await
    }
}

pub fn dispatcher(backend: &Arc<StubBackend>) -> Dispatcher {
    Dispatcher::new(backend.clone())
}

pub fn server(backend: &Arc<StubBackend>) -> Arc<McpServer> {
    Arc::new(McpServer::new(dispatcher(backend)))
}

pub fn args(value: Value) -> serde_json::Map<String, Value> {
    value.as_object().cloned().expect("arguments must be an object")
}
