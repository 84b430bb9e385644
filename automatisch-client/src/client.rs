//! Capability interface for the Automatisch API

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientResult;
use crate::model::{
    AppQuery, ConnectionQuery, ExecutionQuery, NewConnection, NewWorkflow, WorkflowPatch,
    WorkflowQuery,
};

/// Operations offered by an Automatisch instance
///
/// Every method returns the parsed JSON document the API produced. A lookup
/// that finds nothing answers `Value::Null` rather than an error.
#[async_trait]
pub trait AutomatischBackend: Send + Sync {
    /// List workflows
    async fn list_workflows(&self, query: WorkflowQuery) -> ClientResult<Value>;

    /// Get a workflow by id
    async fn get_workflow(&self, workflow_id: &str) -> ClientResult<Value>;

    /// Create a workflow
    async fn create_workflow(&self, workflow: NewWorkflow) -> ClientResult<Value>;

    /// Update a workflow
    async fn update_workflow(&self, workflow_id: &str, changes: WorkflowPatch) -> ClientResult<Value>;

    /// Delete a workflow
    async fn delete_workflow(&self, workflow_id: &str) -> ClientResult<Value>;

    /// List app connections
    async fn list_connections(&self, query: ConnectionQuery) -> ClientResult<Value>;

    /// Create an app connection
    async fn create_connection(&self, connection: NewConnection) -> ClientResult<Value>;

    /// List workflow executions
    async fn list_executions(&self, query: ExecutionQuery) -> ClientResult<Value>;

    /// Catalog of available apps
    async fn available_apps(&self, query: AppQuery) -> ClientResult<Value>;

    /// Run a workflow against sample data
    async fn test_workflow(&self, workflow_id: &str, test_data: Value) -> ClientResult<Value>;

    /// Summary of all workflows and their status
    async fn workflows_overview(&self) -> ClientResult<Value>;

    /// Summary of configured app connections
    async fn connections_overview(&self) -> ClientResult<Value>;

    /// Most recent workflow executions
    async fn recent_executions(&self) -> ClientResult<Value>;
}
