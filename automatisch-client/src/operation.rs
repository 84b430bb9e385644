//! Backend operation keys

use std::fmt;

use serde::{Deserialize, Serialize};

/// One named operation of the Automatisch API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendOperation {
    ListWorkflows,
    GetWorkflow,
    CreateWorkflow,
    UpdateWorkflow,
    DeleteWorkflow,
    TestWorkflow,
    ListConnections,
    CreateConnection,
    ListExecutions,
    ListApps,
    WorkflowsOverview,
    ConnectionsOverview,
    RecentExecutions,
}

impl BackendOperation {
    /// All operations, in declaration order
    pub const ALL: [BackendOperation; 13] = [
        BackendOperation::ListWorkflows,
        BackendOperation::GetWorkflow,
        BackendOperation::CreateWorkflow,
        BackendOperation::UpdateWorkflow,
        BackendOperation::DeleteWorkflow,
        BackendOperation::TestWorkflow,
        BackendOperation::ListConnections,
        BackendOperation::CreateConnection,
        BackendOperation::ListExecutions,
        BackendOperation::ListApps,
        BackendOperation::WorkflowsOverview,
        BackendOperation::ConnectionsOverview,
        BackendOperation::RecentExecutions,
    ];

    /// Stable key used in logs and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendOperation::ListWorkflows => "workflows.list",
            BackendOperation::GetWorkflow => "workflows.get",
            BackendOperation::CreateWorkflow => "workflows.create",
            BackendOperation::UpdateWorkflow => "workflows.update",
            BackendOperation::DeleteWorkflow => "workflows.delete",
            BackendOperation::TestWorkflow => "workflows.test",
            BackendOperation::ListConnections => "connections.list",
            BackendOperation::CreateConnection => "connections.create",
            BackendOperation::ListExecutions => "executions.list",
            BackendOperation::ListApps => "apps.list",
            BackendOperation::WorkflowsOverview => "workflows.overview",
            BackendOperation::ConnectionsOverview => "connections.overview",
            BackendOperation::RecentExecutions => "executions.recent",
        }
    }

    /// Whether this is an aggregated overview used for resource reads
    pub fn is_overview(&self) -> bool {
        matches!(
            self,
            BackendOperation::WorkflowsOverview
                | BackendOperation::ConnectionsOverview
                | BackendOperation::RecentExecutions
        )
    }
}

impl fmt::Display for BackendOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
