//! Request dispatch and routing
//!
//! Maps a tool name or resource URI to a typed backend call through fixed
//! routing tables, invokes it, and wraps the outcome into protocol shapes.
//! The dispatcher holds no mutable state and is safe to call concurrently.

use std::sync::Arc;

use automatisch_client::{
    AppQuery, AutomatischBackend, BackendOperation, ClientResult, ConnectionQuery,
    ExecutionQuery, NewConnection, NewWorkflow, WorkflowPatch, WorkflowQuery,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{DispatchError, DispatchResult};
use crate::resources::{
    self, ReadResult, ResourceContent, ResourceDefinition, APPS_URI, CONNECTIONS_URI,
    JSON_MIME_TYPE, RECENT_EXECUTIONS_URI, WORKFLOWS_URI,
};
use crate::tools::{self, apps, connections, executions, workflows, CallResult, ToolDefinition};
use crate::validation::validate_arguments;

/// Tool call arguments
pub type Arguments = Map<String, Value>;

type ShapeFn = fn(Arguments) -> DispatchResult<BackendCall>;

/// Routing entry for one tool
pub struct ToolRoute {
    pub tool: &'static str,
    pub operation: BackendOperation,
    shape: ShapeFn,
}

impl ToolRoute {
    /// Turn validated arguments into a backend call
    pub fn shape(&self, arguments: Arguments) -> DispatchResult<BackendCall> {
        (self.shape)(arguments)
    }
}

/// Routing entry for one resource
pub struct ResourceRoute {
    pub uri: &'static str,
    pub operation: BackendOperation,
    call: fn() -> BackendCall,
}

impl ResourceRoute {
    pub fn call(&self) -> BackendCall {
        (self.call)()
    }
}

/// Tool name → backend operation
pub const TOOL_ROUTES: &[ToolRoute] = &[
    ToolRoute {
        tool: workflows::LIST_WORKFLOWS,
        operation: BackendOperation::ListWorkflows,
        shape: shape_list_workflows,
    },
    ToolRoute {
        tool: workflows::GET_WORKFLOW,
        operation: BackendOperation::GetWorkflow,
        shape: shape_get_workflow,
    },
    ToolRoute {
        tool: workflows::CREATE_WORKFLOW,
        operation: BackendOperation::CreateWorkflow,
        shape: shape_create_workflow,
    },
    ToolRoute {
        tool: workflows::UPDATE_WORKFLOW,
        operation: BackendOperation::UpdateWorkflow,
        shape: shape_update_workflow,
    },
    ToolRoute {
        tool: workflows::DELETE_WORKFLOW,
        operation: BackendOperation::DeleteWorkflow,
        shape: shape_delete_workflow,
    },
    ToolRoute {
        tool: connections::LIST_CONNECTIONS,
        operation: BackendOperation::ListConnections,
        shape: shape_list_connections,
    },
    ToolRoute {
        tool: connections::CREATE_CONNECTION,
        operation: BackendOperation::CreateConnection,
        shape: shape_create_connection,
    },
    ToolRoute {
        tool: executions::LIST_EXECUTIONS,
        operation: BackendOperation::ListExecutions,
        shape: shape_list_executions,
    },
    ToolRoute {
        tool: apps::GET_AVAILABLE_APPS,
        operation: BackendOperation::ListApps,
        shape: shape_get_available_apps,
    },
    ToolRoute {
        tool: workflows::TEST_WORKFLOW,
        operation: BackendOperation::TestWorkflow,
        shape: shape_test_workflow,
    },
];

/// Resource URI → overview operation
pub const RESOURCE_ROUTES: &[ResourceRoute] = &[
    ResourceRoute {
        uri: WORKFLOWS_URI,
        operation: BackendOperation::WorkflowsOverview,
        call: || BackendCall::WorkflowsOverview,
    },
    ResourceRoute {
        uri: CONNECTIONS_URI,
        operation: BackendOperation::ConnectionsOverview,
        call: || BackendCall::ConnectionsOverview,
    },
    ResourceRoute {
        uri: APPS_URI,
        operation: BackendOperation::ListApps,
        call: || BackendCall::ListApps(AppQuery::default()),
    },
    ResourceRoute {
        uri: RECENT_EXECUTIONS_URI,
        operation: BackendOperation::RecentExecutions,
        call: || BackendCall::RecentExecutions,
    },
];

pub fn tool_route(name: &str) -> Option<&'static ToolRoute> {
    TOOL_ROUTES.iter().find(|route| route.tool == name)
}

pub fn resource_route(uri: &str) -> Option<&'static ResourceRoute> {
    RESOURCE_ROUTES.iter().find(|route| route.uri == uri)
}

/// A fully shaped backend invocation
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    ListWorkflows(WorkflowQuery),
    GetWorkflow { workflow_id: String },
    CreateWorkflow(NewWorkflow),
    UpdateWorkflow { workflow_id: String, changes: WorkflowPatch },
    DeleteWorkflow { workflow_id: String },
    ListConnections(ConnectionQuery),
    CreateConnection(NewConnection),
    ListExecutions(ExecutionQuery),
    ListApps(AppQuery),
    TestWorkflow { workflow_id: String, test_data: Value },
    WorkflowsOverview,
    ConnectionsOverview,
    RecentExecutions,
}

impl BackendCall {
    pub fn operation(&self) -> BackendOperation {
        match self {
            BackendCall::ListWorkflows(_) => BackendOperation::ListWorkflows,
            BackendCall::GetWorkflow { .. } => BackendOperation::GetWorkflow,
            BackendCall::CreateWorkflow(_) => BackendOperation::CreateWorkflow,
            BackendCall::UpdateWorkflow { .. } => BackendOperation::UpdateWorkflow,
            BackendCall::DeleteWorkflow { .. } => BackendOperation::DeleteWorkflow,
            BackendCall::ListConnections(_) => BackendOperation::ListConnections,
            BackendCall::CreateConnection(_) => BackendOperation::CreateConnection,
            BackendCall::ListExecutions(_) => BackendOperation::ListExecutions,
            BackendCall::ListApps(_) => BackendOperation::ListApps,
            BackendCall::TestWorkflow { .. } => BackendOperation::TestWorkflow,
            BackendCall::WorkflowsOverview => BackendOperation::WorkflowsOverview,
            BackendCall::ConnectionsOverview => BackendOperation::ConnectionsOverview,
            BackendCall::RecentExecutions => BackendOperation::RecentExecutions,
        }
    }

    /// Execute against a backend
    pub async fn invoke(self, backend: &dyn AutomatischBackend) -> ClientResult<Value> {
        match self {
            BackendCall::ListWorkflows(query) => backend.list_workflows(query).await,
            BackendCall::GetWorkflow { workflow_id } => backend.get_workflow(&workflow_id).await,
            BackendCall::CreateWorkflow(workflow) => backend.create_workflow(workflow).await,
            BackendCall::UpdateWorkflow { workflow_id, changes } => {
                backend.update_workflow(&workflow_id, changes).await
            }
            BackendCall::DeleteWorkflow { workflow_id } => backend.delete_workflow(&workflow_id).await,
            BackendCall::ListConnections(query) => backend.list_connections(query).await,
            BackendCall::CreateConnection(connection) => backend.create_connection(connection).await,
            BackendCall::ListExecutions(query) => backend.list_executions(query).await,
            BackendCall::ListApps(query) => backend.available_apps(query).await,
            BackendCall::TestWorkflow { workflow_id, test_data } => {
                backend.test_workflow(&workflow_id, test_data).await
            }
            BackendCall::WorkflowsOverview => backend.workflows_overview().await,
            BackendCall::ConnectionsOverview => backend.connections_overview().await,
            BackendCall::RecentExecutions => backend.recent_executions().await,
        }
    }
}

const WORKFLOW_ID: &str = "workflowId";
const TEST_DATA: &str = "testData";

fn from_arguments<T: DeserializeOwned>(arguments: Arguments) -> DispatchResult<T> {
    serde_json::from_value(Value::Object(arguments.clone())).map_err(|e| {
        let field = rejected_field::<T>(&arguments);
        DispatchError::invalid(field.as_deref(), e.to_string())
    })
}

/// The argument whose removal lets the rest deserialize
fn rejected_field<T: DeserializeOwned>(arguments: &Arguments) -> Option<String> {
    arguments.keys().find_map(|key| {
        let mut rest = arguments.clone();
        rest.remove(key);
        serde_json::from_value::<T>(Value::Object(rest))
            .is_ok()
            .then(|| key.clone())
    })
}

fn take_string(arguments: &mut Arguments, field: &str) -> DispatchResult<String> {
    match arguments.remove(field) {
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(DispatchError::invalid(
            Some(field),
            format!("argument `{}` must be a string", field),
        )),
        None => Err(DispatchError::missing(field)),
    }
}

fn shape_list_workflows(arguments: Arguments) -> DispatchResult<BackendCall> {
    Ok(BackendCall::ListWorkflows(from_arguments(arguments)?))
}

fn shape_get_workflow(mut arguments: Arguments) -> DispatchResult<BackendCall> {
    Ok(BackendCall::GetWorkflow {
        workflow_id: take_string(&mut arguments, WORKFLOW_ID)?,
    })
}

fn shape_create_workflow(arguments: Arguments) -> DispatchResult<BackendCall> {
    Ok(BackendCall::CreateWorkflow(from_arguments(arguments)?))
}

fn shape_update_workflow(mut arguments: Arguments) -> DispatchResult<BackendCall> {
    let workflow_id = take_string(&mut arguments, WORKFLOW_ID)?;
    Ok(BackendCall::UpdateWorkflow {
        workflow_id,
        changes: arguments,
    })
}

fn shape_delete_workflow(mut arguments: Arguments) -> DispatchResult<BackendCall> {
    Ok(BackendCall::DeleteWorkflow {
        workflow_id: take_string(&mut arguments, WORKFLOW_ID)?,
    })
}

fn shape_list_connections(arguments: Arguments) -> DispatchResult<BackendCall> {
    Ok(BackendCall::ListConnections(from_arguments(arguments)?))
}

fn shape_create_connection(arguments: Arguments) -> DispatchResult<BackendCall> {
    Ok(BackendCall::CreateConnection(from_arguments(arguments)?))
}

fn shape_list_executions(arguments: Arguments) -> DispatchResult<BackendCall> {
    Ok(BackendCall::ListExecutions(from_arguments(arguments)?))
}

fn shape_get_available_apps(arguments: Arguments) -> DispatchResult<BackendCall> {
    Ok(BackendCall::ListApps(from_arguments(arguments)?))
}

fn shape_test_workflow(mut arguments: Arguments) -> DispatchResult<BackendCall> {
    let workflow_id = take_string(&mut arguments, WORKFLOW_ID)?;
    let test_data = arguments
        .remove(TEST_DATA)
        .unwrap_or_else(|| Value::Object(Map::new()));
    Ok(BackendCall::TestWorkflow {
        workflow_id,
        test_data,
    })
}

/// Validate and shape a call without touching the backend
pub fn prepare_tool_call(route: &ToolRoute, mut arguments: Arguments) -> DispatchResult<BackendCall> {
    // Explicit nulls mean "not provided"
    arguments.retain(|_, value| !value.is_null());

    validate_arguments(route.tool, &arguments)?;
    route.shape(arguments)
}

/// Routes protocol requests to the Automatisch backend
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn AutomatischBackend>,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn AutomatischBackend>) -> Self {
        Self { backend }
    }

    /// The tool catalog
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        tools::get_tool_definitions()
    }

    /// The resource catalog
    pub fn list_resources(&self) -> Vec<ResourceDefinition> {
        resources::get_resource_definitions()
    }

    /// Call a tool by name
    pub async fn dispatch_tool(&self, name: &str, arguments: Arguments) -> DispatchResult<CallResult> {
        let route = tool_route(name).ok_or_else(|| {
            tracing::debug!(tool = name, "Unknown tool requested");
            DispatchError::UnknownTool(name.to_string())
        })?;

        let span = tracing::info_span!(
            "tool_call",
            call_id = %Uuid::new_v4(),
            tool = route.tool,
            operation = %route.operation,
        );

        self.call_tool(route, arguments).instrument(span).await
    }

    /// Read a resource by URI
    pub async fn read_resource(&self, uri: &str) -> DispatchResult<ReadResult> {
        let route = resource_route(uri).ok_or_else(|| {
            tracing::debug!(uri, "Unknown resource requested");
            DispatchError::UnknownResource(uri.to_string())
        })?;

        let span = tracing::info_span!(
            "resource_read",
            call_id = %Uuid::new_v4(),
            uri = route.uri,
            operation = %route.operation,
        );

        self.read(route, uri).instrument(span).await
    }

    async fn call_tool(&self, route: &ToolRoute, arguments: Arguments) -> DispatchResult<CallResult> {
        let call = prepare_tool_call(route, arguments).inspect_err(|e| {
            tracing::debug!(error = %e, "Rejected tool arguments");
        })?;

        let value = self.invoke(call).await?;
        tracing::debug!("Tool call completed");

        CallResult::json(&value).map_err(|e| DispatchError::BackendFailure {
            operation: route.operation,
            message: format!("response could not be encoded: {}", e),
        })
    }

    async fn read(&self, route: &ResourceRoute, uri: &str) -> DispatchResult<ReadResult> {
        let value = self.invoke(route.call()).await?;
        let text = serde_json::to_string_pretty(&value).map_err(|e| DispatchError::BackendFailure {
            operation: route.operation,
            message: format!("response could not be encoded: {}", e),
        })?;

        Ok(ReadResult {
            contents: vec![ResourceContent {
                uri: uri.to_string(),
                mime_type: JSON_MIME_TYPE.to_string(),
                text,
            }],
        })
    }

    async fn invoke(&self, call: BackendCall) -> DispatchResult<Value> {
        let operation = call.operation();
        call.invoke(self.backend.as_ref()).await.map_err(|e| {
            tracing::warn!(operation = %operation, error = %e, "Backend operation failed");
            DispatchError::backend(operation, &e)
        })
    }
}
