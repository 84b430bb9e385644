//! Workflow tools

use serde_json::json;

use super::ToolDefinition;

pub const LIST_WORKFLOWS: &str = "list_workflows";
pub const GET_WORKFLOW: &str = "get_workflow";
pub const CREATE_WORKFLOW: &str = "create_workflow";
pub const UPDATE_WORKFLOW: &str = "update_workflow";
pub const DELETE_WORKFLOW: &str = "delete_workflow";
pub const TEST_WORKFLOW: &str = "test_workflow";

/// list_workflows tool definition
pub fn list_workflows_tool() -> ToolDefinition {
    ToolDefinition {
        name: LIST_WORKFLOWS.to_string(),
        description: "List all workflows in Automatisch".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "status": {
                    "type": "string",
                    "enum": ["active", "inactive", "all"],
                    "description": "Filter workflows by status"
                },
                "limit": {
                    "type": "number",
                    "description": "Limit number of results"
                }
            }
        }),
    }
}

/// get_workflow tool definition
pub fn get_workflow_tool() -> ToolDefinition {
    ToolDefinition {
        name: GET_WORKFLOW.to_string(),
        description: "Get detailed information about a specific workflow".to_string(),
        input_schema: json!({
            "type": "object",
            "required": ["workflowId"],
            "properties": {
                "workflowId": {
                    "type": "string",
                    "description": "Workflow ID to retrieve"
                }
            }
        }),
    }
}

/// create_workflow tool definition
pub fn create_workflow_tool() -> ToolDefinition {
    ToolDefinition {
        name: CREATE_WORKFLOW.to_string(),
        description: "Create a new workflow".to_string(),
        input_schema: json!({
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Workflow name"
                },
                "description": {
                    "type": "string",
                    "description": "Workflow description"
                },
                "active": {
                    "type": "boolean",
                    "description": "Whether workflow should be active",
                    "default": false
                }
            }
        }),
    }
}

/// update_workflow tool definition
pub fn update_workflow_tool() -> ToolDefinition {
    ToolDefinition {
        name: UPDATE_WORKFLOW.to_string(),
        description: "Update an existing workflow".to_string(),
        input_schema: json!({
            "type": "object",
            "required": ["workflowId"],
            "properties": {
                "workflowId": {
                    "type": "string",
                    "description": "Workflow ID to update"
                },
                "name": {
                    "type": "string",
                    "description": "New workflow name"
                },
                "description": {
                    "type": "string",
                    "description": "New workflow description"
                },
                "active": {
                    "type": "boolean",
                    "description": "Workflow active status"
                }
            }
        }),
    }
}

/// delete_workflow tool definition
pub fn delete_workflow_tool() -> ToolDefinition {
    ToolDefinition {
        name: DELETE_WORKFLOW.to_string(),
        description: "Delete a workflow".to_string(),
        input_schema: json!({
            "type": "object",
            "required": ["workflowId"],
            "properties": {
                "workflowId": {
                    "type": "string",
                    "description": "Workflow ID to delete"
                }
            }
        }),
    }
}

/// test_workflow tool definition
pub fn test_workflow_tool() -> ToolDefinition {
    ToolDefinition {
        name: TEST_WORKFLOW.to_string(),
        description: "Test a workflow with sample data".to_string(),
        input_schema: json!({
            "type": "object",
            "required": ["workflowId"],
            "properties": {
                "workflowId": {
                    "type": "string",
                    "description": "Workflow ID to test"
                },
                "testData": {
                    "type": "object",
                    "description": "Sample data for testing"
                }
            }
        }),
    }
}
