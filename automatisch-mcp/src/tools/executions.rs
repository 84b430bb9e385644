//! Execution tools

use serde_json::json;

use super::ToolDefinition;

pub const LIST_EXECUTIONS: &str = "list_executions";

/// list_executions tool definition
pub fn list_executions_tool() -> ToolDefinition {
    ToolDefinition {
        name: LIST_EXECUTIONS.to_string(),
        description: "List workflow executions".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "workflowId": {
                    "type": "string",
                    "description": "Filter by workflow ID"
                },
                "status": {
                    "type": "string",
                    "enum": ["success", "failure", "running"],
                    "description": "Filter by execution status"
                },
                "limit": {
                    "type": "number",
                    "description": "Limit number of results"
                }
            }
        }),
    }
}
